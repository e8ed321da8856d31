use actix::prelude::*;
use std::sync::Arc;

use crate::{EventEnvelope, EventFilter, EventPlugin};

/// Fans envelopes out to plugins, in registration order.
pub struct EventActor {
    plugins: Vec<Arc<dyn EventPlugin>>,
    filter: EventFilter,
}

impl EventActor {
    pub fn new(plugins: Vec<Arc<dyn EventPlugin>>, filter: EventFilter) -> Self {
        Self { plugins, filter }
    }
}

impl Actor for EventActor {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        let names: Vec<&str> = self.plugins.iter().map(|p| p.name()).collect();
        tracing::info!(plugins = ?names, filter = ?self.filter, "event actor started");
    }
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct EmitEvent {
    pub envelope: EventEnvelope,
}

impl Handler<EmitEvent> for EventActor {
    type Result = ResponseFuture<()>;

    fn handle(&mut self, msg: EmitEvent, _: &mut Self::Context) -> Self::Result {
        if !self.filter.should_emit(&msg.envelope.event.event_type) {
            tracing::debug!(
                event_type = %msg.envelope.event.event_type,
                "event filtered out"
            );
            return Box::pin(async {});
        }

        let plugins = self.plugins.clone();
        let envelope = msg.envelope;

        Box::pin(async move {
            for plugin in plugins {
                if let Err(err) = plugin.emit(&envelope).await {
                    tracing::warn!(
                        plugin = plugin.name(),
                        event_type = %envelope.event.event_type,
                        error = %err,
                        "event plugin failed"
                    );
                }
            }
        })
    }
}

#[derive(Message)]
#[rtype(result = "Vec<String>")]
pub struct GetPluginNames;

impl Handler<GetPluginNames> for EventActor {
    type Result = Vec<String>;

    fn handle(&mut self, _msg: GetPluginNames, _: &mut Self::Context) -> Self::Result {
        self.plugins.iter().map(|p| p.name().to_string()).collect()
    }
}
