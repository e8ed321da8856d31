use crate::{
    bus::{EventBus, EventBusError},
    event_actor::{EmitEvent, EventActor},
    EventEnvelope,
};
use actix::prelude::*;
use async_trait::async_trait;

/// An [`EventBus`] backed by an [`EventActor`].
///
/// `publish` resolves once every plugin has seen the envelope, so a caller that
/// awaits two publishes observes them delivered in order.
#[derive(Clone)]
pub struct ActixEventBus {
    addr: Addr<EventActor>,
}

impl ActixEventBus {
    pub fn new(addr: Addr<EventActor>) -> Self {
        Self { addr }
    }

    pub fn addr(&self) -> &Addr<EventActor> {
        &self.addr
    }
}

#[async_trait]
impl EventBus for ActixEventBus {
    async fn publish(&self, envelope: EventEnvelope) -> Result<(), EventBusError> {
        self.addr
            .send(EmitEvent { envelope })
            .await
            .map_err(|err| match err {
                MailboxError::Closed => EventBusError::Unavailable,
                other => EventBusError::Other(other.to_string()),
            })
    }
}
