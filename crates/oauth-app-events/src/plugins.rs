use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use oauth_app_core::token_prefix;

use crate::{EventEnvelope, EventType, OAuthEvent};

/// A sink the [`EventActor`](crate::event_actor::EventActor) delivers events to.
#[async_trait]
pub trait EventPlugin: Send + Sync {
    fn name(&self) -> &str;

    async fn emit(&self, envelope: &EventEnvelope) -> Result<(), String>;
}

/// Keeps the most recent events in memory.
pub struct InMemoryEventLogger {
    capacity: usize,
    events: Mutex<VecDeque<OAuthEvent>>,
}

impl InMemoryEventLogger {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            events: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Snapshot of stored events, oldest first.
    pub fn get_events(&self) -> Vec<OAuthEvent> {
        let guard = self.events.lock().unwrap_or_else(|p| p.into_inner());
        guard.iter().cloned().collect()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clear();
    }
}

#[async_trait]
impl EventPlugin for InMemoryEventLogger {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn emit(&self, envelope: &EventEnvelope) -> Result<(), String> {
        if self.capacity == 0 {
            return Ok(());
        }

        let mut guard = self.events.lock().unwrap_or_else(|p| p.into_inner());
        while guard.len() >= self.capacity {
            guard.pop_front();
        }
        guard.push_back(envelope.event.clone());
        Ok(())
    }
}

/// Writes each event to the `tracing` log. Tokens are truncated.
pub struct TracingEventLogger;

#[async_trait]
impl EventPlugin for TracingEventLogger {
    fn name(&self) -> &str {
        "tracing"
    }

    async fn emit(&self, envelope: &EventEnvelope) -> Result<(), String> {
        let event = &envelope.event;
        tracing::info!(
            event_id = %event.id,
            event_type = %event.event_type,
            name = event.name(),
            action = event.action(),
            token_prefix = %token_prefix(&event.token),
            scopes = %event.scopes.join(","),
            correlation_id = %envelope.correlation_id,
            producer = %envelope.producer,
            "oauth app event"
        );
        Ok(())
    }
}

type Listener = Arc<dyn Fn(&OAuthEvent) + Send + Sync>;

/// Calls a closure for the event types it subscribed to.
pub struct CallbackPlugin {
    name: String,
    types: HashSet<EventType>,
    listener: Listener,
}

impl CallbackPlugin {
    /// Subscribe `listener` to `types`.
    pub fn on<F>(types: impl IntoIterator<Item = EventType>, listener: F) -> Self
    where
        F: Fn(&OAuthEvent) + Send + Sync + 'static,
    {
        let types: HashSet<EventType> = types.into_iter().collect();
        let mut names: Vec<&str> = types.iter().map(EventType::as_str).collect();
        names.sort_unstable();

        Self {
            name: format!("callback[{}]", names.join(",")),
            types,
            listener: Arc::new(listener),
        }
    }
}

#[async_trait]
impl EventPlugin for CallbackPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    async fn emit(&self, envelope: &EventEnvelope) -> Result<(), String> {
        if self.types.contains(&envelope.event.event_type) {
            (self.listener)(&envelope.event);
        }
        Ok(())
    }
}
