use crate::OAuthEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A transport-ready wrapper around an [`OAuthEvent`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event: OAuthEvent,

    /// Correlation identifier for the producing request.
    pub correlation_id: String,

    /// Logical producer identifier (service / subsystem).
    pub producer: String,

    pub produced_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,
}

impl EventEnvelope {
    pub fn new(event: OAuthEvent, producer: impl Into<String>) -> Self {
        Self {
            event,
            correlation_id: uuid::Uuid::new_v4().to_string(),
            producer: producer.into(),
            produced_at: Utc::now(),
            attributes: HashMap::new(),
        }
    }

    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = correlation_id.into();
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
