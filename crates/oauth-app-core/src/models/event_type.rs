use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle event kinds, named `<resource>.<action>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "token.created")]
    TokenCreated,
    #[serde(rename = "token.reset")]
    TokenReset,
    #[serde(rename = "token.before_deleted")]
    TokenBeforeDeleted,
    #[serde(rename = "token.deleted")]
    TokenDeleted,
    #[serde(rename = "authorization.before_deleted")]
    AuthorizationBeforeDeleted,
    #[serde(rename = "authorization.deleted")]
    AuthorizationDeleted,
}

impl EventType {
    pub const ALL: [EventType; 6] = [
        EventType::TokenCreated,
        EventType::TokenReset,
        EventType::TokenBeforeDeleted,
        EventType::TokenDeleted,
        EventType::AuthorizationBeforeDeleted,
        EventType::AuthorizationDeleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::TokenCreated => "token.created",
            EventType::TokenReset => "token.reset",
            EventType::TokenBeforeDeleted => "token.before_deleted",
            EventType::TokenDeleted => "token.deleted",
            EventType::AuthorizationBeforeDeleted => "authorization.before_deleted",
            EventType::AuthorizationDeleted => "authorization.deleted",
        }
    }

    /// Resource part of the dotted name (`token` or `authorization`).
    pub fn name(&self) -> &'static str {
        match self {
            EventType::TokenCreated
            | EventType::TokenReset
            | EventType::TokenBeforeDeleted
            | EventType::TokenDeleted => "token",
            EventType::AuthorizationBeforeDeleted | EventType::AuthorizationDeleted => {
                "authorization"
            }
        }
    }

    /// Action part of the dotted name (`created`, `before_deleted`, ...).
    pub fn action(&self) -> &'static str {
        let full = self.as_str();
        &full[self.name().len() + 1..]
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| format!("unknown event type: {s}"))
    }
}
