use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Result of a successful code exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAuthentication {
    pub token: String,
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl TokenAuthentication {
    pub fn new(token: impl Into<String>, scopes: Vec<String>) -> Self {
        Self {
            token: token.into(),
            scopes,
        }
    }
}

/// Result of checking or resetting a token.
///
/// Holds the collaborator's JSON object as-is, explicit `null`s included, so it
/// is written back without loss. `token` and `scopes` are read through accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenInfo {
    fields: Map<String, Value>,
}

impl TokenInfo {
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.with_field("token", Value::String(token.into()))
    }

    pub fn with_scopes(self, scopes: Vec<String>) -> Self {
        self.with_field("scopes", scopes)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The `token` field, when it is a string.
    pub fn token(&self) -> Option<&str> {
        self.fields.get("token").and_then(Value::as_str)
    }

    /// The string entries of the `scopes` array, when present.
    pub fn scopes(&self) -> Option<Vec<String>> {
        self.fields.get("scopes").and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
    }
}
