use actix_web::{
    dev::Payload,
    http::header::AUTHORIZATION,
    web::BytesMut,
    HttpRequest,
};
use futures::StreamExt;
use serde_json::{Map, Value};
use std::collections::HashMap;
use url::form_urlencoded;

use oauth_app_core::{parse_authorization_token, OAuthAppError, Route};

/// The parts of a request the route handlers look at.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRequest {
    /// Token from `Authorization: token <t>` (or `bearer <t>`).
    pub token: Option<String>,
    /// Decoded query parameters; the last occurrence of a key wins.
    pub query: HashMap<String, String>,
    /// JSON object body. Empty unless the route reads a body.
    pub body: Map<String, Value>,
}

impl ParsedRequest {
    pub async fn parse(
        route: Route,
        req: &HttpRequest,
        payload: &mut Payload,
        max_body_bytes: usize,
    ) -> Result<Self, OAuthAppError> {
        let token = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_authorization_token);

        let query = parse_query(req.query_string());

        let body = if route.reads_body() {
            let raw = read_body(payload, max_body_bytes).await?;
            parse_json_object(&raw)?
        } else {
            Map::new()
        };

        Ok(Self { token, query, body })
    }

    /// Query value, with empty strings treated as absent.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// String body field, with empty strings treated as absent.
    pub fn body_str(&self, key: &str) -> Option<&str> {
        self.body
            .get(key)
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
    }
}

fn parse_query(query_string: &str) -> HashMap<String, String> {
    form_urlencoded::parse(query_string.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

async fn read_body(payload: &mut Payload, limit: usize) -> Result<BytesMut, OAuthAppError> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|err| {
            tracing::debug!(error = %err, "failed to read request body");
            OAuthAppError::request_error()
        })?;

        if body.len() + chunk.len() > limit {
            tracing::debug!(limit, "request body exceeds limit");
            return Err(OAuthAppError::request_error());
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

fn parse_json_object(raw: &[u8]) -> Result<Map<String, Value>, OAuthAppError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(OAuthAppError::request_error()),
        Err(err) => {
            tracing::debug!(error = %err, "request body is not valid JSON");
            Err(OAuthAppError::request_error())
        }
    }
}
