#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;

use oauth_app_middleware::{
    AuthorizationUrlOptions, CreateTokenOptions, OAuthApp, OAuthAppError, TokenAuthentication,
    TokenInfo,
};

pub const CLIENT_ID: &str = "0123";
pub const GENERATED_STATE: &str = "generatedstate123";

/// A collaborator call, as seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    AuthorizationUrl(AuthorizationUrlOptions),
    CreateToken(CreateTokenOptions),
    CheckToken(String),
    ResetToken(String),
    DeleteToken(String),
    DeleteAuthorization(String),
}

/// An in-process OAuth App that records every call.
///
/// With `failing(msg)` every async operation returns `msg` as its error.
#[derive(Default)]
pub struct MockApp {
    calls: Mutex<Vec<Call>>,
    fail_with: Option<String>,
    authorization_url: Option<String>,
}

impl MockApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Answer `get_authorization_url` with `url` verbatim.
    pub fn with_authorization_url(mut self, url: &str) -> Self {
        self.authorization_url = Some(url.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), OAuthAppError> {
        self.calls.lock().unwrap().push(call);
        match &self.fail_with {
            Some(message) => Err(OAuthAppError::new(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl OAuthApp for MockApp {
    fn get_authorization_url(
        &self,
        options: AuthorizationUrlOptions,
    ) -> Result<String, OAuthAppError> {
        self.record(Call::AuthorizationUrl(options.clone()))?;
        if let Some(url) = &self.authorization_url {
            return Ok(url.clone());
        }

        let mut url = url::Url::parse("https://github.com/login/oauth/authorize")
            .map_err(|e| OAuthAppError::new(e.to_string()))?;
        {
            let mut qp = url.query_pairs_mut();
            qp.append_pair("client_id", CLIENT_ID);
            qp.append_pair(
                "state",
                options.state.as_deref().unwrap_or(GENERATED_STATE),
            );
            if let Some(scopes) = options.scopes.filter(|s| !s.is_empty()) {
                qp.append_pair("scope", &scopes.join(","));
            }
            if let Some(allow_signup) = options.allow_signup {
                qp.append_pair("allow_signup", &allow_signup.to_string());
            }
            if let Some(redirect_url) = &options.redirect_url {
                qp.append_pair("redirect_uri", redirect_url);
            }
        }
        Ok(url.to_string())
    }

    async fn create_token(
        &self,
        options: CreateTokenOptions,
    ) -> Result<TokenAuthentication, OAuthAppError> {
        self.record(Call::CreateToken(options))?;
        Ok(TokenAuthentication::new("token123", Vec::new()))
    }

    async fn check_token(&self, token: &str) -> Result<TokenInfo, OAuthAppError> {
        self.record(Call::CheckToken(token.to_string()))?;
        Ok(TokenInfo::default().with_field("id", 1))
    }

    async fn reset_token(&self, token: &str) -> Result<TokenInfo, OAuthAppError> {
        self.record(Call::ResetToken(token.to_string()))?;
        Ok(TokenInfo::default()
            .with_field("id", 2)
            .with_token("token456")
            .with_scopes(vec!["repo".to_string()]))
    }

    async fn delete_token(&self, token: &str) -> Result<(), OAuthAppError> {
        self.record(Call::DeleteToken(token.to_string()))
    }

    async fn delete_authorization(&self, token: &str) -> Result<(), OAuthAppError> {
        self.record(Call::DeleteAuthorization(token.to_string()))
    }
}

/// Build a test service: the middleware in front of a `/health` route and the
/// `unknown_route` fallback.
macro_rules! init_app {
    ($middleware:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap($middleware)
                .route(
                    "/health",
                    actix_web::web::get().to(|| async {
                        actix_web::HttpResponse::Ok().json(serde_json::json!({
                            "status": "healthy"
                        }))
                    }),
                )
                .default_service(actix_web::web::to(oauth_app_middleware::unknown_route)),
        )
        .await
    };
}
