use async_trait::async_trait;

use oauth_app_core::{
    AuthorizationUrlOptions, CreateTokenOptions, OAuthAppError, TokenAuthentication, TokenInfo,
};
use oauth_app_ports::{DynOAuthApp, OAuthApp};

use crate::{EventBusHandle, EventEnvelope, EventType, OAuthEvent};

pub const EVENT_PRODUCER: &str = "oauth_app_middleware";

/// Decorates a collaborator with lifecycle events.
///
/// `*.before_deleted` is delivered before the collaborator is called; every
/// other event only after the call succeeded. Publish failures are logged and
/// never change the operation's result.
pub struct EmittingApp {
    inner: DynOAuthApp,
    event_bus: EventBusHandle,
}

impl EmittingApp {
    pub fn new(inner: DynOAuthApp, event_bus: EventBusHandle) -> Self {
        Self { inner, event_bus }
    }

    async fn emit(&self, event: OAuthEvent) {
        let envelope = EventEnvelope::new(event, EVENT_PRODUCER);
        self.event_bus.publish_logged(envelope).await;
    }
}

#[async_trait]
impl OAuthApp for EmittingApp {
    fn get_authorization_url(
        &self,
        options: AuthorizationUrlOptions,
    ) -> Result<String, OAuthAppError> {
        self.inner.get_authorization_url(options)
    }

    async fn create_token(
        &self,
        options: CreateTokenOptions,
    ) -> Result<TokenAuthentication, OAuthAppError> {
        let auth = self.inner.create_token(options).await?;

        self.emit(
            OAuthEvent::new(EventType::TokenCreated, auth.token.clone())
                .with_scopes(auth.scopes.clone()),
        )
        .await;

        Ok(auth)
    }

    async fn check_token(&self, token: &str) -> Result<TokenInfo, OAuthAppError> {
        self.inner.check_token(token).await
    }

    async fn reset_token(&self, token: &str) -> Result<TokenInfo, OAuthAppError> {
        let info = self.inner.reset_token(token).await?;

        // The event carries the replacement token when the collaborator returns one.
        let new_token = info.token().unwrap_or(token).to_string();
        self.emit(
            OAuthEvent::new(EventType::TokenReset, new_token)
                .with_scopes(info.scopes().unwrap_or_default()),
        )
        .await;

        Ok(info)
    }

    async fn delete_token(&self, token: &str) -> Result<(), OAuthAppError> {
        self.emit(OAuthEvent::new(EventType::TokenBeforeDeleted, token))
            .await;

        self.inner.delete_token(token).await?;

        self.emit(OAuthEvent::new(EventType::TokenDeleted, token))
            .await;
        Ok(())
    }

    async fn delete_authorization(&self, token: &str) -> Result<(), OAuthAppError> {
        self.emit(OAuthEvent::new(EventType::AuthorizationBeforeDeleted, token))
            .await;

        self.inner.delete_authorization(token).await?;

        self.emit(OAuthEvent::new(EventType::AuthorizationDeleted, token))
            .await;
        Ok(())
    }
}
