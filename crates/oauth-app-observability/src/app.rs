use async_trait::async_trait;
use std::future::Future;
use tracing::{field, Instrument};

use oauth_app_core::{
    token_prefix, AuthorizationUrlOptions, CreateTokenOptions, OAuthAppError,
    TokenAuthentication, TokenInfo,
};
use oauth_app_ports::{DynOAuthApp, OAuthApp};

/// A thin wrapper around a `DynOAuthApp` that creates a tracing span for each
/// collaborator call and logs failures.
///
/// Tokens only ever appear as a short prefix.
pub struct ObservedApp {
    inner: DynOAuthApp,
}

impl ObservedApp {
    pub fn new(inner: DynOAuthApp) -> Self {
        Self { inner }
    }

    fn span(operation: &'static str, token: Option<&str>) -> tracing::Span {
        tracing::info_span!(
            "oauth_app",
            operation,
            token_prefix = %token.map(token_prefix).unwrap_or_default(),
            outcome = field::Empty
        )
    }

    async fn observe<T, F>(span: tracing::Span, fut: F) -> Result<T, OAuthAppError>
    where
        F: Future<Output = Result<T, OAuthAppError>>,
    {
        let recorder = span.clone();
        async move {
            let result = fut.await;
            match &result {
                Ok(_) => {
                    recorder.record("outcome", "ok");
                }
                Err(err) => {
                    recorder.record("outcome", "error");
                    tracing::warn!(error = %err, "oauth app call failed");
                }
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl OAuthApp for ObservedApp {
    fn get_authorization_url(
        &self,
        options: AuthorizationUrlOptions,
    ) -> Result<String, OAuthAppError> {
        let span = Self::span("get_authorization_url", None);
        let _entered = span.enter();
        let result = self.inner.get_authorization_url(options);
        match &result {
            Ok(_) => {
                span.record("outcome", "ok");
            }
            Err(err) => {
                span.record("outcome", "error");
                tracing::warn!(error = %err, "oauth app call failed");
            }
        }
        result
    }

    async fn create_token(
        &self,
        options: CreateTokenOptions,
    ) -> Result<TokenAuthentication, OAuthAppError> {
        let span = Self::span("create_token", None);
        Self::observe(span, self.inner.create_token(options)).await
    }

    async fn check_token(&self, token: &str) -> Result<TokenInfo, OAuthAppError> {
        let span = Self::span("check_token", Some(token));
        Self::observe(span, self.inner.check_token(token)).await
    }

    async fn reset_token(&self, token: &str) -> Result<TokenInfo, OAuthAppError> {
        let span = Self::span("reset_token", Some(token));
        Self::observe(span, self.inner.reset_token(token)).await
    }

    async fn delete_token(&self, token: &str) -> Result<(), OAuthAppError> {
        let span = Self::span("delete_token", Some(token));
        Self::observe(span, self.inner.delete_token(token)).await
    }

    async fn delete_authorization(&self, token: &str) -> Result<(), OAuthAppError> {
        let span = Self::span("delete_authorization", Some(token));
        Self::observe(span, self.inner.delete_authorization(token)).await
    }
}
