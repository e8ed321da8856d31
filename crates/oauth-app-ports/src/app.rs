use async_trait::async_trait;
use std::sync::Arc;

use oauth_app_core::{
    AuthorizationUrlOptions, CreateTokenOptions, OAuthAppError, TokenAuthentication, TokenInfo,
};

/// The external collaborator that owns all OAuth logic.
///
/// The middleware calls exactly one of these methods per handled request and
/// maps any `Err` to a 400 response carrying the error message.
#[async_trait]
pub trait OAuthApp: Send + Sync {
    /// Build the provider URL the user is redirected to on `GET {prefix}/login`.
    fn get_authorization_url(
        &self,
        options: AuthorizationUrlOptions,
    ) -> Result<String, OAuthAppError>;

    /// Exchange an authorization code (plus its state) for a token.
    async fn create_token(
        &self,
        options: CreateTokenOptions,
    ) -> Result<TokenAuthentication, OAuthAppError>;

    async fn check_token(&self, token: &str) -> Result<TokenInfo, OAuthAppError>;

    /// Invalidate `token` and return the replacement.
    async fn reset_token(&self, token: &str) -> Result<TokenInfo, OAuthAppError>;

    async fn delete_token(&self, token: &str) -> Result<(), OAuthAppError>;

    /// Revoke the whole grant (every token) the user gave the app.
    async fn delete_authorization(&self, token: &str) -> Result<(), OAuthAppError>;
}

pub type DynOAuthApp = Arc<dyn OAuthApp>;
