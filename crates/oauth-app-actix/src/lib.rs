//! Actix-web HTTP surface for an OAuth App.
//!
//! [`OAuthAppMiddleware`] answers the login, callback, token and grant routes
//! under a path prefix and forwards every other request to the wrapped service.
//! Domain types live in `oauth-app-core`; the collaborator trait in `oauth-app-ports`.

pub mod handlers;
pub mod middleware;
pub mod request;

pub use handlers::unknown_route;
pub use middleware::{OAuthAppMiddleware, OAuthAppMiddlewareService};
pub use request::ParsedRequest;
