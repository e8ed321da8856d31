//! Framework-agnostic domain types for the OAuth App HTTP adapter.
//!
//! Nothing in this crate performs I/O. The HTTP layer lives in `oauth-app-actix`,
//! the collaborator trait in `oauth-app-ports`.

pub mod authorization;
pub mod models;
pub mod routes;

pub use authorization::*;
pub use models::*;
pub use routes::*;
