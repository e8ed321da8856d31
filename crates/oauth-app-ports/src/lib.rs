//! Integration ports for the OAuth App adapter.
//!
//! Implement [`OAuthApp`] in your own crate to put any OAuth client behind the
//! HTTP middleware without forking.

pub mod app;

pub use app::*;
