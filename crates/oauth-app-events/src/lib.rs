//! Lifecycle events for OAuth App operations.
//!
//! [`EmittingApp`] wraps any collaborator and publishes `token.*` and
//! `authorization.*` events through an [`EventBus`]. The bundled bus is an
//! actix actor that fans envelopes out to [`EventPlugin`]s.

pub mod actix_bus;
pub mod bus;
pub mod emitting_app;
pub mod envelope;
pub mod event_actor;
pub mod event_types;
pub mod filter;
pub mod plugins;

pub use actix_bus::*;
pub use bus::*;
pub use emitting_app::*;
pub use envelope::*;
pub use event_types::*;
pub use filter::*;
pub use plugins::*;
