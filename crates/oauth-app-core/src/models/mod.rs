pub mod error;
pub mod event_type;
pub mod options;
pub mod token;

pub use error::*;
pub use event_type::*;
pub use options::*;
pub use token::*;
