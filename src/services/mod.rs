//! Service layer module
//!
//! Contains the request dispatcher, the console actions and the display surface

pub mod actions;
pub mod dispatcher;
pub mod display;

pub use actions::ConsoleActions;
pub use dispatcher::Dispatcher;
pub use display::{DisplaySurface, ResponseDisplay};
