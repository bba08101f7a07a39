//! Application layer: navigation state machine and filter persistence

pub mod controller;
pub mod error;
pub mod filter;
pub mod share;

pub use controller::{current_level, reduce, DrilldownController, NavAction, NavEvent, NavState};
pub use error::{ApplicationError, ApplicationResult};
pub use filter::FilterState;
