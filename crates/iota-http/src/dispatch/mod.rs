//! Request dispatch

pub mod dispatcher;

pub use dispatcher::{DispatchOutcome, Dispatcher, FallbackHandler};
