//! Request transport seam
//!
//! [`RequestContext`] replaces ambient server globals: the caller builds one
//! per request (directly or from an `http::Request`) and reads the signalled
//! status back after dispatch.

pub mod context;

pub use context::RequestContext;
