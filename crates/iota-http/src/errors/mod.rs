pub mod http_error;

pub use http_error::*;
