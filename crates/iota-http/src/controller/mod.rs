//! Controllers
//!
//! Controllers are plain structs that declare their verb handlers and
//! before/after hooks through a [`ControllerActions`] table, and are created
//! per request by a [`ControllerResolver`].

pub mod base;
pub mod registry;

pub use base::{Action, BoundController, Controller, ControllerActions, DispatchableController};
pub use registry::{ControllerRegistry, ControllerResolver};
