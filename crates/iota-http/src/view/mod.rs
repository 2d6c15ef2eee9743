//! HTML view layer

pub mod assets;
pub mod renderer;
#[allow(clippy::module_inception)]
pub mod view;

pub use assets::PageAssets;
pub use renderer::{TemplateRenderer, TinyTemplateRenderer};
pub use view::{escape_value, View};
