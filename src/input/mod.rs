//! Input module mapping devices to named gameplay actions.
pub mod actions;
pub mod bindings;
pub mod plugin;

pub use plugin::InputPlugin;
