//! Player module - the two timeline characters, their movement, and item use.

pub mod components;
pub mod events;
pub mod plugin;
pub mod systems;

pub use plugin::PlayerPlugin;
