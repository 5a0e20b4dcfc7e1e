//! World module housing levels, trigger volumes, interactive tiles, and items.
pub mod events;
pub mod items;
pub mod level;
pub mod plugin;
pub mod systems;
pub mod tiles;
pub mod triggers;

pub use plugin::WorldPlugin;
