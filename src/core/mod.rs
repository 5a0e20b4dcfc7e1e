//! Core module: game clock, shared settings, and configuration errors.
pub mod config;
pub mod errors;
pub mod plugin;

pub use plugin::CorePlugin;
