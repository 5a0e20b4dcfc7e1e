//! Prompt module: trigger-bound message sources, the single-surface prompt
//! controller, and the prompt box UI.
pub mod components;
pub mod controller;
pub mod events;
pub mod plugin;
pub mod source;
pub mod systems;

pub use plugin::PromptPlugin;
