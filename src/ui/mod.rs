// src/ui/mod.rs
//
// Gameplay UI: HUD panels resolved by name, inventory and menu toggling,
// drag-and-drop of item icons between slots, and status mirroring.

pub mod components;
pub mod layout;
pub mod menus;
pub mod plugin;
pub mod selection;
pub mod status;
pub mod tooltip;
pub mod widgets;

pub use plugin::UiPlugin;
