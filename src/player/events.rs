//! Player-facing notifications consumed by the UI.
use bevy::prelude::{Entity, Message};

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerHealthChanged {
    pub new_health: u32,
}

#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct PlayerSwitched {
    pub character: Entity,
    pub health: u32,
}

#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct TimelineSwapped {
    pub active_character_name: String,
}
