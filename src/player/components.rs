//! Components for the playable characters.
use bevy::prelude::*;

use crate::world::items::Item;

/// Half size of a character's collision box (world units).
pub const CHARACTER_HALF_SIZE: Vec2 = Vec2::new(6.0, 6.0);

/// A playable character. Names carry the timeline ("Past Aneroe").
#[derive(Component, Debug, Clone)]
pub struct Character {
    pub name: String,
}

impl Character {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Marker for the character currently under player control.
#[derive(Component, Debug)]
pub struct ActiveCharacter;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerStats {
    pub health: u32,
}

/// Item in the character's hand.
#[derive(Component, Debug, Clone, Default)]
pub struct HeldItem(pub Option<Item>);

/// Marker for the camera following the active character.
#[derive(Component, Debug, Default)]
pub struct FollowCamera;
