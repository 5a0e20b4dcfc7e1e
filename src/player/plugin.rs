//! Player plugin wiring movement, timeline swaps, and item use.
use bevy::prelude::*;

use crate::player::{
    events::{PlayerHealthChanged, PlayerSwitched, TimelineSwapped},
    systems::{
        broadcast_health_changes, follow_active_character, move_active_character,
        receive_tile_results, swap_timeline, use_held_item,
    },
};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PlayerHealthChanged>()
            .add_message::<PlayerSwitched>()
            .add_message::<TimelineSwapped>()
            .add_systems(
                Update,
                (
                    move_active_character,
                    swap_timeline,
                    broadcast_health_changes.after(swap_timeline),
                    use_held_item,
                    receive_tile_results,
                    follow_active_character.after(move_active_character),
                ),
            );
    }
}
