//! WorldPlugin coordinates level loading, triggers, tiles, and loose items.
use bevy::prelude::*;

use super::{
    events::{AreaMerged, LoadingScreenToggled},
    items::ItemDropped,
    systems::{load_start_level, spawn_camera, spawn_dropped_items, unload_scenes},
    tiles::{apply_tile_use, TileDisabled, TileItemUsed, TileUseRequest},
    triggers::{detect_trigger_entries, request_scene_unloads, TriggerEntered, UnloadSceneRequest},
};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        info!("WorldPlugin registered");

        app.add_message::<TriggerEntered>()
            .add_message::<UnloadSceneRequest>()
            .add_message::<TileUseRequest>()
            .add_message::<TileDisabled>()
            .add_message::<TileItemUsed>()
            .add_message::<ItemDropped>()
            .add_message::<AreaMerged>()
            .add_message::<LoadingScreenToggled>()
            .add_systems(Startup, (spawn_camera, load_start_level))
            .add_systems(
                Update,
                (
                    detect_trigger_entries,
                    request_scene_unloads.after(detect_trigger_entries),
                    unload_scenes.after(request_scene_unloads),
                    apply_tile_use,
                    spawn_dropped_items,
                ),
            );
    }
}
