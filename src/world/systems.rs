//! Systems for level loading, unloading, and loose items.
use std::path::Path;

use bevy::prelude::*;

use crate::{
    content::prompt_strings::PromptStrings, core::config::GameSettings,
    player::components::FollowCamera,
};

use super::{
    events::{AreaMerged, LoadingScreenToggled},
    items::{DroppedItem, ItemDropped},
    level::{spawn_level, LevelDefinition, LevelMember},
    triggers::UnloadSceneRequest,
};

const ASSET_DIR: &str = "assets";

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera2d, FollowCamera, Name::new("Main Camera")));
}

/// Loads the configured start level. Any content error is fatal.
pub fn load_start_level(
    mut commands: Commands,
    settings: Res<GameSettings>,
    strings: Res<PromptStrings>,
    asset_server: Res<AssetServer>,
    mut fader: MessageWriter<LoadingScreenToggled>,
    mut merged: MessageWriter<AreaMerged>,
    mut exit: MessageWriter<AppExit>,
) {
    fader.write(LoadingScreenToggled(true));

    let path = Path::new(ASSET_DIR).join(&settings.start_level);
    let result = LevelDefinition::load(&path).and_then(|level| {
        spawn_level(&mut commands, &asset_server, &level, &strings)?;
        Ok(level.name)
    });

    match result {
        Ok(name) => {
            merged.write(AreaMerged { level: name });
            fader.write(LoadingScreenToggled(false));
        }
        Err(err) => {
            error!("Level {} could not be loaded: {}", path.display(), err);
            exit.write(AppExit::error());
        }
    }
}

pub fn unload_scenes(
    mut commands: Commands,
    mut requests: MessageReader<UnloadSceneRequest>,
    members: Query<(Entity, &LevelMember)>,
) {
    for request in requests.read() {
        let mut removed = 0usize;
        for (entity, member) in members.iter() {
            if member.0 == request.level {
                commands.entity(entity).despawn();
                removed += 1;
            }
        }
        info!("Unloaded level {} ({} entities)", request.level, removed);
    }
}

pub fn spawn_dropped_items(
    mut commands: Commands,
    mut drops: MessageReader<ItemDropped>,
    asset_server: Res<AssetServer>,
) {
    for drop in drops.read() {
        debug!("Dropping {} at {:?}", drop.item, drop.position);
        commands.spawn((
            Sprite::from_image(asset_server.load(drop.item.sprite_path())),
            Transform::from_translation(drop.position.extend(2.0)),
            DroppedItem(drop.item.clone()),
            Name::new(format!("Dropped {}", drop.item)),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unload_removes_only_matching_members() {
        let mut app = App::new();
        app.add_message::<UnloadSceneRequest>()
            .add_systems(Update, unload_scenes);

        let old = app
            .world_mut()
            .spawn(LevelMember("prologue".into()))
            .id();
        let kept = app.world_mut().spawn(LevelMember("forest".into())).id();

        app.world_mut().write_message(UnloadSceneRequest {
            level: "prologue".into(),
        });
        app.update();

        assert!(app.world().get_entity(old).is_err());
        assert!(app.world().get_entity(kept).is_ok());
    }
}
