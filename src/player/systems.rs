//! Systems for moving characters, swapping timelines, and using held items.
use bevy::prelude::*;

use crate::{
    core::{config::GameSettings, plugin::GameClock},
    input::actions::{InputAction, InputActions, InputMode, LastInputs},
    player::{
        components::{
            ActiveCharacter, Character, FollowCamera, HeldItem, PlayerStats, CHARACTER_HALF_SIZE,
        },
        events::{PlayerHealthChanged, PlayerSwitched, TimelineSwapped},
    },
    world::tiles::{Blocker, InteractiveTile, TileItemUsed, TileUseRequest},
};

/// Where the character drops items and reaches for tiles.
pub fn interact_position(translation: Vec3, offset: f32) -> Vec2 {
    translation.truncate() - Vec2::new(0.0, offset)
}

/// Applies `delta` one axis at a time so a character slides along blockers
/// instead of sticking to them.
pub fn resolve_movement(position: Vec2, delta: Vec2, blockers: &[(Vec2, &Blocker)]) -> Vec2 {
    let hits = |point: Vec2| {
        blockers
            .iter()
            .any(|(center, blocker)| blocker.overlaps(*center, point, CHARACTER_HALF_SIZE))
    };

    let mut resolved = position;
    let step_x = Vec2::new(resolved.x + delta.x, resolved.y);
    if !hits(step_x) {
        resolved = step_x;
    }
    let step_y = Vec2::new(resolved.x, resolved.y + delta.y);
    if !hits(step_y) {
        resolved = step_y;
    }
    resolved
}

/// Picks the character after `active` in `characters`, wrapping around.
pub fn next_character(characters: &[Entity], active: Option<Entity>) -> Option<Entity> {
    let current = active.and_then(|active| characters.iter().position(|e| *e == active));
    match current {
        Some(index) => characters.get((index + 1) % characters.len()).copied(),
        None => characters.first().copied(),
    }
}

pub fn move_active_character(
    inputs: Res<LastInputs>,
    mode: Res<InputMode>,
    clock: Res<GameClock>,
    settings: Res<GameSettings>,
    mut active: Query<&mut Transform, With<ActiveCharacter>>,
    blockers: Query<(&Transform, &Blocker), Without<ActiveCharacter>>,
) {
    if *mode != InputMode::Free {
        return;
    }
    let inputs = &inputs.0;
    let mut direction = Vec2::ZERO;
    if inputs.is_held(InputAction::MoveUp) {
        direction.y += 1.0;
    }
    if inputs.is_held(InputAction::MoveDown) {
        direction.y -= 1.0;
    }
    if inputs.is_held(InputAction::MoveLeft) {
        direction.x -= 1.0;
    }
    if inputs.is_held(InputAction::MoveRight) {
        direction.x += 1.0;
    }
    if direction == Vec2::ZERO {
        return;
    }

    let Ok(mut transform) = active.single_mut() else {
        return;
    };
    let blocking: Vec<(Vec2, &Blocker)> = blockers
        .iter()
        .map(|(transform, blocker)| (transform.translation.truncate(), blocker))
        .collect();
    let delta = direction.normalize() * settings.move_speed * clock.delta_secs();
    let resolved = resolve_movement(transform.translation.truncate(), delta, &blocking);
    transform.translation.x = resolved.x;
    transform.translation.y = resolved.y;
}

/// Hands control to the other timeline's character.
pub fn swap_timeline(
    mut commands: Commands,
    mut inputs: MessageReader<InputActions>,
    mode: Res<InputMode>,
    characters: Query<(Entity, &Character, &PlayerStats, Has<ActiveCharacter>)>,
    mut switched: MessageWriter<PlayerSwitched>,
    mut swapped: MessageWriter<TimelineSwapped>,
) {
    let requested = inputs
        .read()
        .any(|input| input.was_pressed(InputAction::SwapTimeline));
    if !requested || *mode != InputMode::Free {
        return;
    }

    let mut entities: Vec<Entity> = characters.iter().map(|(entity, ..)| entity).collect();
    entities.sort();
    let active = characters
        .iter()
        .find(|(.., is_active)| *is_active)
        .map(|(entity, ..)| entity);

    let Some(next) = next_character(&entities, active) else {
        return;
    };
    if Some(next) == active {
        return;
    }
    let Ok((_, character, stats, _)) = characters.get(next) else {
        return;
    };

    if let Some(previous) = active {
        commands.entity(previous).remove::<ActiveCharacter>();
    }
    commands.entity(next).insert(ActiveCharacter);

    info!("Timeline swapped to {}", character.name);
    switched.write(PlayerSwitched {
        character: next,
        health: stats.health,
    });
    swapped.write(TimelineSwapped {
        active_character_name: character.name.clone(),
    });
}

pub fn broadcast_health_changes(
    changed: Query<&PlayerStats, (With<ActiveCharacter>, Changed<PlayerStats>)>,
    mut writer: MessageWriter<PlayerHealthChanged>,
) {
    for stats in changed.iter() {
        writer.write(PlayerHealthChanged {
            new_health: stats.health,
        });
    }
}

/// Uses the held item on the nearest intact tile within reach.
pub fn use_held_item(
    mut inputs: MessageReader<InputActions>,
    mode: Res<InputMode>,
    settings: Res<GameSettings>,
    active: Query<(Entity, &Transform, &HeldItem), With<ActiveCharacter>>,
    tiles: Query<(Entity, &Transform, &InteractiveTile)>,
    mut writer: MessageWriter<TileUseRequest>,
) {
    let requested = inputs
        .read()
        .any(|input| input.was_pressed(InputAction::UseItem));
    if !requested || *mode != InputMode::Free {
        return;
    }
    let Ok((user, transform, held)) = active.single() else {
        return;
    };

    let reach_from = interact_position(transform.translation, settings.interact_offset);
    let nearest = tiles
        .iter()
        .filter(|(_, _, tile)| !tile.is_broken())
        .map(|(entity, tile_transform, _)| {
            (entity, tile_transform.translation.truncate().distance(reach_from))
        })
        .filter(|(_, distance)| *distance <= settings.reach)
        .min_by(|a, b| a.1.total_cmp(&b.1));

    match nearest {
        Some((tile, _)) => {
            writer.write(TileUseRequest {
                tile,
                user,
                item: held.0.clone(),
            });
        }
        None => debug!("Nothing within reach to use an item on"),
    }
}

/// Puts whatever the tile handed back into the user's hand.
pub fn receive_tile_results(
    mut results: MessageReader<TileItemUsed>,
    mut hands: Query<&mut HeldItem>,
) {
    for result in results.read() {
        if let Ok(mut held) = hands.get_mut(result.user) {
            held.0 = result.replacement.clone();
        }
    }
}

pub fn follow_active_character(
    active: Query<&Transform, (With<ActiveCharacter>, Without<FollowCamera>)>,
    mut cameras: Query<&mut Transform, With<FollowCamera>>,
) {
    let Ok(target) = active.single() else {
        return;
    };
    for mut camera in cameras.iter_mut() {
        camera.translation.x = target.translation.x;
        camera.translation.y = target.translation.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_slides_along_blockers() {
        let wall = Blocker::new(Vec2::new(4.0, 100.0));
        let blockers = [(Vec2::new(20.0, 0.0), &wall)];

        let resolved = resolve_movement(Vec2::ZERO, Vec2::new(15.0, 5.0), &blockers);
        assert_eq!(resolved, Vec2::new(0.0, 5.0));

        let free = resolve_movement(Vec2::ZERO, Vec2::new(-15.0, 5.0), &blockers);
        assert_eq!(free, Vec2::new(-15.0, 5.0));
    }

    #[test]
    fn next_character_cycles() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let all = [a, b];

        assert_eq!(next_character(&all, Some(a)), Some(b));
        assert_eq!(next_character(&all, Some(b)), Some(a));
        assert_eq!(next_character(&all, None), Some(a));
        assert_eq!(next_character(&[], None), None);
    }

    #[test]
    fn interact_position_sits_below_the_character() {
        assert_eq!(
            interact_position(Vec3::new(10.0, 10.0, 5.0), 16.0),
            Vec2::new(10.0, -6.0)
        );
    }

    #[test]
    fn swap_moves_the_active_marker() {
        let mut app = App::new();
        app.init_resource::<InputMode>()
            .add_message::<InputActions>()
            .add_message::<PlayerSwitched>()
            .add_message::<TimelineSwapped>()
            .add_systems(Update, swap_timeline);

        let past = app
            .world_mut()
            .spawn((
                Character::new("Past Aneroe"),
                PlayerStats { health: 5 },
                ActiveCharacter,
            ))
            .id();
        let present = app
            .world_mut()
            .spawn((Character::new("Present Aneroe"), PlayerStats { health: 2 }))
            .id();

        app.world_mut()
            .write_message(InputActions::pressed(InputAction::SwapTimeline));
        app.update();

        assert!(app.world().get::<ActiveCharacter>(past).is_none());
        assert!(app.world().get::<ActiveCharacter>(present).is_some());
    }

    #[test]
    fn tile_results_replace_the_held_item() {
        use crate::world::items::Item;

        let mut app = App::new();
        app.add_message::<TileItemUsed>()
            .add_systems(Update, receive_tile_results);
        let user = app
            .world_mut()
            .spawn(HeldItem(Some(Item::generic("flask"))))
            .id();
        let tile = app.world_mut().spawn_empty().id();

        app.world_mut().write_message(TileItemUsed {
            user,
            tile,
            replacement: None,
        });
        app.update();

        assert!(app
            .world()
            .get::<HeldItem>(user)
            .is_some_and(|held| held.0.is_none()));
    }
}
