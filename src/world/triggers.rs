//! Axis-aligned trigger volumes and the scene unloader trigger.
use bevy::prelude::*;

use crate::player::components::Character;

/// Box-shaped trigger centred on the entity's translation.
#[derive(Component, Debug, Clone)]
pub struct TriggerVolume {
    pub half_extents: Vec2,
    occupants: Vec<Entity>,
}

impl TriggerVolume {
    pub fn new(half_extents: Vec2) -> Self {
        Self {
            half_extents: half_extents.abs(),
            occupants: Vec::new(),
        }
    }

    pub fn contains(&self, center: Vec2, point: Vec2) -> bool {
        let offset = (point - center).abs();
        offset.x <= self.half_extents.x && offset.y <= self.half_extents.y
    }

    /// Records whether `entity` is inside; returns true only on the
    /// outside-to-inside transition.
    pub fn update_occupant(&mut self, entity: Entity, inside: bool) -> bool {
        let known = self.occupants.iter().position(|e| *e == entity);
        match (inside, known) {
            (true, None) => {
                self.occupants.push(entity);
                true
            }
            (false, Some(index)) => {
                self.occupants.swap_remove(index);
                false
            }
            _ => false,
        }
    }
}

/// A character entered a trigger volume this frame.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEntered {
    pub trigger: Entity,
    pub entity: Entity,
}

/// Removes a loaded level when the player walks through it.
#[derive(Component, Debug, Clone)]
pub struct SceneUnloadTrigger {
    pub level: String,
}

/// Request to despawn everything belonging to a level.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct UnloadSceneRequest {
    pub level: String,
}

pub fn detect_trigger_entries(
    mut triggers: Query<(Entity, &Transform, &mut TriggerVolume)>,
    characters: Query<(Entity, &Transform), With<Character>>,
    mut writer: MessageWriter<TriggerEntered>,
) {
    for (trigger, trigger_transform, mut volume) in triggers.iter_mut() {
        let center = trigger_transform.translation.truncate();
        for (entity, transform) in characters.iter() {
            let inside = volume.contains(center, transform.translation.truncate());
            if volume.update_occupant(entity, inside) {
                writer.write(TriggerEntered { trigger, entity });
            }
        }
    }
}

pub fn request_scene_unloads(
    mut entered: MessageReader<TriggerEntered>,
    unloaders: Query<&SceneUnloadTrigger>,
    mut writer: MessageWriter<UnloadSceneRequest>,
) {
    for event in entered.read() {
        if let Ok(unloader) = unloaders.get(event.trigger) {
            info!("Removing level {}", unloader.level);
            writer.write(UnloadSceneRequest {
                level: unloader.level.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::message::Messages;

    use super::*;

    #[test]
    fn contains_is_inclusive_on_edges() {
        let volume = TriggerVolume::new(Vec2::new(10.0, 5.0));
        assert!(volume.contains(Vec2::ZERO, Vec2::new(10.0, -5.0)));
        assert!(!volume.contains(Vec2::ZERO, Vec2::new(10.1, 0.0)));
        assert!(volume.contains(Vec2::new(100.0, 100.0), Vec2::new(95.0, 104.0)));
    }

    #[test]
    fn entry_fires_once_until_the_entity_leaves() {
        let mut volume = TriggerVolume::new(Vec2::ONE);
        let entity = World::new().spawn_empty().id();

        assert!(volume.update_occupant(entity, true));
        assert!(!volume.update_occupant(entity, true));
        assert!(!volume.update_occupant(entity, false));
        assert!(volume.update_occupant(entity, true));
    }

    #[test]
    fn walking_into_a_volume_emits_one_message() {
        let mut app = App::new();
        app.add_message::<TriggerEntered>()
            .add_systems(Update, detect_trigger_entries);

        let trigger = app
            .world_mut()
            .spawn((Transform::default(), TriggerVolume::new(Vec2::splat(8.0))))
            .id();
        let walker = app
            .world_mut()
            .spawn((
                Transform::from_xyz(50.0, 0.0, 0.0),
                Character::new("Present Aneroe"),
            ))
            .id();

        app.update();
        app.world_mut()
            .entity_mut(walker)
            .insert(Transform::from_xyz(2.0, 1.0, 0.0));
        app.update();
        app.update();

        let messages = app.world().resource::<Messages<TriggerEntered>>();
        let mut cursor = messages.get_cursor();
        let received: Vec<_> = cursor.read(messages).copied().collect();
        assert_eq!(received, vec![TriggerEntered { trigger, entity: walker }]);
    }
}
