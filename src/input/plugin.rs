//! Input plugin translating raw keyboard/mouse state into named actions.
use bevy::prelude::*;

use super::{
    actions::{InputAction, InputActions, InputMode, LastInputs},
    bindings::{Binding, InputBindings},
};

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(InputBindings::load_or_default())
            .init_resource::<LastInputs>()
            .init_resource::<InputMode>()
            .add_message::<InputActions>()
            .add_systems(Startup, log_bindings)
            .add_systems(PreUpdate, collect_input_actions);
    }
}

/// Builds this frame's action snapshot and broadcasts it when non-empty.
pub fn collect_input_actions(
    bindings: Res<InputBindings>,
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    mut last_inputs: ResMut<LastInputs>,
    mut writer: MessageWriter<InputActions>,
) {
    let mut pressed = Vec::new();
    let mut held = Vec::new();

    for action in InputAction::ALL {
        let Some(binding) = bindings.get(action) else {
            continue;
        };
        let (just_pressed, down) = match binding {
            Binding::Key(key) => keyboard
                .as_ref()
                .map(|input| (input.just_pressed(key), input.pressed(key)))
                .unwrap_or_default(),
            Binding::Mouse(button) => mouse
                .as_ref()
                .map(|input| (input.just_pressed(button), input.pressed(button)))
                .unwrap_or_default(),
        };
        if just_pressed {
            pressed.push(action);
        }
        if down {
            held.push(action);
        }
    }

    let snapshot = InputActions::new(pressed, held);
    if !snapshot.is_empty() {
        writer.write(snapshot.clone());
    }
    last_inputs.0 = snapshot;
}

fn log_bindings(bindings: Res<InputBindings>) {
    for (action, binding) in bindings.iter() {
        debug!(target: "input", "Action {} bound to {:?}", action, binding);
    }
    info!("InputPlugin initialised");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressed_key_is_recorded_in_last_inputs() {
        let mut app = App::new();
        app.insert_resource(InputBindings::default())
            .init_resource::<LastInputs>()
            .init_resource::<ButtonInput<KeyCode>>()
            .add_message::<InputActions>()
            .add_systems(Update, collect_input_actions);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyE);
        app.update();

        let last = &app.world().resource::<LastInputs>().0;
        assert!(last.was_pressed(InputAction::Inventory));
        assert!(last.is_held(InputAction::Inventory));
        assert!(!last.was_pressed(InputAction::Confirm));
    }
}
