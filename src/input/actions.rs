//! Named input actions and the per-frame snapshot broadcast to gameplay systems.
use std::fmt;

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Confirm,
    Inventory,
    MainMenu,
    SwapTimeline,
    UseItem,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
}

impl InputAction {
    pub const ALL: [InputAction; 9] = [
        InputAction::Confirm,
        InputAction::Inventory,
        InputAction::MainMenu,
        InputAction::SwapTimeline,
        InputAction::UseItem,
        InputAction::MoveUp,
        InputAction::MoveDown,
        InputAction::MoveLeft,
        InputAction::MoveRight,
    ];

    /// Name used in `config/input.toml` and level files.
    pub fn config_name(self) -> &'static str {
        match self {
            Self::Confirm => "confirm",
            Self::Inventory => "inventory",
            Self::MainMenu => "mainmenu",
            Self::SwapTimeline => "swap",
            Self::UseItem => "use",
            Self::MoveUp => "up",
            Self::MoveDown => "down",
            Self::MoveLeft => "left",
            Self::MoveRight => "right",
        }
    }

    pub fn from_config_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|action| action.config_name() == name)
    }
}

impl fmt::Display for InputAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_name())
    }
}

/// Actions pressed this frame and actions held down. Written once per frame
/// whenever anything is pressed or held.
#[derive(Message, Debug, Clone, Default, PartialEq, Eq)]
pub struct InputActions {
    pressed: Vec<InputAction>,
    held: Vec<InputAction>,
}

impl InputActions {
    pub fn new(pressed: Vec<InputAction>, held: Vec<InputAction>) -> Self {
        Self { pressed, held }
    }

    pub fn pressed(action: InputAction) -> Self {
        Self::new(vec![action], vec![action])
    }

    pub fn was_pressed(&self, action: InputAction) -> bool {
        self.pressed.contains(&action)
    }

    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty() && self.held.is_empty()
    }
}

/// Snapshot of the most recent frame's input, read by prompt continue hooks.
#[derive(Resource, Debug, Default)]
pub struct LastInputs(pub InputActions);

/// Which layer currently owns input. Menus respond while the mode is at most
/// `Ui`; movement and item use only in `Free`.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum InputMode {
    #[default]
    Free,
    Ui,
    Cutscene,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_names_round_trip_for_every_action() {
        for action in InputAction::ALL {
            assert_eq!(
                InputAction::from_config_name(action.config_name()),
                Some(action)
            );
        }
        assert_eq!(
            InputAction::from_config_name(" Inventory "),
            Some(InputAction::Inventory)
        );
        assert_eq!(InputAction::from_config_name("jump"), None);
    }

    #[test]
    fn input_mode_orders_menus_below_cutscenes() {
        assert!(InputMode::Free <= InputMode::Ui);
        assert!(InputMode::Ui <= InputMode::Ui);
        assert!(InputMode::Cutscene > InputMode::Ui);
    }

    #[test]
    fn snapshot_distinguishes_pressed_from_held() {
        let inputs = InputActions::new(vec![InputAction::Confirm], vec![InputAction::MoveUp]);
        assert!(inputs.was_pressed(InputAction::Confirm));
        assert!(!inputs.was_pressed(InputAction::MoveUp));
        assert!(inputs.is_held(InputAction::MoveUp));
        assert!(!inputs.is_empty());
    }
}
