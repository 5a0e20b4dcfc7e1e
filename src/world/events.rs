//! Scene-level notifications.
use bevy::prelude::Message;

/// A level finished loading and was merged into the running scene.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct AreaMerged {
    pub level: String,
}

/// Show (`true`) or hide the full-screen loading fader.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingScreenToggled(pub bool);
