//! Messages produced and consumed by the prompt subsystem.
use bevy::prelude::Message;

use super::source::PromptMessage;

/// Outbound: the standard prompt display advanced or cleared.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum PromptDisplayChanged {
    Shown(PromptMessage),
    Cleared,
}

/// Inbound: show (`Some`) or hide (`None`) a cutscene line.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct CutscenePromptRequest(pub Option<PromptMessage>);

/// Outbound: the player dismissed the cutscene line with confirm.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutscenePromptEnded;
