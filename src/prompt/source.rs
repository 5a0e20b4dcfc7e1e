//! Prompt sources: in-world triggers owning an ordered run of messages.
use bevy::prelude::*;

use crate::{
    content::prompt_strings::PromptStrings,
    core::errors::ConfigError,
    input::actions::{InputAction, InputActions},
};

/// One message as shown in the prompt box.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptMessage {
    pub text: String,
    /// Image name under `sprites/text_prompts/`.
    pub image: Option<String>,
    /// Seconds to display this message instead of the configured duration.
    pub override_duration: Option<f32>,
}

impl PromptMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: None,
            override_duration: None,
        }
    }
}

/// What a source reports when asked to start or continue.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptSignal {
    Advance(PromptMessage),
    Finished,
}

/// Extra condition under which a displayed source continues on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContinueHook {
    #[default]
    None,
    /// Continue once the player presses this action, e.g. a tutorial line
    /// that waits for the inventory key.
    OnAction(InputAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptCursor {
    NotStarted,
    Displaying(usize),
    Finished,
}

/// Authoring-time entry: a content key plus an optional image name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptLineKey {
    pub key: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
struct PromptLine {
    text: String,
    image: Option<String>,
}

#[derive(Component, Debug, Clone)]
pub struct PromptSource {
    lines: Vec<PromptLine>,
    cursor: PromptCursor,
    override_duration: Option<f32>,
    no_timer: bool,
    hook: ContinueHook,
}

impl PromptSource {
    /// Resolves every key against the content table; unknown keys and empty
    /// sources are configuration errors.
    pub fn from_keys(
        name: &str,
        keys: &[PromptLineKey],
        strings: &PromptStrings,
    ) -> Result<Self, ConfigError> {
        if keys.is_empty() {
            return Err(ConfigError::EmptyPrompt {
                trigger: name.to_string(),
            });
        }
        let lines = keys
            .iter()
            .map(|entry| {
                strings.resolve(&entry.key).map(|text| PromptLine {
                    text: text.to_string(),
                    image: entry.image.clone().filter(|image| !image.is_empty()),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            lines,
            cursor: PromptCursor::NotStarted,
            override_duration: None,
            no_timer: false,
            hook: ContinueHook::None,
        })
    }

    /// Builds a source from already-resolved text.
    #[cfg(test)]
    pub fn from_texts(texts: &[&str]) -> Self {
        Self {
            lines: texts
                .iter()
                .map(|text| PromptLine {
                    text: text.to_string(),
                    image: None,
                })
                .collect(),
            cursor: PromptCursor::NotStarted,
            override_duration: None,
            no_timer: false,
            hook: ContinueHook::None,
        }
    }

    pub fn with_override_duration(mut self, seconds: Option<f32>) -> Self {
        self.override_duration = seconds.filter(|value| *value >= 0.0);
        self
    }

    pub fn with_no_timer(mut self, no_timer: bool) -> Self {
        self.no_timer = no_timer;
        self
    }

    pub fn with_hook(mut self, hook: ContinueHook) -> Self {
        self.hook = hook;
        self
    }

    pub fn cursor(&self) -> PromptCursor {
        self.cursor
    }

    pub fn suppresses_timer(&self) -> bool {
        self.no_timer
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Emits the first message. Only a source that has never started does
    /// anything; re-entering a trigger never restarts it.
    pub fn begin(&mut self) -> Option<PromptSignal> {
        if self.cursor != PromptCursor::NotStarted {
            return None;
        }
        Some(self.emit(0))
    }

    /// Moves to the next message, or reports `Finished` at the last one.
    pub fn continue_prompt(&mut self) -> PromptSignal {
        match self.cursor {
            PromptCursor::NotStarted => self.emit(0),
            PromptCursor::Displaying(index) if index + 1 < self.lines.len() => {
                self.emit(index + 1)
            }
            PromptCursor::Displaying(_) | PromptCursor::Finished => {
                self.cursor = PromptCursor::Finished;
                PromptSignal::Finished
            }
        }
    }

    /// Source-specific reason to continue before the timer runs out.
    pub fn check_to_continue(&self, last_inputs: &InputActions) -> bool {
        match self.hook {
            ContinueHook::None => false,
            ContinueHook::OnAction(action) => last_inputs.was_pressed(action),
        }
    }

    fn emit(&mut self, index: usize) -> PromptSignal {
        self.cursor = PromptCursor::Displaying(index);
        let line = &self.lines[index];
        PromptSignal::Advance(PromptMessage {
            text: line.text.clone(),
            image: line.image.clone(),
            override_duration: self.override_duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advance_text(signal: Option<PromptSignal>) -> String {
        match signal {
            Some(PromptSignal::Advance(message)) => message.text,
            other => panic!("expected an advance, got {:?}", other),
        }
    }

    #[test]
    fn cursor_moves_forward_and_finishes_at_last_line() {
        let mut source = PromptSource::from_texts(&["a", "b"]);
        assert_eq!(source.len(), 2);
        assert!(!source.is_empty());
        assert_eq!(advance_text(source.begin()), "a");
        assert_eq!(source.cursor(), PromptCursor::Displaying(0));

        assert_eq!(advance_text(Some(source.continue_prompt())), "b");
        assert_eq!(source.cursor(), PromptCursor::Displaying(1));

        assert_eq!(source.continue_prompt(), PromptSignal::Finished);
        assert_eq!(source.continue_prompt(), PromptSignal::Finished);
        assert_eq!(source.cursor(), PromptCursor::Finished);
    }

    #[test]
    fn begin_is_one_shot() {
        let mut source = PromptSource::from_texts(&["only"]);
        assert!(source.begin().is_some());
        assert!(source.begin().is_none());

        assert_eq!(source.continue_prompt(), PromptSignal::Finished);
        assert!(source.begin().is_none());
    }

    #[test]
    fn resolves_keys_and_keeps_images() {
        let strings = PromptStrings::default();
        let keys = vec![
            PromptLineKey {
                key: "introSwap".into(),
                image: Some("swap".into()),
            },
            PromptLineKey {
                key: "introSaplings".into(),
                image: Some(String::new()),
            },
        ];
        let mut source = PromptSource::from_keys("oaks", &keys, &strings)
            .expect("keys exist")
            .with_override_duration(Some(5.0));

        match source.begin() {
            Some(PromptSignal::Advance(message)) => {
                assert!(message.text.contains("swap timelines"));
                assert_eq!(message.image.as_deref(), Some("swap"));
                assert_eq!(message.override_duration, Some(5.0));
            }
            other => panic!("unexpected {:?}", other),
        }
        match source.continue_prompt() {
            PromptSignal::Advance(message) => assert_eq!(message.image, None),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_keys_and_empty_sources() {
        let strings = PromptStrings::default();
        let keys = vec![PromptLineKey {
            key: "nope".into(),
            image: None,
        }];
        assert!(matches!(
            PromptSource::from_keys("t", &keys, &strings),
            Err(ConfigError::MissingPromptKey { .. })
        ));
        assert!(matches!(
            PromptSource::from_keys("t", &[], &strings),
            Err(ConfigError::EmptyPrompt { .. })
        ));
    }

    #[test]
    fn action_hook_reads_last_inputs() {
        let source = PromptSource::from_texts(&["open it"])
            .with_hook(ContinueHook::OnAction(InputAction::Inventory));
        assert!(!source.check_to_continue(&InputActions::default()));
        assert!(source.check_to_continue(&InputActions::pressed(InputAction::Inventory)));

        let plain = PromptSource::from_texts(&["x"]);
        assert!(!plain.check_to_continue(&InputActions::pressed(InputAction::Inventory)));
    }
}
