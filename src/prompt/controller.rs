//! Single-surface prompt controller: one active prompt, a FIFO of waiting
//! ones, an auto-advance timer, and an independent cutscene channel.
use std::collections::VecDeque;

use bevy::prelude::*;

use super::source::{PromptMessage, PromptSignal};

/// Access to the sources the controller drives. Implemented over an ECS
/// query in the systems and over plain maps in tests.
pub trait PromptSources<S> {
    fn continue_prompt(&mut self, source: S) -> PromptSignal;
    fn suppresses_timer(&self, source: S) -> bool;
    fn check_to_continue(&self, source: S) -> bool;
    /// False once the source has been despawned or unloaded.
    fn contains(&self, source: S) -> bool;
}

/// Change to what the prompt box should show.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayChange<S> {
    Shown { source: S, message: PromptMessage },
    Cleared,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmOutcome<S> {
    /// The cutscene line was dismissed; the cutscene owner decides what next.
    CutsceneEnded,
    Changes(Vec<DisplayChange<S>>),
}

#[derive(Debug, Clone)]
struct ActivePrompt<S> {
    source: S,
    message: PromptMessage,
    elapsed: f32,
}

#[derive(Resource, Debug)]
pub struct PromptController<S: Send + Sync + 'static = Entity> {
    duration: f32,
    active: Option<ActivePrompt<S>>,
    pending: VecDeque<(S, PromptMessage)>,
    cutscene: Option<PromptMessage>,
}

impl<S> PromptController<S>
where
    S: Copy + PartialEq + std::fmt::Debug + Send + Sync + 'static,
{
    pub fn new(duration_secs: f32) -> Self {
        Self {
            duration: duration_secs.max(0.0),
            active: None,
            pending: VecDeque::new(),
            cutscene: None,
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn active_source(&self) -> Option<S> {
        self.active.as_ref().map(|active| active.source)
    }

    pub fn active_message(&self) -> Option<&PromptMessage> {
        self.active.as_ref().map(|active| &active.message)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn cutscene_message(&self) -> Option<&PromptMessage> {
        self.cutscene.as_ref()
    }

    /// Handles a source's start/continue/finish signal.
    pub fn request_advance(&mut self, source: S, signal: PromptSignal) -> Vec<DisplayChange<S>> {
        let mut changes = Vec::new();
        match signal {
            PromptSignal::Advance(message) => match self.active_source() {
                None => self.activate(source, message, &mut changes),
                Some(active) if active == source => self.activate(source, message, &mut changes),
                Some(_) => {
                    debug!(
                        target: "prompt",
                        "Queueing prompt from {:?}; depth={}",
                        source,
                        self.pending.len() + 1
                    );
                    self.pending.push_back((source, message));
                }
            },
            PromptSignal::Finished => {
                if self.active_source() != Some(source) {
                    warn!(
                        target: "prompt",
                        "Ignoring finish signal from inactive prompt source {:?}",
                        source
                    );
                    return changes;
                }
                self.active = None;
                changes.push(DisplayChange::Cleared);
                if let Some((next, message)) = self.pending.pop_front() {
                    self.activate(next, message, &mut changes);
                }
            }
        }
        changes
    }

    /// Accumulates display time and continues the active source when the
    /// timer expires, or when its own continue hook says so.
    pub fn tick(
        &mut self,
        delta_secs: f32,
        sources: &mut impl PromptSources<S>,
    ) -> Vec<DisplayChange<S>> {
        self.drop_stale_pending(&*sources);
        let Some(active) = self.active.as_mut() else {
            return Vec::new();
        };
        active.elapsed += delta_secs;
        let source = active.source;
        let timed_out = active.elapsed > self.duration;

        let should_continue = if timed_out && !sources.suppresses_timer(source) {
            true
        } else {
            sources.check_to_continue(source)
        };

        if !should_continue {
            return Vec::new();
        }
        let signal = sources.continue_prompt(source);
        self.request_advance(source, signal)
    }

    /// Routes a confirm press: the cutscene channel wins and is dismissed,
    /// otherwise the active prompt continues.
    pub fn on_confirm(&mut self, sources: &mut impl PromptSources<S>) -> ConfirmOutcome<S> {
        if self.cutscene.take().is_some() {
            return ConfirmOutcome::CutsceneEnded;
        }
        self.drop_stale_pending(&*sources);
        let Some(source) = self.active_source() else {
            return ConfirmOutcome::Changes(Vec::new());
        };
        let signal = sources.continue_prompt(source);
        ConfirmOutcome::Changes(self.request_advance(source, signal))
    }

    /// Sets or clears the cutscene line. Cutscene lines have no timer and
    /// never touch the queue.
    pub fn show_cutscene(&mut self, message: Option<PromptMessage>) {
        self.cutscene = message;
    }

    fn drop_stale_pending(&mut self, sources: &impl PromptSources<S>) {
        let before = self.pending.len();
        self.pending.retain(|(source, _)| sources.contains(*source));
        let dropped = before - self.pending.len();
        if dropped > 0 {
            debug!(target: "prompt", "Dropped {} queued prompts from unloaded sources", dropped);
        }
    }

    fn activate(&mut self, source: S, message: PromptMessage, changes: &mut Vec<DisplayChange<S>>) {
        let elapsed = message
            .override_duration
            .map(|seconds| self.duration - seconds)
            .unwrap_or(0.0);
        self.active = Some(ActivePrompt {
            source,
            message: message.clone(),
            elapsed,
        });
        changes.push(DisplayChange::Shown { source, message });
    }
}
