//! Typewriter engine: cycles a label through a phrase list by typing,
//! holding, deleting and advancing.
//!
//! Per phrase the pending step moves through
//! `Typing -> Holding -> Deleting -> (advance) -> Typing`, forever, until
//! [`Typewriter::stop`]. At most one step timer is outstanding per engine.

use serde::{Deserialize, Serialize};

use crate::config::TypewriterConfig;
use crate::error::ConfigError;
use crate::host::{Scheduler, TextSink};
use crate::ids::TimerHandle;
use crate::style::CaretState;

/// Position in the phrase cycle. Not a UI text cursor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cursor {
    pub message_index: usize,
    /// Number of chars of the current phrase on display, `0..=len`.
    pub char_index: usize,
    pub is_deleting: bool,
}

impl Cursor {
    /// Caret blinks while characters are still being typed or deleted.
    pub fn caret(&self, phrase_len: usize) -> CaretState {
        let typing = !self.is_deleting && self.char_index < phrase_len;
        let deleting = self.is_deleting && self.char_index > 0;
        if typing || deleting {
            CaretState::Active
        } else {
            CaretState::Hidden
        }
    }
}

/// Kind of step the pending timer will run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Typing,
    /// Full phrase on display; deletion starts when the hold elapses.
    Holding,
    Deleting,
}

/// Cursor mutation performed by one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Transition {
    TypedChar,
    DeletedChar,
    /// Phrase fully typed; `is_deleting` flipped on.
    BeginHold,
    /// Phrase fully deleted; moved to the next phrase.
    NextPhrase,
}

impl Transition {
    pub fn next_phase(self) -> Phase {
        match self {
            Transition::TypedChar | Transition::NextPhrase => Phase::Typing,
            Transition::DeletedChar => Phase::Deleting,
            Transition::BeginHold => Phase::Holding,
        }
    }
}

/// Apply one transition to `cursor`, in priority order.
pub fn advance(cursor: &mut Cursor, phrase_len: usize, phrase_count: usize) -> Transition {
    if !cursor.is_deleting && cursor.char_index < phrase_len {
        cursor.char_index += 1;
        Transition::TypedChar
    } else if cursor.is_deleting && cursor.char_index > 0 {
        cursor.char_index -= 1;
        Transition::DeletedChar
    } else if !cursor.is_deleting {
        cursor.is_deleting = true;
        Transition::BeginHold
    } else {
        cursor.is_deleting = false;
        cursor.message_index = (cursor.message_index + 1) % phrase_count.max(1);
        Transition::NextPhrase
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectiveSpeeds {
    pub typing_ms: f64,
    pub deleting_ms: f64,
}

/// Per-character delays for a phrase of `phrase_len` chars.
pub fn effective_speeds(cfg: &TypewriterConfig, phrase_len: usize) -> EffectiveSpeeds {
    let mut speeds = EffectiveSpeeds {
        typing_ms: cfg.typing_speed_ms,
        deleting_ms: cfg.deleting_speed_ms,
    };
    if phrase_len > cfg.long_phrase_length_threshold {
        speeds.typing_ms *= cfg.long_phrase_speed_multiplier;
        speeds.deleting_ms *= cfg.long_phrase_speed_multiplier;
    }
    speeds
}

/// What a single step rendered and scheduled.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepOutcome {
    pub text: String,
    pub caret: CaretState,
    pub transition: Transition,
    /// Phase of the step now pending.
    pub phase: Phase,
    pub delay_ms: f64,
    pub timer: TimerHandle,
}

fn char_prefix(s: &str, chars: usize) -> &str {
    s.char_indices()
        .nth(chars)
        .map(|(i, _)| &s[..i])
        .unwrap_or(s)
}

/// A running typewriter. Acts as the handle returned by [`Typewriter::start`].
#[derive(Debug)]
pub struct Typewriter {
    phrases: Vec<String>,
    phrase_lens: Vec<usize>,
    config: TypewriterConfig,
    cursor: Cursor,
    phase: Phase,
    pending: Option<TimerHandle>,
}

impl Typewriter {
    /// Validate the phrase list and schedule the first step after
    /// `initial_delay_ms`. On error nothing is scheduled.
    pub fn start<S: Scheduler + ?Sized>(
        phrases: Vec<String>,
        config: TypewriterConfig,
        scheduler: &mut S,
    ) -> Result<Self, ConfigError> {
        let mut tw = Self::new(phrases, config)?;
        tw.begin(scheduler);
        Ok(tw)
    }

    /// Schedule the first step after `initial_delay_ms`, replacing any
    /// pending step.
    pub fn begin<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(prev) = self.pending.take() {
            scheduler.cancel(prev);
        }
        self.pending = Some(scheduler.schedule(self.config.initial_delay_ms));
        log::debug!(
            "typewriter started: {} phrases, first step in {}ms",
            self.phrases.len(),
            self.config.initial_delay_ms
        );
    }

    /// Build an idle engine without scheduling anything.
    pub fn new(phrases: Vec<String>, config: TypewriterConfig) -> Result<Self, ConfigError> {
        if phrases.is_empty() {
            return Err(ConfigError::EmptyPhrases);
        }
        let phrase_lens = phrases.iter().map(|p| p.chars().count()).collect();
        Ok(Self {
            phrases,
            phrase_lens,
            config,
            cursor: Cursor::default(),
            phase: Phase::Typing,
            pending: None,
        })
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn config(&self) -> &TypewriterConfig {
        &self.config
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The single outstanding step timer, if running.
    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn current_phrase(&self) -> &str {
        &self.phrases[self.cursor.message_index]
    }

    /// Host callback for a fired timer. Handles other than the one this
    /// engine currently owns are ignored, so a cancelled step that was
    /// already queued by the host cannot touch the cursor or the sink.
    pub fn on_timer<T, S>(
        &mut self,
        handle: TimerHandle,
        sink: &mut T,
        scheduler: &mut S,
    ) -> Option<StepOutcome>
    where
        T: TextSink + ?Sized,
        S: Scheduler + ?Sized,
    {
        if self.pending != Some(handle) {
            log::debug!("typewriter ignoring stale timer {:?}", handle);
            return None;
        }
        self.pending = None;
        Some(self.step(sink, scheduler))
    }

    /// Render the current cursor, apply one transition and schedule the next
    /// step. Any pending step is cancelled first.
    pub fn step<T, S>(&mut self, sink: &mut T, scheduler: &mut S) -> StepOutcome
    where
        T: TextSink + ?Sized,
        S: Scheduler + ?Sized,
    {
        if let Some(prev) = self.pending.take() {
            scheduler.cancel(prev);
        }

        let idx = self.cursor.message_index;
        let phrase_len = self.phrase_lens[idx];
        let speeds = effective_speeds(&self.config, phrase_len);

        let text = char_prefix(&self.phrases[idx], self.cursor.char_index).to_string();
        sink.set_text(&text);
        let caret = self.cursor.caret(phrase_len);
        sink.set_caret(caret);

        let transition = advance(&mut self.cursor, phrase_len, self.phrases.len());
        let delay_ms = match transition {
            Transition::TypedChar | Transition::NextPhrase => speeds.typing_ms,
            Transition::DeletedChar => speeds.deleting_ms,
            Transition::BeginHold => self.config.hold_full_ms,
        };
        self.phase = transition.next_phase();
        let timer = scheduler.schedule(delay_ms);
        self.pending = Some(timer);
        log::trace!(
            "typewriter step {:?} -> {:?}, next in {}ms",
            transition,
            self.cursor,
            delay_ms
        );

        StepOutcome {
            text,
            caret,
            transition,
            phase: self.phase,
            delay_ms,
            timer,
        }
    }

    /// Cancel the outstanding step. Idempotent.
    pub fn stop<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel(handle);
            log::debug!("typewriter stopped");
        }
    }

    /// Return the cursor to the first phrase, nothing typed.
    pub fn reset_cursor(&mut self) {
        self.cursor = Cursor::default();
        self.phase = Phase::Typing;
    }

    /// Stop, reset the cursor and run the first step immediately.
    pub fn restart<T, S>(&mut self, sink: &mut T, scheduler: &mut S) -> StepOutcome
    where
        T: TextSink + ?Sized,
        S: Scheduler + ?Sized,
    {
        self.stop(scheduler);
        self.reset_cursor();
        log::debug!("typewriter restarted");
        self.step(sink, scheduler)
    }

    /// Teardown: cancel any pending step and drop the engine.
    pub fn shutdown<S: Scheduler + ?Sized>(mut self, scheduler: &mut S) {
        self.stop(scheduler);
    }
}
