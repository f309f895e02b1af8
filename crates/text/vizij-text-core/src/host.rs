//! Host contracts: where text is written and how delayed callbacks are
//! scheduled. Adapters (WASM, native) implement these.

use crate::ids::TimerHandle;
use crate::style::{CaretState, ResponsiveStyle};

/// Target label the engines write into. Single writer: one engine per sink.
pub trait TextSink {
    fn set_text(&mut self, text: &str);
    fn set_style(&mut self, style: &ResponsiveStyle);
    fn set_caret(&mut self, caret: CaretState);
}

/// Host timer facility.
///
/// `schedule` arranges for the host to call the owning engine's `on_timer`
/// with the returned handle after `delay_ms`. `cancel` on an unknown or
/// already-fired handle is a no-op.
pub trait Scheduler {
    fn schedule(&mut self, delay_ms: f64) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
}

/// One write observed by a [`RecordingSink`].
#[derive(Clone, Debug, PartialEq)]
pub enum SinkWrite {
    Text(String),
    Style(ResponsiveStyle),
    Caret(CaretState),
}

/// Sink that keeps the current label state plus a log of every write.
/// Used for headless rendering and in tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub text: String,
    pub style: Option<ResponsiveStyle>,
    pub caret: Option<CaretState>,
    pub writes: Vec<SinkWrite>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texts written so far, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.writes.iter().filter_map(|w| match w {
            SinkWrite::Text(t) => Some(t.as_str()),
            _ => None,
        })
    }

    pub fn clear_log(&mut self) {
        self.writes.clear();
    }
}

impl TextSink for RecordingSink {
    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.writes.push(SinkWrite::Text(text.to_string()));
    }

    fn set_style(&mut self, style: &ResponsiveStyle) {
        self.style = Some(style.clone());
        self.writes.push(SinkWrite::Style(style.clone()));
    }

    fn set_caret(&mut self, caret: CaretState) {
        self.caret = Some(caret);
        self.writes.push(SinkWrite::Caret(caret));
    }
}
