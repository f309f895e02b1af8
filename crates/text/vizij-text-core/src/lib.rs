//! Vizij Text Core (host-agnostic)
//!
//! Text label animations driven by a host timer: a typewriter that cycles
//! through a phrase list, a debounced responsive restyle/restart controller,
//! a scramble transition and a count-up number label. The host supplies a [`TextSink`] to write into
//! and a [`Scheduler`] for delayed callbacks, then reports fired timers back
//! via `on_timer`.

pub mod config;
pub mod counter;
pub mod error;
pub mod host;
pub mod ids;
pub mod responsive;
pub mod scheduler;
pub mod scramble;
pub mod style;
pub mod typewriter;

// Re-exports for consumers (adapters)
pub use config::{
    Config, CounterConfig, ResponsiveConfig, RestartPolicy, ScrambleConfig, TypewriterConfig,
};
pub use counter::{count_value, CountFrame, CountUp};
pub use error::ConfigError;
pub use host::{RecordingSink, Scheduler, SinkWrite, TextSink};
pub use ids::{TimerAllocator, TimerHandle};
pub use responsive::{ResizeOutcome, ResponsiveTypewriter, TimerOutcome};
pub use scheduler::VirtualScheduler;
pub use scramble::{ScrambleCell, ScrambleEffect, ScrambleFrame, ScrambleQueue, ScrambleRecord, Scrambler};
pub use style::{
    apply_responsive_style, CaretState, ResponsiveStyle, ViewportClass, WhiteSpace, WordBreak,
};
pub use typewriter::{
    advance, effective_speeds, Cursor, EffectiveSpeeds, Phase, StepOutcome, Transition,
    Typewriter,
};
