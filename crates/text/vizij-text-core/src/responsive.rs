//! Viewport-aware wrapper around [`Typewriter`].
//!
//! Resize events are debounced on a timer separate from the step timer.
//! When a burst settles the restyle and restart run as one transaction:
//! cancel step, reset cursor, apply style, step.

use serde::Serialize;

use crate::config::{ResponsiveConfig, RestartPolicy, TypewriterConfig};
use crate::error::ConfigError;
use crate::host::{Scheduler, TextSink};
use crate::ids::TimerHandle;
use crate::style::{apply_responsive_style, ResponsiveStyle, ViewportClass};
use crate::typewriter::{StepOutcome, Typewriter};

/// Result of a settled resize burst.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ResizeOutcome {
    Restarted {
        style: ResponsiveStyle,
        step: StepOutcome,
    },
    /// Style reapplied, cursor left alone (see [`RestartPolicy::OnClassChange`]).
    Restyled { style: ResponsiveStyle },
}

/// What a fired timer did.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TimerOutcome {
    Step(StepOutcome),
    Resize(ResizeOutcome),
}

#[derive(Debug)]
pub struct ResponsiveTypewriter {
    engine: Typewriter,
    config: ResponsiveConfig,
    style: ResponsiveStyle,
    latest_width: f64,
    debounce: Option<TimerHandle>,
    active: bool,
}

impl ResponsiveTypewriter {
    /// Style the sink for `width` and start the typewriter. On error neither
    /// the sink nor the scheduler is touched.
    pub fn start<T, S>(
        phrases: Vec<String>,
        typewriter: TypewriterConfig,
        config: ResponsiveConfig,
        width: f64,
        sink: &mut T,
        scheduler: &mut S,
    ) -> Result<Self, ConfigError>
    where
        T: TextSink + ?Sized,
        S: Scheduler + ?Sized,
    {
        let mut engine = Typewriter::new(phrases, typewriter)?;
        let style = apply_responsive_style(width, &config);
        sink.set_style(&style);
        engine.begin(scheduler);
        Ok(Self {
            engine,
            config,
            style,
            latest_width: width,
            debounce: None,
            active: true,
        })
    }

    pub fn typewriter(&self) -> &Typewriter {
        &self.engine
    }

    pub fn style(&self) -> &ResponsiveStyle {
        &self.style
    }

    pub fn viewport(&self) -> ViewportClass {
        self.style.viewport
    }

    pub fn debounce_pending(&self) -> Option<TimerHandle> {
        self.debounce
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Record a resize event and (re)arm the debounce timer.
    pub fn on_resize<S: Scheduler + ?Sized>(&mut self, width: f64, scheduler: &mut S) {
        if !self.active {
            return;
        }
        self.latest_width = width;
        if let Some(prev) = self.debounce.take() {
            scheduler.cancel(prev);
        }
        self.debounce = Some(scheduler.schedule(self.config.debounce_ms));
    }

    /// Host callback for any timer this controller scheduled.
    pub fn on_timer<T, S>(
        &mut self,
        handle: TimerHandle,
        sink: &mut T,
        scheduler: &mut S,
    ) -> Option<TimerOutcome>
    where
        T: TextSink + ?Sized,
        S: Scheduler + ?Sized,
    {
        if self.debounce == Some(handle) {
            self.debounce = None;
            return Some(TimerOutcome::Resize(self.settle_resize(sink, scheduler)));
        }
        self.engine
            .on_timer(handle, sink, scheduler)
            .map(TimerOutcome::Step)
    }

    fn settle_resize<T, S>(&mut self, sink: &mut T, scheduler: &mut S) -> ResizeOutcome
    where
        T: TextSink + ?Sized,
        S: Scheduler + ?Sized,
    {
        let style = apply_responsive_style(self.latest_width, &self.config);
        let class_changed = style.viewport != self.style.viewport;
        let restart = match self.config.restart_policy {
            RestartPolicy::Always => true,
            RestartPolicy::OnClassChange => class_changed,
        };
        self.style = style.clone();

        if !restart {
            sink.set_style(&style);
            return ResizeOutcome::Restyled { style };
        }

        self.engine.stop(scheduler);
        self.engine.reset_cursor();
        sink.set_style(&style);
        let step = self.engine.step(sink, scheduler);
        log::debug!(
            "resize settled at width {}: {:?}, typewriter restarted",
            self.latest_width,
            style.viewport
        );
        ResizeOutcome::Restarted { style, step }
    }

    /// Restart the cycle from the first phrase with the current style.
    pub fn restart<T, S>(&mut self, sink: &mut T, scheduler: &mut S) -> StepOutcome
    where
        T: TextSink + ?Sized,
        S: Scheduler + ?Sized,
    {
        self.active = true;
        sink.set_style(&self.style);
        self.engine.restart(sink, scheduler)
    }

    /// Cancel both timers. Resize events are ignored until [`restart`](Self::restart).
    pub fn stop<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(h) = self.debounce.take() {
            scheduler.cancel(h);
        }
        self.engine.stop(scheduler);
        self.active = false;
    }

    /// Teardown hook for when the host view goes away.
    pub fn teardown<S: Scheduler + ?Sized>(mut self, scheduler: &mut S) {
        self.stop(scheduler);
    }
}
