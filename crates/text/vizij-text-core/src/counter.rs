//! Count-up label: animates a number from 0 to a target over a fixed
//! duration, writing the floored value once per frame timer.

use serde::Serialize;

use crate::config::CounterConfig;
use crate::error::ConfigError;
use crate::host::{Scheduler, TextSink};
use crate::ids::TimerHandle;

/// One rendered count-up frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountFrame {
    pub value: i64,
    /// Fraction of the duration elapsed, in `[0, 1]`.
    pub progress: f64,
    pub complete: bool,
}

/// Value shown `elapsed_ms` into a count of `duration_ms`, with its progress.
///
/// A non-positive (or NaN) duration completes immediately. Once progress
/// reaches 1 the value is exactly `floor(target)`.
pub fn count_value(target: f64, elapsed_ms: f64, duration_ms: f64) -> (i64, f64) {
    let progress = if duration_ms > 0.0 {
        (elapsed_ms / duration_ms).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let value = if progress >= 1.0 {
        target.floor()
    } else {
        (progress * target).floor()
    };
    (value as i64, progress)
}

/// Scheduler-driven count-up engine. Elapsed time advances by one frame
/// interval per fired timer, so a virtual clock and a host clock agree.
#[derive(Debug, Default)]
pub struct CountUp {
    config: CounterConfig,
    target: f64,
    elapsed_ms: f64,
    value: Option<i64>,
    pending: Option<TimerHandle>,
}

impl CountUp {
    pub fn new(config: CounterConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Last value written to the sink, if any.
    pub fn value(&self) -> Option<i64> {
        self.value
    }

    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    fn frame_interval_ms(&self) -> f64 {
        let interval = self.config.frame_interval_ms;
        if interval.is_finite() && interval > 0.0 {
            interval
        } else {
            CounterConfig::default().frame_interval_ms
        }
    }

    /// Count from 0 to `target`, rendering the first frame right away.
    /// Replaces any count already in flight.
    pub fn count_to<T, S>(
        &mut self,
        target: f64,
        sink: &mut T,
        scheduler: &mut S,
    ) -> Result<CountFrame, ConfigError>
    where
        T: TextSink + ?Sized,
        S: Scheduler + ?Sized,
    {
        if !target.is_finite() {
            return Err(ConfigError::NonFiniteTarget);
        }
        self.stop(scheduler);
        self.target = target;
        self.elapsed_ms = 0.0;
        log::debug!("count-up to {target} over {} ms", self.config.duration_ms);
        Ok(self.render(sink, scheduler))
    }

    /// Host callback for a fired frame timer; stale handles are ignored.
    pub fn on_timer<T, S>(
        &mut self,
        handle: TimerHandle,
        sink: &mut T,
        scheduler: &mut S,
    ) -> Option<CountFrame>
    where
        T: TextSink + ?Sized,
        S: Scheduler + ?Sized,
    {
        if self.pending != Some(handle) {
            log::debug!("count-up ignoring stale timer {:?}", handle);
            return None;
        }
        self.pending = None;
        self.elapsed_ms += self.frame_interval_ms();
        Some(self.render(sink, scheduler))
    }

    fn render<T, S>(&mut self, sink: &mut T, scheduler: &mut S) -> CountFrame
    where
        T: TextSink + ?Sized,
        S: Scheduler + ?Sized,
    {
        let (value, progress) = count_value(self.target, self.elapsed_ms, self.config.duration_ms);
        sink.set_text(&value.to_string());
        self.value = Some(value);
        let complete = progress >= 1.0;
        if complete {
            log::trace!("count-up settled at {value}");
        } else {
            self.pending = Some(scheduler.schedule(self.frame_interval_ms()));
        }
        CountFrame {
            value,
            progress,
            complete,
        }
    }

    /// Cancel the pending frame. Safe to call more than once.
    pub fn stop<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(h) = self.pending.take() {
            scheduler.cancel(h);
        }
    }
}
