//! Scramble transition: each character position flickers through random
//! symbols inside its own frame window, then settles on the target text.

use rand::Rng;

use crate::config::ScrambleConfig;
use crate::host::{Scheduler, TextSink};
use crate::ids::TimerHandle;

/// Per-position transition. `None` stands in for positions past the end of
/// the shorter of the old/new texts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrambleRecord {
    pub from: Option<char>,
    pub to: Option<char>,
    pub start_frame: u32,
    /// Always `>= start_frame`.
    pub end_frame: u32,
    /// Last symbol substituted while in flight.
    pub current: Option<char>,
}

fn draw<R: Rng + ?Sized>(rng: &mut R, bound: u32) -> u32 {
    if bound == 0 {
        0
    } else {
        rng.gen_range(0..bound)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScrambleQueue {
    records: Vec<ScrambleRecord>,
}

impl ScrambleQueue {
    /// One record per position across the longer of `old` and `new`.
    pub fn new<R: Rng + ?Sized>(old: &str, new: &str, cfg: &ScrambleConfig, rng: &mut R) -> Self {
        let old: Vec<char> = old.chars().collect();
        let new: Vec<char> = new.chars().collect();
        let len = old.len().max(new.len());
        let records = (0..len)
            .map(|i| {
                let start_frame = draw(rng, cfg.max_start_frame);
                let end_frame = start_frame.saturating_add(draw(rng, cfg.max_window_frames));
                ScrambleRecord {
                    from: old.get(i).copied(),
                    to: new.get(i).copied(),
                    start_frame,
                    end_frame,
                    current: None,
                }
            })
            .collect();
        Self { records }
    }

    pub fn records(&self) -> &[ScrambleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Frame at which every record has settled.
    pub fn max_end_frame(&self) -> u32 {
        self.records.iter().map(|r| r.end_frame).max().unwrap_or(0)
    }
}

/// How one position renders on a given frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrambleCell {
    /// Window not started; still showing the old character.
    Pending(Option<char>),
    /// In flight; showing a random symbol.
    Glyph(char),
    Settled(Option<char>),
}

impl ScrambleCell {
    pub fn as_char(self) -> Option<char> {
        match self {
            ScrambleCell::Pending(c) | ScrambleCell::Settled(c) => c,
            ScrambleCell::Glyph(c) => Some(c),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrambleFrame {
    pub frame: u32,
    pub cells: Vec<ScrambleCell>,
    pub complete: bool,
}

impl ScrambleFrame {
    pub fn text(&self) -> String {
        self.cells.iter().filter_map(|c| c.as_char()).collect()
    }

    pub fn settled_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, ScrambleCell::Settled(_)))
            .count()
    }
}

/// Frame-by-frame scramble state.
#[derive(Clone, Debug)]
pub struct ScrambleEffect {
    queue: ScrambleQueue,
    frame: u32,
    symbols: Vec<char>,
    flicker: f64,
}

impl ScrambleEffect {
    pub fn new<R: Rng + ?Sized>(old: &str, new: &str, cfg: &ScrambleConfig, rng: &mut R) -> Self {
        let mut symbols: Vec<char> = cfg.symbols.chars().collect();
        if symbols.is_empty() {
            symbols = ScrambleConfig::default().symbols.chars().collect();
        }
        let flicker = if cfg.flicker_probability.is_finite() {
            cfg.flicker_probability.clamp(0.0, 1.0)
        } else {
            ScrambleConfig::default().flicker_probability
        };
        Self {
            queue: ScrambleQueue::new(old, new, cfg, rng),
            frame: 0,
            symbols,
            flicker,
        }
    }

    pub fn queue(&self) -> &ScrambleQueue {
        &self.queue
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn is_complete(&self) -> bool {
        self.frame >= self.queue.max_end_frame()
    }

    fn random_symbol<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        self.symbols[rng.gen_range(0..self.symbols.len())]
    }

    /// Render the current frame, then move to the next one unless every
    /// record has settled.
    pub fn render<R: Rng + ?Sized>(&mut self, rng: &mut R) -> ScrambleFrame {
        let frame = self.frame;
        let mut cells = Vec::with_capacity(self.queue.records.len());
        let mut settled = 0usize;
        for i in 0..self.queue.records.len() {
            let rec = &self.queue.records[i];
            let cell = if frame >= rec.end_frame {
                settled += 1;
                ScrambleCell::Settled(rec.to)
            } else if frame >= rec.start_frame {
                let glyph = match rec.current {
                    Some(c) if !rng.gen_bool(self.flicker) => c,
                    _ => self.random_symbol(rng),
                };
                self.queue.records[i].current = Some(glyph);
                ScrambleCell::Glyph(glyph)
            } else {
                ScrambleCell::Pending(rec.from)
            };
            cells.push(cell);
        }
        let complete = settled == cells.len();
        if !complete {
            self.frame += 1;
        }
        ScrambleFrame {
            frame,
            cells,
            complete,
        }
    }
}

/// Drives a [`ScrambleEffect`] through the host scheduler, one frame per
/// `frame_interval_ms`, and stops scheduling once settled.
#[derive(Debug, Default)]
pub struct Scrambler {
    config: ScrambleConfig,
    effect: Option<ScrambleEffect>,
    pending: Option<TimerHandle>,
}

impl Scrambler {
    pub fn new(config: ScrambleConfig) -> Self {
        Self {
            config,
            effect: None,
            pending: None,
        }
    }

    pub fn effect(&self) -> Option<&ScrambleEffect> {
        self.effect.as_ref()
    }

    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Begin a transition from `old` to `new`, rendering frame 0 right away.
    pub fn set_text<T, S, R>(
        &mut self,
        old: &str,
        new: &str,
        sink: &mut T,
        scheduler: &mut S,
        rng: &mut R,
    ) -> ScrambleFrame
    where
        T: TextSink + ?Sized,
        S: Scheduler + ?Sized,
        R: Rng + ?Sized,
    {
        self.stop(scheduler);
        let effect = ScrambleEffect::new(old, new, &self.config, rng);
        log::debug!(
            "scramble started: {} cells, settles by frame {}",
            effect.queue().len(),
            effect.queue().max_end_frame()
        );
        self.effect = Some(effect);
        self.tick(sink, scheduler, rng)
            .unwrap_or_else(|| ScrambleFrame {
                frame: 0,
                cells: Vec::new(),
                complete: true,
            })
    }

    /// Host callback for a fired frame timer; stale handles are ignored.
    pub fn on_timer<T, S, R>(
        &mut self,
        handle: TimerHandle,
        sink: &mut T,
        scheduler: &mut S,
        rng: &mut R,
    ) -> Option<ScrambleFrame>
    where
        T: TextSink + ?Sized,
        S: Scheduler + ?Sized,
        R: Rng + ?Sized,
    {
        if self.pending != Some(handle) {
            log::debug!("scramble ignoring stale timer {:?}", handle);
            return None;
        }
        self.pending = None;
        self.tick(sink, scheduler, rng)
    }

    fn tick<T, S, R>(&mut self, sink: &mut T, scheduler: &mut S, rng: &mut R) -> Option<ScrambleFrame>
    where
        T: TextSink + ?Sized,
        S: Scheduler + ?Sized,
        R: Rng + ?Sized,
    {
        let effect = self.effect.as_mut()?;
        let frame = effect.render(rng);
        sink.set_text(&frame.text());
        if !frame.complete {
            self.pending = Some(scheduler.schedule(self.config.frame_interval_ms));
        }
        Some(frame)
    }

    pub fn stop<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(h) = self.pending.take() {
            scheduler.cancel(h);
        }
    }
}
