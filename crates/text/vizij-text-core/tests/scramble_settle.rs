use rand::rngs::SmallRng;
use rand::SeedableRng;
use vizij_text_core::{
    RecordingSink, ScrambleCell, ScrambleConfig, ScrambleEffect, Scrambler, VirtualScheduler,
};

const PAIRS: &[(&str, &str)] = &[
    ("", ""),
    ("same", "same"),
    ("short", "a considerably longer headline"),
    ("a long headline that shrinks", "tiny"),
    ("gone", ""),
    ("", "appears"),
    ("héllo wörld", "日本語"),
];

#[test]
fn settles_within_max_end_frame_plus_one() {
    let cfg = ScrambleConfig::default();
    for seed in 0..64 {
        let mut rng = SmallRng::seed_from_u64(seed);
        for (old, new) in PAIRS {
            let mut fx = ScrambleEffect::new(old, new, &cfg, &mut rng);
            let bound = fx.queue().max_end_frame() as usize + 1;
            let mut frames = 0usize;
            let last = loop {
                let f = fx.render(&mut rng);
                assert_eq!(f.frame as usize, frames);
                frames += 1;
                assert!(frames <= bound, "seed {seed}: {old:?} -> {new:?} overran");
                if f.complete {
                    break f;
                }
            };
            assert_eq!(last.text(), *new);
            assert_eq!(last.settled_count(), fx.queue().len());
            assert!(fx.is_complete());
        }
    }
}

#[test]
fn cells_progress_pending_glyph_settled() {
    let cfg = ScrambleConfig::default();
    let mut rng = SmallRng::seed_from_u64(42);
    let mut fx = ScrambleEffect::new("abcdefgh", "ABCDEFGH", &cfg, &mut rng);
    let records = fx.queue().records().to_vec();
    let symbols: Vec<char> = cfg.symbols.chars().collect();
    loop {
        let f = fx.render(&mut rng);
        for (cell, rec) in f.cells.iter().zip(&records) {
            match cell {
                ScrambleCell::Pending(c) => {
                    assert!(f.frame < rec.start_frame);
                    assert_eq!(*c, rec.from);
                }
                ScrambleCell::Glyph(c) => {
                    assert!(f.frame >= rec.start_frame && f.frame < rec.end_frame);
                    assert!(symbols.contains(c));
                }
                ScrambleCell::Settled(c) => {
                    assert!(f.frame >= rec.end_frame);
                    assert_eq!(*c, rec.to);
                }
            }
        }
        if f.complete {
            break;
        }
    }
}

#[test]
fn scrambler_stops_scheduling_once_settled() {
    let mut sched = VirtualScheduler::new();
    let mut sink = RecordingSink::new();
    let mut rng = SmallRng::seed_from_u64(9);
    let mut scrambler = Scrambler::new(ScrambleConfig::default());

    let first = scrambler.set_text(
        "Design",
        "Designed to move",
        &mut sink,
        &mut sched,
        &mut rng,
    );
    let mut frames = 1;
    let mut complete = first.complete;
    while let Some(h) = sched.pop_due() {
        let f = scrambler.on_timer(h, &mut sink, &mut sched, &mut rng).unwrap();
        frames += 1;
        complete = f.complete;
        assert!(sched.pending_count() <= 1);
    }
    assert!(complete);
    assert_eq!(sink.text, "Designed to move");
    assert!(!scrambler.is_running());
    assert_eq!(sched.scheduled_total(), frames - 1);
    let max_end = scrambler.effect().unwrap().queue().max_end_frame() as usize;
    assert!(frames <= max_end + 1);
}

#[test]
fn new_text_replaces_in_flight_scramble() {
    let mut sched = VirtualScheduler::new();
    let mut sink = RecordingSink::new();
    let mut rng = SmallRng::seed_from_u64(5);
    let cfg = ScrambleConfig {
        max_start_frame: 3,
        max_window_frames: 10,
        ..ScrambleConfig::default()
    };
    let mut scrambler = Scrambler::new(cfg);
    scrambler.set_text("one", "two", &mut sink, &mut sched, &mut rng);
    let stale = scrambler.pending();

    scrambler.set_text("two", "three", &mut sink, &mut sched, &mut rng);
    if let Some(stale) = stale {
        assert!(!sched.is_pending(stale));
        assert!(scrambler
            .on_timer(stale, &mut sink, &mut sched, &mut rng)
            .is_none());
    }
    while let Some(h) = sched.pop_due() {
        scrambler.on_timer(h, &mut sink, &mut sched, &mut rng);
    }
    assert_eq!(sink.text, "three");

    scrambler.set_text("three", "four", &mut sink, &mut sched, &mut rng);
    scrambler.stop(&mut sched);
    assert_eq!(sched.pending_count(), 0);
}
