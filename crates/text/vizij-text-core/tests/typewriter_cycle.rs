use vizij_text_core::{
    CaretState, ConfigError, Phase, RecordingSink, StepOutcome, Transition,
    Typewriter, TypewriterConfig, VirtualScheduler,
};
use vizij_text_fixtures::phrases;

fn phrases_of(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Fire up to `n` timers in due order, feeding them to the engine.
fn drive(
    tw: &mut Typewriter,
    sink: &mut RecordingSink,
    sched: &mut VirtualScheduler,
    n: usize,
) -> Vec<StepOutcome> {
    let mut out = Vec::new();
    for _ in 0..n {
        let Some(h) = sched.pop_due() else { break };
        if let Some(step) = tw.on_timer(h, sink, sched) {
            out.push(step);
        }
    }
    out
}

#[test]
fn empty_phrase_list_is_rejected_without_scheduling() {
    let mut sched = VirtualScheduler::new();
    let err = Typewriter::start(Vec::new(), TypewriterConfig::default(), &mut sched).unwrap_err();
    assert_eq!(err, ConfigError::EmptyPhrases);
    assert_eq!(sched.scheduled_total(), 0);
    assert_eq!(sched.pending_count(), 0);
}

#[test]
fn first_step_waits_for_initial_delay() {
    let mut sched = VirtualScheduler::new();
    let tw = Typewriter::start(phrases_of(&["hey"]), TypewriterConfig::default(), &mut sched)
        .unwrap();
    let h = tw.pending().unwrap();
    assert_eq!(sched.due_ms(h), Some(100.0));
    assert_eq!(tw.cursor().char_index, 0);
    assert_eq!(tw.phase(), Phase::Typing);
}

#[test]
fn visits_every_phrase_in_order_repeatedly() {
    let list = phrases_of(&["ab", "c", "def"]);
    let mut sched = VirtualScheduler::new();
    let mut sink = RecordingSink::new();
    let mut tw = Typewriter::start(list, TypewriterConfig::default(), &mut sched).unwrap();

    // (2*2+2) + (2*1+2) + (2*3+2) = 18 steps per pass.
    let mut order = vec![tw.cursor().message_index];
    for _ in 0..18 * 3 {
        let h = sched.pop_due().unwrap();
        let step = tw.on_timer(h, &mut sink, &mut sched).unwrap();
        if step.transition == Transition::NextPhrase {
            order.push(tw.cursor().message_index);
        }
    }
    assert_eq!(order, vec![0, 1, 2, 0, 1, 2, 0, 1, 2, 0]);
}

#[test]
fn manual_steps_keep_a_single_pending_timer() {
    let mut tw =
        Typewriter::new(phrases_of(&["ab", "c", "def"]), TypewriterConfig::default()).unwrap();
    let mut sched = VirtualScheduler::new();
    let mut sink = RecordingSink::new();
    assert!(!tw.is_running());
    let mut advances = 0;
    for _ in 0..18 * 3 {
        if tw.step(&mut sink, &mut sched).transition == Transition::NextPhrase {
            advances += 1;
        }
        assert_eq!(sched.pending_count(), 1);
    }
    assert_eq!(advances, 9);
    assert_eq!(tw.cursor().message_index, 0);
}

#[test]
fn cursor_stays_within_phrase_bounds() {
    let list = phrases::load("mixed-lengths").unwrap();
    let lens: Vec<usize> = list.iter().map(|p| p.chars().count()).collect();
    let mut sched = VirtualScheduler::new();
    let mut sink = RecordingSink::new();
    let mut tw = Typewriter::start(list, TypewriterConfig::default(), &mut sched).unwrap();

    for _ in 0..1_000 {
        let h = sched.pop_due().unwrap();
        tw.on_timer(h, &mut sink, &mut sched).unwrap();
        let c = tw.cursor();
        assert!(c.message_index < lens.len());
        assert!(c.char_index <= lens[c.message_index]);
        assert_eq!(sched.pending_count(), 1);
    }
}

#[test]
fn phases_follow_typing_hold_deleting_advance() {
    let list = phrases_of(&["abc", "xy"]);
    let lens = [3usize, 2];
    let mut sched = VirtualScheduler::new();
    let mut sink = RecordingSink::new();
    let mut tw = Typewriter::start(list, TypewriterConfig::default(), &mut sched).unwrap();

    let mut pattern = String::new();
    for _ in 0..40 {
        let before = tw.cursor();
        let h = sched.pop_due().unwrap();
        let step = tw.on_timer(h, &mut sink, &mut sched).unwrap();
        match step.transition {
            Transition::TypedChar => pattern.push('t'),
            Transition::DeletedChar => pattern.push('d'),
            Transition::BeginHold => {
                assert!(!before.is_deleting);
                assert_eq!(before.char_index, lens[before.message_index]);
                assert_eq!(step.phase, Phase::Holding);
                pattern.push('H');
            }
            Transition::NextPhrase => {
                assert!(before.is_deleting);
                assert_eq!(before.char_index, 0);
                pattern.push('|');
            }
        }
    }
    assert!(pattern.starts_with("tttHddd|ttHdd|tttHddd|"));
}

#[test]
fn renders_prefix_and_caret_per_step() {
    let mut sched = VirtualScheduler::new();
    let mut sink = RecordingSink::new();
    let mut tw =
        Typewriter::start(phrases_of(&["ok"]), TypewriterConfig::default(), &mut sched).unwrap();

    let steps = drive(&mut tw, &mut sink, &mut sched, 6);
    let texts: Vec<&str> = steps.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["", "o", "ok", "ok", "o", ""]);
    let carets: Vec<CaretState> = steps.iter().map(|s| s.caret).collect();
    assert_eq!(
        carets,
        vec![
            CaretState::Active,
            CaretState::Active,
            CaretState::Hidden,
            CaretState::Active,
            CaretState::Active,
            CaretState::Hidden,
        ]
    );
    assert_eq!(sink.text, "");
}

#[test]
fn delays_follow_speed_hold_and_long_phrase_scaling() {
    let long = "a".repeat(30);
    let short = "b".repeat(10);
    let mut sched = VirtualScheduler::new();
    let mut sink = RecordingSink::new();
    let mut tw = Typewriter::start(
        vec![long, short],
        TypewriterConfig::default(),
        &mut sched,
    )
    .unwrap();

    let steps = drive(&mut tw, &mut sink, &mut sched, 62 + 22);
    for step in &steps[..62] {
        match step.transition {
            Transition::TypedChar | Transition::NextPhrase => {
                assert!((step.delay_ms - 72.0).abs() < 1e-9)
            }
            Transition::DeletedChar => assert!((step.delay_ms - 32.0).abs() < 1e-9),
            Transition::BeginHold => assert_eq!(step.delay_ms, 8000.0),
        }
    }
    for step in &steps[62..] {
        match step.transition {
            Transition::TypedChar | Transition::NextPhrase => assert_eq!(step.delay_ms, 90.0),
            Transition::DeletedChar => assert_eq!(step.delay_ms, 40.0),
            Transition::BeginHold => assert_eq!(step.delay_ms, 8000.0),
        }
    }
}

#[test]
fn hold_duration_is_configurable() {
    let cfg = TypewriterConfig {
        hold_full_ms: 1500.0,
        ..TypewriterConfig::default()
    };
    let mut sched = VirtualScheduler::new();
    let mut sink = RecordingSink::new();
    let mut tw = Typewriter::start(phrases_of(&["x"]), cfg, &mut sched).unwrap();
    let steps = drive(&mut tw, &mut sink, &mut sched, 2);
    assert_eq!(steps[1].transition, Transition::BeginHold);
    assert_eq!(steps[1].delay_ms, 1500.0);
    assert_eq!(sched.due_ms(steps[1].timer), Some(100.0 + 90.0 + 1500.0));
}

#[test]
fn stop_blocks_already_queued_callback() {
    let mut sched = VirtualScheduler::new();
    let mut sink = RecordingSink::new();
    let mut tw =
        Typewriter::start(phrases_of(&["abc"]), TypewriterConfig::default(), &mut sched).unwrap();
    drive(&mut tw, &mut sink, &mut sched, 2);
    sink.clear_log();
    let before = tw.cursor();

    // Host already dequeued the callback when stop lands.
    let in_flight = sched.pop_due().unwrap();
    tw.stop(&mut sched);
    tw.stop(&mut sched);
    assert!(tw.on_timer(in_flight, &mut sink, &mut sched).is_none());

    assert!(sink.writes.is_empty());
    assert_eq!(tw.cursor(), before);
    assert!(!tw.is_running());
    assert_eq!(sched.pending_count(), 0);
}

#[test]
fn double_restart_leaves_one_pending_chain() {
    let mut sched = VirtualScheduler::new();
    let mut sink = RecordingSink::new();
    let mut tw = Typewriter::start(
        phrases::load("hero").unwrap(),
        TypewriterConfig::default(),
        &mut sched,
    )
    .unwrap();
    drive(&mut tw, &mut sink, &mut sched, 10);

    tw.restart(&mut sink, &mut sched);
    let step = tw.restart(&mut sink, &mut sched);
    assert_eq!(sched.pending_count(), 1);
    assert_eq!(tw.pending(), Some(step.timer));
    assert_eq!(step.text, "");
    assert_eq!(tw.cursor().message_index, 0);
    assert_eq!(tw.cursor().char_index, 1);

    let fired = drive(&mut tw, &mut sink, &mut sched, 5);
    assert_eq!(fired.len(), 5);
    assert_eq!(sched.pending_count(), 1);
}

#[test]
fn shutdown_cancels_pending_step() {
    let mut sched = VirtualScheduler::new();
    let tw =
        Typewriter::start(phrases_of(&["abc"]), TypewriterConfig::default(), &mut sched).unwrap();
    tw.shutdown(&mut sched);
    assert_eq!(sched.pending_count(), 0);
    assert_eq!(sched.cancelled_total(), 1);
}

#[test]
fn unicode_phrases_are_typed_by_char() {
    let mut sched = VirtualScheduler::new();
    let mut sink = RecordingSink::new();
    let list = phrases::load("unicode").unwrap();
    let first = list[0].clone();
    let mut tw = Typewriter::start(list, TypewriterConfig::default(), &mut sched).unwrap();
    let n = first.chars().count();
    drive(&mut tw, &mut sink, &mut sched, n + 1);
    assert_eq!(sink.text, first);
    let texts: Vec<&str> = sink.texts().collect();
    assert_eq!(texts[2], "hé");
}
