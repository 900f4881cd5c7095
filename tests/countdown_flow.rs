use std::error::Error;

use rcountdown::{CountdownScreen, HapticTrigger, Phase, COMMITTING_MS};

#[derive(Default)]
struct Pulses(u32);

impl HapticTrigger for Pulses {
    fn fire(&mut self) -> Result<(), Box<dyn Error>> {
        self.0 += 1;
        Ok(())
    }
}

const ITEM: f64 = 12.0;

#[test]
fn one_second_countdown_end_to_end() {
    let mut screen = CountdownScreen::new(ITEM, 0, Pulses::default());
    assert_eq!(screen.frame(0).selected.secs(), 1);

    assert!(screen.commit(1_000));
    assert_eq!(screen.phase(), Phase::Committing);

    // sample every 16ms like a render loop
    let mut now = 1_000;
    let mut seen_running = None;
    let mut seen_finished = None;
    let mut seen_idle = None;
    while now <= 3_000 {
        for t in screen.tick(now) {
            match t.to {
                Phase::Running => seen_running = Some(t.at_ms),
                Phase::Finished => seen_finished = Some(t.at_ms),
                Phase::Idle => seen_idle = Some(t.at_ms),
                Phase::Committing => {}
            }
        }
        if screen.phase() == Phase::Running {
            let f = screen.frame(now);
            assert!(f.remaining_seconds <= 1);
        }
        now += 16;
    }

    assert_eq!(seen_running, Some(1_000 + COMMITTING_MS));
    assert_eq!(seen_finished, Some(1_000 + COMMITTING_MS + 1_000));
    assert_eq!(seen_idle, Some(1_000 + 2 * COMMITTING_MS + 1_000));
    assert_eq!(screen.sequencer().haptic().0, 1);
    assert_eq!(screen.phase(), Phase::Idle);
}

#[test]
fn running_starts_with_full_duration() {
    let mut screen = CountdownScreen::new(ITEM, 0, Pulses::default());
    screen.commit(0);
    screen.tick(COMMITTING_MS);
    let f = screen.frame(COMMITTING_MS);
    assert_eq!(f.phase, Phase::Running);
    assert_eq!(f.remaining_seconds, 1);
    assert_eq!(f.visual.background_translate_y, 0.0);

    screen.tick(COMMITTING_MS + 1_000);
    let f = screen.frame(COMMITTING_MS + 1_000);
    assert_eq!(f.phase, Phase::Finished);
    assert_eq!(f.remaining_seconds, 0);
}

#[test]
fn new_commit_from_finished_discards_reverse_animation() {
    let mut screen = CountdownScreen::new(ITEM, 1, Pulses::default());
    screen.commit(0);
    screen.tick(COMMITTING_MS + 5_000);
    assert_eq!(screen.phase(), Phase::Finished);
    let stale = screen.sequencer().pending_ticket().expect("reverse animation pending");

    // pick 10s for the second run, then restart before the button is back
    screen.on_scroll_settle(2.0 * ITEM);
    assert!(screen.commit(COMMITTING_MS + 5_100));
    let b = screen.sequencer().session().expect("session B");
    assert_eq!(b.phase, Phase::Committing);
    assert_eq!(b.duration.secs(), 10);

    // the old ticket's deadline passes mid-Committing of session B
    assert!(stale.due_ms < b.phase_start_ms + COMMITTING_MS);
    let mut seq_view = screen.frame(stale.due_ms);
    assert_eq!(seq_view.phase, Phase::Committing);
    assert!(screen.tick(stale.due_ms).is_empty());
    seq_view = screen.frame(stale.due_ms);
    assert_eq!(seq_view.phase, Phase::Committing);
    assert_eq!(seq_view.session_duration.map(|d| d.secs()), Some(10));
    assert_eq!(screen.sequencer().haptic().0, 1);
}

#[test]
fn commit_while_running_is_ignored() {
    let mut screen = CountdownScreen::new(ITEM, 2, Pulses::default());
    screen.commit(0);
    assert!(!screen.commit(100));
    screen.tick(COMMITTING_MS);
    assert!(!screen.commit(COMMITTING_MS + 10));
    let s = screen.sequencer().session().expect("session");
    assert_eq!(s.generation, 1);
    assert_eq!(s.phase, Phase::Running);
}
