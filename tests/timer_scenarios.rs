//! End-to-end countdown scenarios driven through the public timer API.

use std::time::{Duration, Instant};

use studytimer::timer::{LONG_BREAK_SECS, SHORT_BREAK_SECS, STUDY_SECS};
use studytimer::{Controls, Mode, Phase, Timer, TimerError, TimerObserver};

/// Captures the last rendered frame plus every phase boundary.
#[derive(Default)]
struct Screen {
    time: String,
    progress: f64,
    sessions: u32,
    phases_started: Vec<Phase>,
    finished: Vec<(Phase, Option<Phase>)>,
    errors: Vec<TimerError>,
    controls: Option<Controls>,
}

impl TimerObserver for Screen {
    fn on_tick(&mut self, time: &str, progress: f64) {
        self.time = time.to_string();
        self.progress = progress;
    }
    fn on_session_count_changed(&mut self, count: u32) {
        self.sessions = count;
    }
    fn on_phase_changed(&mut self, phase: Option<Phase>) {
        if let Some(phase) = phase {
            self.phases_started.push(phase);
        }
    }
    fn on_phase_finished(&mut self, finished: Phase, next: Option<Phase>) {
        self.finished.push((finished, next));
    }
    fn on_invalid_input(&mut self, error: &TimerError) {
        self.errors.push(error.clone());
    }
    fn on_controls_changed(&mut self, controls: Controls) {
        self.controls = Some(controls);
    }
}

fn run_seconds(timer: &mut Timer, screen: &mut Screen, seconds: u64, now: Instant) {
    for _ in 0..seconds {
        timer.tick(now, screen);
    }
}

#[test]
fn first_study_session_rolls_into_a_short_break() {
    let mut timer = Timer::default();
    let mut screen = Screen::default();
    let now = Instant::now();
    timer.start(now, &mut screen).unwrap();

    run_seconds(&mut timer, &mut screen, 1500, now);

    assert_eq!(timer.state().session_count, 1);
    assert_eq!(timer.phase(), Some(Phase::ShortBreak));
    assert_eq!(timer.state().total_seconds, 300);
    assert_eq!(timer.state().remaining_seconds, 300);
    assert_eq!(screen.time, "05:00");
    assert_eq!(screen.progress, 0.0);
    assert_eq!(screen.sessions, 1);
    assert!(timer.state().running);
}

#[test]
fn full_super_cycle_has_three_short_breaks_then_one_long() {
    let mut timer = Timer::default();
    let mut screen = Screen::default();
    let now = Instant::now();
    timer.start(now, &mut screen).unwrap();

    let period = 4 * STUDY_SECS + 3 * SHORT_BREAK_SECS + LONG_BREAK_SECS;
    run_seconds(&mut timer, &mut screen, period, now);

    use Phase::*;
    assert_eq!(
        screen.phases_started,
        vec![Study, ShortBreak, Study, ShortBreak, Study, ShortBreak, Study, LongBreak, Study]
    );
    assert_eq!(
        screen.finished.iter().filter(|(p, _)| *p == ShortBreak).count(),
        3
    );
    assert_eq!(screen.finished.iter().filter(|(p, _)| *p == LongBreak).count(), 1);
    assert_eq!(timer.state().session_count, 0);
    assert_eq!(timer.phase(), Some(Study));
    assert_eq!(screen.time, "25:00");
}

#[test]
fn session_count_reaches_four_only_during_the_long_break() {
    let mut timer = Timer::default();
    let mut screen = Screen::default();
    let now = Instant::now();
    timer.start(now, &mut screen).unwrap();

    run_seconds(&mut timer, &mut screen, 4 * STUDY_SECS + 3 * SHORT_BREAK_SECS, now);
    assert_eq!(timer.phase(), Some(Phase::LongBreak));
    assert_eq!(timer.state().session_count, 4);
    assert_eq!(screen.time, "15:00");

    run_seconds(&mut timer, &mut screen, LONG_BREAK_SECS, now);
    assert_eq!(timer.state().session_count, 0);
}

#[test]
fn custom_ten_minutes_counts_six_hundred_seconds() {
    let mut timer = Timer::new(Mode::Custom, "10");
    let mut screen = Screen::default();
    let now = Instant::now();
    timer.start(now, &mut screen).unwrap();

    assert_eq!(timer.state().total_seconds, 600);
    assert_eq!(screen.time, "10:00");

    run_seconds(&mut timer, &mut screen, 599, now);
    assert_eq!(screen.time, "00:01");
    assert!(timer.state().running);

    timer.tick(now, &mut screen);
    assert_eq!(screen.finished, vec![(Phase::Custom, None)]);
    assert_eq!(screen.phases_started, vec![Phase::Custom]);
    assert!(!timer.state().running);
    assert_eq!(screen.controls, Some(Controls::IDLE));
}

#[test]
fn non_numeric_custom_minutes_never_start() {
    let mut timer = Timer::new(Mode::Custom, "abc");
    let mut screen = Screen::default();
    let result = timer.start(Instant::now(), &mut screen);

    assert!(matches!(result, Err(TimerError::InvalidCustomMinutes { .. })));
    assert_eq!(screen.errors.len(), 1);
    assert!(screen.phases_started.is_empty());
    assert!(!timer.state().running);
    assert_eq!(timer.state().remaining_seconds, 0);
    assert_eq!(screen.time, "25:00");
}

#[test]
fn pausing_for_a_while_loses_no_time() {
    let mut timer = Timer::default();
    let mut screen = Screen::default();
    let start = Instant::now();
    timer.start(start, &mut screen).unwrap();

    let mut now = start;
    for _ in 0..10 {
        now += Duration::from_secs(1);
        assert!(timer.poll(now, &mut screen));
    }
    timer.toggle_pause(now, &mut screen);
    let remaining = timer.state().remaining_seconds;

    let later = now + Duration::from_secs(600);
    assert!(!timer.poll(later, &mut screen));
    timer.toggle_pause(later, &mut screen);
    assert_eq!(timer.state().remaining_seconds, remaining);

    assert!(timer.poll(later + Duration::from_secs(1), &mut screen));
    assert_eq!(timer.state().remaining_seconds, remaining - 1);
}

#[test]
fn reset_mid_break_clears_everything() {
    let mut timer = Timer::default();
    let mut screen = Screen::default();
    let now = Instant::now();
    timer.start(now, &mut screen).unwrap();
    run_seconds(&mut timer, &mut screen, STUDY_SECS + 60, now);
    assert_eq!(timer.phase(), Some(Phase::ShortBreak));

    let deadline = timer.next_deadline().unwrap();
    timer.reset(&mut screen);
    assert!(!timer.poll(deadline, &mut screen));

    let state = timer.state();
    assert!(!state.running && !state.paused);
    assert_eq!(state.remaining_seconds, 0);
    assert_eq!(state.session_count, 0);
    assert_eq!(screen.sessions, 0);
    assert_eq!(screen.time, "25:00");

    // A fresh start begins a new cycle from the first study session.
    timer.start(now, &mut screen).unwrap();
    assert_eq!(timer.phase(), Some(Phase::Study));
}
