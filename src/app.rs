//! Presentation state and key handling for the terminal shell.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::config::{Settings, Theme};
use crate::error::TimerError;
use crate::notify::Notifier;
use crate::timer::{Controls, Mode, Phase, Timer, TimerObserver};

// ============================================================================
// View Models
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: &'static str,
    pub body: &'static str,
    pub error: bool,
}

impl Alert {
    pub const INVALID_INPUT: Self = Self {
        title: "Invalid Input",
        body: "Please enter a valid number of minutes.",
        error: true,
    };
    pub const FINISHED: Self = Self {
        title: "Timer Finished",
        body: "Time's up! Take a break or start a new session.",
        error: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Timer,
    Help,
}

/// Everything drawn on the timer face, updated only through [`TimerObserver`].
#[derive(Debug, Clone)]
pub struct Face {
    pub time: String,
    pub progress: f64,
    pub session_count: u32,
    pub phase: Option<Phase>,
    pub controls: Controls,
    pub alert: Option<Alert>,
    notifier: Notifier,
}

impl Face {
    pub fn new(notifier: Notifier) -> Self {
        Self {
            time: String::new(),
            progress: 0.0,
            session_count: 0,
            phase: None,
            controls: Controls::IDLE,
            alert: None,
            notifier,
        }
    }
}

impl TimerObserver for Face {
    fn on_tick(&mut self, time: &str, progress: f64) {
        self.time.clear();
        self.time.push_str(time);
        self.progress = progress;
    }

    fn on_session_count_changed(&mut self, count: u32) {
        self.session_count = count;
    }

    fn on_phase_changed(&mut self, phase: Option<Phase>) {
        self.phase = phase;
    }

    fn on_phase_finished(&mut self, finished: Phase, next: Option<Phase>) {
        match next {
            Some(Phase::ShortBreak) => self.notifier.notify("Break Time! ☕", "Time for a short break."),
            Some(Phase::LongBreak) => self.notifier.notify("Long Break Time! 🌴", "Great work! Take a longer break."),
            Some(Phase::Study) => self.notifier.notify("Back to Study! 🎯", "Let's focus on your next session."),
            Some(Phase::Custom) | None => {
                debug!(?finished, "countdown finished");
                self.notifier.notify(Alert::FINISHED.title, Alert::FINISHED.body);
                self.alert = Some(Alert::FINISHED);
            }
        }
    }

    fn on_invalid_input(&mut self, _error: &TimerError) {
        self.alert = Some(Alert::INVALID_INPUT);
    }

    fn on_controls_changed(&mut self, controls: Controls) {
        self.controls = controls;
    }
}

// ============================================================================
// Application State
// ============================================================================

pub struct App {
    pub timer: Timer,
    pub face: Face,
    pub theme: Theme,
    pub view: View,
    pub editing: bool,
    pub input: String,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let notifier = Notifier::new(settings.notifications, settings.sound);
        let timer = Timer::new(settings.mode, settings.custom_input);
        let mut face = Face::new(notifier);
        timer.sync(&mut face);

        Self {
            timer,
            face,
            theme: settings.theme,
            view: View::Timer,
            editing: false,
            input: String::new(),
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.next_deadline()
    }

    /// Fires every tick that is due by `now`.
    pub fn poll(&mut self, now: Instant) {
        while self.timer.poll(now, &mut self.face) {}
    }

    pub fn start(&mut self, now: Instant) {
        if let Err(err) = self.timer.start(now, &mut self.face) {
            debug!(%err, "start rejected");
        }
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        self.timer.toggle_pause(now, &mut self.face);
    }

    pub fn reset(&mut self) {
        self.timer.reset(&mut self.face);
    }

    pub fn select_mode(&mut self, mode: Mode) {
        self.timer.set_mode(mode, &mut self.face);
    }

    /// Handles one key press. Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.face.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.face.alert = None;
            }
            return false;
        }

        if self.editing {
            self.handle_entry(key);
            return false;
        }

        if self.view == View::Help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h') | KeyCode::Char('?')) {
                self.view = View::Timer;
            }
            return false;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('s') | KeyCode::Enter => self.start(now),
            KeyCode::Char(' ') => self.toggle_pause(now),
            KeyCode::Char('r') => self.reset(),
            KeyCode::Char('1') => self.select_mode(Mode::Pomodoro),
            KeyCode::Char('2') => self.select_mode(Mode::Custom),
            KeyCode::Char('e') => {
                self.input = self.timer.custom_input().to_string();
                self.editing = true;
            }
            KeyCode::Char('h') | KeyCode::Char('?') => self.view = View::Help,
            _ => {}
        }
        false
    }

    fn handle_entry(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => {
                let input = std::mem::take(&mut self.input);
                self.timer.set_custom_input(input, &mut self.face);
                self.editing = false;
            }
            KeyCode::Esc => {
                self.input.clear();
                self.editing = false;
            }
            _ => {}
        }
    }
}
