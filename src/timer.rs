//! Countdown state machine with a fixed Pomodoro cycle and a custom mode.
//!
//! All state lives in [`Timer`]. Every operation reports its visible effects
//! through a [`TimerObserver`], which is how the terminal shell learns what to
//! draw. Ticks are never self-driven: the timer arms a [`Ticker`] deadline and
//! the owner calls [`Timer::poll`] from its event loop.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::TimerError;
use crate::ticker::Ticker;

pub const STUDY_SECS: u64 = 25 * 60;
pub const SHORT_BREAK_SECS: u64 = 5 * 60;
pub const LONG_BREAK_SECS: u64 = 15 * 60;
pub const SESSIONS_PER_CYCLE: u32 = 4;
pub const DEFAULT_CUSTOM_MINUTES: u32 = 25;

// ============================================================================
// Data Models
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Pomodoro,
    Custom,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pomodoro => "Pomodoro",
            Self::Custom => "Custom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Study,
    ShortBreak,
    LongBreak,
    Custom,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Self::Study => "🎯 STUDY",
            Self::ShortBreak => "☕ SHORT BREAK",
            Self::LongBreak => "🌴 LONG BREAK",
            Self::Custom => "⏱ CUSTOM TIMER",
        }
    }

    /// Where a Pomodoro cycle (re)enters given the completed study sessions.
    pub fn cycle_entry(session_count: u32) -> Self {
        if session_count < SESSIONS_PER_CYCLE {
            Self::Study
        } else {
            Self::LongBreak
        }
    }

    /// Transition table. `sessions` is the count after this phase's bookkeeping.
    pub fn following(self, sessions: u32) -> Option<Self> {
        match self {
            Self::Study if sessions < SESSIONS_PER_CYCLE => Some(Self::ShortBreak),
            Self::Study => Some(Self::LongBreak),
            Self::ShortBreak | Self::LongBreak => Some(Self::Study),
            Self::Custom => None,
        }
    }

    pub fn seconds(self, custom_minutes: u32) -> u64 {
        match self {
            Self::Study => STUDY_SECS,
            Self::ShortBreak => SHORT_BREAK_SECS,
            Self::LongBreak => LONG_BREAK_SECS,
            Self::Custom => u64::from(custom_minutes) * 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseLabel {
    Pause,
    Resume,
}

impl PauseLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pause => "Pause",
            Self::Resume => "Resume",
        }
    }
}

/// Enablement of the shell's buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub start_enabled: bool,
    pub pause_enabled: bool,
    pub pause_label: PauseLabel,
}

impl Controls {
    pub const IDLE: Self = Self {
        start_enabled: true,
        pause_enabled: false,
        pause_label: PauseLabel::Pause,
    };
    pub const RUNNING: Self = Self {
        start_enabled: false,
        pause_enabled: true,
        pause_label: PauseLabel::Pause,
    };
    pub const PAUSED: Self = Self {
        start_enabled: false,
        pause_enabled: true,
        pause_label: PauseLabel::Resume,
    };
}

impl Default for Controls {
    fn default() -> Self {
        Self::IDLE
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub mode: Mode,
    pub running: bool,
    pub paused: bool,
    pub remaining_seconds: u64,
    pub total_seconds: u64,
    pub session_count: u32,
    pub custom_minutes: u32,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            mode: Mode::Pomodoro,
            running: false,
            paused: false,
            remaining_seconds: 0,
            total_seconds: 0,
            session_count: 0,
            custom_minutes: DEFAULT_CUSTOM_MINUTES,
        }
    }
}

/// Render and notification hooks implemented by the presentation layer.
pub trait TimerObserver {
    fn on_tick(&mut self, time: &str, progress: f64);
    fn on_session_count_changed(&mut self, count: u32);
    fn on_phase_changed(&mut self, phase: Option<Phase>);
    /// `next` is `None` when the timer stopped instead of moving on.
    fn on_phase_finished(&mut self, finished: Phase, next: Option<Phase>);
    fn on_invalid_input(&mut self, error: &TimerError);
    fn on_controls_changed(&mut self, controls: Controls);
}

// ============================================================================
// Helpers
// ============================================================================

pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

pub fn progress_fraction(total: u64, remaining: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let elapsed = total.saturating_sub(remaining);
    (elapsed as f64 / total as f64).clamp(0.0, 1.0)
}

/// Parses the free-text entry as a positive whole number of minutes.
pub fn parse_custom_minutes(input: &str) -> Result<u32, TimerError> {
    match input.trim().parse::<u32>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(TimerError::InvalidCustomMinutes { input: input.to_string() }),
    }
}

// ============================================================================
// State Machine
// ============================================================================

#[derive(Debug, Clone)]
pub struct Timer {
    state: TimerState,
    phase: Option<Phase>,
    custom_input: String,
    ticker: Ticker,
}

impl Timer {
    pub fn new(mode: Mode, custom_input: impl Into<String>) -> Self {
        let custom_input = custom_input.into();
        let custom_minutes = parse_custom_minutes(&custom_input).unwrap_or(DEFAULT_CUSTOM_MINUTES);
        Self {
            state: TimerState { mode, custom_minutes, ..TimerState::default() },
            phase: None,
            custom_input,
            ticker: Ticker::default(),
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    pub fn custom_input(&self) -> &str {
        &self.custom_input
    }

    pub fn is_idle(&self) -> bool {
        !self.state.running
    }

    pub fn progress(&self) -> f64 {
        progress_fraction(self.state.total_seconds, self.state.remaining_seconds)
    }

    /// Next instant at which [`Timer::poll`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.ticker.deadline()
    }

    /// Seconds shown while idle: the mode's default phase length.
    pub fn idle_seconds(&self) -> u64 {
        match self.state.mode {
            Mode::Pomodoro => STUDY_SECS,
            Mode::Custom => {
                let minutes = parse_custom_minutes(&self.custom_input).unwrap_or(DEFAULT_CUSTOM_MINUTES);
                Phase::Custom.seconds(minutes)
            }
        }
    }

    /// Pushes the whole current picture to a freshly attached observer.
    pub fn sync<O: TimerObserver>(&self, obs: &mut O) {
        obs.on_phase_changed(self.phase);
        obs.on_session_count_changed(self.state.session_count);
        obs.on_controls_changed(self.controls());
        if self.state.running {
            self.render(obs);
        } else {
            obs.on_tick(&format_time(self.idle_seconds()), 0.0);
        }
    }

    pub fn set_mode<O: TimerObserver>(&mut self, mode: Mode, obs: &mut O) {
        if self.state.mode == mode {
            return;
        }
        debug!(mode = mode.label(), "mode selected");
        self.state.mode = mode;
        if self.is_idle() {
            obs.on_tick(&format_time(self.idle_seconds()), 0.0);
        }
    }

    /// Stores the entry text; `custom_minutes` follows it whenever it parses.
    pub fn set_custom_input<O: TimerObserver>(&mut self, input: impl Into<String>, obs: &mut O) {
        self.custom_input = input.into();
        if let Ok(minutes) = parse_custom_minutes(&self.custom_input) {
            self.state.custom_minutes = minutes;
        }
        if self.is_idle() && self.state.mode == Mode::Custom {
            obs.on_tick(&format_time(self.idle_seconds()), 0.0);
        }
    }

    pub fn start<O: TimerObserver>(&mut self, now: Instant, obs: &mut O) -> Result<(), TimerError> {
        if self.state.running {
            debug!("start ignored, timer already running");
            return Ok(());
        }

        let phase = match self.state.mode {
            Mode::Pomodoro => Phase::cycle_entry(self.state.session_count),
            Mode::Custom => match parse_custom_minutes(&self.custom_input) {
                Ok(minutes) => {
                    self.state.custom_minutes = minutes;
                    Phase::Custom
                }
                Err(err) => {
                    warn!(input = %self.custom_input, "rejected custom minutes");
                    obs.on_invalid_input(&err);
                    self.reset(obs);
                    return Err(err);
                }
            },
        };

        self.state.running = true;
        self.state.paused = false;
        obs.on_controls_changed(Controls::RUNNING);
        info!(mode = self.state.mode.label(), ?phase, "timer started");
        self.begin_phase(phase, now, obs);
        Ok(())
    }

    /// Pause/resume toggle. Does nothing while idle.
    pub fn toggle_pause<O: TimerObserver>(&mut self, now: Instant, obs: &mut O) {
        if !self.state.running {
            return;
        }
        self.state.paused = !self.state.paused;
        if self.state.paused {
            self.ticker.cancel();
            debug!(remaining = self.state.remaining_seconds, "paused");
        } else {
            self.ticker.arm(now);
            debug!(remaining = self.state.remaining_seconds, "resumed");
        }
        obs.on_controls_changed(self.controls());
    }

    pub fn reset<O: TimerObserver>(&mut self, obs: &mut O) {
        self.ticker.cancel();
        self.phase = None;
        self.state.running = false;
        self.state.paused = false;
        self.state.remaining_seconds = 0;
        self.state.total_seconds = 0;
        self.state.session_count = 0;
        info!("timer reset");

        obs.on_phase_changed(None);
        obs.on_tick(&format_time(self.idle_seconds()), 0.0);
        obs.on_session_count_changed(0);
        obs.on_controls_changed(Controls::IDLE);
    }

    /// Fires the pending tick if its deadline has passed. Returns whether one fired.
    /// After a long stall only a single tick fires; the missed time is not replayed.
    pub fn poll<O: TimerObserver>(&mut self, now: Instant, obs: &mut O) -> bool {
        match self.ticker.take_due(now) {
            Some(deadline) => {
                self.tick(deadline, obs);
                true
            }
            None => false,
        }
    }

    /// One elapsed second. `now` is the instant the next tick is measured from.
    pub fn tick<O: TimerObserver>(&mut self, now: Instant, obs: &mut O) {
        if !self.state.running || self.state.paused {
            debug!(running = self.state.running, paused = self.state.paused, "tick ignored");
            return;
        }

        if self.state.remaining_seconds > 0 {
            self.state.remaining_seconds -= 1;
            self.render(obs);
        }

        if self.state.remaining_seconds == 0 {
            self.complete_phase(now, obs);
        } else {
            self.ticker.arm(now);
        }
    }

    fn controls(&self) -> Controls {
        match (self.state.running, self.state.paused) {
            (false, _) => Controls::IDLE,
            (true, false) => Controls::RUNNING,
            (true, true) => Controls::PAUSED,
        }
    }

    fn render<O: TimerObserver>(&self, obs: &mut O) {
        obs.on_tick(&format_time(self.state.remaining_seconds), self.progress());
    }

    fn begin_phase<O: TimerObserver>(&mut self, phase: Phase, now: Instant, obs: &mut O) {
        let seconds = phase.seconds(self.state.custom_minutes);
        self.phase = Some(phase);
        self.state.total_seconds = seconds;
        self.state.remaining_seconds = seconds;
        debug!(?phase, seconds, "phase started");

        obs.on_phase_changed(Some(phase));
        self.render(obs);
        self.ticker.arm(now);
    }

    fn complete_phase<O: TimerObserver>(&mut self, now: Instant, obs: &mut O) {
        let Some(finished) = self.phase else {
            return;
        };

        match finished {
            Phase::Study => {
                self.state.session_count += 1;
                obs.on_session_count_changed(self.state.session_count);
            }
            Phase::LongBreak => {
                self.state.session_count = 0;
                obs.on_session_count_changed(0);
            }
            Phase::ShortBreak | Phase::Custom => {}
        }

        match finished.following(self.state.session_count) {
            Some(next) => {
                info!(?finished, ?next, sessions = self.state.session_count, "phase complete");
                obs.on_phase_finished(finished, Some(next));
                self.begin_phase(next, now, obs);
            }
            None => {
                info!(?finished, "countdown finished");
                self.reset(obs);
                obs.on_phase_finished(finished, None);
            }
        }
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new(Mode::Pomodoro, DEFAULT_CUSTOM_MINUTES.to_string())
    }
}
