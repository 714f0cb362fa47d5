//! studytimer - a terminal study timer.
//!
//! [`timer`] holds the countdown state machine and its Pomodoro cycle; the
//! remaining modules are the terminal shell that draws it and feeds it keys.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod notify;
pub mod ticker;
pub mod timer;
pub mod ui;

pub use error::TimerError;
pub use timer::{Controls, Mode, Phase, Timer, TimerObserver, TimerState};
