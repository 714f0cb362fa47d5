//! Command line arguments and the process-wide settings derived from them.
//!
//! Settings are resolved once in `main` and never change afterwards.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use ratatui::style::Color;

use crate::timer::{DEFAULT_CUSTOM_MINUTES, Mode};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "⏱ studytimer - Pomodoro cycles and custom countdowns in your terminal")]
pub struct Args {
    /// Mode selected when the window opens
    #[arg(short, long, value_enum, default_value_t = ModeArg::Pomodoro)]
    pub mode: ModeArg,
    /// Initial contents of the custom minutes field
    #[arg(short, long, default_value_t = DEFAULT_CUSTOM_MINUTES.to_string())]
    pub custom: String,
    #[arg(short, long, value_enum, default_value_t = Appearance::Dark)]
    pub appearance: Appearance,
    #[arg(short = 't', long, value_enum, default_value_t = ColorTheme::Blue)]
    pub theme: ColorTheme,
    #[arg(long)]
    pub no_sound: bool,
    /// Skip desktop notifications
    #[arg(long)]
    pub no_notify: bool,
    /// Directory for studytimer.log (defaults to the system temp dir)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Pomodoro,
    Custom,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Pomodoro => Mode::Pomodoro,
            ModeArg::Custom => Mode::Custom,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Appearance {
    #[default]
    Dark,
    Light,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorTheme {
    #[default]
    Blue,
    Green,
    DarkBlue,
}

// ============================================================================
// Theme
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub text_color: Color,
    pub ring_color: Color,
    pub arc_color: Color,
    pub accent_color: Color,
    pub muted_color: Color,
}

impl Theme {
    pub fn resolve(appearance: Appearance, color_theme: ColorTheme) -> Self {
        let (ring_color, arc_color) = match color_theme {
            ColorTheme::Blue => (Color::Rgb(58, 126, 191), Color::Rgb(31, 106, 165)),
            ColorTheme::Green => (Color::Rgb(44, 201, 133), Color::Rgb(47, 165, 114)),
            ColorTheme::DarkBlue => (Color::Rgb(31, 83, 141), Color::Rgb(20, 55, 94)),
        };

        match appearance {
            Appearance::Dark => Self {
                background: Color::Rgb(42, 45, 46),
                text_color: Color::White,
                ring_color,
                arc_color,
                accent_color: ring_color,
                muted_color: Color::DarkGray,
            },
            Appearance::Light => Self {
                background: Color::Rgb(235, 235, 235),
                text_color: Color::Black,
                ring_color,
                arc_color,
                accent_color: arc_color,
                muted_color: Color::Gray,
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::resolve(Appearance::default(), ColorTheme::default())
    }
}

// ============================================================================
// Settings
// ============================================================================

#[derive(Debug, Clone)]
pub struct Settings {
    pub mode: Mode,
    pub custom_input: String,
    pub theme: Theme,
    pub notifications: bool,
    pub sound: bool,
}

impl Settings {
    pub fn from_args(args: &Args) -> Self {
        Self {
            mode: args.mode.into(),
            custom_input: args.custom.clone(),
            theme: Theme::resolve(args.appearance, args.theme),
            notifications: !args.no_notify,
            sound: !args.no_sound,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::Pomodoro,
            custom_input: DEFAULT_CUSTOM_MINUTES.to_string(),
            theme: Theme::default(),
            notifications: true,
            sound: true,
        }
    }
}

impl Args {
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
