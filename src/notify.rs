//! Desktop notifications with an optional chime.

use std::path::Path;
use std::process::{Command, Stdio};

use notify_rust::{Notification, Urgency};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notifier {
    desktop: bool,
    sound: bool,
}

impl Notifier {
    pub fn new(desktop: bool, sound: bool) -> Self {
        Self { desktop, sound }
    }

    pub fn notify(&self, title: &str, body: &str) {
        if self.desktop {
            let shown = Notification::new()
                .summary(title)
                .body(body)
                .appname("studytimer")
                .icon("alarm-clock")
                .urgency(Urgency::Critical)
                .show();
            if let Err(e) = shown {
                warn!("desktop notification failed: {}", e);
            }
        }

        if self.sound {
            play_chime();
        }
    }
}

const CHIME_PLAYERS: [(&str, &str); 3] = [
    ("paplay", "/usr/share/sounds/freedesktop/stereo/complete.oga"),
    ("aplay", "/usr/share/sounds/sound-icons/guitar-11.wav"),
    ("aplay", "/usr/share/sounds/generic.wav"),
];

fn play_chime() {
    std::thread::spawn(|| {
        let Some((cmd, file)) = CHIME_PLAYERS
            .into_iter()
            .find(|(_, file)| Path::new(file).exists())
        else {
            return;
        };
        if let Err(e) = run_player(cmd, file) {
            warn!("chime failed: {}", e);
        }
    });
}

/// Runs the player to completion so the child is reaped.
fn run_player(cmd: &str, file: &str) -> Result<(), String> {
    let status = Command::new(cmd)
        .arg(file)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| format!("{cmd}: {e}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("{cmd} exited with {status}"))
    }
}
