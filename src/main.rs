use clap::Parser;
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::{io, time::{Duration, Instant}};

use studytimer::{
    app::App,
    config::{Args, Settings},
    logging::init_logging,
    ui::render_ui,
};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Upper bound on how long the loop sleeps, so the wall clock line stays fresh.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_dir(), args.log_level())?;

    let mut app = App::new(Settings::from_args(&args));

    enable_raw_mode()?;
    let res = enter_terminal().and_then(|mut terminal| run(&mut terminal, &mut app));
    let restored = restore_terminal();

    let res = finish(res, restored);
    tracing::info!("studytimer exiting");
    res
}

fn enter_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Runs every teardown step even when an earlier one fails.
fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    let mut stdout = io::stdout();
    let screen = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture, cursor::Show);
    raw.and(screen)
}

/// The loop's error wins; a teardown error surfaces only after a clean loop.
fn finish(res: Result<()>, restored: io::Result<()>) -> Result<()> {
    if let Err(e) = &restored {
        tracing::error!("terminal restore failed: {}", e);
    }
    match res {
        Err(e) => {
            tracing::error!("terminal loop failed: {}", e);
            Err(e)
        }
        Ok(()) => Ok(restored?),
    }
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        let now = Instant::now();
        let timeout = app
            .next_deadline()
            .map_or(IDLE_POLL, |deadline| deadline.saturating_duration_since(now))
            .min(IDLE_POLL);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key, Instant::now()) {
                    return Ok(());
                }
            }
        }

        app.poll(Instant::now());
    }
}
