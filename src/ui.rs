//! Terminal rendering of the timer window.

use ratatui::symbols;
use ratatui::widgets::canvas::{Canvas, Circle, Points};
use ratatui::{prelude::*, widgets::*};

use crate::app::{Alert, App, View};
use crate::timer::Mode;

const ARC_SAMPLES_PER_TURN: usize = 240;
const FACE_RADIUS: f64 = 1.0;

/// Whole degrees swept by the progress arc, as the face draws it.
pub fn sweep_degrees(progress: f64) -> u16 {
    (360.0 * progress.clamp(0.0, 1.0)) as u16
}

/// Points of an arc starting at 12 o'clock and running clockwise.
pub fn arc_points(progress: f64, radius: f64) -> Vec<(f64, f64)> {
    let degrees = sweep_degrees(progress);
    if degrees == 0 {
        return Vec::new();
    }
    let samples = (ARC_SAMPLES_PER_TURN * degrees as usize / 360).max(2);
    let sweep = f64::from(degrees).to_radians();
    (0..=samples)
        .map(|i| {
            let theta = sweep * i as f64 / samples as f64;
            (radius * theta.sin(), radius * theta.cos())
        })
        .collect()
}

pub fn render_ui(f: &mut Frame, app: &App) {
    render_timer(f, app);
    if app.view == View::Help {
        render_help(f, app);
    }
    if let Some(alert) = &app.face.alert {
        render_alert(f, app, alert);
    }
}

fn render_timer(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let root = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.ring_color))
        .style(Style::default().bg(theme.background).fg(theme.text_color))
        .title(Span::styled(
            " Modern Study Timer ",
            Style::default().fg(theme.accent_color).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);
    let inner = root.inner(f.size());
    f.render_widget(root, f.size());

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(9),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let now = chrono::Local::now();
    f.render_widget(
        Paragraph::new(now.format("%A, %B %d  %H:%M").to_string())
            .style(Style::default().fg(theme.muted_color))
            .alignment(Alignment::Center),
        sections[0],
    );

    render_face(f, app, sections[1]);

    f.render_widget(
        Gauge::default()
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
            .gauge_style(Style::default().fg(theme.arc_color).bg(theme.background))
            .percent((app.face.progress * 100.0) as u16),
        sections[2],
    );

    let phase = app.face.phase.map_or("READY", |p| p.name());
    f.render_widget(
        Paragraph::new(phase)
            .style(Style::default().fg(theme.accent_color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        sections[3],
    );

    f.render_widget(
        Paragraph::new(format!("Session: {}", app.face.session_count)).alignment(Alignment::Center),
        sections[4],
    );

    f.render_widget(Paragraph::new(buttons(app)).alignment(Alignment::Center), sections[6]);
    f.render_widget(Paragraph::new(mode_radios(app)).alignment(Alignment::Center), sections[7]);
    f.render_widget(Paragraph::new(custom_entry(app)).alignment(Alignment::Center), sections[8]);

    let hints = Line::from(vec![
        span_key("S", app), Span::raw(" Start  •  "),
        span_key("Space", app), Span::raw(" Pause  •  "),
        span_key("R", app), Span::raw(" Reset  •  "),
        span_key("H", app), Span::raw(" Help  •  "),
        span_key("Q", app), Span::raw(" Quit"),
    ]);
    f.render_widget(
        Paragraph::new(hints).alignment(Alignment::Center).style(Style::default().fg(theme.muted_color)),
        sections[9],
    );
}

fn render_face(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;
    // Terminal cells are roughly twice as tall as wide.
    let side = area.height.saturating_mul(2).min(area.width);
    let face_area = Rect {
        x: area.x + (area.width - side) / 2,
        y: area.y,
        width: side,
        height: area.height,
    };

    let arc = arc_points(app.face.progress, FACE_RADIUS * 0.92);
    let inner_arc = arc_points(app.face.progress, FACE_RADIUS * 0.86);
    let canvas = Canvas::default()
        .background_color(theme.background)
        .marker(symbols::Marker::Braille)
        .x_bounds([-1.1, 1.1])
        .y_bounds([-1.1, 1.1])
        .paint(|ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: FACE_RADIUS,
                color: theme.ring_color,
            });
            ctx.draw(&Points { coords: &arc, color: theme.arc_color });
            ctx.draw(&Points { coords: &inner_arc, color: theme.arc_color });
        });
    f.render_widget(canvas, face_area);

    let label_area = Rect {
        x: face_area.x,
        y: face_area.y + face_area.height / 2,
        width: face_area.width,
        height: 1,
    };
    f.render_widget(
        Paragraph::new(app.face.time.as_str())
            .style(Style::default().fg(theme.text_color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        label_area,
    );
}

fn buttons(app: &App) -> Line<'static> {
    let controls = app.face.controls;
    Line::from(vec![
        button("Start", controls.start_enabled, app),
        Span::raw("  "),
        button(controls.pause_label.as_str(), controls.pause_enabled, app),
        Span::raw("  "),
        button("Reset", true, app),
    ])
}

fn button(label: &'static str, enabled: bool, app: &App) -> Span<'static> {
    let style = if enabled {
        Style::default().fg(app.theme.text_color).bg(app.theme.arc_color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.muted_color).add_modifier(Modifier::DIM)
    };
    Span::styled(format!(" {label:^8} "), style)
}

fn mode_radios(app: &App) -> Line<'static> {
    let mode = app.timer.state().mode;
    let radio = |m: Mode, key: &'static str| {
        let mark = if mode == m { "(•)" } else { "( )" };
        vec![
            Span::styled(key, Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD)),
            Span::raw(format!(" {mark} {}", m.label())),
        ]
    };
    let mut spans = radio(Mode::Pomodoro, "1");
    spans.push(Span::raw("     "));
    spans.extend(radio(Mode::Custom, "2"));
    Line::from(spans)
}

fn custom_entry(app: &App) -> Line<'_> {
    let label = Span::raw("Custom Time (minutes): ");
    if app.editing {
        Line::from(vec![
            label,
            Span::styled(app.input.as_str(), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::styled("█", Style::default().fg(Color::Green)),
        ])
    } else {
        Line::from(vec![
            label,
            Span::styled(
                format!("[{}]", app.timer.custom_input()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled("  E to edit", Style::default().fg(app.theme.muted_color)),
        ])
    }
}

fn span_key<'a>(text: &'a str, app: &App) -> Span<'a> {
    Span::styled(text, Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD))
}

fn render_help(f: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, f.size());

    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled("⌨️  KEYBOARD SHORTCUTS", Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD))),
        Line::from(""),
        help_line("S / Enter", "Start the timer"),
        help_line("Space", "Pause / resume"),
        help_line("R", "Reset"),
        help_line("1 / 2", "Pomodoro / Custom mode"),
        help_line("E", "Edit custom minutes"),
        help_line("H / ?", "Toggle help"),
        help_line("Q / Esc", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Pomodoro: 4 × 25 min study, 5 min breaks, 15 min long break",
            Style::default().fg(app.theme.muted_color).add_modifier(Modifier::ITALIC),
        )),
    ];

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(help_text).block(
            Block::default()
                .title(" Help ")
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(app.theme.ring_color))
                .style(Style::default().bg(app.theme.background).fg(app.theme.text_color)),
        ),
        area,
    );
}

fn help_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw("    "),
        Span::styled(format!("{key:<10}"), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(format!("  {}", desc)),
    ])
}

fn render_alert(f: &mut Frame, app: &App, alert: &Alert) {
    let area = centered_rect(50, 30, f.size());
    let color = if alert.error { Color::Red } else { app.theme.accent_color };

    let lines = vec![
        Line::from(""),
        Line::from(alert.body),
        Line::from(""),
        Line::from(Span::styled("Press Enter to dismiss", Style::default().fg(app.theme.muted_color).add_modifier(Modifier::ITALIC))),
    ];

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(Span::styled(format!(" {} ", alert.title), Style::default().fg(color).add_modifier(Modifier::BOLD)))
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(color))
                    .style(Style::default().bg(app.theme.background).fg(app.theme.text_color)),
            ),
        area,
    );
}

fn centered_rect(w: u16, h: u16, r: Rect) -> Rect {
    let v = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - h) / 2),
            Constraint::Percentage(h),
            Constraint::Percentage((100 - h) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - w) / 2),
            Constraint::Percentage(w),
            Constraint::Percentage((100 - w) / 2),
        ])
        .split(v[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use ratatui::backend::TestBackend;
    use std::time::Instant;

    fn quiet_app() -> App {
        App::new(Settings {
            notifications: false,
            sound: false,
            ..Settings::default()
        })
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        terminal.backend().buffer().content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn sweep_maps_progress_to_degrees() {
        assert_eq!(sweep_degrees(0.0), 0);
        assert_eq!(sweep_degrees(0.5), 180);
        assert_eq!(sweep_degrees(1.0), 360);
        assert_eq!(sweep_degrees(1.5), 360);
    }

    #[test]
    fn arc_starts_at_twelve_and_runs_clockwise() {
        assert!(arc_points(0.0, 1.0).is_empty());

        let quarter = arc_points(0.25, 1.0);
        let (x0, y0) = quarter[0];
        assert!(x0.abs() < 1e-9 && (y0 - 1.0).abs() < 1e-9);
        let (x1, y1) = *quarter.last().unwrap();
        assert!((x1 - 1.0).abs() < 1e-9 && y1.abs() < 1e-9);
        assert!(quarter.iter().all(|(x, _)| *x >= -1e-9));
    }

    #[test]
    fn idle_window_shows_default_face() {
        let text = screen(&quiet_app());
        assert!(text.contains("Modern Study Timer"));
        assert!(text.contains("25:00"));
        assert!(text.contains("Session: 0"));
        assert!(text.contains("(•) Pomodoro"));
        assert!(text.contains("Custom Time (minutes):"));
        assert!(text.contains("[25]"));
    }

    #[test]
    fn running_window_relabels_pause_button() {
        let mut app = quiet_app();
        let now = Instant::now();
        app.start(now);
        app.toggle_pause(now);
        let text = screen(&app);
        assert!(text.contains("Resume"));
        assert!(text.contains("STUDY"));
    }

    #[test]
    fn alert_is_drawn_over_the_face() {
        let mut app = quiet_app();
        app.face.alert = Some(Alert::INVALID_INPUT);
        let text = screen(&app);
        assert!(text.contains("Invalid Input"));
        assert!(text.contains("Press Enter to dismiss"));
    }
}
