use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::engine::GameState;

/// Key legend shown under the board.
const CONTROLS: &[(&str, &str)] = &[
    ("WASD/arrows", "move"),
    ("Space", "pause"),
    ("R", "restart"),
    ("M", "sound"),
    ("Q", "quit"),
];

/// Host-side values displayed next to the game state.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub sound_enabled: bool,
    pub theme: &'a Theme,
}

/// Renders the two-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, info: &HudInfo<'_>) -> Rect {
    let [play_area, score_area, controls_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(score_line(state, info)).alignment(Alignment::Center),
        score_area,
    );
    frame.render_widget(
        Paragraph::new(controls_line(info.theme)).alignment(Alignment::Center),
        controls_area,
    );

    play_area
}

fn score_line<'a>(state: &GameState, info: &HudInfo<'_>) -> Line<'a> {
    let theme = info.theme;
    let value = Style::new()
        .fg(theme.hud_score)
        .add_modifier(Modifier::BOLD);
    let label = Style::new().fg(theme.hud_muted);

    Line::from(vec![
        Span::styled(format!("Score {}", state.score), value),
        Span::styled("  |  ", label),
        Span::styled(format!("Length {}", state.snake.len()), value),
        Span::styled("  |  ", label),
        Span::styled(
            if info.sound_enabled {
                "Sound on"
            } else {
                "Sound off"
            },
            label,
        ),
    ])
}

fn controls_line<'a>(theme: &Theme) -> Line<'a> {
    let key = Style::new().fg(theme.hud_score);
    let action = Style::new().fg(theme.hud_muted);

    let mut spans = Vec::with_capacity(CONTROLS.len() * 3);
    for (index, (keys, description)) in CONTROLS.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled("  ", action));
        }
        spans.push(Span::styled(format!("[{keys}]"), key));
        spans.push(Span::styled(format!(" {description}"), action));
    }

    Line::from(spans)
}
