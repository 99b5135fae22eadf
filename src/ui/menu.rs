use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::Theme;
use crate::engine::GameOverReason;

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let popup = centered_popup(area, 26, 5);
    frame.render_widget(Clear, popup);

    let lines = vec![
        title_line("PAUSED", theme),
        Line::from(""),
        Line::from("[Space] Resume"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    reason: Option<GameOverReason>,
    theme: &Theme,
) {
    let popup = centered_popup(area, 30, 8);
    frame.render_widget(Clear, popup);

    let lines = vec![
        title_line("GAME OVER", theme),
        Line::from(""),
        Line::from(format!("Final score: {score}")),
        Line::from(match reason {
            Some(GameOverReason::WallCollision) => "Cause: hit wall",
            Some(GameOverReason::SelfCollision) => "Cause: hit yourself",
            Some(GameOverReason::BoardFull) => "Board full!",
            None => "",
        }),
        Line::from(""),
        Line::from("[R] Play Again  [Q] Quit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn title_line<'a>(text: &'a str, theme: &Theme) -> Line<'a> {
    Line::styled(
        text,
        Style::new()
            .fg(theme.menu_title)
            .add_modifier(Modifier::BOLD),
    )
}

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let [column] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(column);
    popup
}
