use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{CELL_WIDTH, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD, GLYPH_TOKEN, GridSize};
use crate::engine::{GameState, GameStatus};
use crate::snake::Position;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{render_game_over_menu, render_pause_menu};

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, bounds: GridSize, hud_info: &HudInfo<'_>) {
    let theme = hud_info.theme;
    let area = frame.area();
    let play_area = render_hud(frame, area, state, hud_info);
    let board_area = centered_board(play_area, bounds);

    let block = Block::bordered()
        .title(" Based Snake ")
        .border_style(Style::new().fg(theme.border_fg))
        .style(Style::new().bg(theme.play_bg));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_token(frame, inner, state, bounds, hud_info);
    render_snake(frame, inner, state, bounds, hud_info);

    match state.status() {
        GameStatus::Paused => render_pause_menu(frame, board_area, theme),
        GameStatus::GameOver => render_game_over_menu(
            frame,
            board_area,
            state.score,
            state.game_over_reason,
            theme,
        ),
        GameStatus::Running => {}
    }
}

fn centered_board(area: Rect, bounds: GridSize) -> Rect {
    let width = bounds.width.saturating_mul(CELL_WIDTH).saturating_add(2);
    let height = bounds.height.saturating_add(2);

    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);
    board
}

fn render_token(
    frame: &mut Frame<'_>,
    inner: Rect,
    state: &GameState,
    bounds: GridSize,
    hud_info: &HudInfo<'_>,
) {
    let Some((x, y)) = logical_to_terminal(inner, bounds, state.token.position) else {
        return;
    };

    frame.buffer_mut().set_string(
        x,
        y,
        GLYPH_TOKEN,
        Style::new()
            .fg(hud_info.theme.token)
            .add_modifier(Modifier::BOLD),
    );
}

fn render_snake(
    frame: &mut Frame<'_>,
    inner: Rect,
    state: &GameState,
    bounds: GridSize,
    hud_info: &HudInfo<'_>,
) {
    let theme = hud_info.theme;
    let buffer = frame.buffer_mut();

    for (index, segment) in state.snake.segments().enumerate() {
        let Some((x, y)) = logical_to_terminal(inner, bounds, *segment) else {
            continue;
        };

        let (glyph, color) = if index == 0 {
            (GLYPH_SNAKE_HEAD, theme.snake_head)
        } else {
            (GLYPH_SNAKE_BODY, theme.snake_body)
        };
        buffer.set_string(x, y, glyph, Style::new().fg(color));
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
