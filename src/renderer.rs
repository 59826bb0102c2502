use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::config::GridSize;
use crate::game::{GameState, Phase};
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_pause_menu};

/// Terminal columns per grid cell, so cells come out roughly square.
const CELL_WIDTH: u16 = 2;

const GLYPH_CELL: &str = "██";
const GLYPH_FOOD: &str = "()";

const COLOR_HEAD: Color = Color::Green;
const COLOR_BODY: Color = Color::Yellow;
const COLOR_FOOD: Color = Color::Red;
const COLOR_BORDER: Color = Color::DarkGray;

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState) {
    let bounds = state.bounds();
    let board = board_area(frame.area(), bounds);
    let play_area = render_hud(frame, board, state);

    let block = Block::bordered()
        .title(" snake ")
        .border_style(Style::new().fg(COLOR_BORDER));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    if let Some(food) = state.food() {
        draw_cell(frame, inner, bounds, food, GLYPH_FOOD, Style::new().fg(COLOR_FOOD));
    }

    let body_style = Style::new().fg(COLOR_BODY);
    for segment in state.body() {
        draw_cell(frame, inner, bounds, *segment, GLYPH_CELL, body_style);
    }

    let head_style = Style::new().fg(COLOR_HEAD).add_modifier(Modifier::BOLD);
    draw_cell(frame, inner, bounds, state.head(), GLYPH_CELL, head_style);

    match state.phase() {
        Phase::Paused => render_pause_menu(frame, play_area),
        Phase::Over => render_game_over_menu(
            frame,
            play_area,
            state.score(),
            state.highest_score(),
            state.over_reason(),
        ),
        Phase::Running => {}
    }
}

/// Centers the bordered board plus one HUD row inside `area`.
fn board_area(area: Rect, bounds: GridSize) -> Rect {
    let width = bounds.width.saturating_mul(CELL_WIDTH).saturating_add(2);
    let height = bounds.height.saturating_add(3);

    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);

    board
}

fn draw_cell(
    frame: &mut Frame<'_>,
    inner: Rect,
    bounds: GridSize,
    position: Position,
    glyph: &str,
    style: Style,
) {
    let Some((x, y)) = logical_to_terminal(inner, bounds, position) else {
        return;
    };

    frame.buffer_mut().set_string(x, y, glyph, style);
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
