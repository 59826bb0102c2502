use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::game::GameState;

/// Seconds at or below which the clock turns red.
const LOW_TIME_SECS: u32 = 10;

/// Renders the status row under the board and returns the board area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState) -> Rect {
    let [play_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let [scores_area, clock_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(16)]).areas(status_area);

    frame.render_widget(
        Paragraph::new(score_line(state.score(), state.highest_score()))
            .alignment(Alignment::Left),
        scores_area,
    );
    frame.render_widget(
        Paragraph::new(clock_line(state.time_left())).alignment(Alignment::Right),
        clock_area,
    );

    play_area
}

fn score_line(score: u32, highest_score: u32) -> Line<'static> {
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let label = Style::default().fg(Color::DarkGray);

    Line::from(vec![
        Span::styled("Score: ", label),
        Span::styled(score.to_string(), value),
        Span::styled("  Highest Score: ", label),
        Span::styled(highest_score.to_string(), value),
    ])
}

fn clock_line(time_left: u32) -> Line<'static> {
    let color = if time_left <= LOW_TIME_SECS {
        Color::Red
    } else {
        Color::Yellow
    };

    Line::from(Span::styled(
        format!("Time Left: {time_left}s"),
        Style::default().fg(color),
    ))
}
