use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::game::OverReason;

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect) {
    let lines = ["Game Paused", "", "[P] Resume", "[Enter] Restart", "[Q] Quit"];
    render_popup(frame, area, " paused ", Color::Yellow, &lines);
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    highest_score: u32,
    reason: Option<OverReason>,
) {
    let score_text = format!("Game Over! Score: {score}");
    let highest_text = format!("Highest Score: {highest_score}");
    let lines = [
        score_text.as_str(),
        highest_text.as_str(),
        reason.map_or("", reason_text),
        "",
        "Press 'R' to Restart",
        "[Q] Quit",
    ];
    render_popup(frame, area, " game over ", Color::Red, &lines);
}

fn reason_text(reason: OverReason) -> &'static str {
    match reason {
        OverReason::Wall => "You hit the wall",
        OverReason::SelfCollision => "You ran into yourself",
        OverReason::TimeUp => "Time is up",
        OverReason::BoardFull => "The board is full!",
    }
}

fn render_popup(frame: &mut Frame<'_>, area: Rect, title: &str, accent: Color, lines: &[&str]) {
    let popup = centered_popup(area, popup_width(lines), lines.len() as u16 + 2);
    frame.render_widget(Clear, popup);

    let text: Vec<Line<'_>> = lines.iter().map(|line| Line::from(*line)).collect();
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
            .block(Block::bordered().title(title)),
        popup,
    );
}

/// Widest line in terminal columns, plus border and one column of padding per side.
fn popup_width(lines: &[&str]) -> u16 {
    let widest = lines.iter().map(|line| line.width()).max().unwrap_or(0);
    u16::try_from(widest + 4).unwrap_or(u16::MAX)
}

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [center] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    center
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::{centered_popup, popup_width, reason_text};
    use crate::game::OverReason;

    #[test]
    fn popup_width_counts_display_columns() {
        assert_eq!(popup_width(&["abc", "abcdef"]), 10);
        assert_eq!(popup_width(&["██"]), 6);
    }

    #[test]
    fn popup_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 40, 20);
        assert_eq!(centered_popup(area, 10, 4), Rect::new(15, 8, 10, 4));

        let small = centered_popup(Rect::new(0, 0, 6, 3), 10, 4);
        assert!(small.width <= 6 && small.height <= 3);
    }

    #[test]
    fn every_reason_has_a_message() {
        for reason in [
            OverReason::Wall,
            OverReason::SelfCollision,
            OverReason::TimeUp,
            OverReason::BoardFull,
        ] {
            assert!(!reason_text(reason).is_empty());
        }
    }
}
