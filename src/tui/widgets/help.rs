use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::widgets::color::Theme;

pub fn render_help(f: &mut Frame, area: Rect, theme: &Theme) {
    let popup_area = popup_area(area, 50, 60);

    // Clear the background first so content doesn't show through
    f.render_widget(Clear, popup_area);

    let help_text = "\
Task list:
  j / Down, k / Up: Move selection
  Space: Toggle in progress
  Enter: Mark completed
  n: New task
  r: Refresh from the store

Create form:
  Tab / Shift+Tab: Next / previous field
  Left / Right: Change status or priority
  Ctrl+s: Create the task
  Esc: Back to the list

General:
  q: Quit
  F1 or ?: Show/hide this help";

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help - Key Bindings")
                .title_alignment(Alignment::Center)
                .style(Style::default().fg(theme.fg).bg(theme.bg)),
        )
        .style(Style::default().fg(theme.fg).bg(theme.bg));

    f.render_widget(paragraph, popup_area);
}

/// Centered rect taking up a percentage of the available area, following the
/// ratatui popup example
fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
