use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::models::Status;
use crate::sync::TaskQuery;
use crate::tui::widgets::color::Theme;

/// One counter box per status. A count of None (nothing loaded yet) renders
/// as a dash, distinct from an explicit 0.
pub fn render_counters(f: &mut Frame, area: Rect, query: &TaskQuery, theme: &Theme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (status, column) in Status::ALL.into_iter().zip(columns.iter()) {
        let count_text = match query.count_by_status(status) {
            Some(count) => count.to_string(),
            None => "—".to_string(),
        };

        let paragraph = Paragraph::new(count_text)
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.fg)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(status.label())
                    .title_alignment(Alignment::Center)
                    .style(Style::default().fg(theme.fg).bg(theme.bg)),
            );
        f.render_widget(paragraph, *column);
    }
}
