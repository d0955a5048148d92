use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget};

use crate::models::{Status, Task};
use crate::tui::widgets::color::{Theme, priority_color};

/// Render the active task list (todo + in progress). Completed tasks are
/// counted elsewhere but never listed here.
pub fn render_task_list(
    f: &mut Frame,
    area: Rect,
    tasks: &[&Task],
    total_count: usize,
    list_state: &mut ListState,
    theme: &Theme,
) {
    // Account for borders, padding and the checkbox prefix
    let max_width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| {
            let checkbox = match task.status {
                Status::InProgress => "[~]",
                _ => "[ ]",
            };

            let mut text = format!("{} {} [{}]", checkbox, task.title, task.date);
            if text.chars().count() > max_width {
                text = text
                    .chars()
                    .take(max_width.saturating_sub(3))
                    .collect::<String>()
                    + "...";
            }

            ListItem::new(Line::from(vec![
                Span::styled("▌ ", Style::default().fg(priority_color(task.priority))),
                Span::raw(text),
            ]))
        })
        .collect();

    let title = format!("Tasks ({} active of {})", tasks.len(), total_count);
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(theme.fg).bg(theme.bg))
        .highlight_style(
            Style::default()
                .fg(theme.highlight_fg)
                .bg(theme.highlight_bg),
        );

    StatefulWidget::render(list, area, f.buffer_mut(), list_state);
}
