use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;

use crate::tui::widgets::color::Theme;

pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    message: Option<&String>,
    key_hints: &[&str],
    theme: &Theme,
) {
    let max_width = area.width as usize;

    let (mut content, style) = if let Some(msg) = message {
        // Status messages get a highlighted background for visibility
        (
            msg.clone(),
            Style::default()
                .fg(theme.highlight_fg)
                .bg(theme.highlight_bg)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        // Key hints with bullet separators, fitting as many as possible
        let mut hints_text = String::new();
        for (i, hint) in key_hints.iter().enumerate() {
            let would_be = if i == 0 {
                hint.chars().count()
            } else {
                hints_text.chars().count() + 3 + hint.chars().count()
            };
            if would_be > max_width {
                break;
            }
            if i > 0 {
                hints_text.push_str(" • ");
            }
            hints_text.push_str(hint);
        }
        (hints_text, Style::default().fg(theme.fg).bg(theme.bg))
    };

    if content.chars().count() > max_width {
        content = content
            .chars()
            .take(max_width.saturating_sub(3))
            .collect::<String>()
            + "...";
    }

    f.render_widget(Paragraph::new(content).style(style), area);
}
