use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{CreateForm, FORM_STATUSES, FormField};
use crate::tui::widgets::color::Theme;
use crate::tui::widgets::input::Input;

/// Render the create-task form: three text fields, two select fields, a
/// success banner slot and a pending indicator.
pub fn render_form(
    f: &mut Frame,
    area: Rect,
    form: &CreateForm,
    pending: bool,
    banner_visible: bool,
    theme: &Theme,
) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title("Create A Task")
        .style(Style::default().fg(theme.fg).bg(theme.bg));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // banner
            Constraint::Length(3), // title
            Constraint::Length(3), // description
            Constraint::Length(3), // date
            Constraint::Length(3), // status + priority
            Constraint::Length(1), // pending / hint line
        ])
        .split(inner);

    if banner_visible {
        let banner = Paragraph::new("Success: the task has been created").style(
            Style::default()
                .fg(theme.success_fg)
                .add_modifier(Modifier::BOLD),
        );
        f.render_widget(banner, rows[0]);
    }

    render_text_field(f, rows[1], "Title", &form.title, form.current_field == FormField::Title, theme);
    render_text_field(
        f,
        rows[2],
        "Description",
        &form.description,
        form.current_field == FormField::Description,
        theme,
    );
    render_text_field(
        f,
        rows[3],
        "Date (YYYY-MM-DD)",
        &form.date,
        form.current_field == FormField::Date,
        theme,
    );

    let selects = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(rows[4]);

    let status_options: Vec<&str> = FORM_STATUSES.iter().map(|s| s.as_str()).collect();
    render_select_field(
        f,
        selects[0],
        "Status",
        &status_options,
        form.status_index,
        form.current_field == FormField::Status,
        theme,
    );
    render_select_field(
        f,
        selects[1],
        "Priority",
        &["low", "normal", "high"],
        form.priority_index,
        form.current_field == FormField::Priority,
        theme,
    );

    let hint = if pending {
        "Creating..."
    } else {
        "Tab: Next field • ←/→: Change selection • Ctrl+s: Create • Esc: Cancel"
    };
    f.render_widget(
        Paragraph::new(hint).style(Style::default().fg(theme.fg)),
        rows[5],
    );
}

fn render_text_field(
    f: &mut Frame,
    area: Rect,
    label: &str,
    input: &Input,
    focused: bool,
    theme: &Theme,
) {
    let border_style = if focused {
        Style::default().fg(theme.highlight_bg)
    } else {
        Style::default().fg(theme.fg)
    };

    let paragraph = Paragraph::new(input.value()).style(Style::default().fg(theme.fg)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(label)
            .border_style(border_style),
    );
    f.render_widget(paragraph, area);

    if focused {
        // place the terminal cursor inside the focused field
        let x = area.x + 1 + input.cursor() as u16;
        let y = area.y + 1;
        if x < area.x + area.width.saturating_sub(1) {
            f.set_cursor_position((x, y));
        }
    }
}

fn render_select_field(
    f: &mut Frame,
    area: Rect,
    label: &str,
    options: &[&str],
    selected: usize,
    focused: bool,
    theme: &Theme,
) {
    let border_style = if focused {
        Style::default().fg(theme.highlight_bg)
    } else {
        Style::default().fg(theme.fg)
    };

    let selected = selected % options.len();
    let line = Line::from(vec![
        Span::raw("< "),
        Span::styled(
            options[selected],
            Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" >"),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(label)
            .border_style(border_style),
    );
    f.render_widget(paragraph, area);
}
