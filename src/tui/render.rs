use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout as RatLayout};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::widgets::{
    color::Theme, counters::render_counters, form::render_form, help::render_help,
    status_bar::render_status_bar, task_list::render_task_list,
};
use crate::tui::{App, Layout, Mode};
use crate::utils;

pub fn render(f: &mut Frame, app: &mut App, layout: &Layout) {
    let theme = Theme::from_config(&app.config);

    // Outer border with the app title centered in the top border
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .title("TASKBOARD")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(theme.fg).bg(theme.bg));
    f.render_widget(outer_block, f.area());

    // Header: today's date, like the web dashboard's heading
    let header = Paragraph::new(format!("Status of Your Tasks as On {}", utils::today_long()))
        .style(Style::default().fg(theme.fg).add_modifier(Modifier::BOLD));
    f.render_widget(header, layout.header_area);

    render_counters(f, layout.counters_area, &app.query, &theme);

    match app.mode {
        Mode::View | Mode::Help => render_task_area(f, app, layout, &theme),
        Mode::Create => {
            if let Some(ref form) = app.form {
                let pending = app.create.is_pending();
                let banner_visible = app.banner.visible(std::time::Instant::now());
                render_form(f, layout.main_area, form, pending, banner_visible, &theme);
            }
        }
    }

    // Help popup overlay renders on top of the normal content
    if app.mode == Mode::Help {
        render_help(f, f.area(), &theme);
    }

    let hints = key_hints(app);
    render_status_bar(
        f,
        layout.status_area,
        app.status.message.as_ref(),
        &hints,
        &theme,
    );
}

fn render_task_area(f: &mut Frame, app: &mut App, layout: &Layout, theme: &Theme) {
    // A fetch error shows as a persistent inline notice; the last-good list
    // (if any) stays rendered below it rather than being cleared.
    let (notice_area, list_area) = if app.query.is_error() {
        let rows = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(layout.main_area);
        (Some(rows[0]), rows[1])
    } else {
        (None, layout.main_area)
    };

    if let Some(area) = notice_area {
        let notice = Paragraph::new("There was an error fetching your tasks").style(
            Style::default()
                .fg(theme.error_fg)
                .add_modifier(Modifier::BOLD),
        );
        f.render_widget(notice, area);
    }

    match app.query.tasks() {
        None if app.query.is_pending() => {
            let paragraph = Paragraph::new("Loading tasks...")
                .block(Block::default().borders(Borders::ALL).title("Tasks"))
                .style(Style::default().fg(theme.fg));
            f.render_widget(paragraph, list_area);
        }
        None => {
            let paragraph = Paragraph::new("No data from the task store yet")
                .block(Block::default().borders(Borders::ALL).title("Tasks"))
                .style(Style::default().fg(theme.fg));
            f.render_widget(paragraph, list_area);
        }
        Some(tasks) if tasks.is_empty() => {
            let paragraph =
                Paragraph::new("You do not have any tasks created yet. Start by creating some.")
                    .block(Block::default().borders(Borders::ALL).title("Tasks"))
                    .style(Style::default().fg(theme.fg));
            f.render_widget(paragraph, list_area);
        }
        Some(tasks) => {
            let total = tasks.len();
            let active = app.query.active_tasks();
            render_task_list(f, list_area, &active, total, &mut app.ui.list_state, theme);
        }
    }
}

fn key_hints(app: &App) -> Vec<&'static str> {
    match app.mode {
        Mode::Help => vec!["Esc or F1: Exit help"],
        Mode::Create => vec![
            "Tab: Next field",
            "←/→: Change selection",
            "Ctrl+s: Create",
            "Esc: Cancel",
        ],
        Mode::View => vec![
            "q: Quit",
            "n: New task",
            "Space: Toggle in progress",
            "Enter: Complete",
            "r: Refresh",
            "F1: Help",
        ],
    }
}
