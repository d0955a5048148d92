use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    size as terminal_size,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::tui::app::{App, FormField, Mode};
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::tui::render::render;

/// Guard that ensures terminal state is restored even on panic. If the
/// terminal is left in raw mode or the alternate screen, the user's shell
/// becomes unusable.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Manually restore terminal state on normal exit; after this the guard
    /// does nothing on drop.
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Ignore errors here, this is already a cleanup path
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Check terminal size before entering the alternate screen so the error
    // message lands in the normal terminal
    let (width, height) = terminal_size()?;
    let min_width = Layout::MIN_WIDTH + 2;
    let min_height = Layout::MIN_HEIGHT + 2;
    if width < min_width || height < min_height {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, minimum required: {}x{}.",
            width, height, min_width, min_height
        )));
    }

    let mut guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    while !app.should_quit {
        // Apply finished network calls and start any due fetch
        app.drive_sync();

        // Expire the transient status message if its window passed
        app.check_status_message_timeout();

        terminal.draw(|f| {
            let layout = Layout::calculate(f.area());
            render(f, &mut app, &layout);
        })?;

        // Short poll so banner expiry and network completions keep flowing
        // even without key presses
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(&mut app, key);
                }
            }
        }
    }

    guard.restore()?;
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    match app.mode {
        Mode::View => handle_view_key(app, key),
        Mode::Create => handle_create_key(app, key),
        Mode::Help => handle_help_key(app, key),
    }
}

fn handle_view_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('n') => app.open_form(),
        KeyCode::Char('r') => app.query.refetch(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Char(' ') => app.toggle_in_progress(),
        KeyCode::Enter => app.mark_complete(),
        KeyCode::Char('?') | KeyCode::F(1) => app.mode = Mode::Help,
        _ => {}
    }
}

fn handle_create_key(app: &mut App, key: KeyEvent) {
    // Save combo first: Ctrl+s submits regardless of the focused field
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
        app.submit_form();
        return;
    }

    match key.code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = &mut app.form {
                form.current_field = form.current_field.next();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = &mut app.form {
                form.current_field = form.current_field.prev();
            }
        }
        KeyCode::Left | KeyCode::Right => {
            if let Some(form) = &mut app.form {
                match form.current_field {
                    FormField::Status | FormField::Priority => {
                        form.cycle_select(key.code == KeyCode::Right);
                    }
                    _ => {
                        if let Some(input) = form.current_input_mut() {
                            if key.code == KeyCode::Left {
                                input.left();
                            } else {
                                input.right();
                            }
                        }
                    }
                }
            }
        }
        KeyCode::Home => {
            if let Some(input) = app.form.as_mut().and_then(|f| f.current_input_mut()) {
                input.home();
            }
        }
        KeyCode::End => {
            if let Some(input) = app.form.as_mut().and_then(|f| f.current_input_mut()) {
                input.end();
            }
        }
        KeyCode::Backspace => {
            if let Some(input) = app.form.as_mut().and_then(|f| f.current_input_mut()) {
                input.backspace();
            }
        }
        KeyCode::Delete => {
            if let Some(input) = app.form.as_mut().and_then(|f| f.current_input_mut()) {
                input.delete();
            }
        }
        KeyCode::Char(c) => {
            if let Some(input) = app.form.as_mut().and_then(|f| f.current_input_mut()) {
                input.insert(c);
            }
        }
        _ => {}
    }
}

fn handle_help_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1) | KeyCode::Char('q') => {
            app.mode = Mode::View;
        }
        _ => {}
    }
}
