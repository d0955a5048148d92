use ratatui::style::Color;

use crate::Config;
use crate::models::Priority;

/// Colors used across the dashboard
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub fg: Color,
    pub bg: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub error_fg: Color,
    pub success_fg: Color,
}

impl Theme {
    /// Resolve the theme named in the config, falling back to the default
    /// for unknown names.
    pub fn from_config(config: &Config) -> Self {
        match config.current_theme.as_str() {
            "light" => Theme {
                fg: Color::Black,
                bg: Color::White,
                highlight_bg: Color::Blue,
                highlight_fg: Color::White,
                error_fg: Color::Red,
                success_fg: Color::Green,
            },
            "dark" => Theme {
                fg: Color::White,
                bg: Color::Black,
                highlight_bg: Color::Cyan,
                highlight_fg: Color::Black,
                error_fg: Color::LightRed,
                success_fg: Color::LightGreen,
            },
            _ => Theme {
                fg: Color::White,
                bg: Color::Black,
                highlight_bg: Color::Blue,
                highlight_fg: Color::White,
                error_fg: Color::LightRed,
                success_fg: Color::LightGreen,
            },
        }
    }
}

/// Priority accent color, mirroring the border colors of the original web
/// dashboard: high stands out, low recedes.
pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Normal => Color::Green,
        Priority::Low => Color::DarkGray,
    }
}
