use ratatui::layout::{Constraint, Direction, Layout as RatLayout, Rect};

pub struct Layout {
    pub inner_area: Rect, // Area inside the outer border
    pub header_area: Rect,
    pub counters_area: Rect,
    pub main_area: Rect,
    pub status_area: Rect,
}

impl Layout {
    /// Minimum terminal dimensions required for the application.
    /// Width: three counter boxes of ~14 columns each plus borders.
    /// Height: 2 outer borders + 1 header + 3 counters + 3 content + 1 status.
    pub const MIN_WIDTH: u16 = 44;
    pub const MIN_HEIGHT: u16 = 10;

    pub fn calculate(size: Rect) -> Self {
        let min_width = Self::MIN_WIDTH + 2;
        let min_height = Self::MIN_HEIGHT + 2;
        let width = size.width.max(min_width);
        let height = size.height.max(min_height);
        let size = Rect::new(size.x, size.y, width, height);

        // Inner area accounts for the outer border (1 char on each side)
        let inner_area = Rect::new(
            size.x + 1,
            size.y + 1,
            size.width.saturating_sub(2),
            size.height.saturating_sub(2),
        );

        let vertical = RatLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header (date line)
                Constraint::Length(3), // Counters (borders + content)
                Constraint::Min(1),    // Main content (list or form)
                Constraint::Length(1), // Status bar
            ])
            .split(inner_area);

        Self {
            inner_area,
            header_area: vertical[0],
            counters_area: vertical[1],
            main_area: vertical[2],
            status_area: vertical[3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn areas_partition_the_inner_height() {
        let layout = Layout::calculate(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.inner_area.height, 22);
        assert_eq!(layout.header_area.height, 1);
        assert_eq!(layout.counters_area.height, 3);
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.main_area.height, 22 - 1 - 3 - 1);
    }

    #[test]
    fn tiny_terminals_are_padded_to_the_minimum() {
        let layout = Layout::calculate(Rect::new(0, 0, 10, 4));
        assert!(layout.inner_area.width >= Layout::MIN_WIDTH);
        assert!(layout.inner_area.height >= Layout::MIN_HEIGHT);
    }
}
