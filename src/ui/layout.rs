use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub tabs_area: Rect,
    pub content_area: Rect,
    pub status_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Tabs with the view names (3 rows)
/// - Content of the active view
/// - Status line (1 row)
pub fn create_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status line
        ])
        .split(area);

    MainLayout {
        keybindings_area: chunks[0],
        tabs_area: chunks[1],
        content_area: chunks[2],
        status_area: chunks[3],
    }
}

/// Split an area into a list (left, `left_percent`) and a details pane (right)
pub fn split_columns(area: Rect, left_percent: u16) -> (Rect, Rect) {
    let left_percent = left_percent.min(100);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(left_percent),
            Constraint::Percentage(100 - left_percent),
        ])
        .split(area);
    (chunks[0], chunks[1])
}

/// Four equal cards in a 2x2 grid, row by row
pub fn create_card_grid(area: Rect) -> [Rect; 4] {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let top = split_columns(rows[0], 50);
    let bottom = split_columns(rows[1], 50);
    [top.0, top.1, bottom.0, bottom.1]
}

/// Create centered modal area
pub fn create_modal_area(area: Rect) -> Rect {
    centered_area(area, 9)
}

/// Centered box tall enough for a form with `field_count` fields
pub fn create_form_area(area: Rect, field_count: usize) -> Rect {
    // Label + value + spacer per field, plus borders, error and hint rows
    let height = (field_count as u16).saturating_mul(3).saturating_add(6);
    centered_area(area, height)
}

fn centered_area(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout() {
        let area = Rect::new(0, 0, 100, 50);
        let layout = create_layout(area);

        assert_eq!(layout.keybindings_area.height, 1);
        assert_eq!(layout.tabs_area.height, 3);
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.content_area.height, 45);
    }

    #[test]
    fn test_card_grid_covers_content() {
        let area = Rect::new(0, 0, 100, 40);
        let cards = create_card_grid(area);
        assert_eq!(cards[0].width + cards[1].width, 100);
        assert_eq!(cards[0].height + cards[2].height, 40);
    }

    #[test]
    fn test_create_modal_area() {
        let area = Rect::new(0, 0, 100, 50);
        let modal = create_modal_area(area);

        assert!(modal.width < area.width);
        assert_eq!(modal.height, 9);

        let form = create_form_area(area, 4);
        assert_eq!(form.height, 18);

        let tiny = create_form_area(Rect::new(0, 0, 40, 10), 4);
        assert_eq!(tiny.height, 10);
    }
}
