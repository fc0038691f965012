//! Layout helpers shared by the screens

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rectangle of `height` rows and `percent_x` percent width, centered in `r`
pub fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Fixed-width column centered horizontally in `r`
pub fn centered_column(width: u16, r: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(r)[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let popup = centered_rect(50, 8, area);
        assert_eq!(popup.height, 8);
        assert!(popup.width >= 39 && popup.width <= 41);
        assert!(popup.right() <= area.right());
        assert!(popup.bottom() <= area.bottom());
    }

    #[test]
    fn test_centered_column() {
        let area = Rect::new(0, 0, 80, 3);
        let column = centered_column(30, area);
        assert_eq!(column.width, 30);
        assert_eq!(column.height, 3);
        assert!(column.right() <= area.right());
    }
}
