use ratatui::layout::{Constraint, Layout, Rect};

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let percent_x = percent_x.min(100);
    let percent_y = percent_y.min(100);
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}

/// The bottom `rows` rows of `area`.
pub fn bottom_strip(area: Rect, rows: u16) -> Rect {
    let rows = rows.min(area.height);
    Rect {
        x: area.x,
        y: area.y + area.height - rows,
        width: area.width,
        height: rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottom_strip_is_clamped_to_area() {
        let area = Rect::new(0, 0, 80, 4);
        assert_eq!(bottom_strip(area, 6), area);
        assert_eq!(bottom_strip(area, 1), Rect::new(0, 3, 80, 1));
    }

    #[test]
    fn centered_rect_stays_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let center = centered_rect(60, 20, area);
        assert_eq!(center.x, 20);
        assert_eq!(center.width, 60);
    }
}
