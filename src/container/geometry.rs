//! Point-space geometry used by the container.
//!
//! The container never deals in terminal cells. Everything is measured in
//! abstract points and the renderer maps points to cells with
//! [`POINTS_PER_COLUMN`] and [`POINTS_PER_ROW`].

use ratatui::layout::Rect;

/// Horizontal points covered by one terminal cell.
pub const POINTS_PER_COLUMN: f32 = 8.0;
/// Vertical points covered by one terminal cell.
pub const POINTS_PER_ROW: f32 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Center of the terminal cell at `(column, row)`.
    pub fn from_cell(column: u16, row: u16) -> Self {
        Self {
            x: (column as f32 + 0.5) * POINTS_PER_COLUMN,
            y: (row as f32 + 0.5) * POINTS_PER_ROW,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_cells(area: Rect) -> Self {
        Self {
            x: area.x as f32 * POINTS_PER_COLUMN,
            y: area.y as f32 * POINTS_PER_ROW,
            width: area.width as f32 * POINTS_PER_COLUMN,
            height: area.height as f32 * POINTS_PER_ROW,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// Same size, moved vertically by `dy` points.
    pub fn offset_y(self, dy: f32) -> Self {
        Self {
            y: self.y + dy,
            ..self
        }
    }

    /// Snap to the terminal grid, clipped to `clip`.
    ///
    /// Rows that fall outside `clip` are dropped, so a sheet that slid below
    /// the screen keeps only its visible part.
    pub fn to_cells(&self, clip: Rect) -> Rect {
        let left = (self.x / POINTS_PER_COLUMN).round() as i32;
        let top = (self.y / POINTS_PER_ROW).round() as i32;
        let right = ((self.x + self.width) / POINTS_PER_COLUMN).round() as i32;
        let bottom = ((self.y + self.height) / POINTS_PER_ROW).round() as i32;

        let left = left.max(clip.x as i32);
        let top = top.max(clip.y as i32);
        let right = right.min(clip.x as i32 + clip.width as i32);
        let bottom = bottom.min(clip.y as i32 + clip.height as i32);

        if right <= left || bottom <= top {
            return Rect::new(clip.x, clip.y, 0, 0);
        }
        Rect::new(
            left as u16,
            top as u16,
            (right - left) as u16,
            (bottom - top) as u16,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_round_trip_keeps_area() {
        let area = Rect::new(2, 3, 40, 10);
        let frame = Frame::from_cells(area);
        assert_eq!(frame.to_cells(Rect::new(0, 0, 80, 24)), area);
    }

    #[test]
    fn to_cells_clips_offscreen_rows() {
        let screen = Rect::new(0, 0, 80, 24);
        let frame = Frame::from_cells(Rect::new(10, 14, 60, 10)).offset_y(5.0 * POINTS_PER_ROW);
        let cells = frame.to_cells(screen);
        assert_eq!(cells.y, 19);
        assert_eq!(cells.height, 5);
    }

    #[test]
    fn fully_offscreen_frame_is_empty() {
        let screen = Rect::new(0, 0, 80, 24);
        let frame = Frame::from_cells(Rect::new(0, 30, 80, 4));
        assert_eq!(frame.to_cells(screen).area(), 0);
    }

    #[test]
    fn contains_uses_half_open_bounds() {
        let frame = Frame::new(0.0, 0.0, 10.0, 10.0);
        assert!(frame.contains(Point::new(0.0, 0.0)));
        assert!(!frame.contains(Point::new(10.0, 5.0)));
    }
}
