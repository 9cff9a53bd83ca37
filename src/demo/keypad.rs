use std::rc::Rc;
use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use crate::container::geometry::POINTS_PER_ROW;
use crate::container::keyboard::{KeyboardNotification, KeyboardNotifier};
use crate::ui::theme::{KEYPAD_BG, KEYPAD_TEXT};

/// Height of the on-screen keypad in terminal rows.
pub const KEYPAD_ROWS: u16 = 6;
pub const KEYPAD_ANIMATION: Duration = Duration::from_millis(250);

/// The demo's software keyboard.
///
/// Showing and hiding it posts the matching notification, which is all a
/// container ever learns about it. A keypad still up when dropped hides
/// itself.
pub struct Keypad {
    notifier: Rc<KeyboardNotifier>,
    visible: bool,
}

impl Keypad {
    pub fn new(notifier: Rc<KeyboardNotifier>) -> Self {
        Self {
            notifier,
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Keypad height in points.
    pub fn height() -> f32 {
        f32::from(KEYPAD_ROWS) * POINTS_PER_ROW
    }

    pub fn show(&mut self) {
        if self.visible {
            return;
        }
        self.visible = true;
        self.notifier.post(KeyboardNotification::will_show(
            Self::height(),
            KEYPAD_ANIMATION,
        ));
    }

    pub fn hide(&mut self) {
        if !self.visible {
            return;
        }
        self.visible = false;
        self.notifier
            .post(KeyboardNotification::will_hide(KEYPAD_ANIMATION));
    }
}

impl Drop for Keypad {
    fn drop(&mut self) {
        self.hide();
    }
}

/// Draws the keypad into the strip the keyboard lift frees at the bottom of
/// the screen.
pub struct KeypadView;

impl Widget for KeypadView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        Clear.render(area, buf);
        let style = Style::default().fg(KEYPAD_TEXT).bg(KEYPAD_BG);
        let rows = ["1   2   3", "4   5   6", "7   8   9", "⌫   0   ↵"];
        Paragraph::new(rows.into_iter().map(Line::from).collect::<Vec<_>>())
            .alignment(Alignment::Center)
            .style(style)
            .block(Block::default().borders(Borders::TOP).style(style))
            .render(area, buf);
    }
}
