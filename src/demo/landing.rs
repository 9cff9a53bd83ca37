use std::cell::Cell;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Widget};

use crate::flow::PresentationHost;
use crate::ui::layout::centered_rect;
use crate::ui::theme::{MUTED_TEXT, SCREEN_BG, SCREEN_TEXT};

/// The screen the picker is presented on.
///
/// Holds at most one overlay at a time and refuses a second presentation
/// while one is up.
#[derive(Debug, Default)]
pub struct LandingScreen {
    presenting: Cell<bool>,
    presentations: Cell<usize>,
}

impl LandingScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a container overlay is on this screen.
    pub fn is_presenting(&self) -> bool {
        self.presenting.get()
    }

    /// How many overlays this screen has accepted so far.
    pub fn presentations(&self) -> usize {
        self.presentations.get()
    }
}

impl PresentationHost for LandingScreen {
    fn present(&self) -> bool {
        if self.presenting.get() {
            return false;
        }
        self.presenting.set(true);
        self.presentations.set(self.presentations.get() + 1);
        true
    }

    fn dismiss(&self) {
        self.presenting.set(false);
    }
}

impl Widget for &LandingScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().fg(SCREEN_TEXT).bg(SCREEN_BG));
        let lines = vec![
            Line::from("cardflow").style(Style::default().add_modifier(Modifier::BOLD)),
            Line::from(""),
            Line::from("Enter: start   q: quit").style(Style::default().fg(MUTED_TEXT)),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(centered_rect(60, 20, area), buf);
    }
}
