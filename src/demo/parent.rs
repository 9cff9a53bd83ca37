use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Widget};

use crate::demo::child::ChildCard;
use crate::demo::context::ExampleContext;
use crate::flow::{Card, CardBinding};
use crate::ui::theme::{MUTED_TEXT, SHEET_TEXT};

pub const QUANTITY_PLACEHOLDER: &str = "Please choose quantity";

/// First card of the picker: shows the chosen quantity.
pub struct ParentCard {
    binding: CardBinding<ExampleContext>,
    label: String,
}

impl ParentCard {
    pub fn new() -> Self {
        Self {
            binding: CardBinding::new(),
            label: QUANTITY_PLACEHOLDER.to_string(),
        }
    }

    /// Text of the quantity label as of the last time the card was shown.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Default for ParentCard {
    fn default() -> Self {
        Self::new()
    }
}

impl Card<ExampleContext> for ParentCard {
    fn binding(&self) -> &CardBinding<ExampleContext> {
        &self.binding
    }

    fn binding_mut(&mut self) -> &mut CardBinding<ExampleContext> {
        &mut self.binding
    }

    fn apply_context(&mut self) {
        self.label = match self.context().and_then(|context| context.quantity) {
            Some(quantity) => quantity.to_string(),
            None => QUANTITY_PLACEHOLDER.to_string(),
        };
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::from("Quantity").style(Style::default().add_modifier(Modifier::BOLD)),
            Line::from(""),
            Line::from(self.label.as_str()),
            Line::from(""),
            Line::from("Enter: choose quantity   Esc: close").style(Style::default().fg(MUTED_TEXT)),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(SHEET_TEXT))
            .render(area, buf);
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code != KeyCode::Enter {
            return false;
        }
        match self.flow() {
            Some(flow) => {
                flow.push(ChildCard::new());
                true
            }
            None => false,
        }
    }
}
