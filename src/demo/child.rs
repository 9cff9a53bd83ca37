use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Gauge, Paragraph, Widget};

use crate::container::keyboard::KeyboardNotifier;
use crate::demo::context::ExampleContext;
use crate::demo::keypad::Keypad;
use crate::flow::{Card, CardBinding};
use crate::ui::theme::{ACCENT, MUTED_TEXT, SHEET_TEXT, SLIDER_TRACK};

/// Upper end of the slider.
pub const MAX_QUANTITY: i64 = 100;
const MAX_FIELD_DIGITS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildFocus {
    Slider,
    Field,
}

/// Second card of the picker: edits the quantity and hands it back.
pub struct ChildCard {
    binding: CardBinding<ExampleContext>,
    quantity: i64,
    field: String,
    focus: ChildFocus,
    keypad: Keypad,
}

impl ChildCard {
    /// A card whose keypad posts on the thread's shared notifier.
    pub fn new() -> Self {
        Self::with_notifier(KeyboardNotifier::current())
    }

    pub fn with_notifier(notifier: Rc<KeyboardNotifier>) -> Self {
        Self {
            binding: CardBinding::new(),
            quantity: 0,
            field: "0".to_string(),
            focus: ChildFocus::Slider,
            keypad: Keypad::new(notifier),
        }
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn field_text(&self) -> &str {
        &self.field
    }

    pub fn focus(&self) -> ChildFocus {
        self.focus
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    fn slide_to(&mut self, quantity: i64) {
        self.quantity = quantity.clamp(0, MAX_QUANTITY);
        self.field = self.quantity.to_string();
    }

    fn edit_field(&mut self, edit: impl FnOnce(&mut String)) {
        edit(&mut self.field);
        self.quantity = self.field.parse().unwrap_or(0);
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            ChildFocus::Slider => {
                self.keypad.show();
                ChildFocus::Field
            }
            ChildFocus::Field => {
                self.keypad.hide();
                ChildFocus::Slider
            }
        };
    }

    /// Hand the quantity back to the flow and go back to the previous card.
    fn done(&mut self) -> bool {
        self.keypad.hide();
        self.focus = ChildFocus::Slider;
        let Some(flow) = self.flow() else {
            return false;
        };
        let context = self.context().copied().unwrap_or_default();
        flow.update(Some(context.with_quantity(self.quantity)));
        flow.pop();
        true
    }
}

impl Default for ChildCard {
    fn default() -> Self {
        Self::new()
    }
}

impl Card<ExampleContext> for ChildCard {
    fn binding(&self) -> &CardBinding<ExampleContext> {
        &self.binding
    }

    fn binding_mut(&mut self) -> &mut CardBinding<ExampleContext> {
        &mut self.binding
    }

    fn apply_context(&mut self) {
        let quantity = self.context().and_then(|context| context.quantity).unwrap_or(0);
        self.quantity = quantity;
        self.field = quantity.to_string();
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let [title, _, slider, _, field, _, help] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        let marker = |focus: ChildFocus| if self.focus == focus { "▸ " } else { "  " };
        let text = Style::default().fg(SHEET_TEXT);

        Line::from("Choose quantity")
            .style(text.add_modifier(Modifier::BOLD))
            .render(title, buf);

        let [slider_marker, slider_bar] =
            Layout::horizontal([Constraint::Length(2), Constraint::Min(0)]).areas(slider);
        Span::styled(marker(ChildFocus::Slider), text).render(slider_marker, buf);
        let ratio = self.quantity.clamp(0, MAX_QUANTITY) as f64 / MAX_QUANTITY as f64;
        Gauge::default()
            .ratio(ratio)
            .label(self.quantity.to_string())
            .gauge_style(Style::default().fg(ACCENT).bg(SLIDER_TRACK))
            .render(slider_bar, buf);

        let field_style = if self.focus == ChildFocus::Field {
            Style::default().fg(ACCENT).add_modifier(Modifier::UNDERLINED)
        } else {
            text
        };
        Paragraph::new(Line::from(vec![
            Span::styled(marker(ChildFocus::Field), text),
            Span::styled("Quantity: ", text),
            Span::styled(self.field.as_str(), field_style),
        ]))
        .render(field, buf);

        Line::from("←/→ adjust   Tab: keypad   Enter: done   Esc: close")
            .style(Style::default().fg(MUTED_TEXT))
            .render(help, buf);
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match (self.focus, key.code) {
            (_, KeyCode::Tab) => self.toggle_focus(),
            (_, KeyCode::Enter) => return self.done(),
            (ChildFocus::Slider, KeyCode::Left) => self.slide_to(self.quantity - 1),
            (ChildFocus::Slider, KeyCode::Right) => self.slide_to(self.quantity + 1),
            (ChildFocus::Field, KeyCode::Char(digit)) if digit.is_ascii_digit() => {
                if self.field.len() < MAX_FIELD_DIGITS {
                    self.edit_field(|field| {
                        if field == "0" {
                            field.clear();
                        }
                        field.push(digit);
                    });
                }
            }
            (ChildFocus::Field, KeyCode::Backspace) => self.edit_field(|field| {
                field.pop();
            }),
            _ => return false,
        }
        true
    }
}
