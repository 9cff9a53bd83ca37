use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::container::geometry::Point;
use crate::container::PanPhase;
use crate::flow::{Context, Flow};
use crate::ui::app::App;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'c') {
        app.request_quit();
        return;
    }

    if app.is_presenting() {
        if key.code == KeyCode::Esc {
            app.close_flow();
        } else {
            app.on_key(key);
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Enter => app.start_flow(),
        _ => {}
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Press {
    Pan,
    Backdrop,
}

/// Turns left-button mouse events into container pans and backdrop taps.
///
/// A press on the sheet starts a pan that follows the button until release.
/// A press outside the sheet becomes a tap when the button is released.
#[derive(Debug, Default)]
pub struct PointerRouter {
    press: Option<Press>,
}

impl PointerRouter {
    /// Returns whether the event was consumed.
    pub fn route<C: Context>(&mut self, flow: &mut Flow<C>, mouse: MouseEvent) -> bool {
        let at = Point::from_cell(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if flow.container().sheet_frame().contains(at) {
                    let began = flow.handle_pan(PanPhase::Began, at);
                    self.press = began.then_some(Press::Pan);
                    began
                } else {
                    self.press = Some(Press::Backdrop);
                    true
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => match self.press {
                Some(Press::Pan) => flow.handle_pan(PanPhase::Changed, at),
                _ => false,
            },
            MouseEventKind::Up(MouseButton::Left) => match self.press.take() {
                Some(Press::Pan) => flow.handle_pan(PanPhase::Ended, at),
                Some(Press::Backdrop) => flow.handle_tap(at),
                None => false,
            },
            _ => false,
        }
    }
}
