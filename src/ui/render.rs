use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Widget};
use ratatui::Frame;

use crate::config::{CardConfig, TitleFont};
use crate::container::geometry::POINTS_PER_ROW;
use crate::demo::KeypadView;
use crate::flow::{Context, Flow};
use crate::ui::app::App;
use crate::ui::layout::bottom_strip;
use crate::ui::theme::{blend, SHEET_TEXT};

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    frame.render_widget(app.landing(), area);
    if !app.is_presenting() {
        return;
    }
    if let Some(flow) = app.flow() {
        draw_flow(flow, area, frame.buffer_mut());
    }
}

/// Draw a presented flow over whatever is already in `buf`.
///
/// Back to front: the backdrop tint, the sheet with its border and title,
/// the mounted card faded toward the container color, and the keypad strip
/// freed by the keyboard lift.
pub fn draw_flow<C: Context>(flow: &Flow<C>, area: Rect, buf: &mut Buffer) {
    let container = flow.container();
    let config = container.config();

    tint(
        area,
        buf,
        config.backdrop_color,
        config.backdrop_strength(container.backdrop_opacity()),
    );

    let sheet = container.sheet_frame().to_cells(area);
    if sheet.area() > 0 {
        let slot = draw_sheet(config, sheet, buf);
        if let Some(card) = flow.current_card() {
            if container.mounted_card() == Some(card.id()) {
                card.render(slot, buf);
            }
        }
        tint(slot, buf, config.container_color, 1.0 - container.card_opacity());
    }

    let keypad_rows = (container.root_lift() / POINTS_PER_ROW).round() as u16;
    if keypad_rows > 0 {
        KeypadView.render(bottom_strip(area, keypad_rows), buf);
    }
}

/// Returns the card slot inside the border.
fn draw_sheet(config: &CardConfig, area: Rect, buf: &mut Buffer) -> Rect {
    Clear.render(area, buf);
    let border_type = if config.corner_radius > 0.0 {
        BorderType::Rounded
    } else {
        BorderType::Plain
    };
    let mut block = Block::bordered()
        .border_type(border_type)
        .style(Style::default().fg(SHEET_TEXT).bg(config.container_color));
    if let Some(title) = &config.title {
        block = block.title(Line::from(title.as_str()).style(title_style(config.title_font)));
    }
    let slot = block.inner(area);
    block.render(area, buf);
    slot
}

fn title_style(font: TitleFont) -> Style {
    let mut style = Style::default();
    if font.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if font.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    style
}

/// Blend every cell of `area` toward `color` by `amount`.
fn tint(area: Rect, buf: &mut Buffer, color: Color, amount: f32) {
    if amount <= 0.0 {
        return;
    }
    let area = area.intersection(buf.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                let fg = blend(cell.fg, color, amount);
                let bg = blend(cell.bg, color, amount);
                cell.set_fg(fg).set_bg(bg);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_style_follows_font() {
        let style = title_style(TitleFont {
            bold: false,
            italic: true,
        });
        assert!(style.add_modifier.contains(Modifier::ITALIC));
        assert!(!style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn zero_tint_leaves_cells_alone() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        buf.set_style(area, Style::default().bg(Color::Black));
        tint(area, &mut buf, Color::White, 0.0);
        assert_eq!(buf.cell((0, 0)).map(|cell| cell.bg), Some(Color::Black));
    }

    #[test]
    fn full_tint_replaces_colors() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        buf.set_style(area, Style::default().fg(Color::Black).bg(Color::Black));
        tint(area, &mut buf, Color::White, 1.0);
        assert_eq!(buf.cell((3, 1)).map(|cell| cell.fg), Some(Color::White));
    }
}
