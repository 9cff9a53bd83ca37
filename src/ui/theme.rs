use ratatui::style::Color;

pub const SCREEN_BG: Color = Color::Rgb(0x1e, 0x1e, 0x1e);
pub const SCREEN_TEXT: Color = Color::Rgb(0xe5, 0xe5, 0xe5);
pub const SHEET_TEXT: Color = Color::Rgb(0x26, 0x26, 0x26);
pub const MUTED_TEXT: Color = Color::Rgb(0x6b, 0x72, 0x80);
pub const ACCENT: Color = Color::Rgb(0xda, 0x77, 0x56);
pub const SLIDER_TRACK: Color = Color::Rgb(0xd4, 0xd4, 0xd4);
pub const KEYPAD_BG: Color = Color::Rgb(0x40, 0x40, 0x40);
pub const KEYPAD_TEXT: Color = Color::Rgb(0xe5, 0xe5, 0xe5);

/// Approximate RGB for a color, `None` for `Reset` and palette indexes.
pub fn to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    let rgb = match color {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Black => (0x00, 0x00, 0x00),
        Color::Red => (0x80, 0x00, 0x00),
        Color::Green => (0x00, 0x80, 0x00),
        Color::Yellow => (0x80, 0x80, 0x00),
        Color::Blue => (0x00, 0x00, 0x80),
        Color::Magenta => (0x80, 0x00, 0x80),
        Color::Cyan => (0x00, 0x80, 0x80),
        Color::Gray => (0xc0, 0xc0, 0xc0),
        Color::DarkGray => (0x80, 0x80, 0x80),
        Color::LightRed => (0xff, 0x00, 0x00),
        Color::LightGreen => (0x00, 0xff, 0x00),
        Color::LightYellow => (0xff, 0xff, 0x00),
        Color::LightBlue => (0x00, 0x00, 0xff),
        Color::LightMagenta => (0xff, 0x00, 0xff),
        Color::LightCyan => (0x00, 0xff, 0xff),
        Color::White => (0xff, 0xff, 0xff),
        Color::Reset | Color::Indexed(_) => return None,
    };
    Some(rgb)
}

/// Mix `overlay` into `base` by `amount` in `[0, 1]`.
///
/// Colors without an RGB value snap to whichever side dominates.
pub fn blend(base: Color, overlay: Color, amount: f32) -> Color {
    let amount = amount.clamp(0.0, 1.0);
    if amount <= 0.0 {
        return base;
    }
    if amount >= 1.0 {
        return overlay;
    }
    match (to_rgb(base), to_rgb(overlay)) {
        (Some((br, bg, bb)), Some((or, og, ob))) => {
            let mix = |from: u8, to: u8| {
                (f32::from(from) + (f32::from(to) - f32::from(from)) * amount).round() as u8
            };
            Color::Rgb(mix(br, or), mix(bg, og), mix(bb, ob))
        }
        _ if amount >= 0.5 => overlay,
        _ => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_halfway_between_black_and_white() {
        assert_eq!(
            blend(Color::Black, Color::White, 0.5),
            Color::Rgb(0x80, 0x80, 0x80)
        );
    }

    #[test]
    fn blend_endpoints_return_inputs() {
        assert_eq!(blend(SCREEN_BG, Color::DarkGray, 0.0), SCREEN_BG);
        assert_eq!(blend(SCREEN_BG, Color::DarkGray, 1.0), Color::DarkGray);
    }

    #[test]
    fn reset_snaps_to_dominant_side() {
        assert_eq!(blend(Color::Reset, Color::White, 0.3), Color::Reset);
        assert_eq!(blend(Color::Reset, Color::White, 0.7), Color::White);
    }
}
