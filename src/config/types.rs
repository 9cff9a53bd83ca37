use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Presentation settings for a card flow.
///
/// Read once when the flow is built and never changed afterwards. Every
/// field has a default, so a config file may set any subset of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Backdrop tint drawn over the host screen.
    #[serde(with = "color_serde")]
    pub backdrop_color: Color,
    /// Backdrop strength in `[0, 1]`.
    pub backdrop_alpha: f32,
    /// `0` draws a square border, anything above draws rounded corners.
    pub corner_radius: f32,
    /// Sheet background; fading cards blend toward it.
    #[serde(with = "color_serde")]
    pub container_color: Color,
    /// Optional title shown on the sheet border.
    pub title: Option<String>,
    pub title_font: TitleFont,
    pub drag_to_dismiss_enabled: bool,
    /// Sheet width as a percentage of the screen (1..=100).
    pub sheet_width_percent: u16,
    /// Sheet height as a percentage of the screen (1..=100).
    pub sheet_height_percent: u16,
}

/// Terminal rendition of the title font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleFont {
    pub bold: bool,
    pub italic: bool,
}

impl Default for TitleFont {
    fn default() -> Self {
        Self {
            bold: true,
            italic: false,
        }
    }
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            backdrop_color: Color::DarkGray,
            backdrop_alpha: 0.5,
            corner_radius: 1.0,
            container_color: Color::White,
            title: None,
            title_font: TitleFont::default(),
            drag_to_dismiss_enabled: true,
            sheet_width_percent: 70,
            sheet_height_percent: 50,
        }
    }
}

impl CardConfig {
    pub fn with_backdrop(mut self, color: Color, alpha: f32) -> Self {
        self.backdrop_color = color;
        self.backdrop_alpha = alpha;
        self
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn with_container_color(mut self, color: Color) -> Self {
        self.container_color = color;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_title_font(mut self, font: TitleFont) -> Self {
        self.title_font = font;
        self
    }

    pub fn with_drag_to_dismiss(mut self, enabled: bool) -> Self {
        self.drag_to_dismiss_enabled = enabled;
        self
    }

    pub fn with_sheet_size(mut self, width_percent: u16, height_percent: u16) -> Self {
        self.sheet_width_percent = width_percent;
        self.sheet_height_percent = height_percent;
        self
    }

    /// Effective backdrop strength for a given backdrop opacity.
    pub fn backdrop_strength(&self, opacity: f32) -> f32 {
        (self.backdrop_alpha * opacity).clamp(0.0, 1.0)
    }
}

/// Colors are stored as ratatui color strings: `"darkgray"`, `"#1e1e1e"`, `"42"`.
mod color_serde {
    use ratatui::style::Color;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Color::from_str(&raw).map_err(|_| D::Error::custom(format!("invalid color '{raw}'")))
    }
}
