use crate::domain::{Status, Theme};
use ratatui::style::Color;

/// Colors used by the renderer for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub focus_border: Color,
    pub header: Color,
    pub selection_fg: Color,
    pub selection_bg: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Color::Rgb(0x31, 0x31, 0x31),
                foreground: Color::Rgb(0xee, 0xee, 0xee),
                muted: Color::Rgb(0x8a, 0x8a, 0x8a),
                accent: Color::Rgb(0x21, 0x73, 0x46),
                border: Color::Rgb(0x59, 0x59, 0x59),
                focus_border: Color::Rgb(0x3c, 0xb3, 0x71),
                header: Color::Rgb(0x3c, 0xb3, 0x71),
                selection_fg: Color::White,
                selection_bg: Color::Rgb(0x21, 0x73, 0x46),
                error: Color::Rgb(0xff, 0x6b, 0x6b),
            },
            Theme::Light => Self {
                background: Color::Rgb(0xff, 0xff, 0xff),
                foreground: Color::Rgb(0x31, 0x31, 0x31),
                muted: Color::Rgb(0x9e, 0x9e, 0x9e),
                accent: Color::Rgb(0x21, 0x73, 0x46),
                border: Color::Rgb(0xc4, 0xc4, 0xc4),
                focus_border: Color::Rgb(0x21, 0x73, 0x46),
                header: Color::Rgb(0x21, 0x73, 0x46),
                selection_fg: Color::White,
                selection_bg: Color::Rgb(0x21, 0x73, 0x46),
                error: Color::Rgb(0xc0, 0x39, 0x2b),
            },
        }
    }

    pub fn status_color(&self, status: Status) -> Color {
        match status {
            Status::Completed => self.header,
            Status::InProgress => Color::Rgb(0xe6, 0xa2, 0x3c),
            Status::Pending => self.muted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_themes_differ() {
        let dark = Palette::for_theme(Theme::Dark);
        let light = Palette::for_theme(Theme::Light);
        assert_ne!(dark.background, light.background);
        assert_ne!(dark.foreground, light.foreground);
    }
}
