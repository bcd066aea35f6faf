use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

pub struct Theme;

impl Theme {
    pub const BG_DARK: Color = Color::Rgb(18, 18, 24);
    pub const BG_SURFACE: Color = Color::Rgb(28, 30, 38);
    pub const BORDER_DIM: Color = Color::Rgb(60, 64, 78);
    pub const TEXT_PRIMARY: Color = Color::Rgb(220, 222, 228);
    pub const TEXT_SECONDARY: Color = Color::Rgb(150, 155, 170);
    pub const TEXT_MUTED: Color = Color::Rgb(100, 104, 118);
    pub const ACCENT_TEAL: Color = Color::Rgb(80, 200, 210);
    pub const ACCENT_AMBER: Color = Color::Rgb(230, 180, 80);
    pub const ACCENT_GREEN: Color = Color::Rgb(90, 210, 130);

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER_DIM)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT_TEAL)
    }

    pub fn border_type() -> BorderType {
        BorderType::Rounded
    }

    pub fn border_type_focused() -> BorderType {
        BorderType::Thick
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    pub fn price() -> Style {
        Style::default().fg(Self::ACCENT_GREEN)
    }

    pub fn total() -> Style {
        Style::default()
            .fg(Self::ACCENT_GREEN)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selection() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::ACCENT_TEAL)
            .add_modifier(Modifier::BOLD)
    }

    pub fn qty_field() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::ACCENT_AMBER)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).bg(Color::DarkGray)
    }

    pub fn help_key() -> Style {
        Style::default()
            .fg(Self::ACCENT_AMBER)
            .add_modifier(Modifier::BOLD)
    }

    pub fn help_text() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }
}
