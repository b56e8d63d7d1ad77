use ratatui::style::Color;

/// Colors of the preferences panel
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub grey0: Color,
    pub grey1: Color,

    // Semantic colors
    pub selection: Color,
    pub heading: Color,
    pub enabled: Color,
    pub disabled: Color,
    pub value: Color,
    pub error: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Material dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            grey0: Color::Rgb(0x7c, 0x6f, 0x64),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            selection: Color::Rgb(0x45, 0x40, 0x3d),
            heading: Color::Rgb(0xd8, 0xa6, 0x57),
            enabled: Color::Rgb(0xa9, 0xb6, 0x65),
            disabled: Color::Rgb(0x92, 0x83, 0x74),
            value: Color::Rgb(0x7d, 0xae, 0xa3),
            error: Color::Rgb(0xea, 0x69, 0x62),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
        }
    }
}

impl Theme {
    /// Plain terminal colors for terminals without truecolor
    pub fn basic() -> Self {
        Self {
            bg0: Color::Reset,
            bg1: Color::Reset,
            bg2: Color::DarkGray,
            fg0: Color::White,
            grey0: Color::DarkGray,
            grey1: Color::Gray,
            selection: Color::DarkGray,
            heading: Color::Yellow,
            enabled: Color::Green,
            disabled: Color::Gray,
            value: Color::Cyan,
            error: Color::Red,
            accent: Color::Green,
        }
    }
}
