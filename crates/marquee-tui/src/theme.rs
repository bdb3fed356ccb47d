use ratatui::style::Color;

use marquee_core::config::UiConfig;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub grey2: Color,

    // Semantic colors
    pub running: Color,
    pub paused: Color,
    pub stopped: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        gruvbox_dark()
    }
}

/// Gruvbox Material dark
pub fn gruvbox_dark() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x28, 0x28),
        bg2: Color::Rgb(0x45, 0x40, 0x3d),
        fg0: Color::Rgb(0xd4, 0xbe, 0x98),
        grey2: Color::Rgb(0xa8, 0x99, 0x84),
        running: Color::Rgb(0xa9, 0xb6, 0x65),
        paused: Color::Rgb(0xd8, 0xa6, 0x57),
        stopped: Color::Rgb(0xea, 0x69, 0x62),
        accent: Color::Rgb(0x89, 0xb4, 0x82),
    }
}

/// Nord
/// https://www.nordtheme.com/
pub fn nord() -> Theme {
    Theme {
        bg0: Color::Rgb(0x2e, 0x34, 0x40), // nord0
        bg2: Color::Rgb(0x43, 0x4c, 0x5e), // nord2
        fg0: Color::Rgb(0xec, 0xef, 0xf4), // nord6
        grey2: Color::Rgb(0xd8, 0xde, 0xe9), // nord4
        running: Color::Rgb(0xa3, 0xbe, 0x8c), // nord14
        paused: Color::Rgb(0xeb, 0xcb, 0x8b), // nord13
        stopped: Color::Rgb(0xbf, 0x61, 0x6a), // nord11
        accent: Color::Rgb(0x8f, 0xbc, 0xbb), // nord7
    }
}

/// Dracula
pub fn dracula() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x2a, 0x36),
        bg2: Color::Rgb(0x44, 0x47, 0x5a),
        fg0: Color::Rgb(0xf8, 0xf8, 0xf2),
        grey2: Color::Rgb(0x62, 0x72, 0xa4),
        running: Color::Rgb(0x50, 0xfa, 0x7b),
        paused: Color::Rgb(0xf1, 0xfa, 0x8c),
        stopped: Color::Rgb(0xff, 0x55, 0x55),
        accent: Color::Rgb(0xbd, 0x93, 0xf9),
    }
}

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');

    match hex.len() {
        // Short form: RGB -> RRGGBB
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Load the theme named in the UI config, applying the accent override
pub fn load_theme(config: &UiConfig) -> Theme {
    let mut theme = match config.theme.to_lowercase().as_str() {
        "nord" => nord(),
        "dracula" => dracula(),
        _ => gruvbox_dark(),
    };

    if let Some(color) = config.accent.as_deref().and_then(parse_hex_color) {
        theme.accent = color;
    }
    theme
}
