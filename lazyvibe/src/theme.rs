//! Colour themes.

use lazyvibe_core::config::THEME_NAMES;
use ratatui::style::Color;

use crate::sparkline::Tier;

/// A named palette the renderer draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Config key (`"default"`, `"nord"`, ...).
    pub name: &'static str,
    pub display_name: &'static str,
    pub primary: Color,
    pub secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub surface: Color,
    pub surface_dark: Color,
    pub text: Color,
    pub text_muted: Color,
    pub text_bright: Color,
}

const fn hex(rgb: u32) -> Color {
    Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

const ONE_DARK: Theme = Theme {
    name: "default",
    display_name: "One Dark",
    primary: hex(0x61afef),
    secondary: hex(0xc678dd),
    success: hex(0x98c379),
    warning: hex(0xe5c07b),
    error: hex(0xe06c75),
    surface: hex(0x282c34),
    surface_dark: hex(0x21252b),
    text: hex(0xabb2bf),
    text_muted: hex(0x5c6370),
    text_bright: hex(0xffffff),
};

const DRACULA: Theme = Theme {
    name: "dracula",
    display_name: "Dracula",
    primary: hex(0xbd93f9),
    secondary: hex(0xff79c6),
    success: hex(0x50fa7b),
    warning: hex(0xf1fa8c),
    error: hex(0xff5555),
    surface: hex(0x282a36),
    surface_dark: hex(0x21222c),
    text: hex(0xf8f8f2),
    text_muted: hex(0x6272a4),
    text_bright: hex(0xffffff),
};

const NORD: Theme = Theme {
    name: "nord",
    display_name: "Nord",
    primary: hex(0x88c0d0),
    secondary: hex(0xb48ead),
    success: hex(0xa3be8c),
    warning: hex(0xebcb8b),
    error: hex(0xbf616a),
    surface: hex(0x2e3440),
    surface_dark: hex(0x242933),
    text: hex(0xd8dee9),
    text_muted: hex(0x4c566a),
    text_bright: hex(0xeceff4),
};

const GRUVBOX: Theme = Theme {
    name: "gruvbox",
    display_name: "Gruvbox",
    primary: hex(0x83a598),
    secondary: hex(0xd3869b),
    success: hex(0xb8bb26),
    warning: hex(0xfabd2f),
    error: hex(0xfb4934),
    surface: hex(0x282828),
    surface_dark: hex(0x1d2021),
    text: hex(0xebdbb2),
    text_muted: hex(0x665c54),
    text_bright: hex(0xfbf1c7),
};

const CATPPUCCIN: Theme = Theme {
    name: "catppuccin",
    display_name: "Catppuccin Mocha",
    primary: hex(0x89b4fa),
    secondary: hex(0xcba6f7),
    success: hex(0xa6e3a1),
    warning: hex(0xf9e2af),
    error: hex(0xf38ba8),
    surface: hex(0x1e1e2e),
    surface_dark: hex(0x181825),
    text: hex(0xcdd6f4),
    text_muted: hex(0x6c7086),
    text_bright: hex(0xffffff),
};

impl Default for Theme {
    fn default() -> Self {
        ONE_DARK
    }
}

impl Theme {
    /// Theme for a config key, falling back to the default palette.
    pub fn by_name(name: &str) -> Theme {
        match name {
            "dracula" => DRACULA,
            "nord" => NORD,
            "gruvbox" => GRUVBOX,
            "catppuccin" => CATPPUCCIN,
            _ => ONE_DARK,
        }
    }

    /// The next theme in the fixed cycle order.
    pub fn next(&self) -> Theme {
        let idx = THEME_NAMES.iter().position(|n| *n == self.name).unwrap_or(0);
        Theme::by_name(THEME_NAMES[(idx + 1) % THEME_NAMES.len()])
    }

    pub fn tier_color(&self, tier: Tier) -> Color {
        match tier {
            Tier::Low => self.success,
            Tier::Mid => self.warning,
            Tier::High => self.error,
        }
    }

    /// Heatmap cell colour for intensity 0..=3.
    pub fn heat_color(&self, level: u8) -> Color {
        match level {
            0 => self.surface_dark,
            1 => self.text_muted,
            2 => self.success,
            _ => self.primary,
        }
    }
}
