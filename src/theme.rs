//! Light/dark theme preference and its colour palette

use std::sync::Arc;

use colored::{ColoredString, Colorize};

use crate::error::Result;
use crate::session::KeyValueStore;

/// Storage key of the theme preference
pub const THEME_KEY: &str = "theme";

/// Hex colours derived from the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub background: &'static str,
    pub surface: &'static str,
    pub card: &'static str,
    pub text: &'static str,
    pub text_secondary: &'static str,
    pub border: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub danger: &'static str,
    pub error: &'static str,
    pub info: &'static str,
    pub blue: &'static str,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        primary: "#009966",
        secondary: "#00774c",
        background: "#F8FAFC",
        surface: "#FFFFFF",
        card: "#FFFFFF",
        text: "#0F172A",
        text_secondary: "#64748B",
        border: "#E2E8F0",
        success: "#009966",
        warning: "#D97706",
        danger: "#DC2626",
        error: "#DC2626",
        info: "#00b894",
        blue: "#2563EB",
    };

    pub const DARK: Palette = Palette {
        primary: "#00b894",
        secondary: "#00cec9",
        background: "#0F172A",
        surface: "#1E293B",
        card: "#334155",
        text: "#F1F5F9",
        text_secondary: "#94A3B8",
        border: "#475569",
        success: "#00b894",
        warning: "#F59E0B",
        danger: "#EF4444",
        error: "#EF4444",
        info: "#00cec9",
        blue: "#3B82F6",
    };

    pub fn for_mode(dark: bool) -> Palette {
        if dark { Self::DARK } else { Self::LIGHT }
    }

    /// Colour for a status word such as "accepted" or "pending"
    pub fn status(&self, status: &str) -> &'static str {
        match status.to_ascii_lowercase().as_str() {
            "accepted" | "approved" | "shortlisted" | "completed" | "active" => self.success,
            "pending" | "applied" | "submitted" | "changes_requested" => self.warning,
            "rejected" | "inactive" | "closed" => self.danger,
            _ => self.text_secondary,
        }
    }
}

/// Parse `#RRGGBB` into components
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Colour `text` with a palette entry
pub fn paint(text: &str, hex: &str) -> ColoredString {
    match hex_to_rgb(hex) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.normal(),
    }
}

/// Guess the terminal background from `COLORFGBG` ("fg;bg").
///
/// Background colours 0-6 and 8 are the dark half of the 16-colour table.
pub fn terminal_prefers_dark(colorfgbg: Option<&str>) -> Option<bool> {
    let bg = colorfgbg?.rsplit(';').next()?.trim().parse::<u8>().ok()?;
    Some(matches!(bg, 0..=6 | 8))
}

/// Persisted dark/light choice.
pub struct ThemePreference {
    store: Arc<dyn KeyValueStore>,
    dark: bool,
}

impl ThemePreference {
    /// Use the stored choice, or `system_prefers_dark` when none was made.
    pub fn load(store: Arc<dyn KeyValueStore>, system_prefers_dark: bool) -> Self {
        let dark = match store.get(THEME_KEY).as_deref() {
            Some("dark") => true,
            Some("light") => false,
            Some(other) => {
                log::debug!("Unknown stored theme '{}', using system preference", other);
                system_prefers_dark
            }
            None => system_prefers_dark,
        };
        Self { store, dark }
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub fn name(&self) -> &'static str {
        if self.dark { "dark" } else { "light" }
    }

    /// Flip and persist. Returns the new mode.
    pub fn toggle(&mut self) -> Result<bool> {
        self.dark = !self.dark;
        self.store.set(THEME_KEY, self.name())?;
        Ok(self.dark)
    }

    pub fn palette(&self) -> Palette {
        Palette::for_mode(self.dark)
    }
}
