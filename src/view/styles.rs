//! Mapping semantic text colours to terminal styles.

use crate::text::{TextColor, TextStyle};
use ratatui::style::{Color, Modifier, Style};

/// Terminal colours for every kind of row content.
///
/// Colours are disabled by the `--no-color` flag or a set `NO_COLOR` environment variable.
/// Bold and reversed attributes survive either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Palette honouring the `--no-color` flag and `NO_COLOR`.
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Palette with colours forced on or off.
    pub fn with_colors(enabled: bool) -> Self {
        Self { enabled }
    }

    /// True when foreground and background colours are emitted.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }

    /// Style for a text run.
    pub fn text(self, style: TextStyle) -> Style {
        let mut out = self.fg(match style.color {
            TextColor::Primary => Color::Reset,
            TextColor::Secondary => Color::DarkGray,
            TextColor::Accent => Color::Cyan,
            TextColor::Muted => Color::Gray,
        });
        if style.bold {
            out = out.add_modifier(Modifier::BOLD);
        }
        out
    }

    /// Style for one star of the rating glyph.
    pub fn star(self, filled: bool) -> Style {
        self.fg(if filled { Color::Yellow } else { Color::DarkGray })
    }

    /// Style for image placeholders.
    pub fn placeholder(self) -> Style {
        self.fg(Color::DarkGray)
    }

    /// Style for the selection marker.
    pub fn selection(self) -> Style {
        self.fg(Color::Cyan).add_modifier(Modifier::BOLD)
    }

    /// Style for the status bar.
    pub fn status(self) -> Style {
        if self.enabled {
            Style::default().fg(Color::Black).bg(Color::Gray)
        } else {
            Style::default().add_modifier(Modifier::REVERSED)
        }
    }

    fn fg(self, color: Color) -> Style {
        if self.enabled {
            Style::default().fg(color)
        } else {
            Style::default()
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::with_colors(true)
    }
}
