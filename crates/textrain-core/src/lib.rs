//! Core types shared by the textrain crates.

use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Logical input intents, mapped from raw key presses by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputIntent {
    /// Confirm the highlighted entry.
    Select,
    /// Leave the animation and return to the document list.
    Back,
    /// Exit the program.
    Quit,
}

/// Terminal geometry in cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u16,
    pub height: u16,
}

impl Dimensions {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// True when either axis is zero and nothing can be drawn.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Color palette the rain draws glyph colors from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RainPalette {
    #[default]
    Matrix,
    Rainbow,
    Amber,
    Ice,
}

impl RainPalette {
    /// All palettes, in display order.
    pub const ALL: [RainPalette; 4] = [
        RainPalette::Matrix,
        RainPalette::Rainbow,
        RainPalette::Amber,
        RainPalette::Ice,
    ];

    /// Cycle to the next palette.
    pub fn next(self) -> Self {
        match self {
            RainPalette::Matrix => RainPalette::Rainbow,
            RainPalette::Rainbow => RainPalette::Amber,
            RainPalette::Amber => RainPalette::Ice,
            RainPalette::Ice => RainPalette::Matrix,
        }
    }

    /// Colors a glyph may be painted with.
    pub fn colors(self) -> &'static [Color] {
        match self {
            RainPalette::Matrix => &[
                Color::Rgb(0, 255, 65),
                Color::Rgb(0, 200, 50),
                Color::Rgb(0, 143, 17),
                Color::Rgb(0, 100, 0),
                Color::Rgb(180, 255, 180),
            ],
            RainPalette::Rainbow => &[
                Color::Red,
                Color::Yellow,
                Color::Green,
                Color::Cyan,
                Color::Blue,
                Color::Magenta,
            ],
            RainPalette::Amber => &[
                Color::Rgb(255, 176, 0),
                Color::Rgb(255, 204, 0),
                Color::Rgb(204, 120, 0),
                Color::Rgb(140, 80, 0),
            ],
            RainPalette::Ice => &[
                Color::Rgb(30, 144, 255),
                Color::Rgb(65, 105, 225),
                Color::Rgb(135, 206, 250),
                Color::Rgb(224, 255, 255),
            ],
        }
    }

    /// Lowercase name, as written in the config file.
    pub fn name(self) -> &'static str {
        match self {
            RainPalette::Matrix => "matrix",
            RainPalette::Rainbow => "rainbow",
            RainPalette::Amber => "amber",
            RainPalette::Ice => "ice",
        }
    }
}

impl fmt::Display for RainPalette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RainPalette {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| {
                format!("unknown palette '{s}' (expected matrix, rainbow, amber or ice)")
            })
    }
}
