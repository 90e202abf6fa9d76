//! Per-glyph color draw.

use rand::Rng;
use ratatui::style::Color;
use textrain_core::RainPalette;

/// Pick a color for one glyph. No state is kept between draws, so a glyph
/// flickers from frame to frame.
pub fn random_color<R: Rng + ?Sized>(palette: RainPalette, rng: &mut R) -> Color {
    let colors = palette.colors();
    colors[rng.gen_range(0..colors.len())]
}
