//! Rasterizer: column state to a colored character grid.

use std::fmt;

use rand::Rng;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span, Text},
};
use textrain_core::{Dimensions, RainPalette};

use crate::color::random_color;
use crate::column::Column;

/// A single grid cell. Blank cells hold a space and carry no color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub color: Option<Color>,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        color: None,
    };

    pub fn is_blank(&self) -> bool {
        self.ch == ' '
    }
}

/// One rendered frame, `height` rows of `width` cells stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RainFrame {
    dims: Dimensions,
    cells: Vec<Cell>,
}

impl RainFrame {
    fn blank(dims: Dimensions) -> Self {
        Self {
            dims,
            cells: vec![Cell::BLANK; dims.width as usize * dims.height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.dims.width
    }

    pub fn height(&self) -> u16 {
        self.dims.height
    }

    /// Cell at `(row, x)`, or `None` outside the grid.
    pub fn cell(&self, row: u16, x: u16) -> Option<&Cell> {
        if row >= self.dims.height || x >= self.dims.width {
            return None;
        }
        self.cells.get(self.index(row, x))
    }

    /// Iterate over the rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.dims.width.max(1) as usize)
    }

    /// True when no cell holds a glyph.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Cell::is_blank)
    }

    /// Styled text for the frame: one line per row, glyphs in their drawn
    /// color and runs of blanks as unstyled spans.
    pub fn to_text(&self) -> Text<'static> {
        let lines: Vec<Line<'static>> = self
            .rows()
            .map(|row| {
                let mut spans = Vec::new();
                let mut blanks = String::new();
                for cell in row {
                    match cell.color {
                        Some(color) if !cell.is_blank() => {
                            if !blanks.is_empty() {
                                spans.push(Span::raw(std::mem::take(&mut blanks)));
                            }
                            spans.push(Span::styled(
                                cell.ch.to_string(),
                                Style::new().fg(color),
                            ));
                        }
                        _ => blanks.push(' '),
                    }
                }
                if !blanks.is_empty() {
                    spans.push(Span::raw(blanks));
                }
                Line::from(spans)
            })
            .collect();
        Text::from(lines)
    }

    fn index(&self, row: u16, x: u16) -> usize {
        row as usize * self.dims.width as usize + x as usize
    }
}

/// Plain glyphs, rows separated by a single newline with none after the last.
impl fmt::Display for RainFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for cell in row {
                write!(f, "{}", cell.ch)?;
            }
        }
        Ok(())
    }
}

/// Draw the columns into a `dims`-sized grid.
///
/// Columns outside the grid (left over from before a shrink) are skipped and
/// each column is clipped to the grid height, so stale geometry never indexes
/// out of bounds. Every glyph gets an independent color draw from `palette`;
/// spaces in the source stay blank.
pub fn rasterize<R: Rng + ?Sized>(
    columns: &[Column],
    dims: Dimensions,
    source: &[char],
    palette: RainPalette,
    rng: &mut R,
) -> RainFrame {
    if dims.is_degenerate() {
        return RainFrame {
            dims,
            cells: Vec::new(),
        };
    }

    let mut frame = RainFrame::blank(dims);
    if source.is_empty() {
        return frame;
    }

    for col in columns {
        if col.x >= dims.width {
            continue;
        }
        let rows = col.height.min(dims.height as usize);
        for row in 0..rows {
            let ch = source[(col.offset + row) % source.len()];
            if ch == ' ' {
                continue;
            }
            let idx = frame.index(row as u16, col.x);
            frame.cells[idx] = Cell {
                ch,
                color: Some(random_color(palette, rng)),
            };
        }
    }

    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn col(x: u16, height: usize, offset: usize) -> Column {
        Column { x, height, offset }
    }

    fn draw(columns: &[Column], width: u16, height: u16, source: &str) -> RainFrame {
        let mut rng = StdRng::seed_from_u64(3);
        let dims = Dimensions::new(width, height);
        rasterize(columns, dims, &chars(source), RainPalette::Rainbow, &mut rng)
    }

    #[test]
    fn test_single_column_reads_from_offset() {
        let frame = draw(&[col(1, 3, 3)], 3, 4, "HELLO");

        assert_eq!(frame.to_string(), " L \n O \n H \n   ");
        assert!(frame.cell(0, 1).is_some_and(|c| c.color.is_some()));
        assert!(frame.cell(3, 1).is_some_and(Cell::is_blank));
    }

    #[test]
    fn test_column_clipped_to_height() {
        let frame = draw(&[col(0, 40, 0)], 2, 4, "abc");
        assert_eq!(frame.to_string(), "a \nb \nc \na ");
    }

    #[test]
    fn test_stale_columns_are_skipped() {
        let columns = [col(0, 5, 0), col(10, 5, 0), col(38, 5, 0)];
        let frame = draw(&columns, 10, 2, "xyz");
        assert_eq!(frame.width(), 10);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.rows().count(), 2);
        assert!(frame.rows().all(|row| row.len() == 10));
        assert_eq!(frame.to_string(), "x         \ny         ");
    }

    #[test]
    fn test_empty_source_gives_blank_grid() {
        let frame = draw(&[col(0, 5, 0)], 4, 3, "");
        assert!(frame.is_blank());
        assert_eq!(frame.to_string(), "    \n    \n    ");
    }

    #[test]
    fn test_degenerate_dimensions_give_empty_frame() {
        for (width, height) in [(0, 5), (5, 0), (0, 0)] {
            let frame = draw(&[col(0, 5, 0)], width, height, "abc");
            assert!(frame.is_blank());
            assert_eq!(frame.to_string(), "");
            assert_eq!(frame.to_text().lines.len(), 0);
        }
    }

    #[test]
    fn test_text_styles_only_glyphs() {
        let text = draw(&[col(2, 1, 0)], 5, 2, "ab").to_text();

        assert_eq!(text.lines.len(), 2);
        let first = &text.lines[0].spans;
        assert_eq!(first.len(), 3);
        assert_eq!(first[0].content, "  ");
        assert_eq!(first[0].style, Style::default());
        assert_eq!(first[1].content, "a");
        assert!(first[1].style.fg.is_some());
        assert_eq!(first[2].content, "  ");

        let second = &text.lines[1].spans;
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].content, "     ");
    }

    #[test]
    fn test_source_spaces_stay_blank() {
        let frame = draw(&[col(0, 3, 0)], 1, 3, "a b");
        assert_eq!(frame.to_string(), "a\n \nb");
        assert!(frame.cell(1, 0).is_some_and(|c| c.is_blank() && c.color.is_none()));

        let text = frame.to_text();
        assert_eq!(text.lines[1].spans.len(), 1);
        assert_eq!(text.lines[1].spans[0].content, " ");
        assert_eq!(text.lines[1].spans[0].style.fg, None);

        let spaces = draw(&[col(0, 3, 0)], 1, 3, "   ");
        assert!(spaces.is_blank());
        assert_eq!(spaces.to_string(), " \n \n ");
    }

    #[test]
    fn test_colors_vary_across_glyphs() {
        let frame = draw(&[col(0, 40, 0)], 1, 40, "abcdefgh");
        let colors: HashSet<Color> = frame.rows().filter_map(|row| row[0].color).collect();
        assert!(colors.len() > 1, "one color for every glyph: {colors:?}");
    }

    #[test]
    fn test_colors_vary_across_frames() {
        let columns = [col(0, 1, 0)];
        let source = chars("z");
        let dims = Dimensions::new(1, 1);
        let mut rng = StdRng::seed_from_u64(21);

        let colors: HashSet<Color> = (0..30)
            .filter_map(|_| {
                let frame = rasterize(&columns, dims, &source, RainPalette::Rainbow, &mut rng);
                frame.cell(0, 0).and_then(|c| c.color)
            })
            .collect();
        assert!(colors.len() > 1, "cell kept one color over 30 frames: {colors:?}");
        assert!(colors.iter().all(|c| RainPalette::Rainbow.colors().contains(c)));
    }
}
