//! Column model: per-column scroll state over the source text.

use rand::Rng;

/// Shortest trail a column is ever given.
pub const MIN_HEIGHT: usize = 5;

/// Column heights are drawn from `[MIN_HEIGHT, terminal_height + HEIGHT_PADDING)`.
pub const HEIGHT_PADDING: usize = 5;

/// Chance per column per frame that its height is re-rolled.
pub const RESIZE_CHANCE: f64 = 0.02;

/// State for a single rain column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Fixed horizontal screen position.
    pub x: u16,
    /// Number of rows this column currently covers.
    pub height: usize,
    /// Read position into the source characters.
    pub offset: usize,
}

/// Number of columns for a terminal of the given width: one every two cells,
/// never fewer than one.
pub fn column_count(terminal_width: u16) -> usize {
    (terminal_width as usize / 2).max(1)
}

/// Create `count` columns spaced two cells apart, with random heights and
/// random start offsets.
///
/// Returns an empty set when the terminal has no rows or the source is empty.
/// Columns whose position would not fit a `u16` are not created.
pub fn initialize<R: Rng + ?Sized>(
    count: usize,
    terminal_height: u16,
    source_length: usize,
    rng: &mut R,
) -> Vec<Column> {
    if terminal_height == 0 || source_length == 0 {
        return Vec::new();
    }

    (0..count)
        .map_while(|i| u16::try_from(i * 2).ok())
        .map(|x| Column {
            x,
            height: random_height(terminal_height, rng),
            offset: rng.gen_range(0..source_length),
        })
        .collect()
}

/// Step every column forward by one character, wrapping at the end of the
/// source, and occasionally re-roll a column's height.
pub fn advance<R: Rng + ?Sized>(
    columns: &mut [Column],
    terminal_height: u16,
    source_length: usize,
    rng: &mut R,
) {
    if source_length == 0 {
        return;
    }

    for col in columns {
        col.offset = (col.offset + 1) % source_length;
        if terminal_height > 0 && rng.gen_bool(RESIZE_CHANCE) {
            col.height = random_height(terminal_height, rng);
        }
    }
}

fn random_height<R: Rng + ?Sized>(terminal_height: u16, rng: &mut R) -> usize {
    rng.gen_range(MIN_HEIGHT..terminal_height as usize + HEIGHT_PADDING)
}
