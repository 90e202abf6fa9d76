//! Character rain engine for textrain.
//!
//! This crate holds the stateful parts of the animation: the per-column
//! scroll state over a source text, the rasterizer that turns those columns
//! into a colored character grid, and the fixed-rate frame scheduler that
//! paces the whole thing.

mod color;
mod column;
mod raster;
mod scheduler;

pub use color::random_color;
pub use column::{
    Column, HEIGHT_PADDING, MIN_HEIGHT, RESIZE_CHANCE, advance, column_count, initialize,
};
pub use raster::{Cell, RainFrame, rasterize};
pub use scheduler::{FRAME_INTERVAL, FrameScheduler};
