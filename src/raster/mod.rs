//! Raster primitives: the packed BGRA pixel buffer and the flood-fill
//! engine that operates on it. Nothing in here knows about the GUI or
//! the document model.

mod buffer;
mod color;
mod fill;

pub use buffer::{PixelBuffer, RasterError, BYTES_PER_PIXEL};
pub use color::Color;
pub use fill::{flood_fill, FillError, FillMode, Seed};
