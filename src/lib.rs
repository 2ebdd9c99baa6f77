#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod document;
pub mod element;
pub mod raster;
pub mod renderer;
pub mod tool;

pub use app::PaintApp;
pub use canvas::{Canvas, CanvasError};
pub use document::Document;
pub use element::{Element, ElementType};
pub use raster::{flood_fill, Color, FillError, FillMode, PixelBuffer, Seed};
pub use renderer::Renderer;
pub use tool::{EraserMode, HighlighterColor, ToolMode, ToolState};
