use egui::ColorImage;

use crate::document::Document;
use crate::element::Element;
use crate::raster::{Color, PixelBuffer};

/// Software rasterizer for the document — the surface snapshot provider.
///
/// `snapshot` flattens every element, bottom to top, into a packed BGRA
/// buffer. The on-screen view is produced from the same buffer (re-packed as
/// RGBA for texture upload), so what the flood fill operates on is exactly
/// what the user sees.
#[derive(Debug, Clone)]
pub struct Renderer {
    background: Color,
}

impl Default for Renderer {
    fn default() -> Self {
        // The canvas is an opaque white sheet, like the paper it mimics.
        Self {
            background: Color::WHITE,
        }
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Rasterizes the whole document into a fresh BGRA pixel buffer.
    pub fn snapshot(&self, document: &Document) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(document.width(), document.height(), self.background);
        for element in document.elements() {
            element.rasterize(&mut buffer);
        }
        buffer
    }

    /// The document flattened into an egui image, for texture upload.
    pub fn color_image(&self, document: &Document) -> ColorImage {
        let buffer = self.snapshot(document);
        ColorImage::from_rgba_unmultiplied(
            [buffer.width(), buffer.height()],
            &buffer.to_rgba(),
        )
    }
}
