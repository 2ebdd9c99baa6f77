use egui::{Pos2, Rect, Vec2};
use uuid::Uuid;

use crate::raster::{Color, PixelBuffer};

mod common;
pub mod image;
pub mod shape;
pub mod stroke;
pub mod text;

pub use shape::ShapeKind;
pub use stroke::MutableStroke;

/// Common trait that all document elements must implement
pub trait Element {
    /// Get the unique identifier for this element
    fn id(&self) -> Uuid;

    /// Get the element type as a string
    fn kind(&self) -> &'static str;

    /// Get the bounding rectangle for this element
    fn rect(&self) -> Rect;

    /// Test if the element contains the given position
    fn hit_test(&self, pos: Pos2) -> bool;

    /// Translate the element by the given delta
    fn translate(&mut self, delta: Vec2);

    /// Draw the element into the snapshot buffer
    fn rasterize(&self, target: &mut PixelBuffer);
}

/// Enumeration of all element types in the document
#[derive(Clone, Debug)]
pub enum ElementType {
    Stroke(stroke::Stroke),
    Shape(shape::Shape),
    Text(text::Text),
    Image(image::Image),
}

impl ElementType {
    pub fn as_stroke(&self) -> Option<&stroke::Stroke> {
        match self {
            ElementType::Stroke(s) => Some(s),
            _ => None,
        }
    }
}

impl Element for ElementType {
    fn id(&self) -> Uuid {
        match self {
            ElementType::Stroke(s) => s.id(),
            ElementType::Shape(s) => s.id(),
            ElementType::Text(t) => t.id(),
            ElementType::Image(i) => i.id(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ElementType::Stroke(s) => s.kind(),
            ElementType::Shape(s) => s.kind(),
            ElementType::Text(t) => t.kind(),
            ElementType::Image(i) => i.kind(),
        }
    }

    fn rect(&self) -> Rect {
        match self {
            ElementType::Stroke(s) => s.rect(),
            ElementType::Shape(s) => s.rect(),
            ElementType::Text(t) => t.rect(),
            ElementType::Image(i) => i.rect(),
        }
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        match self {
            ElementType::Stroke(s) => s.hit_test(pos),
            ElementType::Shape(s) => s.hit_test(pos),
            ElementType::Text(t) => t.hit_test(pos),
            ElementType::Image(i) => i.hit_test(pos),
        }
    }

    fn translate(&mut self, delta: Vec2) {
        match self {
            ElementType::Stroke(s) => s.translate(delta),
            ElementType::Shape(s) => s.translate(delta),
            ElementType::Text(t) => t.translate(delta),
            ElementType::Image(i) => i.translate(delta),
        }
    }

    fn rasterize(&self, target: &mut PixelBuffer) {
        match self {
            ElementType::Stroke(s) => s.rasterize(target),
            ElementType::Shape(s) => s.rasterize(target),
            ElementType::Text(t) => t.rasterize(target),
            ElementType::Image(i) => i.rasterize(target),
        }
    }
}

/// Factory functions for creating elements
pub mod factory {
    use super::*;

    /// Create a new ink stroke element
    pub fn create_stroke(
        points: Vec<Pos2>,
        radius: f32,
        color: Color,
        highlighter: bool,
    ) -> ElementType {
        ElementType::Stroke(stroke::Stroke::new(points, radius, color, highlighter))
    }

    /// Create a new shape element from its two drag corners
    pub fn create_shape(
        kind: ShapeKind,
        start: Pos2,
        end: Pos2,
        color: Color,
        thickness: f32,
    ) -> ElementType {
        ElementType::Shape(shape::Shape::new(kind, start, end, color, thickness))
    }

    /// Create a new text element
    pub fn create_text(content: String, anchor: Pos2, size: f32, color: Color) -> ElementType {
        ElementType::Text(text::Text::new(content, anchor, size, color))
    }

    /// Create a new image element from decoded RGBA pixels
    pub fn create_image(
        data: Vec<u8>,
        natural_width: usize,
        natural_height: usize,
        position: Pos2,
        display_size: Vec2,
    ) -> ElementType {
        ElementType::Image(image::Image::new(
            data,
            natural_width,
            natural_height,
            position,
            display_size,
        ))
    }

    /// Create the full-canvas layer a bucket fill composites back on top of
    /// the document. Covers the whole canvas at the origin, fully opaque.
    pub fn create_fill_layer(buffer: &PixelBuffer) -> ElementType {
        ElementType::Image(image::Image::new(
            buffer.to_rgba(),
            buffer.width(),
            buffer.height(),
            Pos2::ZERO,
            Vec2::new(buffer.width() as f32, buffer.height() as f32),
        ))
    }
}
