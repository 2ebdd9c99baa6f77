use std::path::Path;

use egui::{Pos2, Vec2};
use log::{debug, info};
use thiserror::Error;
use uuid::Uuid;

use crate::document::Document;
use crate::element::{factory, Element, ElementType, MutableStroke, ShapeKind};
use crate::raster::{flood_fill, Color, FillError, FillMode, Seed};
use crate::renderer::Renderer;
use crate::tool::EraserMode;

/// Default canvas extent, in pixels.
pub const DEFAULT_WIDTH: usize = 1100;
pub const DEFAULT_HEIGHT: usize = 700;

/// Errors from the save/load paths. Everything funnels through the `image`
/// codec, including file I/O.
#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),
}

/// A shape being dragged out, before the pointer is released.
#[derive(Debug, Clone, Copy)]
pub struct PendingShape {
    pub kind: ShapeKind,
    pub start: Pos2,
    pub current: Pos2,
}

/// The headless application core: owns the document and the renderer, and
/// implements every canvas operation the GUI triggers. The GUI layer above
/// this is pure event wiring.
pub struct Canvas {
    document: Document,
    renderer: Renderer,
    active_stroke: Option<MutableStroke>,
    pending_shape: Option<PendingShape>,
    selected: Option<Uuid>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            document: Document::new(width, height),
            renderer: Renderer::new(),
            active_stroke: None,
            pending_shape: None,
            selected: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn size(&self) -> (usize, usize) {
        self.document.size()
    }

    // ---- Ink capture -----------------------------------------------------

    pub fn begin_stroke(&mut self, start: Pos2, radius: f32, color: Color, highlighter: bool) {
        self.active_stroke = Some(MutableStroke::new(start, radius, color, highlighter));
    }

    pub fn extend_stroke(&mut self, point: Pos2) {
        if let Some(stroke) = &mut self.active_stroke {
            stroke.add_point(point);
        }
    }

    /// Commits the in-progress stroke to the document. Returns whether
    /// anything was added.
    pub fn finish_stroke(&mut self) -> bool {
        match self.active_stroke.take() {
            Some(stroke) => {
                self.document
                    .add_element(ElementType::Stroke(stroke.to_stroke()));
                true
            }
            None => false,
        }
    }

    pub fn active_stroke(&self) -> Option<&MutableStroke> {
        self.active_stroke.as_ref()
    }

    // ---- Shape capture ---------------------------------------------------

    pub fn begin_shape(&mut self, kind: ShapeKind, start: Pos2) {
        self.pending_shape = Some(PendingShape {
            kind,
            start,
            current: start,
        });
    }

    pub fn update_shape(&mut self, current: Pos2) {
        if let Some(shape) = &mut self.pending_shape {
            shape.current = current;
        }
    }

    /// Commits the dragged-out shape with the given outline attributes.
    pub fn finish_shape(&mut self, color: Color, thickness: f32) -> bool {
        match self.pending_shape.take() {
            Some(shape) => {
                self.document.add_element(factory::create_shape(
                    shape.kind,
                    shape.start,
                    shape.current,
                    color,
                    thickness,
                ));
                true
            }
            None => false,
        }
    }

    pub fn pending_shape(&self) -> Option<&PendingShape> {
        self.pending_shape.as_ref()
    }

    // ---- Text ------------------------------------------------------------

    /// Places committed text. Empty input is dropped, matching a text box
    /// that was clicked open and abandoned.
    pub fn place_text(&mut self, content: &str, anchor: Pos2, size: f32, color: Color) -> bool {
        if content.trim().is_empty() {
            return false;
        }
        self.document
            .add_element(factory::create_text(content.to_owned(), anchor, size, color));
        true
    }

    // ---- Eraser ----------------------------------------------------------

    /// Applies the eraser at `pos`. Only ink strokes are erasable. Returns
    /// whether the document changed.
    pub fn erase_at(&mut self, pos: Pos2, mode: EraserMode, radius: f32) -> bool {
        let hit = self
            .document
            .elements()
            .iter()
            .rev()
            .filter(|e| e.as_stroke().is_some())
            .find(|e| e.hit_test(pos))
            .map(|e| e.id());
        let Some(id) = hit else {
            return false;
        };

        match mode {
            EraserMode::WholeStroke => self.document.remove_element(id).is_some(),
            EraserMode::Partial => {
                let Some(stroke) = self
                    .document
                    .element_by_id(id)
                    .and_then(ElementType::as_stroke)
                else {
                    return false;
                };
                match stroke.erase_near(pos, radius) {
                    Some(pieces) => {
                        let replacements =
                            pieces.into_iter().map(ElementType::Stroke).collect();
                        self.document.replace_element(id, replacements)
                    }
                    None => false,
                }
            }
        }
    }

    // ---- Selection -------------------------------------------------------

    /// Selects the top-most element under `pos`, if any.
    pub fn select_at(&mut self, pos: Pos2) -> Option<Uuid> {
        self.selected = self.document.element_at(pos).map(|e| e.id());
        self.selected
    }

    pub fn selected(&self) -> Option<Uuid> {
        self.selected
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Moves the current selection by `delta`. Returns whether anything moved.
    pub fn translate_selected(&mut self, delta: Vec2) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        match self.document.element_by_id_mut(id) {
            Some(element) => {
                element.translate(delta);
                true
            }
            None => false,
        }
    }

    // ---- Bucket / pick ---------------------------------------------------

    /// Runs the flood-fill pipeline for a click at `click` (canvas-local
    /// coordinates): snapshot the document, fill or sample the buffer, and
    /// for a bucket fill composite the result back as a new top-most layer.
    ///
    /// Returns the color at the seed before the fill — the Pick tool's
    /// entire purpose, and also what Bucket reports.
    pub fn fill(&mut self, click: Pos2, fill_color: Color, mode: FillMode) -> Result<Color, FillError> {
        let seed = Seed::from_click(click.x, click.y);
        let mut buffer = self.renderer.snapshot(&self.document);

        let target = flood_fill(&mut buffer, seed, fill_color, mode)?;

        // A pick samples without compositing, and a no-op fill would add an
        // invisible layer; skip both.
        if mode == FillMode::Bucket && target != fill_color {
            info!(
                "bucket fill at ({}, {}): {:?} -> {:?}",
                seed.x, seed.y, target, fill_color
            );
            self.document
                .add_element(factory::create_fill_layer(&buffer));
        }

        Ok(target)
    }

    // ---- Whole-canvas actions --------------------------------------------

    pub fn clear(&mut self) {
        info!("clearing canvas");
        self.document.clear();
        self.selected = None;
        self.active_stroke = None;
        self.pending_shape = None;
    }

    /// Flattens the canvas and writes it as a PNG.
    pub fn save_png(&self, path: &Path) -> Result<(), CanvasError> {
        let buffer = self.renderer.snapshot(&self.document);
        image::save_buffer_with_format(
            path,
            &buffer.to_rgba(),
            buffer.width() as u32,
            buffer.height() as u32,
            image::ExtendedColorType::Rgba8,
            image::ImageFormat::Png,
        )?;
        info!("saved canvas to {}", path.display());
        Ok(())
    }

    /// Loads an image file and places it centered on the canvas, scaled down
    /// to fit while preserving aspect ratio.
    pub fn load_image(&mut self, path: &Path) -> Result<(), CanvasError> {
        let decoded = image::open(path)?.to_rgba8();
        let (natural_w, natural_h) = decoded.dimensions();
        debug!(
            "loaded {} ({}x{})",
            path.display(),
            natural_w,
            natural_h
        );

        let (display_size, position) = fit_to_canvas(
            natural_w as f32,
            natural_h as f32,
            self.document.width() as f32,
            self.document.height() as f32,
        );

        self.document.add_element(factory::create_image(
            decoded.into_raw(),
            natural_w as usize,
            natural_h as usize,
            position,
            display_size,
        ));
        Ok(())
    }
}

/// Scales `natural` dimensions to fit a canvas while preserving aspect ratio,
/// and centers the result. Images smaller than the canvas are scaled up to
/// the canvas width or height.
pub fn fit_to_canvas(
    natural_w: f32,
    natural_h: f32,
    canvas_w: f32,
    canvas_h: f32,
) -> (Vec2, Pos2) {
    let aspect = natural_w / natural_h;
    let mut width = canvas_w;
    let mut height = width / aspect;
    if height > canvas_h {
        height = canvas_h;
        width = height * aspect;
    }
    let position = Pos2::new((canvas_w - width) / 2.0, (canvas_h - height) / 2.0);
    (Vec2::new(width, height), position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn stroke_capture_commits_on_finish() {
        let mut canvas = Canvas::new(100, 100);
        canvas.begin_stroke(pos2(10.0, 10.0), 1.0, Color::BLACK, false);
        canvas.extend_stroke(pos2(20.0, 10.0));
        assert!(canvas.active_stroke().is_some());
        assert!(canvas.finish_stroke());
        assert!(canvas.active_stroke().is_none());
        assert_eq!(canvas.document().elements().len(), 1);
        // No stroke in flight: finishing again is a no-op.
        assert!(!canvas.finish_stroke());
    }

    #[test]
    fn shape_capture_tracks_the_drag() {
        let mut canvas = Canvas::new(100, 100);
        canvas.begin_shape(ShapeKind::Oval, pos2(10.0, 10.0));
        canvas.update_shape(pos2(60.0, 40.0));
        let pending = canvas.pending_shape().unwrap();
        assert_eq!(pending.start, pos2(10.0, 10.0));
        assert_eq!(pending.current, pos2(60.0, 40.0));
        assert!(canvas.finish_shape(Color::BLACK, 2.0));
        assert_eq!(canvas.document().elements().len(), 1);
        assert_eq!(canvas.document().elements()[0].kind(), "oval");
    }

    #[test]
    fn empty_text_is_dropped() {
        let mut canvas = Canvas::new(100, 100);
        assert!(!canvas.place_text("   ", pos2(5.0, 5.0), 18.0, Color::BLACK));
        assert!(canvas.place_text("hello", pos2(5.0, 5.0), 18.0, Color::BLACK));
        assert_eq!(canvas.document().elements().len(), 1);
    }

    #[test]
    fn fit_to_canvas_wide_image() {
        let (size, pos) = fit_to_canvas(200.0, 100.0, 100.0, 100.0);
        assert_eq!(size, Vec2::new(100.0, 50.0));
        assert_eq!(pos, pos2(0.0, 25.0));
    }

    #[test]
    fn fit_to_canvas_tall_image() {
        let (size, pos) = fit_to_canvas(100.0, 200.0, 100.0, 100.0);
        assert_eq!(size, Vec2::new(50.0, 100.0));
        assert_eq!(pos, pos2(25.0, 0.0));
    }
}
