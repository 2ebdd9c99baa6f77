use egui::{Pos2, Rect, Vec2};
use uuid::Uuid;

use super::common;
use super::Element;
use crate::raster::{Color, PixelBuffer};

/// Which primitive a shape element draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Oval,
    Rectangle,
    Line,
}

/// A primitive drawn by press-drag-release: oval and rectangle outlines with
/// a transparent interior, or a straight line. `start`/`end` are the two drag
/// corners (line endpoints for [`ShapeKind::Line`]).
#[derive(Clone, Debug)]
pub struct Shape {
    id: Uuid,
    kind: ShapeKind,
    start: Pos2,
    end: Pos2,
    color: Color,
    thickness: f32,
}

impl Shape {
    pub fn new(kind: ShapeKind, start: Pos2, end: Pos2, color: Color, thickness: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            start,
            end,
            color,
            thickness,
        }
    }

    pub fn shape_kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn start(&self) -> Pos2 {
        self.start
    }

    pub fn end(&self) -> Pos2 {
        self.end
    }

    /// The axis-aligned rectangle spanned by the two drag corners.
    pub fn span(&self) -> Rect {
        Rect::from_two_pos(self.start, self.end)
    }

    fn pen_radius(&self) -> f32 {
        (self.thickness / 2.0).max(0.5)
    }
}

impl Element for Shape {
    fn id(&self) -> Uuid {
        self.id
    }

    fn kind(&self) -> &'static str {
        match self.kind {
            ShapeKind::Oval => "oval",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Line => "line",
        }
    }

    fn rect(&self) -> Rect {
        self.span().expand(self.pen_radius())
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        let slop = self.pen_radius().max(2.0);
        match self.kind {
            ShapeKind::Line => {
                common::distance_to_line_segment(pos, self.start, self.end) <= slop
            }
            ShapeKind::Rectangle => {
                let span = self.span();
                // On the outline, not in the hollow interior.
                span.expand(slop).contains(pos) && !span.shrink(slop).contains(pos)
            }
            ShapeKind::Oval => {
                let span = self.span();
                let center = span.center();
                let rx = (span.width() / 2.0).max(f32::EPSILON);
                let ry = (span.height() / 2.0).max(f32::EPSILON);
                let dx = (pos.x - center.x) / rx;
                let dy = (pos.y - center.y) / ry;
                let d = (dx * dx + dy * dy).sqrt();
                // Within slop of the unit perimeter, scaled by the smaller radius.
                (d - 1.0).abs() * rx.min(ry) <= slop
            }
        }
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }

    fn rasterize(&self, target: &mut PixelBuffer) {
        let radius = self.pen_radius();
        match self.kind {
            ShapeKind::Line => {
                common::stamp_segment(target, self.start, self.end, radius, self.color);
            }
            ShapeKind::Rectangle => {
                let span = self.span();
                let corners = [
                    span.min,
                    Pos2::new(span.max.x, span.min.y),
                    span.max,
                    Pos2::new(span.min.x, span.max.y),
                ];
                for i in 0..4 {
                    common::stamp_segment(target, corners[i], corners[(i + 1) % 4], radius, self.color);
                }
            }
            ShapeKind::Oval => {
                let span = self.span();
                let center = span.center();
                let rx = span.width() / 2.0;
                let ry = span.height() / 2.0;
                // Enough perimeter samples that consecutive stamps overlap.
                let steps = ((rx.max(ry) * std::f32::consts::TAU) / radius.min(1.0))
                    .ceil()
                    .max(16.0) as usize;
                for i in 0..steps {
                    let t = i as f32 / steps as f32 * std::f32::consts::TAU;
                    let p = Pos2::new(center.x + rx * t.cos(), center.y + ry * t.sin());
                    common::stamp_disc(target, p, radius, self.color);
                }
            }
        }
    }
}
