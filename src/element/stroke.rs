use egui::{Pos2, Rect, Vec2};
use uuid::Uuid;

use super::common;
use super::Element;
use crate::raster::{Color, PixelBuffer};

/// Alpha applied to highlighter ink so the content underneath shows through.
pub const HIGHLIGHTER_ALPHA: u8 = 128;

/// Freehand ink: a series of connected points stamped with a round pen.
#[derive(Clone, Debug)]
pub struct Stroke {
    id: Uuid,
    points: Vec<Pos2>,
    color: Color,
    radius: f32,
    highlighter: bool,
}

impl Stroke {
    pub fn new(points: Vec<Pos2>, radius: f32, color: Color, highlighter: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            color,
            radius,
            highlighter,
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn is_highlighter(&self) -> bool {
        self.highlighter
    }

    /// The color actually put on pixels: highlighter ink is translucent.
    fn ink(&self) -> Color {
        if self.highlighter {
            self.color.with_alpha(HIGHLIGHTER_ALPHA)
        } else {
            self.color
        }
    }

    /// Partial (point) erase: removes every point within `radius` of `pos`
    /// and splits the remainder into separate strokes.
    ///
    /// Returns `None` when the eraser did not touch the stroke. An empty
    /// vector means the whole stroke was rubbed out.
    pub fn erase_near(&self, pos: Pos2, radius: f32) -> Option<Vec<Stroke>> {
        let survives: Vec<bool> = self
            .points
            .iter()
            .map(|p| (*p - pos).length() > radius)
            .collect();

        // A segment can pass under the eraser without either endpoint being
        // close; such segments are cut as well.
        let mut cut_after = vec![false; self.points.len()];
        for i in 0..self.points.len().saturating_sub(1) {
            if common::distance_to_line_segment(pos, self.points[i], self.points[i + 1]) <= radius {
                cut_after[i] = true;
            }
        }

        if survives.iter().all(|s| *s) && !cut_after.iter().any(|c| *c) {
            return None;
        }

        let mut pieces = Vec::new();
        let mut run: Vec<Pos2> = Vec::new();
        for (i, point) in self.points.iter().enumerate() {
            if survives[i] {
                run.push(*point);
            }
            let boundary = !survives[i] || cut_after[i];
            if boundary && !run.is_empty() {
                pieces.push(Stroke::new(
                    std::mem::take(&mut run),
                    self.radius,
                    self.color,
                    self.highlighter,
                ));
            }
        }
        if !run.is_empty() {
            pieces.push(Stroke::new(run, self.radius, self.color, self.highlighter));
        }
        Some(pieces)
    }
}

impl Element for Stroke {
    fn id(&self) -> Uuid {
        self.id
    }

    fn kind(&self) -> &'static str {
        "stroke"
    }

    fn rect(&self) -> Rect {
        common::calculate_bounds(&self.points, self.radius)
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        if self.points.len() == 1 {
            return (self.points[0] - pos).length() <= self.radius.max(2.0);
        }
        for window in self.points.windows(2) {
            if common::distance_to_line_segment(pos, window[0], window[1]) <= self.radius.max(2.0) {
                return true;
            }
        }
        false
    }

    fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }

    fn rasterize(&self, target: &mut PixelBuffer) {
        let ink = self.ink();
        match self.points.as_slice() {
            [] => {}
            [single] => common::stamp_disc(target, *single, self.radius, ink),
            points => {
                for window in points.windows(2) {
                    common::stamp_segment(target, window[0], window[1], self.radius, ink);
                }
            }
        }
    }
}

/// In-progress ink being captured while the pointer is down. Converted to an
/// immutable [`Stroke`] when the pointer is released.
#[derive(Debug)]
pub struct MutableStroke {
    points: Vec<Pos2>,
    color: Color,
    radius: f32,
    highlighter: bool,
}

impl MutableStroke {
    pub fn new(start: Pos2, radius: f32, color: Color, highlighter: bool) -> Self {
        Self {
            points: vec![start],
            color,
            radius,
            highlighter,
        }
    }

    pub fn add_point(&mut self, point: Pos2) {
        // Pointer-move events repeat positions when the cursor is still.
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn is_highlighter(&self) -> bool {
        self.highlighter
    }

    pub fn to_stroke(&self) -> Stroke {
        Stroke::new(
            self.points.clone(),
            self.radius,
            self.color,
            self.highlighter,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn horizontal_stroke() -> Stroke {
        let points = (0..10).map(|i| pos2(i as f32 * 10.0, 50.0)).collect();
        Stroke::new(points, 2.0, Color::BLACK, false)
    }

    #[test]
    fn erase_far_away_is_untouched() {
        let stroke = horizontal_stroke();
        assert!(stroke.erase_near(pos2(500.0, 500.0), 10.0).is_none());
    }

    #[test]
    fn erase_middle_splits_in_two() {
        let stroke = horizontal_stroke();
        let pieces = stroke.erase_near(pos2(45.0, 50.0), 8.0).unwrap();
        assert_eq!(pieces.len(), 2);
        let total: usize = pieces.iter().map(|p| p.points().len()).sum();
        assert!(total < stroke.points().len());
        for piece in &pieces {
            assert_eq!(piece.color(), stroke.color());
            assert_eq!(piece.radius(), stroke.radius());
        }
    }

    #[test]
    fn erase_everything_leaves_no_pieces() {
        let stroke = Stroke::new(vec![pos2(5.0, 5.0)], 2.0, Color::BLACK, false);
        let pieces = stroke.erase_near(pos2(5.0, 5.0), 4.0).unwrap();
        assert!(pieces.is_empty());
    }

    #[test]
    fn erase_cuts_segment_between_distant_points() {
        // Two points 100px apart: the eraser touches the segment midway
        // without reaching either endpoint.
        let stroke = Stroke::new(
            vec![pos2(0.0, 0.0), pos2(100.0, 0.0)],
            2.0,
            Color::BLACK,
            false,
        );
        let pieces = stroke.erase_near(pos2(50.0, 0.0), 5.0).unwrap();
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0].points(), &[pos2(0.0, 0.0)]);
        assert_eq!(pieces[1].points(), &[pos2(100.0, 0.0)]);
    }

    #[test]
    fn mutable_stroke_skips_duplicate_points() {
        let mut m = MutableStroke::new(pos2(1.0, 1.0), 1.0, Color::BLACK, false);
        m.add_point(pos2(1.0, 1.0));
        m.add_point(pos2(2.0, 2.0));
        assert_eq!(m.points().len(), 2);
    }

    #[test]
    fn rasterize_paints_along_the_path() {
        let mut buf = PixelBuffer::new(20, 10, Color::WHITE);
        let stroke = Stroke::new(
            vec![pos2(2.0, 5.0), pos2(18.0, 5.0)],
            1.5,
            Color::BLACK,
            false,
        );
        stroke.rasterize(&mut buf);
        assert_eq!(buf.get(10, 5), Color::BLACK);
        assert_eq!(buf.get(10, 0), Color::WHITE);
    }
}
