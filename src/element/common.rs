use egui::{Pos2, Rect};

use crate::raster::{Color, PixelBuffer};

/// Calculate distance from a point to a line segment (useful for stroke hit testing)
pub(crate) fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}

/// Calculate the bounding box for a set of points
pub(crate) fn calculate_bounds(points: &[Pos2], padding: f32) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::from_min_max(
        Pos2::new(min_x - padding, min_y - padding),
        Pos2::new(max_x + padding, max_y + padding),
    )
}

/// Source-over blend of `src` onto the opaque pixel at `(x, y)`.
///
/// The canvas background is opaque, so the destination alpha stays 255.
/// A fully opaque source degenerates to a plain write.
pub(crate) fn blend_pixel(target: &mut PixelBuffer, x: usize, y: usize, src: Color) {
    if src.a == 255 {
        target.set(x, y, src);
        return;
    }
    if src.a == 0 {
        return;
    }
    let dst = target.get(x, y);
    let sa = src.a as u16;
    let ia = 255 - sa;
    target.set(
        x,
        y,
        Color::opaque(
            ((src.r as u16 * sa + dst.r as u16 * ia) / 255) as u8,
            ((src.g as u16 * sa + dst.g as u16 * ia) / 255) as u8,
            ((src.b as u16 * sa + dst.b as u16 * ia) / 255) as u8,
        ),
    );
}

/// Stamps a hard-edged filled disc. Pixels outside the buffer are skipped.
pub(crate) fn stamp_disc(target: &mut PixelBuffer, center: Pos2, radius: f32, color: Color) {
    let radius = radius.max(0.5);
    let min_x = (center.x - radius).floor() as i32;
    let max_x = (center.x + radius).ceil() as i32;
    let min_y = (center.y - radius).floor() as i32;
    let max_y = (center.y + radius).ceil() as i32;
    let r2 = radius * radius;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            if !target.contains(x, y) {
                continue;
            }
            let dx = x as f32 + 0.5 - center.x;
            let dy = y as f32 + 0.5 - center.y;
            if dx * dx + dy * dy <= r2 {
                blend_pixel(target, x as usize, y as usize, color);
            }
        }
    }
}

/// Stamps discs along a segment, spaced closely enough to leave no gaps.
pub(crate) fn stamp_segment(
    target: &mut PixelBuffer,
    from: Pos2,
    to: Pos2,
    radius: f32,
    color: Color,
) {
    let length = (to - from).length();
    let spacing = (radius * 0.5).max(0.5);
    let steps = (length / spacing).ceil() as usize;

    if steps == 0 {
        stamp_disc(target, from, radius, color);
        return;
    }
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        stamp_disc(target, from + (to - from) * t, radius, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn distance_to_segment_endpoints_and_midpoint() {
        let a = pos2(0.0, 0.0);
        let b = pos2(10.0, 0.0);
        assert_eq!(distance_to_line_segment(pos2(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_line_segment(pos2(-4.0, 0.0), a, b), 4.0);
        // Degenerate segment falls back to point distance.
        assert_eq!(distance_to_line_segment(pos2(3.0, 4.0), a, a), 5.0);
    }

    #[test]
    fn stamp_disc_stays_in_bounds() {
        let mut buf = PixelBuffer::new(4, 4, Color::WHITE);
        // Center far outside: nothing to do, and no panic.
        stamp_disc(&mut buf, pos2(-10.0, -10.0), 3.0, Color::BLACK);
        // Center on the corner: paints the corner but nothing out of range.
        stamp_disc(&mut buf, pos2(0.0, 0.0), 1.5, Color::BLACK);
        assert_eq!(buf.get(0, 0), Color::BLACK);
        assert_eq!(buf.get(3, 3), Color::WHITE);
    }

    #[test]
    fn opaque_blend_is_a_plain_write() {
        let mut buf = PixelBuffer::new(1, 1, Color::WHITE);
        blend_pixel(&mut buf, 0, 0, Color::BLACK);
        assert_eq!(buf.get(0, 0), Color::BLACK);
    }

    #[test]
    fn translucent_blend_mixes_toward_source() {
        let mut buf = PixelBuffer::new(1, 1, Color::WHITE);
        blend_pixel(&mut buf, 0, 0, Color::BLACK.with_alpha(128));
        let c = buf.get(0, 0);
        assert_eq!(c.a, 255);
        assert!(c.r < 255 && c.r > 100, "half-black over white: {c:?}");
    }
}
