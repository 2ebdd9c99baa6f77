use thiserror::Error;

use super::{Color, PixelBuffer};

/// What a click on the canvas does once it reaches the fill engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    /// Repaint the 4-connected region around the seed.
    Bucket,
    /// Sample the seed pixel without touching the buffer.
    Pick,
}

/// The pixel coordinate where a fill or pick begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed {
    pub x: i32,
    pub y: i32,
}

impl Seed {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Derives the seed from a floating-point click position by truncation
    /// toward zero.
    pub fn from_click(x: f32, y: f32) -> Self {
        Self {
            x: x as i32,
            y: y as i32,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FillError {
    /// The click landed fractionally outside the canvas. Rejected before any
    /// pixel access; the caller should ignore the click.
    #[error("seed ({x}, {y}) is outside the {width}x{height} buffer")]
    SeedOutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
}

/// Flood-fills `buffer` from `seed` with `fill_color`, or in [`FillMode::Pick`]
/// just samples the seed pixel.
///
/// Bucket mode repaints exactly the maximal 4-connected region of pixels whose
/// color equals the seed pixel's color; no other pixel changes. The pre-fill
/// seed color is returned in both modes.
///
/// The traversal uses an explicit heap-allocated work stack rather than
/// recursion: the worst case (a uniform buffer) keeps on the order of
/// `width * height` pending coordinates live, which would overflow any call
/// stack on a full-size canvas. Neighbors are pushed unconditionally; bounds
/// and color are re-checked when a coordinate is popped, which is also what
/// stops re-visits, since a repainted pixel no longer equals the target color.
pub fn flood_fill(
    buffer: &mut PixelBuffer,
    seed: Seed,
    fill_color: Color,
    mode: FillMode,
) -> Result<Color, FillError> {
    if !buffer.contains(seed.x, seed.y) {
        return Err(FillError::SeedOutOfBounds {
            x: seed.x,
            y: seed.y,
            width: buffer.width(),
            height: buffer.height(),
        });
    }

    let target = buffer.get(seed.x as usize, seed.y as usize);

    if mode == FillMode::Pick {
        return Ok(target);
    }

    // A region already in the fill color is a no-op, but the sampled color is
    // still reported. Without this check every repainted pixel would keep
    // matching the target and the loop would never drain.
    if target == fill_color {
        return Ok(target);
    }

    let mut stack: Vec<(i32, i32)> = vec![(seed.x, seed.y)];

    while let Some((x, y)) = stack.pop() {
        if !buffer.contains(x, y) {
            continue;
        }
        if buffer.get(x as usize, y as usize) != target {
            continue;
        }

        buffer.set(x as usize, y as usize, fill_color);

        stack.push((x + 1, y));
        stack.push((x - 1, y));
        stack.push((x, y + 1));
        stack.push((x, y - 1));
    }

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(width: usize, height: usize, color: Color) -> PixelBuffer {
        PixelBuffer::new(width, height, color)
    }

    #[test]
    fn fills_uniform_buffer_completely() {
        let mut buf = uniform(4, 4, Color::WHITE);
        let red = Color::opaque(255, 0, 0);
        let target = flood_fill(&mut buf, Seed::new(0, 0), red, FillMode::Bucket).unwrap();
        assert_eq!(target, Color::WHITE);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(buf.get(x, y), red);
            }
        }
    }

    #[test]
    fn no_op_fill_reports_target_and_leaves_bytes_untouched() {
        let mut buf = uniform(4, 4, Color::WHITE);
        let before = buf.bytes().to_vec();
        let target = flood_fill(&mut buf, Seed::new(2, 2), Color::WHITE, FillMode::Bucket).unwrap();
        assert_eq!(target, Color::WHITE);
        assert_eq!(buf.bytes(), &before[..]);
    }

    #[test]
    fn pick_never_mutates() {
        let mut buf = uniform(3, 3, Color::CYAN);
        let before = buf.bytes().to_vec();
        let c1 = flood_fill(&mut buf, Seed::new(1, 1), Color::BLACK, FillMode::Pick).unwrap();
        let c2 = flood_fill(&mut buf, Seed::new(1, 1), Color::BLACK, FillMode::Pick).unwrap();
        assert_eq!(c1, Color::CYAN);
        assert_eq!(c1, c2);
        assert_eq!(buf.bytes(), &before[..]);
    }

    #[test]
    fn seed_out_of_bounds_is_rejected_before_any_access() {
        let mut buf = uniform(4, 4, Color::WHITE);
        let before = buf.bytes().to_vec();
        for seed in [
            Seed::new(5, 0),
            Seed::new(0, 5),
            Seed::new(-1, 0),
            Seed::new(0, -1),
            Seed::new(4, 4),
        ] {
            let err = flood_fill(&mut buf, seed, Color::BLACK, FillMode::Bucket).unwrap_err();
            assert!(matches!(err, FillError::SeedOutOfBounds { .. }));
        }
        assert_eq!(buf.bytes(), &before[..]);
    }

    #[test]
    fn diagonal_neighbors_are_not_connected() {
        // Checkerboard: the fill must not leak across diagonal contacts.
        let mut buf = uniform(2, 2, Color::WHITE);
        buf.set(1, 0, Color::BLACK);
        buf.set(0, 1, Color::BLACK);
        let red = Color::opaque(255, 0, 0);
        flood_fill(&mut buf, Seed::new(0, 0), red, FillMode::Bucket).unwrap();
        assert_eq!(buf.get(0, 0), red);
        assert_eq!(buf.get(1, 1), Color::WHITE);
        assert_eq!(buf.get(1, 0), Color::BLACK);
        assert_eq!(buf.get(0, 1), Color::BLACK);
    }

    #[test]
    fn corner_seeds_complete_within_bounds() {
        for seed in [Seed::new(0, 0), Seed::new(7, 5)] {
            let mut buf = uniform(8, 6, Color::WHITE);
            flood_fill(&mut buf, seed, Color::BLACK, FillMode::Bucket).unwrap();
            assert_eq!(buf.get(seed.x as usize, seed.y as usize), Color::BLACK);
        }
    }

    #[test]
    fn truncates_click_toward_zero() {
        assert_eq!(Seed::from_click(3.9, 0.2), Seed::new(3, 0));
        assert_eq!(Seed::from_click(-0.4, 2.0), Seed::new(0, 2));
    }
}
