use egui::{Pos2, Rect, Vec2};
use uuid::Uuid;

use super::common;
use super::Element;
use crate::raster::{Color, PixelBuffer};

/// A bitmap placed on the canvas: a loaded picture, or the full-canvas layer
/// produced by a bucket fill.
///
/// Pixel data is RGBA, `natural_width * natural_height * 4` bytes. The
/// element can display at a different size than its pixel data (loaded images
/// are scaled to fit the canvas); the blit samples nearest-neighbor.
#[derive(Clone)]
pub struct Image {
    id: Uuid,
    data: Vec<u8>,
    natural_width: usize,
    natural_height: usize,
    position: Pos2,
    display_size: Vec2,
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("id", &self.id)
            .field("natural_width", &self.natural_width)
            .field("natural_height", &self.natural_height)
            .field("position", &self.position)
            .field("display_size", &self.display_size)
            .finish()
    }
}

impl Image {
    pub fn new(
        data: Vec<u8>,
        natural_width: usize,
        natural_height: usize,
        position: Pos2,
        display_size: Vec2,
    ) -> Self {
        debug_assert_eq!(data.len(), natural_width * natural_height * 4);
        Self {
            id: Uuid::new_v4(),
            data,
            natural_width,
            natural_height,
            position,
            display_size,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn natural_size(&self) -> (usize, usize) {
        (self.natural_width, self.natural_height)
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn display_size(&self) -> Vec2 {
        self.display_size
    }

    fn sample(&self, sx: usize, sy: usize) -> Color {
        let index = (sy * self.natural_width + sx) * 4;
        Color::from_argb(
            self.data[index + 3],
            self.data[index],
            self.data[index + 1],
            self.data[index + 2],
        )
    }
}

impl Element for Image {
    fn id(&self) -> Uuid {
        self.id
    }

    fn kind(&self) -> &'static str {
        "image"
    }

    fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.display_size)
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        self.rect().contains(pos)
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    fn rasterize(&self, target: &mut PixelBuffer) {
        let out_w = self.display_size.x.round() as i64;
        let out_h = self.display_size.y.round() as i64;
        if out_w <= 0 || out_h <= 0 || self.natural_width == 0 || self.natural_height == 0 {
            return;
        }

        let origin_x = self.position.x.floor() as i64;
        let origin_y = self.position.y.floor() as i64;

        for dy in 0..out_h {
            let y = origin_y + dy;
            if y < 0 || y >= target.height() as i64 {
                continue;
            }
            let sy = (dy as usize * self.natural_height) / out_h as usize;
            for dx in 0..out_w {
                let x = origin_x + dx;
                if x < 0 || x >= target.width() as i64 {
                    continue;
                }
                let sx = (dx as usize * self.natural_width) / out_w as usize;
                common::blend_pixel(target, x as usize, y as usize, self.sample(sx, sy));
            }
        }
    }
}
