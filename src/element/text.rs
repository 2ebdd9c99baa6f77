use egui::{Pos2, Rect, Vec2};
use uuid::Uuid;

use super::common;
use super::Element;
use crate::raster::{Color, PixelBuffer};

/// Nominal glyph grid of the built-in font.
const GLYPH_WIDTH: usize = 5;
const GLYPH_HEIGHT: usize = 7;
/// Horizontal advance in glyph-grid columns (one column of spacing).
const GLYPH_ADVANCE: usize = GLYPH_WIDTH + 1;

/// A committed text box, drawn with a simple 5x7 bitmap font scaled to the
/// requested pixel size.
#[derive(Clone, Debug)]
pub struct Text {
    id: Uuid,
    content: String,
    anchor: Pos2,
    size: f32,
    color: Color,
}

impl Text {
    pub fn new(content: String, anchor: Pos2, size: f32, color: Color) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            anchor,
            size,
            color,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn anchor(&self) -> Pos2 {
        self.anchor
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Integer scale factor from the 7-row glyph grid to `size` pixels.
    fn scale(&self) -> usize {
        ((self.size / GLYPH_HEIGHT as f32).round() as usize).max(1)
    }

    fn extent(&self) -> Vec2 {
        let scale = self.scale();
        Vec2::new(
            (self.content.chars().count() * GLYPH_ADVANCE * scale) as f32,
            (GLYPH_HEIGHT * scale) as f32,
        )
    }
}

impl Element for Text {
    fn id(&self) -> Uuid {
        self.id
    }

    fn kind(&self) -> &'static str {
        "text"
    }

    fn rect(&self) -> Rect {
        Rect::from_min_size(self.anchor, self.extent())
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        self.rect().contains(pos)
    }

    fn translate(&mut self, delta: Vec2) {
        self.anchor += delta;
    }

    fn rasterize(&self, target: &mut PixelBuffer) {
        let scale = self.scale();
        let origin_x = self.anchor.x as i32;
        let origin_y = self.anchor.y as i32;

        for (index, ch) in self.content.chars().enumerate() {
            let glyph_x = origin_x + (index * GLYPH_ADVANCE * scale) as i32;
            for (row, bits) in glyph(ch).iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if (bits >> (GLYPH_WIDTH - 1 - col)) & 1 == 0 {
                        continue;
                    }
                    // Each font cell becomes a scale x scale block.
                    for sy in 0..scale {
                        for sx in 0..scale {
                            let x = glyph_x + (col * scale + sx) as i32;
                            let y = origin_y + (row * scale + sy) as i32;
                            if target.contains(x, y) {
                                common::blend_pixel(target, x as usize, y as usize, self.color);
                            }
                        }
                    }
                }
            }
        }
    }
}

/// 5x7 pixel pattern for a character, one row per byte, MSB-first in the low
/// five bits. Unknown characters render as a filled box.
fn glyph(ch: char) -> [u8; GLYPH_HEIGHT] {
    match ch.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01110],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        ',' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00110, 0b00100, 0b01000],
        ':' => [0b00000, 0b00100, 0b00000, 0b00000, 0b00000, 0b00100, 0b00000],
        ';' => [0b00000, 0b00100, 0b00000, 0b00000, 0b00100, 0b00100, 0b01000],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '?' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100],
        '\'' => [0b00100, 0b00100, 0b01000, 0b00000, 0b00000, 0b00000, 0b00000],
        '"' => [0b01010, 0b01010, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
        '+' => [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '/' => [0b00001, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b10000],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        ' ' => [0b00000; GLYPH_HEIGHT],
        _ => [0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn extent_grows_with_content_and_size() {
        let short = Text::new("HI".into(), pos2(0.0, 0.0), 18.0, Color::BLACK);
        let long = Text::new("HIHI".into(), pos2(0.0, 0.0), 18.0, Color::BLACK);
        assert!(long.rect().width() > short.rect().width());
        assert_eq!(short.rect().height(), long.rect().height());

        let big = Text::new("HI".into(), pos2(0.0, 0.0), 36.0, Color::BLACK);
        assert!(big.rect().height() > short.rect().height());
    }

    #[test]
    fn rasterize_puts_ink_inside_the_rect_only() {
        let mut buf = PixelBuffer::new(120, 40, Color::WHITE);
        let text = Text::new("A".into(), pos2(4.0, 4.0), 18.0, Color::BLACK);
        text.rasterize(&mut buf);

        let rect = text.rect();
        let mut inked = 0;
        for y in 0..40 {
            for x in 0..120 {
                if buf.get(x, y) == Color::BLACK {
                    inked += 1;
                    assert!(rect.contains(pos2(x as f32 + 0.5, y as f32 + 0.5)));
                }
            }
        }
        assert!(inked > 0);
    }

    #[test]
    fn rasterize_clips_at_canvas_edges() {
        let mut buf = PixelBuffer::new(10, 10, Color::WHITE);
        let text = Text::new("WWW".into(), pos2(6.0, 6.0), 18.0, Color::BLACK);
        // Most of the glyphs land outside; no panic, and edge pixels are sane.
        text.rasterize(&mut buf);
    }

    #[test]
    fn space_has_no_ink() {
        let mut buf = PixelBuffer::new(30, 30, Color::WHITE);
        Text::new(" ".into(), pos2(2.0, 2.0), 18.0, Color::BLACK).rasterize(&mut buf);
        for y in 0..30 {
            for x in 0..30 {
                assert_eq!(buf.get(x, y), Color::WHITE);
            }
        }
    }
}
