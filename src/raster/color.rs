use egui::Color32;
use serde::{Deserialize, Serialize};

/// An ARGB color with 8-bit components.
///
/// Two colors are equal iff all four components match exactly. There is no
/// tolerance: an anti-aliased edge pixel is simply a different color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::from_argb(0, 0, 0, 0);
    pub const BLACK: Color = Color::opaque(0, 0, 0);
    pub const WHITE: Color = Color::opaque(255, 255, 255);
    pub const YELLOW: Color = Color::opaque(255, 255, 0);
    pub const CYAN: Color = Color::opaque(0, 255, 255);
    pub const MAGENTA: Color = Color::opaque(255, 0, 255);

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { a: 255, r, g, b }
    }

    /// Same color with a different alpha (used by the highlighter).
    pub const fn with_alpha(self, a: u8) -> Self {
        Self {
            a,
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }

    /// Reads a pixel stored in BGRA byte order.
    pub const fn from_bgra(bytes: [u8; 4]) -> Self {
        Self {
            b: bytes[0],
            g: bytes[1],
            r: bytes[2],
            a: bytes[3],
        }
    }

    /// The 4-byte BGRA representation used by [`PixelBuffer`](super::PixelBuffer).
    pub const fn to_bgra(self) -> [u8; 4] {
        [self.b, self.g, self.r, self.a]
    }

    /// The 4-byte RGBA representation used for display upload and PNG encode.
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl std::fmt::Debug for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.a, self.r, self.g, self.b)
    }
}

impl From<Color32> for Color {
    fn from(c: Color32) -> Self {
        Self::from_argb(c.a(), c.r(), c.g(), c.b())
    }
}

impl From<Color> for Color32 {
    fn from(c: Color) -> Self {
        Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
    }
}
