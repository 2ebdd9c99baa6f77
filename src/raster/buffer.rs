use thiserror::Error;

use super::Color;

/// Size of one packed pixel: blue, green, red, alpha.
pub const BYTES_PER_PIXEL: usize = 4;

/// Errors raised when constructing a buffer from untrusted bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    #[error("buffer length {actual} does not match height * stride = {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

/// A packed BGRA pixel buffer, row-major, with `stride = width * 4` and no
/// row padding.
///
/// The byte length is always exactly `height * stride`; every accessor keeps
/// reads and writes inside that range. Pixels are addressed by `(x, y)` with
/// `0 <= x < width` and `0 <= y < height`.
#[derive(Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    bytes: Vec<u8>,
}

impl PixelBuffer {
    /// Allocates a buffer with every pixel set to `background`.
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        let mut bytes = vec![0; width * height * BYTES_PER_PIXEL];
        for chunk in bytes.chunks_exact_mut(BYTES_PER_PIXEL) {
            chunk.copy_from_slice(&background.to_bgra());
        }
        Self {
            width,
            height,
            bytes,
        }
    }

    /// Wraps existing BGRA bytes, validating the length invariant.
    pub fn from_bytes(width: usize, height: usize, bytes: Vec<u8>) -> Result<Self, RasterError> {
        let expected = width * height * BYTES_PER_PIXEL;
        if bytes.len() != expected {
            return Err(RasterError::BufferSizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            width,
            height,
            bytes,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width * BYTES_PER_PIXEL
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether a signed coordinate pair addresses a pixel in this buffer.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Reads the pixel at `(x, y)`.
    ///
    /// Callers must pass in-bounds coordinates; the flood-fill loop checks
    /// bounds before every access.
    pub fn get(&self, x: usize, y: usize) -> Color {
        debug_assert!(x < self.width && y < self.height);
        let index = y * self.stride() + BYTES_PER_PIXEL * x;
        Color::from_bgra([
            self.bytes[index],
            self.bytes[index + 1],
            self.bytes[index + 2],
            self.bytes[index + 3],
        ])
    }

    /// Writes the pixel at `(x, y)` in the same BGRA layout.
    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        debug_assert!(x < self.width && y < self.height);
        let index = y * self.stride() + BYTES_PER_PIXEL * x;
        self.bytes[index..index + BYTES_PER_PIXEL].copy_from_slice(&color.to_bgra());
    }

    /// The buffer re-packed as RGBA bytes, for texture upload and PNG encode.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.bytes.len());
        for chunk in self.bytes.chunks_exact(BYTES_PER_PIXEL) {
            out.extend_from_slice(&[chunk[2], chunk[1], chunk[0], chunk[3]]);
        }
        out
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills_background() {
        let buf = PixelBuffer::new(3, 2, Color::WHITE);
        assert_eq!(buf.bytes().len(), 3 * 2 * BYTES_PER_PIXEL);
        assert_eq!(buf.stride(), 12);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(buf.get(x, y), Color::WHITE);
            }
        }
    }

    #[test]
    fn set_writes_bgra_layout() {
        let mut buf = PixelBuffer::new(2, 2, Color::TRANSPARENT);
        let c = Color::from_argb(0xAA, 0xBB, 0xCC, 0xDD);
        buf.set(1, 1, c);
        // index = y * stride + 4 * x = 1 * 8 + 4 = 12
        assert_eq!(&buf.bytes()[12..16], &[0xDD, 0xCC, 0xBB, 0xAA]);
        assert_eq!(buf.get(1, 1), c);
    }

    #[test]
    fn from_bytes_validates_length() {
        let err = PixelBuffer::from_bytes(4, 4, vec![0; 63]).unwrap_err();
        assert_eq!(
            err,
            RasterError::BufferSizeMismatch {
                expected: 64,
                actual: 63
            }
        );
        assert!(PixelBuffer::from_bytes(4, 4, vec![0; 64]).is_ok());
    }

    #[test]
    fn contains_rejects_out_of_range() {
        let buf = PixelBuffer::new(4, 4, Color::WHITE);
        assert!(buf.contains(0, 0));
        assert!(buf.contains(3, 3));
        assert!(!buf.contains(-1, 0));
        assert!(!buf.contains(0, -1));
        assert!(!buf.contains(4, 0));
        assert!(!buf.contains(0, 4));
    }

    #[test]
    fn to_rgba_swaps_channels() {
        let mut buf = PixelBuffer::new(1, 1, Color::TRANSPARENT);
        buf.set(0, 0, Color::from_argb(1, 2, 3, 4));
        assert_eq!(buf.to_rgba(), vec![2, 3, 4, 1]);
    }
}
