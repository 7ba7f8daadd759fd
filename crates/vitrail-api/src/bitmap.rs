use core::fmt;

/// Pixel layout of a [`Bitmap`].
///
/// The embedded renderer produces exactly two layouts: single-channel alpha
/// for glyph/path coverage masks and 32-bit BGRA for everything else.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BitmapFormat {
    /// 8-bit single channel (coverage / alpha masks).
    A8,
    /// 32-bit BGRA, 8 bits per channel.
    Bgra8,
}

impl BitmapFormat {
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::A8 => 1,
            Self::Bgra8 => 4,
        }
    }
}

impl fmt::Display for BitmapFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A8 => f.write_str("A8"),
            Self::Bgra8 => f.write_str("BGRA8"),
        }
    }
}

/// CPU-side pixel data handed to the driver for texture upload.
///
/// Rows are tightly packed: `pixels.len()` must equal
/// `width * height * format.bytes_per_pixel()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub format: BitmapFormat,
    pub pixels: Vec<u8>,
}

impl Bitmap {
    /// Creates a bitmap from tightly packed pixel rows.
    ///
    /// # Panics
    ///
    /// Panics if `pixels.len()` does not match the dimensions; a mismatched
    /// upload would read out of bounds on the GPU side, so this is enforced
    /// at construction.
    pub fn new(width: u32, height: u32, format: BitmapFormat, pixels: Vec<u8>) -> Self {
        let expected = expected_len(width, height, format);
        assert_eq!(
            pixels.len(),
            expected,
            "bitmap pixel data is {} bytes, expected {} for {}x{} {}",
            pixels.len(),
            expected,
            width,
            height,
            format,
        );
        Self { width, height, format, pixels }
    }

    /// Creates a zero-filled bitmap of the given dimensions.
    pub fn zeroed(width: u32, height: u32, format: BitmapFormat) -> Self {
        Self {
            width,
            height,
            format,
            pixels: vec![0; expected_len(width, height, format)],
        }
    }
}

#[inline]
fn expected_len(width: u32, height: u32, format: BitmapFormat) -> usize {
    width as usize * height as usize * format.bytes_per_pixel()
}
