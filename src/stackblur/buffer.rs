use crate::error::Error;
use image::RgbaImage;

/// Pack four 8-bit channels into a `0xAARRGGBB` pixel word.
#[inline]
pub const fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Unpack a `0xAARRGGBB` pixel word into `[a, r, g, b]`.
#[inline]
pub const fn unpack_argb(pixel: u32) -> [u8; 4] {
    [
        (pixel >> 24) as u8,
        (pixel >> 16) as u8,
        (pixel >> 8) as u8,
        pixel as u8,
    ]
}

/// A row-major array of packed 32-bit ARGB pixels.
///
/// Each pixel is a `0xAARRGGBB` word. The buffer is the shared mutable
/// resource of a blur call: the caller owns it, and blurring overwrites its
/// pixels in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u32>,
}

impl PixelBuffer {
    /// Creates a zeroed (fully transparent black) buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    /// Wraps existing pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] if `data.len() != width * height`.
    pub fn from_vec(width: u32, height: u32, data: Vec<u32>) -> Result<Self, Error> {
        if data.len() != width as usize * height as usize {
            return Err(Error::InvalidLength {
                width,
                height,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The raw pixel words, row-major.
    pub fn pixels(&self) -> &[u32] {
        &self.data
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.data
    }

    /// Reads the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        assert!(x < self.width && y < self.height, "pixel ({x},{y}) out of bounds");
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Writes the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, argb: u32) {
        assert!(x < self.width && y < self.height, "pixel ({x},{y}) out of bounds");
        self.data[y as usize * self.width as usize + x as usize] = argb;
    }

    /// Overwrites this buffer's pixels with `other`'s.
    ///
    /// Dimensions must already have been checked to match.
    pub(crate) fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.dimensions(), other.dimensions());
        self.data.copy_from_slice(&other.data);
    }

    /// Repacks into the `image` crate's RGBA byte layout.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut bytes = Vec::with_capacity(self.data.len() * 4);
        for &pixel in &self.data {
            let [a, r, g, b] = unpack_argb(pixel);
            bytes.extend_from_slice(&[r, g, b, a]);
        }
        RgbaImage::from_vec(self.width, self.height, bytes)
            .expect("pixel count matches dimensions")
    }
}

impl From<&RgbaImage> for PixelBuffer {
    fn from(image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let data = image
            .pixels()
            .map(|p| pack_argb(p[3], p[0], p[1], p[2]))
            .collect();
        Self {
            width,
            height,
            data,
        }
    }
}
