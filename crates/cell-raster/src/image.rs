//! Decoded image buffer.

use thiserror::Error;

use crate::color::Rgb;

/// Errors raised when an [`Image`] is constructed from inconsistent parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    /// Channel count other than 1 (grayscale) or 3 (RGB)
    #[error("unsupported channel count: {0} (expected 1 or 3)")]
    UnsupportedChannels(u8),

    /// Pixel buffer does not hold `width * height * channels` bytes
    #[error("pixel buffer holds {actual} bytes, expected {expected} for {width}x{height}x{channels}")]
    LengthMismatch {
        width: u32,
        height: u32,
        channels: u8,
        expected: usize,
        actual: usize,
    },
}

/// Sample layout of an [`Image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    /// One byte per pixel, replicated across R, G and B when sampled.
    Gray,
    /// Three bytes per pixel, no alpha.
    Rgb,
}

impl Channels {
    /// Bytes per pixel.
    #[inline]
    pub const fn count(self) -> usize {
        match self {
            Channels::Gray => 1,
            Channels::Rgb => 3,
        }
    }
}

impl TryFrom<u8> for Channels {
    type Error = ImageError;

    fn try_from(count: u8) -> Result<Self, Self::Error> {
        match count {
            1 => Ok(Channels::Gray),
            3 => Ok(Channels::Rgb),
            n => Err(ImageError::UnsupportedChannels(n)),
        }
    }
}

/// An immutable, row-major pixel buffer.
///
/// The buffer length always equals `width * height * channels`. A zero
/// width or height is allowed; such an image renders as nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    channels: Channels,
    pixels: Vec<u8>,
}

impl Image {
    /// Wrap a decoded pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::LengthMismatch`] if `pixels` is not exactly
    /// `width * height * channels` bytes long.
    ///
    /// # Example
    ///
    /// ```
    /// use cell_raster::{Channels, Image, Rgb};
    ///
    /// let image = Image::new(1, 1, Channels::Gray, vec![128]).unwrap();
    /// assert_eq!(image.pixel(0, 0), Rgb::gray(128));
    /// ```
    pub fn new(
        width: u32,
        height: u32,
        channels: Channels,
        pixels: Vec<u8>,
    ) -> Result<Self, ImageError> {
        let expected = width as usize * height as usize * channels.count();
        if pixels.len() != expected {
            return Err(ImageError::LengthMismatch {
                width,
                height,
                channels: channels.count() as u8,
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            pixels,
        })
    }

    /// Build an RGB image from a list of colours in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::LengthMismatch`] if `colors.len()` is not
    /// `width * height`.
    pub fn from_rgb(width: u32, height: u32, colors: &[Rgb]) -> Result<Self, ImageError> {
        let pixels = colors.iter().flat_map(|c| c.to_bytes()).collect();
        Self::new(width, height, Channels::Rgb, pixels)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Raw bytes, row-major.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// True when the image has no pixels to sample.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Colour of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} image",
            self.width,
            self.height
        );
        let stride = self.channels.count();
        let offset = (y as usize * self.width as usize + x as usize) * stride;
        match self.channels {
            Channels::Gray => Rgb::gray(self.pixels[offset]),
            Channels::Rgb => Rgb::new(
                self.pixels[offset],
                self.pixels[offset + 1],
                self.pixels[offset + 2],
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_length() {
        let result = Image::new(2, 2, Channels::Rgb, vec![0; 11]);
        assert_eq!(
            result,
            Err(ImageError::LengthMismatch {
                width: 2,
                height: 2,
                channels: 3,
                expected: 12,
                actual: 11,
            })
        );
    }

    #[test]
    fn test_zero_sized_image_is_allowed() {
        let image = Image::new(0, 5, Channels::Gray, Vec::new()).unwrap();
        assert!(image.is_empty());
    }

    #[test]
    fn test_channels_try_from() {
        assert_eq!(Channels::try_from(1), Ok(Channels::Gray));
        assert_eq!(Channels::try_from(3), Ok(Channels::Rgb));
        assert_eq!(
            Channels::try_from(4),
            Err(ImageError::UnsupportedChannels(4))
        );
    }

    #[test]
    fn test_pixel_rgb_offsets() {
        let image = Image::from_rgb(
            2,
            2,
            &[
                Rgb::new(1, 2, 3),
                Rgb::new(4, 5, 6),
                Rgb::new(7, 8, 9),
                Rgb::new(10, 11, 12),
            ],
        )
        .unwrap();
        assert_eq!(image.pixel(1, 0), Rgb::new(4, 5, 6));
        assert_eq!(image.pixel(0, 1), Rgb::new(7, 8, 9));
        assert_eq!(image.pixel(1, 1), Rgb::new(10, 11, 12));
    }

    #[test]
    fn test_pixel_gray_replicates() {
        let image = Image::new(3, 1, Channels::Gray, vec![10, 20, 30]).unwrap();
        assert_eq!(image.pixel(2, 0), Rgb::gray(30));
    }

    #[test]
    #[should_panic(expected = "outside 3x1 image")]
    fn test_pixel_out_of_bounds_panics() {
        let image = Image::new(3, 1, Channels::Gray, vec![10, 20, 30]).unwrap();
        let _ = image.pixel(3, 0);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ImageError::UnsupportedChannels(2).to_string(),
            "unsupported channel count: 2 (expected 1 or 3)"
        );
        let err = ImageError::LengthMismatch {
            width: 2,
            height: 1,
            channels: 1,
            expected: 2,
            actual: 5,
        };
        assert_eq!(
            err.to_string(),
            "pixel buffer holds 5 bytes, expected 2 for 2x1x1"
        );
    }
}
