//! RGB to palette index quantization.

use std::ops::RangeInclusive;

use crate::color::Rgb;
use crate::palette::{Palette, CUBE_START};

/// How a colour is mapped to a palette index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Bucket each channel into six levels and index the colour cube directly.
    ///
    /// `level = floor(channel * 6 / 256)`, `index = 16 + 36r + 6g + b`.
    /// Never reads the palette table and never produces a system colour or a
    /// grayscale ramp entry.
    #[default]
    Cube,

    /// Linear search for the smallest squared RGB distance.
    ///
    /// Index 0 is never a candidate. With `system_colors` set the scan covers
    /// 1..=255; otherwise it starts at the cube (16..=255) so that user-themed
    /// system colours are never selected.
    Nearest {
        /// Include palette entries 1-15 in the search.
        system_colors: bool,
    },
}

impl Strategy {
    /// Palette indices scanned by the nearest-neighbour search.
    pub fn search_range(self) -> RangeInclusive<u8> {
        match self {
            Strategy::Nearest {
                system_colors: true,
            } => 1..=255,
            _ => CUBE_START..=255,
        }
    }
}

/// Quantize one channel into a cube level (0..=5).
#[inline]
fn cube_level(channel: u8) -> u8 {
    ((u16::from(channel) * 6) >> 8).min(5) as u8
}

/// Map a colour onto the 6x6x6 cube without consulting any table.
///
/// # Example
///
/// ```
/// use cell_raster::{cube_index, Rgb};
///
/// assert_eq!(cube_index(Rgb::new(0, 0, 0)), 16);
/// assert_eq!(cube_index(Rgb::new(255, 255, 255)), 231);
/// ```
#[inline]
pub fn cube_index(color: Rgb) -> u8 {
    CUBE_START + 36 * cube_level(color.r) + 6 * cube_level(color.g) + cube_level(color.b)
}

/// Maps RGB colours to palette indices.
///
/// Holds its palette by value, so a quantizer can be built once and reused
/// for every image in a session without any shared state.
///
/// # Example
///
/// ```
/// use cell_raster::{Palette, Quantizer, Rgb, Strategy};
///
/// let quantizer = Quantizer::new(
///     Strategy::Nearest { system_colors: false },
///     Palette::XTERM,
/// );
/// assert_eq!(quantizer.quantize(Rgb::gray(128)), 244);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantizer {
    strategy: Strategy,
    palette: Palette,
}

impl Quantizer {
    pub fn new(strategy: Strategy, palette: Palette) -> Self {
        Self { strategy, palette }
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Palette index approximating `color`.
    #[inline]
    pub fn quantize(&self, color: Rgb) -> u8 {
        match self.strategy {
            Strategy::Cube => cube_index(color),
            Strategy::Nearest { .. } => {
                self.palette
                    .find_nearest(color, self.strategy.search_range())
                    .0
            }
        }
    }
}

impl Default for Quantizer {
    fn default() -> Self {
        Self::new(Strategy::default(), Palette::XTERM)
    }
}
