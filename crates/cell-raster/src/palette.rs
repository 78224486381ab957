//! The fixed 256-colour terminal palette.
//!
//! Layout follows the xterm convention:
//!
//! | Range   | Contents                                         |
//! |---------|--------------------------------------------------|
//! | 0-15    | System colours (xterm defaults)                  |
//! | 16-231  | 6x6x6 cube, `16 + 36r + 6g + b`                  |
//! | 232-255 | 24-step grayscale ramp, `8 + 10i`                |
//!
//! The table is built at compile time and never mutated. Callers that want a
//! different table pass their own [`Palette`] to the quantizer.

use std::ops::RangeInclusive;

use crate::color::Rgb;

/// First index of the 6x6x6 colour cube.
pub const CUBE_START: u8 = 16;

/// First index of the grayscale ramp.
pub const GRAY_START: u8 = 232;

/// Channel intensities of the six cube levels.
pub const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

const SYSTEM_COLORS: [Rgb; 16] = [
    Rgb::new(0, 0, 0),
    Rgb::new(205, 0, 0),
    Rgb::new(0, 205, 0),
    Rgb::new(205, 205, 0),
    Rgb::new(0, 0, 238),
    Rgb::new(205, 0, 205),
    Rgb::new(0, 205, 205),
    Rgb::new(229, 229, 229),
    Rgb::new(127, 127, 127),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(92, 92, 255),
    Rgb::new(255, 0, 255),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 255, 255),
];

const fn build_xterm() -> [Rgb; 256] {
    let mut table = [Rgb::new(0, 0, 0); 256];

    let mut i = 0;
    while i < 16 {
        table[i] = SYSTEM_COLORS[i];
        i += 1;
    }

    let mut r = 0;
    while r < 6 {
        let mut g = 0;
        while g < 6 {
            let mut b = 0;
            while b < 6 {
                table[16 + 36 * r + 6 * g + b] =
                    Rgb::new(CUBE_LEVELS[r], CUBE_LEVELS[g], CUBE_LEVELS[b]);
                b += 1;
            }
            g += 1;
        }
        r += 1;
    }

    let mut step = 0;
    while step < 24 {
        let v = (8 + 10 * step) as u8;
        table[232 + step] = Rgb::gray(v);
        step += 1;
    }

    table
}

/// A 256-entry table of RGB colours indexed by terminal colour number.
///
/// # Example
///
/// ```
/// use cell_raster::{Palette, Rgb};
///
/// let palette = Palette::XTERM;
/// assert_eq!(palette.color(16), Rgb::new(0, 0, 0));
/// assert_eq!(palette.color(231), Rgb::new(255, 255, 255));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb; 256],
}

impl Palette {
    /// The standard xterm 256-colour palette.
    pub const XTERM: Palette = Palette {
        colors: build_xterm(),
    };

    /// Create a palette from an arbitrary table.
    pub const fn new(colors: [Rgb; 256]) -> Self {
        Self { colors }
    }

    /// Colour at the given index.
    #[inline]
    pub fn color(&self, index: u8) -> Rgb {
        self.colors[usize::from(index)]
    }

    /// All 256 entries in index order.
    #[inline]
    pub fn colors(&self) -> &[Rgb; 256] {
        &self.colors
    }

    /// Find the entry in `range` with the smallest squared RGB distance.
    ///
    /// Entries are scanned from low to high index and only a strictly
    /// smaller distance replaces the current best, so ties go to the lowest
    /// index. Returns `(index, squared_distance)`.
    ///
    /// # Example
    ///
    /// ```
    /// use cell_raster::{Palette, Rgb};
    ///
    /// let (idx, dist) = Palette::XTERM.find_nearest(Rgb::new(255, 0, 0), 16..=255);
    /// assert_eq!(idx, 196);
    /// assert_eq!(dist, 0);
    /// ```
    pub fn find_nearest(&self, color: Rgb, range: RangeInclusive<u8>) -> (u8, i32) {
        let mut best_idx = *range.start();
        let mut best_dist = i32::MAX;

        for idx in range {
            let dist = color.distance_squared(self.color(idx));
            if dist < best_dist {
                best_dist = dist;
                best_idx = idx;
            }
        }

        (best_idx, best_dist)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::XTERM
    }
}
