//! cell-raster: draw decoded images onto a 256-colour terminal grid
//!
//! This library turns a decoded pixel buffer into one palette index per
//! terminal cell. It knows nothing about terminals or file formats; callers
//! hand it an [`Image`] and a [`Viewport`] and receive a stream of [`Cell`]s.
//!
//! # Quick Start
//!
//! ```
//! use cell_raster::{render, Channels, Image, Palette, Quantizer, Strategy, Viewport};
//!
//! let image = Image::new(2, 1, Channels::Rgb, vec![255, 0, 0, 0, 0, 255]).unwrap();
//! let quantizer = Quantizer::new(Strategy::Cube, Palette::XTERM);
//!
//! let mut drawn = Vec::new();
//! render(&image, Viewport::new(8, 4), &quantizer, |cell| drawn.push(cell));
//!
//! assert!(!drawn.is_empty());
//! ```
//!
//! # Pipeline
//!
//! ```text
//! Image (width x height x channels)
//!     |
//!     v
//! RenderPlan::compute     (aspect fit with 2:1 cell correction, margins)
//!     |
//!     v
//! Cells iterator          (row-major, nearest-neighbour source sample)
//!     |
//!     +---> Quantizer     (RGB -> palette index)
//!     |
//!     v
//! Cell { row, col, index }  -> caller's draw primitive
//! ```
//!
//! ## Cell Aspect
//!
//! Terminal character cells are roughly twice as tall as they are wide. The
//! plan divides the viewport aspect by two before comparing it with the image
//! aspect, and doubles (or halves) the shrunk dimension accordingly. The
//! factor is fixed; images look the same as they did in earlier releases.
//!
//! ## Quantization
//!
//! Two strategies are available via [`Strategy`]:
//!
//! - **Cube**: each channel is bucketed into six levels independently and
//!   the result indexes the 6x6x6 colour cube. O(1), no table lookups.
//! - **Nearest**: squared RGB distance against the palette table, lowest
//!   index wins ties. Reaches the grayscale ramp, so neutral tones come out
//!   closer.

pub mod color;
pub mod image;
pub mod palette;
pub mod quantize;
pub mod raster;


pub use color::Rgb;
pub use image::{Channels, Image, ImageError};
pub use palette::Palette;
pub use quantize::{cube_index, Quantizer, Strategy};
pub use raster::{render, Cell, Cells, RenderPlan, Viewport, CELL_ASPECT};
