//! Aspect-fit scaling and per-cell sampling.
//!
//! [`RenderPlan::compute`] decides how many cells the image covers and where
//! it sits inside the viewport; [`Cells`] walks that area row by row and
//! yields one quantized [`Cell`] per position.

use crate::image::Image;
use crate::quantize::Quantizer;

/// Height-to-width ratio assumed for a terminal character cell.
pub const CELL_ASPECT: f32 = 2.0;

/// Terminal drawing area in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub columns: u32,
    pub rows: u32,
}

impl Viewport {
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// True when no cell can be drawn.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }

    /// True when `(row, col)` lies inside the viewport.
    #[inline]
    pub fn contains(&self, row: u32, col: u32) -> bool {
        row < self.rows && col < self.columns
    }
}

/// Target size and centering offsets of an image, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderPlan {
    pub fit_width: u32,
    pub fit_height: u32,
    pub x_margin: u32,
    pub y_margin: u32,
}

impl RenderPlan {
    /// Fit a `width` x `height` image into `viewport`.
    ///
    /// The longer side (after correcting for [`CELL_ASPECT`]) fills the
    /// viewport and the other shrinks proportionally. Returns `None` when
    /// either input has a zero dimension or the fitted area is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use cell_raster::{RenderPlan, Viewport};
    ///
    /// let plan = RenderPlan::compute(2, 2, Viewport::new(4, 2)).unwrap();
    /// assert_eq!((plan.fit_width, plan.fit_height), (4, 2));
    ///
    /// assert!(RenderPlan::compute(2, 0, Viewport::new(4, 2)).is_none());
    /// ```
    pub fn compute(width: u32, height: u32, viewport: Viewport) -> Option<Self> {
        if width == 0 || height == 0 || viewport.is_empty() {
            return None;
        }

        let columns = viewport.columns as f32;
        let rows = viewport.rows as f32;
        let image_aspect = width as f32 / height as f32;
        let term_aspect = (columns / rows) / CELL_ASPECT;

        let (fit_width, fit_height) = if term_aspect > image_aspect {
            // viewport is relatively wider than the image
            let scale = rows / height as f32;
            (((width as f32 * scale) as u32).saturating_mul(2), viewport.rows)
        } else {
            let scale = columns / width as f32;
            (viewport.columns, (height as f32 * scale) as u32 / 2)
        };

        let fit_width = fit_width.min(viewport.columns);
        let fit_height = fit_height.min(viewport.rows);
        if fit_width == 0 || fit_height == 0 {
            return None;
        }

        Some(Self {
            fit_width,
            fit_height,
            x_margin: margin(fit_width, viewport.columns),
            y_margin: margin(fit_height, viewport.rows),
        })
    }

    /// Number of cells the plan covers.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.fit_width as usize * self.fit_height as usize
    }
}

fn margin(fit: u32, available: u32) -> u32 {
    if fit < available {
        (available - fit - 1) / 2
    } else {
        0
    }
}

/// Nearest-neighbour source coordinate for destination `dest` of `fit`.
///
/// Clamped so float rounding on the last row/column never samples past the
/// edge of the image.
#[inline]
fn source_coord(dest: u32, fit: u32, source_len: u32) -> u32 {
    let mapped = ((dest as f32 / fit as f32) * source_len as f32) as u32;
    mapped.min(source_len - 1)
}

/// One draw instruction: paint `(row, col)` with palette entry `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    pub index: u8,
}

/// Lazy row-major iterator over the cells of one image.
///
/// Created with [`Cells::new`]; yields nothing for degenerate geometry.
pub struct Cells<'a> {
    image: &'a Image,
    quantizer: &'a Quantizer,
    plan: Option<RenderPlan>,
    x: u32,
    y: u32,
    src_y: u32,
}

impl<'a> Cells<'a> {
    pub fn new(image: &'a Image, viewport: Viewport, quantizer: &'a Quantizer) -> Self {
        let plan = RenderPlan::compute(image.width(), image.height(), viewport);
        let src_y = match plan {
            Some(p) => source_coord(0, p.fit_height, image.height()),
            None => 0,
        };
        Self {
            image,
            quantizer,
            plan,
            x: 0,
            y: 0,
            src_y,
        }
    }

    /// The plan in use, or `None` if nothing will be drawn.
    #[inline]
    pub fn plan(&self) -> Option<RenderPlan> {
        self.plan
    }

    fn remaining(&self) -> usize {
        match self.plan {
            Some(p) if self.y < p.fit_height => {
                p.cell_count() - (self.y as usize * p.fit_width as usize + self.x as usize)
            }
            _ => 0,
        }
    }
}

impl Iterator for Cells<'_> {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        let plan = self.plan?;
        if self.y >= plan.fit_height {
            return None;
        }

        let src_x = source_coord(self.x, plan.fit_width, self.image.width());
        let color = self.image.pixel(src_x, self.src_y);
        let cell = Cell {
            row: self.y + plan.y_margin,
            col: self.x + plan.x_margin,
            index: self.quantizer.quantize(color),
        };

        self.x += 1;
        if self.x == plan.fit_width {
            self.x = 0;
            self.y += 1;
            if self.y < plan.fit_height {
                self.src_y = source_coord(self.y, plan.fit_height, self.image.height());
            }
        }

        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for Cells<'_> {}

/// Rasterize `image` into `viewport`, handing every cell to `emit`.
///
/// Cells arrive in row-major order. Returns the plan that was drawn, or
/// `None` (after emitting nothing) when the geometry is degenerate.
pub fn render<F>(
    image: &Image,
    viewport: Viewport,
    quantizer: &Quantizer,
    mut emit: F,
) -> Option<RenderPlan>
where
    F: FnMut(Cell),
{
    let cells = Cells::new(image, viewport, quantizer);
    let plan = cells.plan();
    for cell in cells {
        emit(cell);
    }
    plan
}
