use cell_raster::{Cells, Image, Quantizer, RenderPlan};
use std::path::{Path, PathBuf};

use crate::error::{DecodeError, ViewerError};
use crate::services::decoder;
use crate::services::terminal::Canvas;

/// Per-run viewer behaviour
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewerOptions {
    /// Pause for a key press after each image
    pub wait_for_key: bool,
}

/// Outcome of a multi-file run
#[derive(Debug, Default)]
pub struct ViewReport {
    /// Files that were drawn (including ones with nothing to draw)
    pub rendered: Vec<PathBuf>,
    /// Files whose image or viewport had no drawable area
    pub empty: Vec<PathBuf>,
    /// Files that could not be read or decoded
    pub failed: Vec<(PathBuf, DecodeError)>,
}

impl ViewReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Draws decoded images onto a [`Canvas`], one at a time
pub struct Viewer {
    quantizer: Quantizer,
    options: ViewerOptions,
}

impl Viewer {
    pub fn new(quantizer: Quantizer, options: ViewerOptions) -> Self {
        Self { quantizer, options }
    }

    /// Draw one image, sized to the canvas' current viewport.
    ///
    /// Returns the plan that was drawn, or `None` when the image or viewport
    /// has no drawable area.
    pub fn show<C: Canvas>(
        &self,
        image: &Image,
        canvas: &mut C,
    ) -> Result<Option<RenderPlan>, ViewerError> {
        let viewport = canvas.viewport()?;
        canvas.clear()?;

        let cells = Cells::new(image, viewport, &self.quantizer);
        let plan = cells.plan();
        for cell in cells {
            canvas.draw_cell(cell.row, cell.col, cell.index)?;
        }
        canvas.flush()?;

        match plan {
            Some(plan) => tracing::debug!(
                columns = viewport.columns,
                rows = viewport.rows,
                fit_width = plan.fit_width,
                fit_height = plan.fit_height,
                "Rendered image"
            ),
            None => tracing::debug!(
                width = image.width(),
                height = image.height(),
                columns = viewport.columns,
                rows = viewport.rows,
                "Nothing to draw"
            ),
        }

        Ok(plan)
    }

    /// Load, decode and draw each file in turn.
    ///
    /// A file that cannot be read or decoded is recorded in the report and
    /// the run moves on to the next file. Canvas errors end the run.
    ///
    /// Per-file problems are only logged at debug level: a screen canvas owns
    /// the terminal while this runs, so callers report them afterwards.
    pub fn show_all<C, P>(&self, paths: &[P], canvas: &mut C) -> Result<ViewReport, ViewerError>
    where
        C: Canvas,
        P: AsRef<Path>,
    {
        let mut report = ViewReport::default();

        for path in paths {
            let path = path.as_ref();
            let image = match decoder::load_file(path) {
                Ok(image) => image,
                Err(e) => {
                    tracing::debug!(path = %path.display(), %e, "Skipping image");
                    report.failed.push((path.to_path_buf(), e));
                    continue;
                }
            };

            if self.show(&image, canvas)?.is_none() {
                report.empty.push(path.to_path_buf());
            }
            report.rendered.push(path.to_path_buf());

            if self.options.wait_for_key {
                canvas.wait_for_key()?;
            }
        }

        tracing::info!(
            rendered = report.rendered.len(),
            empty = report.empty.len(),
            failed = report.failed.len(),
            "Finished"
        );

        Ok(report)
    }
}
