use cell_raster::{Image, RenderPlan, Viewport};
use serde::Serialize;
use std::fmt;

/// Render plan of one image, as printed by `termimg plan`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanReport {
    pub file: String,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub columns: u32,
    pub rows: u32,
    /// `None` when the geometry is degenerate and nothing would be drawn
    pub plan: Option<PlanCells>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanCells {
    pub fit_width: u32,
    pub fit_height: u32,
    pub x_margin: u32,
    pub y_margin: u32,
}

impl From<RenderPlan> for PlanCells {
    fn from(plan: RenderPlan) -> Self {
        Self {
            fit_width: plan.fit_width,
            fit_height: plan.fit_height,
            x_margin: plan.x_margin,
            y_margin: plan.y_margin,
        }
    }
}

impl PlanReport {
    pub fn new(file: impl Into<String>, image: &Image, viewport: Viewport) -> Self {
        Self {
            file: file.into(),
            width: image.width(),
            height: image.height(),
            channels: image.channels().count() as u8,
            columns: viewport.columns,
            rows: viewport.rows,
            plan: RenderPlan::compute(image.width(), image.height(), viewport).map(PlanCells::from),
        }
    }
}

impl fmt::Display for PlanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {}x{} ({} channel{})",
            self.file,
            self.width,
            self.height,
            self.channels,
            if self.channels == 1 { "" } else { "s" }
        )?;
        writeln!(f, "  viewport: {}x{}", self.columns, self.rows)?;
        match &self.plan {
            Some(p) => {
                writeln!(f, "  fit:      {}x{}", p.fit_width, p.fit_height)?;
                write!(f, "  margins:  x={} y={}", p.x_margin, p.y_margin)
            }
            None => write!(f, "  nothing to draw"),
        }
    }
}
