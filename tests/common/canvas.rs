//! In-memory canvas that records every call.

use cell_raster::Viewport;
use std::io;
use termimg::services::Canvas;

/// One recorded image: the cells drawn between a clear and a flush
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Frame {
    pub cells: Vec<(u32, u32, u8)>,
}

pub struct RecordingCanvas {
    pub viewport: Viewport,
    pub frames: Vec<Frame>,
    pub waits: usize,
    open: Option<Frame>,
}

impl RecordingCanvas {
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            viewport: Viewport::new(columns, rows),
            frames: Vec::new(),
            waits: 0,
            open: None,
        }
    }
}

impl Canvas for RecordingCanvas {
    fn viewport(&self) -> io::Result<Viewport> {
        Ok(self.viewport)
    }

    fn clear(&mut self) -> io::Result<()> {
        self.open = Some(Frame::default());
        Ok(())
    }

    fn draw_cell(&mut self, row: u32, col: u32, index: u8) -> io::Result<()> {
        self.open
            .get_or_insert_with(Frame::default)
            .cells
            .push((row, col, index));
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.frames.push(self.open.take().unwrap_or_default());
        Ok(())
    }

    fn wait_for_key(&mut self) -> io::Result<()> {
        self.waits += 1;
        Ok(())
    }
}
