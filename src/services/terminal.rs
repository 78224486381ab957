//! Terminal canvases: where quantized cells end up.
//!
//! [`ScreenCanvas`] draws with absolute cursor positioning on the alternate
//! screen. [`StreamCanvas`] writes a plain character stream with newlines and
//! space padding, so output survives pipes and scrollback.
//!
//! Both paint a space with the background set to the cell's palette index.

use cell_raster::Viewport;
use crossterm::{
    cursor, event, execute, queue,
    style::{self, Color},
    terminal,
};
use std::io::{self, Write};

use crate::error::ViewerError;

/// Colours a terminal must advertise before images are drawn
pub const REQUIRED_COLORS: u16 = 256;

/// Viewport used when stream output is not attached to a terminal
pub const FALLBACK_VIEWPORT: Viewport = Viewport::new(80, 24);

/// Drawing surface for rasterized cells
pub trait Canvas {
    /// Current drawable area
    fn viewport(&self) -> io::Result<Viewport>;

    /// Prepare for a new image
    fn clear(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Paint one cell with palette entry `index`
    fn draw_cell(&mut self, row: u32, col: u32, index: u8) -> io::Result<()>;

    /// Push everything drawn since the last flush to the terminal
    fn flush(&mut self) -> io::Result<()>;

    /// Block until the user asks for the next image
    fn wait_for_key(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Fail unless the terminal advertises a 256-colour palette
pub fn ensure_color_support(available: u16) -> Result<(), ViewerError> {
    if available < REQUIRED_COLORS {
        return Err(ViewerError::ColorUnsupported(available));
    }
    Ok(())
}

/// Size of the attached terminal, if any
pub fn terminal_viewport() -> io::Result<Viewport> {
    let (columns, rows) = terminal::size()?;
    Ok(Viewport::new(u32::from(columns), u32::from(rows)))
}

fn to_u16(value: u32, what: &str) -> io::Result<u16> {
    u16::try_from(value).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{what} {value} exceeds terminal addressing range"),
        )
    })
}

/// Full-screen canvas on the alternate screen.
///
/// Entering switches the terminal to raw mode, the alternate screen and a
/// hidden cursor; dropping the canvas restores all three.
pub struct ScreenCanvas<W: Write> {
    out: W,
}

impl<W: Write> ScreenCanvas<W> {
    pub fn enter(mut out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(out, terminal::EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        tracing::debug!("Entered alternate screen");
        Ok(Self { out })
    }
}

impl<W: Write> Canvas for ScreenCanvas<W> {
    fn viewport(&self) -> io::Result<Viewport> {
        terminal_viewport()
    }

    fn clear(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            style::ResetColor,
            terminal::Clear(terminal::ClearType::All)
        )
    }

    fn draw_cell(&mut self, row: u32, col: u32, index: u8) -> io::Result<()> {
        let (col, row) = (to_u16(col, "column")?, to_u16(row, "row")?);
        queue!(
            self.out,
            cursor::MoveTo(col, row),
            style::SetBackgroundColor(Color::AnsiValue(index)),
            style::Print(' ')
        )
    }

    fn flush(&mut self) -> io::Result<()> {
        queue!(self.out, style::ResetColor)?;
        self.out.flush()
    }

    fn wait_for_key(&mut self) -> io::Result<()> {
        loop {
            if let event::Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Press {
                    return Ok(());
                }
            }
        }
    }
}

impl<W: Write> Drop for ScreenCanvas<W> {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            style::ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
        tracing::debug!("Left alternate screen");
    }
}

/// Character-stream canvas.
///
/// Cells must arrive in row-major order. Rows are separated by newlines and
/// gaps (margins) are padded with uncoloured spaces. Each image ends with a
/// colour reset and a newline.
pub struct StreamCanvas<W: Write> {
    out: W,
    viewport: Viewport,
    row: u32,
    col: u32,
    current: Option<u8>,
    dirty: bool,
}

impl<W: Write> StreamCanvas<W> {
    pub fn new(out: W, viewport: Viewport) -> Self {
        Self {
            out,
            viewport,
            row: 0,
            col: 0,
            current: None,
            dirty: false,
        }
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn reset_color(&mut self) -> io::Result<()> {
        if self.current.take().is_some() {
            queue!(self.out, style::ResetColor)?;
        }
        Ok(())
    }
}

impl<W: Write> Canvas for StreamCanvas<W> {
    fn viewport(&self) -> io::Result<Viewport> {
        Ok(self.viewport)
    }

    fn draw_cell(&mut self, row: u32, col: u32, index: u8) -> io::Result<()> {
        if row < self.row || (row == self.row && col < self.col) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "cell ({row}, {col}) arrived after ({}, {})",
                    self.row, self.col
                ),
            ));
        }

        if row > self.row {
            self.reset_color()?;
            for _ in self.row..row {
                queue!(self.out, style::Print('\n'))?;
            }
            self.row = row;
            self.col = 0;
        }

        if col > self.col {
            self.reset_color()?;
            let pad = " ".repeat((col - self.col) as usize);
            queue!(self.out, style::Print(pad))?;
        }

        if self.current != Some(index) {
            queue!(self.out, style::SetBackgroundColor(Color::AnsiValue(index)))?;
            self.current = Some(index);
        }
        queue!(self.out, style::Print(' '))?;

        self.col = col + 1;
        self.dirty = true;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.dirty {
            self.reset_color()?;
            queue!(self.out, style::Print('\n'))?;
        }
        self.row = 0;
        self.col = 0;
        self.dirty = false;
        self.out.flush()
    }
}
