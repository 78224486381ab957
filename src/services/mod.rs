pub mod decoder;
pub mod terminal;
pub mod viewer;

pub use decoder::{decode, load_file};
pub use terminal::{Canvas, ScreenCanvas, StreamCanvas};
pub use viewer::{ViewReport, Viewer, ViewerOptions};
