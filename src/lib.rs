//! termimg - view images in a 256-colour terminal
//!
//! Decoding, terminal output, configuration and the multi-file viewer loop.
//! The rasterization itself lives in the `cell-raster` crate.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod services;
