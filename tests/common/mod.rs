//! Common test infrastructure for termimg integration tests.
//!
//! Each test file compiles its own copy of this module, so items may appear
//! unused from the perspective of a single test file even though they're
//! used elsewhere.

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod canvas;
pub mod fixtures;

pub use canvas::RecordingCanvas;
pub use fixtures::ImageDir;
