//! Image files written to a temporary directory.

use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};
use std::path::PathBuf;
use tempfile::TempDir;

/// Palette indices of the quadrant fixture under both quantizers
pub mod quadrant {
    pub const RED: u8 = 196;
    pub const GREEN: u8 = 46;
    pub const BLUE: u8 = 21;
    pub const WHITE: u8 = 231;
}

/// A temporary directory of encoded test images
pub struct ImageDir {
    dir: TempDir,
}

impl ImageDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// 2x2 PNG: red, green / blue, white
    pub fn quadrant_png(&self) -> PathBuf {
        let image = RgbImage::from_raw(
            2,
            2,
            vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255],
        )
        .expect("quadrant buffer");
        self.write("quadrant.png", DynamicImage::ImageRgb8(image), ImageFormat::Png)
    }

    /// Single-value grayscale PNG
    pub fn gray_png(&self, width: u32, height: u32, value: u8) -> PathBuf {
        let image = GrayImage::from_pixel(width, height, image::Luma([value]));
        self.write("gray.png", DynamicImage::ImageLuma8(image), ImageFormat::Png)
    }

    /// Solid-colour JPEG
    pub fn solid_jpeg(&self, width: u32, height: u32, rgb: [u8; 3]) -> PathBuf {
        let image = RgbImage::from_pixel(width, height, image::Rgb(rgb));
        self.write("solid.jpg", DynamicImage::ImageRgb8(image), ImageFormat::Jpeg)
    }

    /// A file that is not an image
    pub fn garbage(&self) -> PathBuf {
        let path = self.path("garbage.jpg");
        std::fs::write(&path, b"not a jpeg").expect("write garbage");
        path
    }

    fn write(&self, name: &str, image: DynamicImage, format: ImageFormat) -> PathBuf {
        let path = self.path(name);
        image
            .save_with_format(&path, format)
            .expect("write fixture image");
        path
    }
}
