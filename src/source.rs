// src/source.rs
use std::path::PathBuf;

use anyhow::{Context, Result};
use image::DynamicImage;
use log::info;

/// Supplies the image an upload attempt will encode and send.
///
/// The app binary reads files; a camera or gallery front end plugs in here.
pub trait ImageSource {
    fn acquire(&mut self) -> Result<DynamicImage>;
}

/// Loads the image from a path on disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ImageSource for FileSource {
    fn acquire(&mut self) -> Result<DynamicImage> {
        let image = image::open(&self.path)
            .with_context(|| format!("failed to load image from {}", self.path.display()))?;
        info!(
            "loaded {}x{} image from {}",
            image.width(),
            image.height(),
            self.path.display()
        );
        Ok(image)
    }
}
