//! Seams to the outside world: something that knows image sizes, and
//! something that binds an image for drawing. The core never decodes pixels.

use std::path::Path;

use crate::error::SliceError;
use crate::filter::FilterMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const fn new(width: u32, height: u32) -> Self { Self { width, height } }

    pub fn is_empty(&self) -> bool { self.width == 0 || self.height == 0 }
}

/// Supplies pixel dimensions for an image file.
pub trait ImageSource {
    fn dimensions(&self, path: &Path) -> Result<ImageSize, SliceError>;
}

/// Fixed-size source, handy when dimensions are already known.
#[derive(Debug, Clone, Copy)]
pub struct FixedImageSource(pub ImageSize);

impl ImageSource for FixedImageSource {
    fn dimensions(&self, _path: &Path) -> Result<ImageSize, SliceError> { Ok(self.0) }
}

/// Renderer-side hook for binding an image before drawing its frames.
pub trait TextureBinder {
    fn bind(&self, image_file: &str, filter: FilterMode);
}
