use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SliceError {
    #[error("unknown texture filter mode: {0}")] UnknownFilterMode(String),
    #[error("no image file set")] NoImageFile,
    #[error("failed to read image dimensions from {path}: {reason}")]
    ImageProbe { path: PathBuf, reason: String },
}
