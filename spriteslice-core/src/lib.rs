pub mod area;
pub mod asset;
pub mod descriptor;
pub mod error;
pub mod export;
pub mod filter;
pub mod image;
pub mod slicing;
pub mod table;

pub use area::{FrameArea, PixelArea, TexelArea, BAD_FRAME};
pub use asset::{ConfigField, ImageAsset};
pub use error::SliceError;
pub use filter::FilterMode;
pub use image::{ImageSize, ImageSource, TextureBinder};
pub use table::{FrameReader, FrameTable};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
