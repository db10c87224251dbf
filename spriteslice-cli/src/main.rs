use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use spriteslice_core::export::AtlasMeta;
use spriteslice_core::image::FixedImageSource;
use spriteslice_core::{descriptor, FrameArea, ImageAsset, ImageSize, ImageSource, SliceError, VERSION};

#[derive(Parser, Debug)]
#[command(name = "spriteslice", version = VERSION, about = "Sprite sheet slicing tools")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct SheetArgs {
    /// Sheet descriptor (YAML)
    path: PathBuf,
    /// Override the image width instead of reading the image file
    #[arg(long, requires = "height")]
    width: Option<u32>,
    /// Override the image height instead of reading the image file
    #[arg(long, requires = "width")]
    height: Option<u32>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a sheet descriptor and list its frames
    Inspect {
        #[command(flatten)]
        sheet: SheetArgs,
    },
    /// Write frame metadata as JSON
    Export {
        #[command(flatten)]
        sheet: SheetArgs,
        #[arg(long, default_value = "frames.json")]
        out: PathBuf,
    },
    /// Look up a single frame by index or name
    Frame {
        #[command(flatten)]
        sheet: SheetArgs,
        #[arg(long, conflicts_with = "name")]
        index: Option<i64>,
        #[arg(long)]
        name: Option<String>,
    },
}

/// Reads dimensions from the image header without decoding pixels.
struct ImageHeaderSource;

impl ImageSource for ImageHeaderSource {
    fn dimensions(&self, path: &Path) -> Result<ImageSize, SliceError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| SliceError::ImageProbe {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(ImageSize::new(width, height))
    }
}

fn load_sheet(args: &SheetArgs) -> Result<ImageAsset> {
    let mut asset = descriptor::load_from_path(&args.path)?.into_asset()?;
    let base_dir = args.path.parent();
    match (args.width, args.height) {
        (Some(width), Some(height)) => {
            asset.load_image(&FixedImageSource(ImageSize::new(width, height)), base_dir)?;
        }
        _ => {
            asset
                .load_image(&ImageHeaderSource, base_dir)
                .with_context(|| format!("binding image for {}", args.path.display()))?;
        }
    }
    Ok(asset)
}

/// `[-]` marks a lookup that resolved to no table position.
fn frame_label(index: Option<usize>, name: Option<&str>) -> String {
    let slot = index.map(|i| i.to_string()).unwrap_or_else(|| "-".to_string());
    match name {
        Some(n) => format!("[{}] '{}'", slot, n),
        None => format!("[{}]", slot),
    }
}

fn print_frame(index: Option<usize>, name: Option<&str>, frame: &FrameArea) {
    let p = frame.pixel();
    let t = frame.texel();
    println!(
        "  {} px=({}, {}) {}x{}  uv=({:.4}, {:.4})-({:.4}, {:.4})",
        frame_label(index, name),
        p.offset_x(),
        p.offset_y(),
        p.width,
        p.height,
        t.lower.x,
        t.lower.y,
        t.upper.x,
        t.upper.y
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect { sheet } => {
            let asset = load_sheet(&sheet)?;
            let frames = asset.frames();
            println!("Loaded sheet: {}", asset.image_file());
            println!("  image: {}x{}", asset.image_width(), asset.image_height());
            println!("  filter: {}", asset.filter_mode());
            println!("  mode: {}", asset.mode().label());
            println!("  frames: {}", frames.len());
            for (i, frame) in frames.iter().enumerate() {
                print_frame(Some(i), frames.frame_name(i), frame);
            }
        }
        Command::Export { sheet, out } => {
            let asset = load_sheet(&sheet)?;
            let meta = AtlasMeta::from_asset(&asset);
            std::fs::write(&out, meta.to_json_pretty()?)
                .with_context(|| format!("writing {}", out.display()))?;
            log::info!("wrote {} frames to {}", meta.frames.len(), out.display());
        }
        Command::Frame { sheet, index, name } => {
            let asset = load_sheet(&sheet)?;
            let frames = asset.frames();
            match (index, name) {
                (_, Some(name)) => {
                    if !frames.contains_frame(&name) {
                        log::warn!("no frame named '{}', showing the bad frame", name);
                    }
                    print_frame(frames.frame_index(&name), Some(&name), frames.by_name(&name));
                }
                (index, None) => {
                    let requested = index.unwrap_or(0);
                    let frame = frames.by_index(requested);
                    if frames.is_empty() {
                        log::warn!("sheet has no frames, showing the bad frame");
                        print_frame(None, None, frame);
                    } else {
                        let shown = requested.clamp(0, frames.len() as i64 - 1) as usize;
                        if shown as i64 != requested {
                            log::warn!("frame {} out of range, clamped to {}", requested, shown);
                        }
                        print_frame(Some(shown), frames.frame_name(shown), frame);
                    }
                }
            }
        }
    }
    Ok(())
}
