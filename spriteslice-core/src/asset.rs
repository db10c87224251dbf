//! `ImageAsset`: configuration for one sprite sheet plus the frame table
//! derived from it.
//!
//! Every setter and cell mutation rebuilds the table from scratch and
//! publishes it through the asset's [`FrameReader`]. Mutation needs `&mut
//! self`; readers on other threads hold a `FrameReader` clone instead.

use std::path::Path;
use std::sync::Arc;

use crate::area::{FrameArea, PixelArea};
use crate::error::SliceError;
use crate::filter::FilterMode;
use crate::image::{ImageSize, ImageSource, TextureBinder};
use crate::slicing::{self, ExplicitCells, GridLayout, NamedCells, SliceMode};
use crate::table::{FrameReader, FrameTable};

/// Persistable configuration fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    ImageFile,
    Force16Bit,
    FilterMode,
    ExplicitMode,
    NameMode,
    CellRowOrder,
    CellOffsetX,
    CellOffsetY,
    CellStrideX,
    CellStrideY,
    CellCountX,
    CellCountY,
    CellWidth,
    CellHeight,
}

#[derive(Debug, Default)]
pub struct ImageAsset {
    image_file: String,
    force_16bit: bool,
    filter_mode: FilterMode,
    grid: GridLayout,
    mode: SliceMode,
    image_size: Option<ImageSize>,
    frames: FrameReader,
}

impl ImageAsset {
    pub fn new() -> Self { Self::default() }

    // ------------------------------------------------------------------
    // Image binding
    // ------------------------------------------------------------------

    pub fn image_file(&self) -> &str { &self.image_file }

    /// Changing the file unbinds the current image until the next load.
    pub fn set_image_file(&mut self, image_file: impl Into<String>) {
        let image_file = image_file.into();
        if image_file != self.image_file {
            self.image_size = None;
            self.image_file = image_file;
        }
        self.recompute();
    }

    pub fn image_size(&self) -> Option<ImageSize> { self.image_size }
    pub fn image_width(&self) -> u32 { self.image_size.map_or(0, |s| s.width) }
    pub fn image_height(&self) -> u32 { self.image_size.map_or(0, |s| s.height) }

    pub fn bind_image(&mut self, size: ImageSize) {
        log::info!("bound image '{}' ({}x{})", self.image_file, size.width, size.height);
        self.image_size = Some(size);
        self.recompute();
    }

    pub fn unbind_image(&mut self) {
        self.image_size = None;
        self.recompute();
    }

    /// Probe the image file through `source` and bind the result. `base_dir`
    /// resolves relative image paths.
    pub fn load_image(&mut self, source: &dyn ImageSource, base_dir: Option<&Path>) -> Result<ImageSize, SliceError> {
        if self.image_file.is_empty() {
            return Err(SliceError::NoImageFile);
        }
        let path = match base_dir {
            Some(dir) => dir.join(&self.image_file),
            None => Path::new(&self.image_file).to_path_buf(),
        };
        let size = source.dimensions(&path)?;
        self.bind_image(size);
        Ok(size)
    }

    /// Re-probe and rebuild, e.g. after the image changed on disk or the
    /// texture was recreated.
    pub fn refresh(&mut self, source: &dyn ImageSource, base_dir: Option<&Path>) -> Result<ImageSize, SliceError> {
        self.load_image(source, base_dir)
    }

    pub fn is_asset_valid(&self) -> bool { self.image_size.is_some_and(|s| !s.is_empty()) }

    pub fn bind_image_texture(&self, binder: &dyn TextureBinder) {
        binder.bind(&self.image_file, self.filter_mode);
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    pub fn force_16bit(&self) -> bool { self.force_16bit }

    pub fn set_force_16bit(&mut self, force_16bit: bool) {
        self.force_16bit = force_16bit;
        self.recompute();
    }

    pub fn filter_mode(&self) -> FilterMode { self.filter_mode }

    pub fn set_filter_mode(&mut self, filter_mode: FilterMode) -> bool {
        if !filter_mode.is_valid() {
            log::warn!("rejected invalid filter mode for '{}'", self.image_file);
            return false;
        }
        self.filter_mode = filter_mode;
        self.recompute();
        true
    }

    pub fn mode(&self) -> &SliceMode { &self.mode }
    pub fn grid(&self) -> &GridLayout { &self.grid }

    pub fn explicit_mode(&self) -> bool { matches!(self.mode, SliceMode::Explicit(_)) }

    /// Entering explicit mode starts from an empty cell list. Name mode
    /// suppresses explicit mode, so the request is ignored while it is set.
    /// Leaving explicit mode returns to the grid.
    pub fn set_explicit_mode(&mut self, explicit_mode: bool) {
        match (explicit_mode, &self.mode) {
            (true, SliceMode::Named(_)) => {
                log::warn!("set_explicit_mode: '{}' is in name mode, ignoring", self.image_file);
                return;
            }
            (true, SliceMode::Explicit(_)) | (false, SliceMode::Grid | SliceMode::Named(_)) => {}
            (true, SliceMode::Grid) => self.mode = SliceMode::Explicit(ExplicitCells::new()),
            (false, SliceMode::Explicit(_)) => self.mode = SliceMode::Grid,
        }
        self.recompute();
    }

    pub fn name_mode(&self) -> bool { matches!(self.mode, SliceMode::Named(_)) }

    /// Entering named mode suppresses explicit mode.
    pub fn set_name_mode(&mut self, name_mode: bool) {
        match (name_mode, &self.mode) {
            (true, SliceMode::Named(_)) | (false, SliceMode::Grid | SliceMode::Explicit(_)) => {}
            (true, _) => self.mode = SliceMode::Named(NamedCells::new()),
            (false, SliceMode::Named(_)) => self.mode = SliceMode::Grid,
        }
        self.recompute();
    }

    pub fn cell_row_order(&self) -> bool { self.grid.row_order }
    pub fn set_cell_row_order(&mut self, row_order: bool) { self.update_grid(|g| g.row_order = row_order); }

    pub fn cell_offset_x(&self) -> i32 { self.grid.offset.x }
    pub fn set_cell_offset_x(&mut self, v: i32) { self.update_grid(|g| g.offset.x = v); }
    pub fn cell_offset_y(&self) -> i32 { self.grid.offset.y }
    pub fn set_cell_offset_y(&mut self, v: i32) { self.update_grid(|g| g.offset.y = v); }

    pub fn cell_stride_x(&self) -> i32 { self.grid.stride.x }
    pub fn set_cell_stride_x(&mut self, v: i32) { self.update_grid(|g| g.stride.x = v); }
    pub fn cell_stride_y(&self) -> i32 { self.grid.stride.y }
    pub fn set_cell_stride_y(&mut self, v: i32) { self.update_grid(|g| g.stride.y = v); }

    pub fn cell_count_x(&self) -> i32 { self.grid.count.x }
    pub fn set_cell_count_x(&mut self, v: i32) { self.update_grid(|g| g.count.x = v); }
    pub fn cell_count_y(&self) -> i32 { self.grid.count.y }
    pub fn set_cell_count_y(&mut self, v: i32) { self.update_grid(|g| g.count.y = v); }

    pub fn cell_width(&self) -> i32 { self.grid.cell_size.x }
    pub fn set_cell_width(&mut self, v: i32) { self.update_grid(|g| g.cell_size.x = v); }
    pub fn cell_height(&self) -> i32 { self.grid.cell_size.y }
    pub fn set_cell_height(&mut self, v: i32) { self.update_grid(|g| g.cell_size.y = v); }

    fn update_grid(&mut self, f: impl FnOnce(&mut GridLayout)) {
        f(&mut self.grid);
        self.recompute();
    }

    /// Whether a field differs from its default and so belongs in a saved
    /// descriptor. Grid fields only count in grid mode.
    pub fn should_persist(&self, field: ConfigField) -> bool {
        let grid = matches!(self.mode, SliceMode::Grid);
        match field {
            ConfigField::ImageFile => !self.image_file.is_empty(),
            ConfigField::Force16Bit => self.force_16bit,
            ConfigField::FilterMode => self.filter_mode != FilterMode::Bilinear,
            ConfigField::ExplicitMode => self.explicit_mode(),
            ConfigField::NameMode => self.name_mode(),
            ConfigField::CellRowOrder => grid && !self.grid.row_order,
            ConfigField::CellOffsetX => grid && self.grid.offset.x != 0,
            ConfigField::CellOffsetY => grid && self.grid.offset.y != 0,
            ConfigField::CellStrideX => grid && self.grid.stride.x != 0,
            ConfigField::CellStrideY => grid && self.grid.stride.y != 0,
            ConfigField::CellCountX => grid && self.grid.count.x != 0,
            ConfigField::CellCountY => grid && self.grid.count.y != 0,
            ConfigField::CellWidth => grid && self.grid.cell_size.x != 0,
            ConfigField::CellHeight => grid && self.grid.cell_size.y != 0,
        }
    }

    // ------------------------------------------------------------------
    // Frames
    // ------------------------------------------------------------------

    pub fn reader(&self) -> FrameReader { self.frames.clone() }
    pub fn frames(&self) -> Arc<FrameTable> { self.frames.snapshot() }
    pub fn frame_count(&self) -> usize { self.frames.snapshot().len() }

    /// Clamped positional lookup, see [`FrameTable::by_index`].
    pub fn frame_area(&self, index: i64) -> FrameArea { *self.frames.snapshot().by_index(index) }

    /// Named lookup, see [`FrameTable::by_name`].
    pub fn named_frame_area(&self, name: &str) -> FrameArea { *self.frames.snapshot().by_name(name) }

    pub fn contains_frame(&self, name: &str) -> bool { self.frames.snapshot().contains_frame(name) }

    pub fn frame_index(&self, name: &str) -> Option<usize> { self.frames.snapshot().frame_index(name) }

    // ------------------------------------------------------------------
    // Explicit cells
    // ------------------------------------------------------------------

    pub fn explicit_cell_count(&self) -> usize {
        match &self.mode {
            SliceMode::Explicit(cells) => cells.len(),
            _ => 0,
        }
    }

    pub fn clear_explicit_cells(&mut self) -> bool {
        self.edit_explicit("clear_explicit_cells", |cells| cells.clear())
    }

    pub fn add_explicit_cell(&mut self, offset_x: i32, offset_y: i32, width: i32, height: i32) -> bool {
        let Some(cell) = validated_cell("add_explicit_cell", offset_x, offset_y, width, height) else { return false; };
        self.edit_explicit("add_explicit_cell", |cells| cells.append(cell))
    }

    pub fn insert_explicit_cell(&mut self, index: usize, offset_x: i32, offset_y: i32, width: i32, height: i32) -> bool {
        let Some(cell) = validated_cell("insert_explicit_cell", offset_x, offset_y, width, height) else { return false; };
        self.edit_explicit("insert_explicit_cell", |cells| cells.insert(index, cell))
    }

    pub fn remove_explicit_cell(&mut self, index: usize) -> bool {
        self.edit_explicit("remove_explicit_cell", |cells| cells.remove_at(index))
    }

    pub fn set_explicit_cell(&mut self, index: usize, offset_x: i32, offset_y: i32, width: i32, height: i32) -> bool {
        let Some(cell) = validated_cell("set_explicit_cell", offset_x, offset_y, width, height) else { return false; };
        self.edit_explicit("set_explicit_cell", |cells| cells.replace_at(index, cell))
    }

    pub fn explicit_cells(&self) -> Option<&ExplicitCells> {
        match &self.mode {
            SliceMode::Explicit(cells) => Some(cells),
            _ => None,
        }
    }

    pub(crate) fn edit_explicit(&mut self, op: &str, f: impl FnOnce(&mut ExplicitCells) -> bool) -> bool {
        let SliceMode::Explicit(cells) = &mut self.mode else {
            log::warn!("{}: '{}' is not in explicit mode", op, self.image_file);
            return false;
        };
        if !f(cells) {
            log::warn!("{}: cell index out of range", op);
            return false;
        }
        self.recompute();
        true
    }

    // ------------------------------------------------------------------
    // Named cells
    // ------------------------------------------------------------------

    pub fn named_cell_count(&self) -> usize {
        match &self.mode {
            SliceMode::Named(cells) => cells.len(),
            _ => 0,
        }
    }

    pub fn clear_named_cells(&mut self) -> bool {
        self.edit_named("clear_named_cells", |cells| cells.clear())
    }

    /// Add a cell under a generated unique name.
    pub fn add_named_cell(&mut self, offset_x: i32, offset_y: i32, width: i32, height: i32) -> bool {
        let Some(cell) = validated_cell("add_named_cell", offset_x, offset_y, width, height) else { return false; };
        self.edit_named("add_named_cell", |cells| {
            cells.append(cell);
            true
        })
    }

    pub fn insert_named_cell(&mut self, name: &str, offset_x: i32, offset_y: i32, width: i32, height: i32) -> bool {
        let Some(cell) = validated_cell("insert_named_cell", offset_x, offset_y, width, height) else { return false; };
        self.edit_named("insert_named_cell", |cells| cells.insert(name, cell))
    }

    pub fn remove_named_cell(&mut self, name: &str) -> bool {
        self.edit_named("remove_named_cell", |cells| cells.remove(name))
    }

    pub fn set_named_cell(&mut self, name: &str, offset_x: i32, offset_y: i32, width: i32, height: i32) -> bool {
        let Some(cell) = validated_cell("set_named_cell", offset_x, offset_y, width, height) else { return false; };
        self.edit_named("set_named_cell", |cells| cells.replace(name, cell))
    }

    pub fn named_cells(&self) -> Option<&NamedCells> {
        match &self.mode {
            SliceMode::Named(cells) => Some(cells),
            _ => None,
        }
    }

    pub(crate) fn edit_named(&mut self, op: &str, f: impl FnOnce(&mut NamedCells) -> bool) -> bool {
        let SliceMode::Named(cells) = &mut self.mode else {
            log::warn!("{}: '{}' is not in name mode", op, self.image_file);
            return false;
        };
        if !f(cells) {
            log::warn!("{}: cell name missing or already taken", op);
            return false;
        }
        self.recompute();
        true
    }

    // ------------------------------------------------------------------

    /// Copy configuration, cells and the bound image size onto `other`.
    pub fn copy_to(&self, other: &mut ImageAsset) {
        other.image_file = self.image_file.clone();
        other.force_16bit = self.force_16bit;
        other.filter_mode = self.filter_mode;
        other.grid = self.grid;
        other.mode = self.mode.clone();
        other.image_size = self.image_size;
        other.recompute();
    }

    fn recompute(&mut self) {
        let table = match self.image_size {
            Some(size) => slicing::compute(&self.grid, &self.mode, size),
            None => FrameTable::empty(),
        };
        log::debug!("'{}': {} mode produced {} frames", self.image_file, self.mode.label(), table.len());
        self.frames.publish(table);
    }
}

fn validated_cell(op: &str, offset_x: i32, offset_y: i32, width: i32, height: i32) -> Option<PixelArea> {
    let cell = PixelArea::try_new(offset_x, offset_y, width, height);
    if cell.is_none() {
        log::warn!("{}: invalid cell dimensions {}x{}", op, width, height);
    }
    cell
}
