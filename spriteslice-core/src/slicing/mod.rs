//! Slicing strategies. Exactly one is active per asset, selected by [`SliceMode`].

pub mod explicit;
pub mod grid;
pub mod named;

pub use explicit::ExplicitCells;
pub use grid::GridLayout;
pub use named::{NamedCell, NamedCells};

use crate::area::TexelScale;
use crate::image::ImageSize;
use crate::table::FrameTable;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SliceMode {
    /// Implicit grid driven by the asset's [`GridLayout`].
    #[default]
    Grid,
    Explicit(ExplicitCells),
    Named(NamedCells),
}

impl SliceMode {
    pub fn label(&self) -> &'static str {
        match self {
            SliceMode::Grid => "grid",
            SliceMode::Explicit(_) => "explicit",
            SliceMode::Named(_) => "named",
        }
    }
}

/// Build the frame table for a mode against the current image.
pub fn compute(grid: &GridLayout, mode: &SliceMode, image: ImageSize) -> FrameTable {
    let scale = TexelScale::for_image(image.width, image.height);
    match mode {
        SliceMode::Grid => FrameTable::from_cells(&grid.cells(image), scale),
        SliceMode::Explicit(cells) => FrameTable::from_cells(cells.as_slice(), scale),
        SliceMode::Named(cells) => FrameTable::from_named_cells(
            cells.as_slice().iter().map(|c| (c.name.as_str(), c.area)),
            scale,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::PixelArea;
    use glam::IVec2;

    #[test]
    fn grid_mode_ignores_cell_lists() {
        let grid = GridLayout { stride: IVec2::splat(25), cell_size: IVec2::splat(25), ..Default::default() };
        let table = compute(&grid, &SliceMode::Grid, ImageSize::new(100, 100));
        assert_eq!(table.len(), 16);
        assert!(!table.is_named());
    }

    #[test]
    fn explicit_mode_mirrors_list() {
        let cells: ExplicitCells = [PixelArea::new(3, 4, 5, 6)].into_iter().collect();
        let table = compute(&GridLayout::default(), &SliceMode::Explicit(cells), ImageSize::new(10, 10));
        assert_eq!(table.len(), 1);
        assert_eq!(*table.by_index(0).pixel(), PixelArea::new(3, 4, 5, 6));
    }

    #[test]
    fn named_mode_carries_names() {
        let mut cells = NamedCells::new();
        cells.insert("head", PixelArea::new(0, 0, 32, 32));
        cells.insert("body", PixelArea::new(0, 32, 32, 64));
        let table = compute(&GridLayout::default(), &SliceMode::Named(cells), ImageSize::new(64, 128));
        assert_eq!(table.frame_index("body"), Some(1));
        assert_eq!(table.by_name("body").texel().lower.y, 0.25);
    }
}
