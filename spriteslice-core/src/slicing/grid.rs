//! Implicit grid slicing.

use glam::IVec2;

use crate::area::PixelArea;
use crate::image::ImageSize;

/// Upper bound on frames a grid may produce. Larger grids yield no frames.
pub const MAX_GRID_CELLS: u64 = 1 << 22;

/// Grid parameters. Counts of zero or less are derived from the image size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub row_order: bool,
    pub offset: IVec2,
    pub stride: IVec2,
    pub cell_size: IVec2,
    pub count: IVec2,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            row_order: true,
            offset: IVec2::ZERO,
            stride: IVec2::ZERO,
            cell_size: IVec2::ZERO,
            count: IVec2::ZERO,
        }
    }
}

impl GridLayout {
    /// Nothing configured: no cell size on either axis.
    pub fn is_unconfigured(&self) -> bool { self.cell_size == IVec2::ZERO }

    /// Effective cell counts for an image.
    pub fn resolved_counts(&self, image: ImageSize) -> (u32, u32) {
        let x = resolve_axis(self.count.x, image.width, self.offset.x, self.stride.x);
        let y = resolve_axis(self.count.y, image.height, self.offset.y, self.stride.y);
        (x, y)
    }

    /// Cells in frame order.
    pub fn cells(&self, image: ImageSize) -> Vec<PixelArea> {
        if self.is_unconfigured() {
            if image.is_empty() { return Vec::new(); }
            return vec![PixelArea::new(0, 0, image.width, image.height)];
        }

        let (count_x, count_y) = self.resolved_counts(image);
        let width = self.cell_size.x.max(0) as u32;
        let height = self.cell_size.y.max(0) as u32;
        let cell = |cx: u32, cy: u32| {
            let x = self.offset.x.saturating_add((cx as i32).saturating_mul(self.stride.x));
            let y = self.offset.y.saturating_add((cy as i32).saturating_mul(self.stride.y));
            PixelArea::new(x, y, width, height)
        };

        let total = count_x as u64 * count_y as u64;
        if total > MAX_GRID_CELLS {
            log::warn!("grid of {}x{} cells exceeds {} frames, producing none", count_x, count_y, MAX_GRID_CELLS);
            return Vec::new();
        }
        let mut cells = Vec::new();
        if cells.try_reserve(total as usize).is_err() {
            log::warn!("cannot allocate {} grid frames, producing none", total);
            return Vec::new();
        }
        if self.row_order {
            for cy in 0..count_y {
                for cx in 0..count_x { cells.push(cell(cx, cy)); }
            }
        } else {
            for cx in 0..count_x {
                for cy in 0..count_y { cells.push(cell(cx, cy)); }
            }
        }
        cells
    }
}

fn resolve_axis(count: i32, image_extent: u32, offset: i32, stride: i32) -> u32 {
    if count > 0 { return count as u32; }
    // Zero stride would divide by zero: degenerate single row/column.
    if stride == 0 { return 1; }
    let span = image_extent as i64 - offset as i64;
    floor_div(span, stride as i64).clamp(0, i32::MAX as i64) as u32
}

fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) { q - 1 } else { q }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(stride: i32, cell: i32) -> GridLayout {
        GridLayout {
            stride: IVec2::splat(stride),
            cell_size: IVec2::splat(cell),
            ..GridLayout::default()
        }
    }

    #[test]
    fn derived_counts_for_square_sheet() {
        let grid = layout(25, 25);
        let image = ImageSize::new(100, 100);
        assert_eq!(grid.resolved_counts(image), (4, 4));
        let cells = grid.cells(image);
        assert_eq!(cells.len(), 16);
        assert_eq!(cells[5].offset, IVec2::new(25, 25));
        assert_eq!(cells[5].width, 25);
    }

    #[test]
    fn row_order_and_column_order_cover_every_cell_once() {
        let mut grid = layout(10, 8);
        grid.count = IVec2::new(3, 2);
        let image = ImageSize::new(64, 64);

        let rows = grid.cells(image);
        assert_eq!(rows.len(), 6);
        for (i, c) in rows.iter().enumerate() {
            let (cx, cy) = (i as i32 % 3, i as i32 / 3);
            assert_eq!(c.offset, IVec2::new(cx * 10, cy * 10));
        }

        grid.row_order = false;
        let cols = grid.cells(image);
        assert_eq!(cols.len(), 6);
        for (i, c) in cols.iter().enumerate() {
            let (cx, cy) = (i as i32 / 2, i as i32 % 2);
            assert_eq!(c.offset, IVec2::new(cx * 10, cy * 10));
        }
        let mut a: Vec<_> = rows.iter().map(|c| (c.offset.x, c.offset.y)).collect();
        let mut b: Vec<_> = cols.iter().map(|c| (c.offset.x, c.offset.y)).collect();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn offset_reduces_derived_count() {
        let mut grid = layout(16, 16);
        grid.offset = IVec2::new(8, 40);
        assert_eq!(grid.resolved_counts(ImageSize::new(64, 64)), (3, 1));
    }

    #[test]
    fn zero_stride_collapses_axis() {
        let mut grid = layout(0, 16);
        grid.stride.y = 16;
        assert_eq!(grid.resolved_counts(ImageSize::new(64, 64)), (1, 4));
    }

    #[test]
    fn offset_past_image_clamps_to_zero() {
        let mut grid = layout(16, 16);
        grid.offset = IVec2::new(100, 0);
        assert_eq!(grid.resolved_counts(ImageSize::new(64, 64)), (0, 4));
        assert!(grid.cells(ImageSize::new(64, 64)).is_empty());
    }

    #[test]
    fn unconfigured_grid_is_whole_image() {
        let grid = GridLayout::default();
        let cells = grid.cells(ImageSize::new(40, 30));
        assert_eq!(cells, vec![PixelArea::new(0, 0, 40, 30)]);
        assert!(grid.cells(ImageSize::default()).is_empty());
    }

    #[test]
    fn oversized_grid_yields_no_cells() {
        let mut grid = layout(1, 1);
        grid.count = IVec2::new(i32::MAX, 0);
        let image = ImageSize::new(64, 64);
        assert_eq!(grid.resolved_counts(image), (i32::MAX as u32, 64));
        assert!(grid.cells(image).is_empty());

        grid.count = IVec2::new(i32::MAX, 1);
        assert!(grid.cells(ImageSize::new(4, 1)).is_empty());
    }

    #[test]
    fn derived_counts_stay_within_i32() {
        let mut grid = layout(1, 1);
        grid.offset = IVec2::new(i32::MIN, 0);
        let image = ImageSize::new(u32::MAX, 1);
        assert_eq!(grid.resolved_counts(image), (i32::MAX as u32, 1));
        assert!(grid.cells(image).is_empty());
    }

    #[test]
    fn floor_division_rounds_down() {
        assert_eq!(floor_div(7, 2), 3);
        assert_eq!(floor_div(-7, 2), -4);
        assert_eq!(floor_div(7, -2), -4);
    }
}
