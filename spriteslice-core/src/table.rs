//! The frame table and its read-side handle.
//!
//! A [`FrameTable`] is immutable once built. The owning asset publishes a new
//! table by swapping the `Arc` behind a [`FrameReader`], so a reader holding a
//! snapshot keeps a consistent table for as long as it likes.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::area::{FrameArea, PixelArea, TexelScale, TexelUv, BAD_FRAME};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameTable {
    frames: Vec<FrameArea>,
    /// Parallel to `frames` in named mode, empty otherwise.
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl FrameTable {
    pub fn empty() -> Self { Self::default() }

    pub fn from_cells(cells: &[PixelArea], scale: TexelScale) -> Self {
        Self {
            frames: cells.iter().map(|c| FrameArea::new(*c, scale)).collect(),
            names: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn from_named_cells<'a, I>(cells: I, scale: TexelScale) -> Self
    where
        I: IntoIterator<Item = (&'a str, PixelArea)>,
    {
        let mut table = Self::default();
        for (name, cell) in cells {
            table.index.insert(name.to_string(), table.frames.len());
            table.names.push(name.to_string());
            table.frames.push(FrameArea::new(cell, scale));
        }
        table
    }

    pub fn len(&self) -> usize { self.frames.len() }
    pub fn is_empty(&self) -> bool { self.frames.is_empty() }
    pub fn is_named(&self) -> bool { !self.names.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, FrameArea> { self.frames.iter() }

    /// Strict positional access.
    pub fn get(&self, index: usize) -> Option<&FrameArea> { self.frames.get(index) }

    /// Positional lookup that never fails: the index is clamped into range and
    /// an empty table yields [`BAD_FRAME`].
    pub fn by_index(&self, index: i64) -> &FrameArea {
        let Some(last) = self.frames.len().checked_sub(1) else { return &BAD_FRAME; };
        let clamped = index.clamp(0, last as i64) as usize;
        &self.frames[clamped]
    }

    /// Named lookup; misses yield [`BAD_FRAME`].
    pub fn by_name(&self, name: &str) -> &FrameArea {
        self.frame_index(name).map(|i| &self.frames[i]).unwrap_or(&BAD_FRAME)
    }

    pub fn contains_frame(&self, name: &str) -> bool { self.index.contains_key(name) }

    pub fn frame_index(&self, name: &str) -> Option<usize> { self.index.get(name).copied() }

    pub fn frame_name(&self, index: usize) -> Option<&str> { self.names.get(index).map(String::as_str) }

    pub fn texel_uvs(&self) -> Vec<TexelUv> { self.frames.iter().map(|f| f.texel().to_uv()).collect() }

    /// Texel rectangles packed for a GPU buffer, four `f32` per frame.
    pub fn texel_bytes(&self) -> Vec<u8> { bytemuck::cast_slice(&self.texel_uvs()).to_vec() }
}

impl<'a> IntoIterator for &'a FrameTable {
    type Item = &'a FrameArea;
    type IntoIter = std::slice::Iter<'a, FrameArea>;
    fn into_iter(self) -> Self::IntoIter { self.frames.iter() }
}

/// Cloneable read handle onto an asset's current frame table.
#[derive(Debug, Clone, Default)]
pub struct FrameReader {
    current: Arc<RwLock<Arc<FrameTable>>>,
}

impl FrameReader {
    pub fn snapshot(&self) -> Arc<FrameTable> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    pub(crate) fn publish(&self, table: FrameTable) {
        let table = Arc::new(table);
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = table;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale() -> TexelScale { TexelScale::for_image(100, 100) }

    #[test]
    fn by_index_clamps() {
        let cells: Vec<_> = (0..4).map(|i| PixelArea::new(i * 10, 0, 10, 10)).collect();
        let table = FrameTable::from_cells(&cells, scale());
        assert_eq!(table.by_index(-5).pixel().offset_x(), 0);
        assert_eq!(table.by_index(2).pixel().offset_x(), 20);
        assert_eq!(table.by_index(99).pixel().offset_x(), 30);
        assert_eq!(table.by_index(i64::MAX).pixel().offset_x(), 30);
    }

    #[test]
    fn empty_table_yields_bad_frame() {
        let table = FrameTable::empty();
        for i in [i64::MIN, -1, 0, 1, i64::MAX] {
            assert!(table.by_index(i).is_bad_frame());
        }
        assert!(table.by_name("anything").is_bad_frame());
    }

    #[test]
    fn names_and_positions_agree() {
        let table = FrameTable::from_named_cells(
            [("b", PixelArea::new(0, 0, 5, 5)), ("a", PixelArea::new(5, 0, 5, 5))],
            scale(),
        );
        assert!(table.is_named());
        assert_eq!(table.frame_index("b"), Some(0));
        assert_eq!(table.frame_name(1), Some("a"));
        assert_eq!(table.by_name("a").pixel().offset_x(), 5);
        assert!(table.by_name("c").is_bad_frame());
        assert!(!table.contains_frame("c"));
    }

    #[test]
    fn unnamed_table_has_no_names() {
        let table = FrameTable::from_cells(&[PixelArea::new(0, 0, 1, 1)], scale());
        assert!(!table.contains_frame("cell0"));
        assert!(table.by_name("cell0").is_bad_frame());
        assert_eq!(table.frame_name(0), None);
    }

    #[test]
    fn texel_bytes_pack_four_floats_per_frame() {
        let table = FrameTable::from_cells(&[PixelArea::new(50, 0, 50, 100)], scale());
        let bytes = table.texel_bytes();
        assert_eq!(bytes.len(), 16);
        let floats: Vec<f32> = bytemuck::allocation::pod_collect_to_vec(&bytes);
        assert_eq!(floats, vec![0.5, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn snapshot_survives_publish() {
        let reader = FrameReader::default();
        reader.publish(FrameTable::from_cells(&[PixelArea::new(0, 0, 1, 1)], scale()));
        let old = reader.snapshot();
        reader.publish(FrameTable::empty());
        assert_eq!(old.len(), 1);
        assert!(reader.snapshot().is_empty());
    }
}
