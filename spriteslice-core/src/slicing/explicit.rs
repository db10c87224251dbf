use crate::area::PixelArea;

/// Caller-maintained list of explicit cells, mirrored verbatim as frames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplicitCells {
    cells: Vec<PixelArea>,
}

impl ExplicitCells {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.cells.len() }
    pub fn is_empty(&self) -> bool { self.cells.is_empty() }
    pub fn as_slice(&self) -> &[PixelArea] { &self.cells }

    pub fn clear(&mut self) -> bool {
        self.cells.clear();
        true
    }

    pub fn append(&mut self, cell: PixelArea) -> bool {
        self.cells.push(cell);
        true
    }

    /// Insert before `index`; `index == len` appends.
    pub fn insert(&mut self, index: usize, cell: PixelArea) -> bool {
        if index > self.cells.len() { return false; }
        self.cells.insert(index, cell);
        true
    }

    pub fn remove_at(&mut self, index: usize) -> bool {
        if index >= self.cells.len() { return false; }
        self.cells.remove(index);
        true
    }

    pub fn replace_at(&mut self, index: usize, cell: PixelArea) -> bool {
        match self.cells.get_mut(index) {
            Some(slot) => { *slot = cell; true }
            None => false,
        }
    }
}

impl FromIterator<PixelArea> for ExplicitCells {
    fn from_iter<I: IntoIterator<Item = PixelArea>>(iter: I) -> Self {
        Self { cells: iter.into_iter().collect() }
    }
}
