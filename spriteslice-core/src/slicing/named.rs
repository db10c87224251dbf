use std::collections::HashMap;

use crate::area::PixelArea;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedCell {
    pub name: String,
    pub area: PixelArea,
}

/// Uniquely named cells in insertion order.
///
/// The name index is derived from `cells` and rebuilt after every change.
#[derive(Debug, Clone, Default)]
pub struct NamedCells {
    cells: Vec<NamedCell>,
    index: HashMap<String, usize>,
}

impl PartialEq for NamedCells {
    fn eq(&self, other: &Self) -> bool { self.cells == other.cells }
}

impl Eq for NamedCells {}

impl NamedCells {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.cells.len() }
    pub fn is_empty(&self) -> bool { self.cells.is_empty() }
    pub fn as_slice(&self) -> &[NamedCell] { &self.cells }

    pub fn contains(&self, name: &str) -> bool { self.index.contains_key(name) }

    pub fn get(&self, name: &str) -> Option<&PixelArea> {
        self.index.get(name).map(|&i| &self.cells[i].area)
    }

    pub fn position(&self, name: &str) -> Option<usize> { self.index.get(name).copied() }

    pub fn clear(&mut self) -> bool {
        self.cells.clear();
        self.reindex();
        true
    }

    /// Add under a generated name; returns the name used.
    pub fn append(&mut self, area: PixelArea) -> String {
        let name = self.generate_name();
        self.cells.push(NamedCell { name: name.clone(), area });
        self.reindex();
        name
    }

    pub fn insert(&mut self, name: &str, area: PixelArea) -> bool {
        if name.is_empty() || self.contains(name) { return false; }
        self.cells.push(NamedCell { name: name.to_string(), area });
        self.reindex();
        true
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let Some(position) = self.position(name) else { return false; };
        self.cells.remove(position);
        self.reindex();
        true
    }

    pub fn replace(&mut self, name: &str, area: PixelArea) -> bool {
        let Some(position) = self.position(name) else { return false; };
        self.cells[position].area = area;
        true
    }

    fn generate_name(&self) -> String {
        let mut n = self.cells.len();
        loop {
            let candidate = format!("cell{}", n);
            if !self.contains(&candidate) { return candidate; }
            n += 1;
        }
    }

    fn reindex(&mut self) {
        self.index = self
            .cells
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();
    }
}
