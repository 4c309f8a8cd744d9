//! Data memory model.
//!
//! A handful of word cells keyed by absolute address. Cells are kept in the
//! order they were first written so the status dump is stable.

/// Sparse data memory preserving insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryModel {
    cells: Vec<(u32, i64)>,
}

impl MemoryModel {
    /// Creates memory from `(address, value)` pairs; later duplicates overwrite earlier ones.
    pub fn from_cells(cells: impl IntoIterator<Item = (u32, i64)>) -> Self {
        let mut mem = Self::default();
        for (addr, val) in cells {
            mem.write(addr, val);
        }
        mem
    }

    /// Returns true if `addr` holds a cell.
    pub fn contains(&self, addr: u32) -> bool {
        self.cells.iter().any(|(a, _)| *a == addr)
    }

    /// Reads a cell; unmapped addresses read as 0.
    pub fn read(&self, addr: u32) -> i64 {
        self.cells
            .iter()
            .find(|(a, _)| *a == addr)
            .map_or(0, |(_, v)| *v)
    }

    /// Writes a cell, appending it if the address is new.
    pub fn write(&mut self, addr: u32, val: i64) {
        match self.cells.iter_mut().find(|(a, _)| *a == addr) {
            Some(cell) => cell.1 = val,
            None => self.cells.push((addr, val)),
        }
    }

    /// Cells in insertion order.
    pub fn cells(&self) -> &[(u32, i64)] {
        &self.cells
    }

    /// Number of mapped cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if no cell is mapped.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
