use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

/// Number of addressable cells; addresses are a single byte.
pub const MEM_SIZE: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Resolved(u8),
    /// Reference to a label or data symbol, by name (without the `%`).
    Pending(String),
}

/// Fixed-capacity memory image with a write cursor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    cells: Vec<Cell>,
    capacity: usize,
}

impl Image {
    pub fn new(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Address of the next free cell.
    pub fn cursor(&self) -> usize {
        self.cells.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Writes `cell` at the cursor and advances it, returning the address written.
    pub fn push(&mut self, cell: Cell) -> Result<u8, ErrorKind> {
        let addr = self.cells.len();
        if addr >= self.capacity {
            return Err(ErrorKind::ImageFull {
                capacity: self.capacity,
            });
        }
        self.cells.push(cell);
        // capacity never exceeds MEM_SIZE, so every address fits a byte
        Ok(addr as u8)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_tracks_writes_and_capacity_is_enforced() {
        let mut img = Image::new(2);
        assert_eq!(img.push(Cell::Resolved(1)), Ok(0));
        assert_eq!(img.push(Cell::Pending("x".into())), Ok(1));
        assert_eq!(img.cursor(), 2);
        assert_eq!(
            img.push(Cell::Resolved(3)),
            Err(ErrorKind::ImageFull { capacity: 2 })
        );
        assert_eq!(img.cursor(), 2);
    }
}
