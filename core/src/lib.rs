use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use field::*;
pub use generator::*;
pub use types::*;

mod cell;
mod error;
mod field;
mod generator;
mod types;

/// Shape of a game: square board dimension and how many mines it holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validates that the board has at least one cell and that at least one
    /// cell stays safe.
    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        if size == 0 {
            return Err(GameError::InvalidSize);
        }
        if mines >= cell_area(size) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_area(self.size)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}
