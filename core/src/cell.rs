use serde::{Deserialize, Serialize};

/// True value of a board cell, fixed at construction time. A safe cell
/// carries the number of mines among its up-to-8 neighbors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Mine,
    Safe(u8),
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

/// What a player is allowed to see at a coordinate: nothing until the cell
/// is revealed, its true value afterwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibleCell {
    Hidden,
    Mine,
    Safe(u8),
}

impl VisibleCell {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }
}

impl From<Cell> for VisibleCell {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Mine => VisibleCell::Mine,
            Cell::Safe(count) => VisibleCell::Safe(count),
        }
    }
}
