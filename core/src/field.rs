use std::collections::VecDeque;
use std::ops::Index;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Outcome of digging at a coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Safe ground, including the no-op re-dig of an already revealed cell.
    Cleared,
    /// The dug cell was a mine. The field stays intact; ending the game is
    /// the caller's move.
    HitMine,
}

/// The whole board: every cell's true value plus the coordinates the player
/// has uncovered so far.
///
/// Cell values and mine placement are fixed once construction finishes.
/// Only the revealed mask changes afterwards, and it only ever grows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineField {
    cells: Array2<Cell>,
    revealed: Array2<bool>,
    revealed_count: CellCount,
    mine_count: CellCount,
}

impl MineField {
    /// Builds a field from a mine mask, counting the mines and running the
    /// adjacency pass. Nothing starts revealed.
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap();
        let cells = assign_adjacency(&mine_mask);
        let revealed = Array2::default(mine_mask.raw_dim());

        Self {
            cells,
            revealed,
            revealed_count: 0,
            mine_count,
        }
    }

    /// Builds a field with mines at known coordinates. Coordinates outside
    /// the `size × size` grid are rejected; duplicates collapse.
    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default((size as usize, size as usize));

        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[coords.to_grid_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn config(&self) -> GameConfig {
        GameConfig {
            size: self.size(),
            mines: self.mine_count,
        }
    }

    pub fn size(&self) -> Coord {
        self.cells.dim().0.try_into().unwrap()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// The win test: every cell that is not a mine has been revealed.
    pub fn is_cleared(&self) -> bool {
        self.revealed_count == self.safe_cell_count()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.revealed[coords.to_grid_index()]
    }

    /// True cell value. Renderers want [`visible_cell_at`] instead.
    ///
    /// [`visible_cell_at`]: Self::visible_cell_at
    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_grid_index()]
    }

    /// Player view of a cell: `Hidden` until the coordinate has been
    /// revealed, the true value afterwards.
    pub fn visible_cell_at(&self, coords: Coord2) -> VisibleCell {
        if self.is_revealed(coords) {
            self.cell_at(coords).into()
        } else {
            VisibleCell::Hidden
        }
    }

    /// Digs at `coords`.
    ///
    /// Re-digging an already revealed coordinate changes nothing and reports
    /// `Cleared`. Digging a mine reveals it and reports `HitMine`. Digging a
    /// zero-count cell cascades across the connected zero region and its
    /// numbered border. An out-of-bounds dig fails without touching any
    /// state.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.is_revealed(coords) {
            return Ok(RevealOutcome::Cleared);
        }

        self.mark_revealed(coords);

        match self.cell_at(coords) {
            Cell::Mine => Ok(RevealOutcome::HitMine),
            Cell::Safe(count) => {
                if count == 0 {
                    self.cascade_from(coords);
                }
                Ok(RevealOutcome::Cleared)
            }
        }
    }

    /// Uncovers the whole board, mines included, for the end-of-game view.
    /// Idempotent; cell values are untouched.
    pub fn reveal_all(&mut self) {
        self.revealed.fill(true);
        self.revealed_count = self.total_cells();
    }

    /// Flood fill outwards from a freshly revealed zero-count cell. The
    /// revealed mask doubles as the visited set, so every cell is marked at
    /// most once and the traversal is bounded by the cell count. Expansion
    /// only continues through zero cells; a zero cell has no mine neighbors,
    /// so the cascade never uncovers a mine.
    fn cascade_from(&mut self, start: Coord2) {
        let mut to_visit: VecDeque<Coord2> = self
            .cells
            .iter_neighbors(start)
            .filter(|&pos| !self.is_revealed(pos))
            .collect();

        while let Some(coords) = to_visit.pop_front() {
            if self.is_revealed(coords) {
                continue;
            }

            self.mark_revealed(coords);

            if self.cell_at(coords) == Cell::Safe(0) {
                to_visit.extend(
                    self.cells
                        .iter_neighbors(coords)
                        .filter(|&pos| !self.is_revealed(pos)),
                );
            }
        }
    }

    fn mark_revealed(&mut self, coords: Coord2) {
        debug_assert!(!self.is_revealed(coords));
        self.revealed[coords.to_grid_index()] = true;
        self.revealed_count += 1;
    }
}

impl Index<Coord2> for MineField {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_grid_index()]
    }
}

/// Computes every cell's value from the mine mask: mines stay mines, each
/// safe cell gets the number of mines among its in-bounds neighbors. Pure
/// and deterministic, so rebuilding from the same mask always produces the
/// same grid.
fn assign_adjacency(mine_mask: &Array2<bool>) -> Array2<Cell> {
    Array2::from_shape_fn(mine_mask.raw_dim(), |(row, col)| {
        if mine_mask[[row, col]] {
            return Cell::Mine;
        }

        let coords = (row.try_into().unwrap(), col.try_into().unwrap());
        let count = mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| mine_mask[pos.to_grid_index()])
            .count();
        Cell::Safe(count.try_into().unwrap())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(size: Coord, mines: &[Coord2]) -> MineField {
        MineField::from_mine_coords(size, mines).unwrap()
    }

    fn all_coords(size: Coord) -> impl Iterator<Item = Coord2> {
        (0..size).flat_map(move |row| (0..size).map(move |col| (row, col)))
    }

    #[test]
    fn adjacency_counts_for_corner_mine() {
        let field = field(3, &[(0, 0)]);

        assert_eq!(field.cell_at((0, 0)), Cell::Mine);
        assert_eq!(field.cell_at((0, 1)), Cell::Safe(1));
        assert_eq!(field.cell_at((1, 0)), Cell::Safe(1));
        assert_eq!(field.cell_at((1, 1)), Cell::Safe(1));
        assert_eq!(field.cell_at((0, 2)), Cell::Safe(0));
        assert_eq!(field.cell_at((1, 2)), Cell::Safe(0));
        assert_eq!(field.cell_at((2, 0)), Cell::Safe(0));
        assert_eq!(field.cell_at((2, 1)), Cell::Safe(0));
        assert_eq!(field.cell_at((2, 2)), Cell::Safe(0));
    }

    #[test]
    fn adjacency_counts_overlapping_mines() {
        let field = field(3, &[(0, 0), (0, 1)]);

        assert_eq!(field.cell_at((0, 2)), Cell::Safe(1));
        assert_eq!(field.cell_at((1, 0)), Cell::Safe(2));
        assert_eq!(field.cell_at((1, 1)), Cell::Safe(2));
        assert_eq!(field.cell_at((1, 2)), Cell::Safe(1));
        assert_eq!(field.cell_at((2, 0)), Cell::Safe(0));
        assert_eq!(field.cell_at((2, 1)), Cell::Safe(0));
        assert_eq!(field.cell_at((2, 2)), Cell::Safe(0));
    }

    #[test]
    fn adjacency_pass_is_deterministic() {
        let first = field(4, &[(0, 0), (2, 3), (3, 1)]);
        let second = field(4, &[(0, 0), (2, 3), (3, 1)]);

        assert_eq!(first, second);
    }

    #[test]
    fn geometry_accessors_match_construction() {
        let field = field(3, &[(0, 0)]);

        assert_eq!(field.config(), GameConfig::new_unchecked(3, 1));
        assert_eq!(field.size(), 3);
        assert_eq!(field.mine_count(), 1);
        assert_eq!(field.total_cells(), 9);
        assert_eq!(field.safe_cell_count(), 8);
        assert_eq!(field[(0, 0)], Cell::Mine);
    }

    #[test]
    fn everything_starts_hidden() {
        let field = field(3, &[(1, 1)]);

        for coords in all_coords(3) {
            assert_eq!(field.visible_cell_at(coords), VisibleCell::Hidden);
        }
        assert_eq!(field.revealed_count(), 0);
        assert!(!field.is_cleared());
    }

    #[test]
    fn revealing_a_numbered_cell_stops_there() {
        let mut field = field(3, &[(0, 0)]);

        assert_eq!(field.reveal((1, 1)).unwrap(), RevealOutcome::Cleared);

        assert_eq!(field.visible_cell_at((1, 1)), VisibleCell::Safe(1));
        assert_eq!(field.revealed_count(), 1);
        for coords in all_coords(3).filter(|&c| c != (1, 1)) {
            assert!(!field.is_revealed(coords));
        }
    }

    #[test]
    fn revealing_a_zero_cell_cascades_to_the_numbered_border() {
        let mut field = field(3, &[(0, 0)]);

        assert_eq!(field.reveal((2, 2)).unwrap(), RevealOutcome::Cleared);

        // The connected zero region plus its numbered border: every cell
        // except the mine.
        for coords in all_coords(3) {
            assert_eq!(field.is_revealed(coords), coords != (0, 0));
        }
        assert_eq!(field.visible_cell_at((0, 0)), VisibleCell::Hidden);
        assert_eq!(field.visible_cell_at((1, 1)), VisibleCell::Safe(1));
        assert_eq!(field.revealed_count(), 8);
        assert!(field.is_cleared());
    }

    #[test]
    fn revealing_a_mine_uncovers_it_and_nothing_else() {
        let mut field = field(3, &[(0, 0)]);

        assert_eq!(field.reveal((0, 0)).unwrap(), RevealOutcome::HitMine);

        assert_eq!(field.visible_cell_at((0, 0)), VisibleCell::Mine);
        assert_eq!(field.cell_at((0, 0)), Cell::Mine);
        assert_eq!(field.revealed_count(), 1);
        assert!(!field.is_cleared());
    }

    #[test]
    fn revealing_twice_changes_nothing() {
        let mut field = field(3, &[(0, 0)]);

        field.reveal((1, 1)).unwrap();
        let before = field.clone();

        assert_eq!(field.reveal((1, 1)).unwrap(), RevealOutcome::Cleared);
        assert_eq!(field, before);
    }

    #[test]
    fn redigging_a_revealed_mine_reports_cleared() {
        let mut field = field(3, &[(0, 0)]);

        assert_eq!(field.reveal((0, 0)).unwrap(), RevealOutcome::HitMine);
        assert_eq!(field.reveal((0, 0)).unwrap(), RevealOutcome::Cleared);
        assert_eq!(field.revealed_count(), 1);
    }

    #[test]
    fn out_of_bounds_reveal_leaves_the_field_untouched() {
        let mut field = field(3, &[(0, 0)]);

        assert_eq!(field.reveal((3, 0)), Err(GameError::OutOfBounds));
        assert_eq!(field.reveal((0, 3)), Err(GameError::OutOfBounds));
        assert_eq!(field.revealed_count(), 0);
    }

    #[test]
    fn reveal_all_uncovers_mines_and_is_idempotent() {
        let mut field = field(3, &[(0, 0)]);
        field.reveal((0, 0)).unwrap();

        field.reveal_all();

        assert_eq!(field.revealed_count(), field.total_cells());
        assert_eq!(field.visible_cell_at((0, 0)), VisibleCell::Mine);
        assert_eq!(field.visible_cell_at((2, 2)), VisibleCell::Safe(0));
        assert!(!field.is_cleared());

        let before = field.clone();
        field.reveal_all();
        assert_eq!(field, before);
    }

    #[test]
    fn mine_free_board_cascades_everywhere() {
        let mut field = field(4, &[]);

        assert_eq!(field.reveal((0, 0)).unwrap(), RevealOutcome::Cleared);

        assert_eq!(field.revealed_count(), 16);
        assert!(field.is_cleared());
    }

    #[test]
    fn is_cleared_flips_on_the_last_safe_cell() {
        // Every safe cell on a 2x2 board with one mine is numbered, so each
        // reveal uncovers exactly one cell.
        let mut field = field(2, &[(0, 0)]);

        field.reveal((0, 1)).unwrap();
        assert!(!field.is_cleared());
        field.reveal((1, 0)).unwrap();
        assert!(!field.is_cleared());
        field.reveal((1, 1)).unwrap();
        assert!(field.is_cleared());
    }

    #[test]
    fn from_mine_coords_rejects_out_of_bounds() {
        assert_eq!(
            MineField::from_mine_coords(3, &[(3, 0)]),
            Err(GameError::OutOfBounds)
        );
        assert_eq!(
            MineField::from_mine_coords(3, &[(0, 0), (1, 3)]),
            Err(GameError::OutOfBounds)
        );
    }

    #[test]
    fn from_mine_coords_collapses_duplicates() {
        let field = field(3, &[(1, 1), (1, 1)]);
        assert_eq!(field.mine_count(), 1);
    }

    #[test]
    fn minefield_survives_a_serde_round_trip() {
        let mut field = field(3, &[(0, 0)]);
        field.reveal((2, 2)).unwrap();

        let json = serde_json::to_string(&field).unwrap();
        let restored: MineField = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, field);
    }
}
