use ndarray::Array2;

use super::*;

/// Seeded generator that places mines by rejection sampling: draw a uniform
/// coordinate, ignore the draw if that cell is already mined, repeat until
/// the requested number of distinct cells is mined. Which cells end up
/// mined is uniform over all layouts of that mine count.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomMineFieldGenerator {
    seed: u64,
}

impl RandomMineFieldGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineFieldGenerator for RandomMineFieldGenerator {
    fn generate(self, config: GameConfig) -> MineField {
        use rand::prelude::*;

        let size = config.size as usize;
        let total_cells = config.total_cells();

        // Degenerate input from an unchecked config. Fill the board instead
        // of resampling forever.
        if config.mines >= total_cells {
            if config.mines > total_cells {
                log::warn!(
                    "Requested {} mines but the board only fits {}",
                    config.mines,
                    total_cells
                );
            }
            return MineField::from_mine_mask(Array2::from_elem((size, size), true));
        }

        let mut mine_mask: Array2<bool> = Array2::default((size, size));
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut placed: CellCount = 0;

        while placed < config.mines {
            let coords: Coord2 = (
                rng.random_range(0..config.size),
                rng.random_range(0..config.size),
            );

            let cell = &mut mine_mask[coords.to_grid_index()];
            if *cell {
                continue;
            }
            *cell = true;
            placed += 1;
        }

        log::debug!(
            "placed {} mines on a {}x{} board, seed {}",
            placed,
            config.size,
            config.size,
            self.seed
        );
        MineField::from_mine_mask(mine_mask)
    }
}
