use crate::*;
pub use random::*;

mod random;

/// Strategy for producing a playable field from a game shape. A generator
/// owns whatever randomness it needs, so building a field for the same
/// generator value is fully deterministic.
pub trait MineFieldGenerator {
    fn generate(self, config: GameConfig) -> MineField;
}
