use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    /// Places `config.mines` mines on a `config.size` board, failing on an invalid config.
    fn generate(&mut self, config: GameConfig) -> Result<Minefield>;
}
