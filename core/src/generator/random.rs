use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Uniform generation strategy: sample a random cell, retry when it already holds a mine.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator {
    rng: SmallRng,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<Minefield> {
        config.validate()?;

        let (rows, cols) = config.size;
        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut mines_placed: CellCount = 0;
        let mut collisions: u32 = 0;

        while mines_placed < config.mines {
            let coords: Coord2 = (self.rng.random_range(0..rows), self.rng.random_range(0..cols));
            let cell = &mut mine_mask[coords.to_nd_index()];
            if *cell {
                collisions += 1;
                log::trace!("Mine collision at {:?}, sampling again", coords);
                continue;
            }
            *cell = true;
            mines_placed += 1;
        }

        log::debug!(
            "Placed {} mines on a {}x{} board after {} collisions",
            mines_placed,
            rows,
            cols,
            collisions
        );
        Minefield::from_mine_mask(&mine_mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_count(field: &Minefield, coords: Coord2) -> u8 {
        let (rows, cols) = field.size();
        let mut count = 0;
        for x in coords.0.saturating_sub(1)..=coords.0.saturating_add(1) {
            for y in coords.1.saturating_sub(1)..=coords.1.saturating_add(1) {
                if (x, y) != coords && x < rows && y < cols && field.contains_mine((x, y)) {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn places_exact_mine_count_with_consistent_counts() {
        let configs = [
            GameConfig::new((2, 2), 1).unwrap(),
            GameConfig::new((1, 5), 4).unwrap(),
            GameConfig::new((5, 7), 34).unwrap(),
            Difficulty::Easy.config(),
            Difficulty::Medium.config(),
            Difficulty::Hard.config(),
        ];

        for seed in 0..50 {
            for config in configs {
                let field = RandomMinefieldGenerator::new(seed).generate(config).unwrap();
                assert_eq!(field.size(), config.size);
                assert_eq!(field.mine_count(), config.mines);
                assert_eq!(field.iter_mines().count(), usize::from(config.mines));

                let (rows, cols) = config.size;
                for x in 0..rows {
                    for y in 0..cols {
                        if let BoardCell::Clear(count) = field.cell_at((x, y)) {
                            assert_eq!(count, live_count(&field, (x, y)), "seed {seed} at {x},{y}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn same_seed_same_board() {
        let config = Difficulty::Hard.config();
        let a = RandomMinefieldGenerator::new(7).generate(config).unwrap();
        let b = RandomMinefieldGenerator::new(7).generate(config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn every_cell_can_hold_a_mine() {
        let config = GameConfig::new((3, 3), 1).unwrap();
        let mut generator = RandomMinefieldGenerator::new(0);
        let mut seen: Array2<bool> = Array2::default([3, 3]);
        for _ in 0..500 {
            for coords in generator.generate(config).unwrap().iter_mines() {
                seen[coords.to_nd_index()] = true;
            }
        }
        assert!(seen.iter().all(|&hit| hit));
    }

    #[test]
    fn rejects_invalid_config() {
        let config = GameConfig::new_unchecked((3, 3), 0);
        assert!(RandomMinefieldGenerator::new(0).generate(config).is_err());
    }
}
