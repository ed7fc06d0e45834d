use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Board dimensions and mine count for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub(crate) const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Requires a non-empty board and `0 < mines < rows * cols`.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.size;
        if rows == 0 || cols == 0 || self.mines == 0 || self.mines >= self.total_cells() {
            log::warn!(
                "Rejected configuration {}x{} with {} mines",
                rows,
                cols,
                self.mines
            );
            return Err(GameError::InvalidConfiguration {
                rows,
                cols,
                mines: self.mines,
            });
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Difficulty::default().config()
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn config(self) -> GameConfig {
        use Difficulty::*;
        match self {
            Easy => GameConfig::new_unchecked((8, 8), 10),
            Medium => GameConfig::new_unchecked((10, 10), 20),
            Hard => GameConfig::new_unchecked((12, 12), 30),
        }
    }

    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "easy",
            Medium => "medium",
            Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::UnknownDifficulty(s.to_owned()))
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.config().validate(), Ok(()));
        }
        assert_eq!(Difficulty::Easy.config(), GameConfig { size: (8, 8), mines: 10 });
        assert_eq!(Difficulty::Medium.config(), GameConfig { size: (10, 10), mines: 20 });
        assert_eq!(Difficulty::Hard.config(), GameConfig { size: (12, 12), mines: 30 });
    }

    #[test]
    fn rejects_zero_mines() {
        assert_eq!(
            GameConfig::new((3, 3), 0),
            Err(GameError::InvalidConfiguration {
                rows: 3,
                cols: 3,
                mines: 0
            })
        );
    }

    #[test]
    fn rejects_full_board_and_empty_axes() {
        assert!(GameConfig::new((3, 3), 9).is_err());
        assert!(GameConfig::new((3, 3), 10).is_err());
        assert!(GameConfig::new((0, 3), 1).is_err());
        assert!(GameConfig::new((3, 0), 1).is_err());
        assert!(GameConfig::new((1, 2), 1).is_ok());
    }

    #[test]
    fn safe_cells_excludes_mines() {
        assert_eq!(Difficulty::Easy.config().safe_cells(), 54);
        assert_eq!(GameConfig::new((1, 2), 1).unwrap().safe_cells(), 1);
    }

    #[test]
    fn difficulty_round_trips_through_name() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.to_string().parse::<Difficulty>(), Ok(difficulty));
        }
        assert_eq!(" Hard ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(
            "expert".parse::<Difficulty>(),
            Err(GameError::UnknownDifficulty("expert".into()))
        );
    }
}
