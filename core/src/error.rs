use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {rows}x{cols} board with {mines} mines")]
    InvalidConfiguration {
        rows: Coord,
        cols: Coord,
        mines: CellCount,
    },
    #[error("Coordinates ({x}, {y}) are outside the board")]
    OutOfBounds { x: Coord, y: Coord },
    #[error("Unknown difficulty {0:?}, expected easy, medium or hard")]
    UnknownDifficulty(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
