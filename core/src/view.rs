use core::fmt;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    /// Carries the same value the hidden board holds for this cell.
    Revealed(BoardCell),
}

impl CellView {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }

    /// Single-character rendering used by the text display.
    pub fn symbol(self) -> char {
        use CellView::*;
        match self {
            Hidden => '.',
            Flagged => 'F',
            Revealed(BoardCell::Mine) => '*',
            Revealed(BoardCell::Clear(0)) => ' ',
            Revealed(BoardCell::Clear(count)) => char::from_digit(count.into(), 10).unwrap_or('?'),
        }
    }
}

/// What the player is allowed to see: a grid of [`CellView`] with the same shape as the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    cells: Array2<CellView>,
}

impl PlayerView {
    pub(crate) fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.cells)
    }

    pub fn cell_at(&self, coords: Coord2) -> CellView {
        self[coords]
    }

    /// Row-major iteration over every cell with its coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, CellView)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((x, y), &cell)| ((x as Coord, y as Coord), cell))
    }

    pub fn revealed_count(&self) -> CellCount {
        self.count_where(CellView::is_revealed)
    }

    pub fn flagged_count(&self) -> CellCount {
        self.count_where(|cell| cell == CellView::Flagged)
    }

    fn count_where(&self, predicate: impl Fn(CellView) -> bool) -> CellCount {
        // bounded by the grid size, which fits a CellCount
        self.cells.iter().filter(|&&cell| predicate(cell)).count() as CellCount
    }

    pub(crate) fn set(&mut self, coords: Coord2, cell: CellView) {
        self.cells[coords.to_nd_index()] = cell;
    }
}

impl Index<Coord2> for PlayerView {
    type Output = CellView;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl fmt::Display for PlayerView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for &cell in row {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
