use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Ground-truth content of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardCell {
    Mine,
    /// Number of mines among the Moore neighbors, `0..=8`.
    Clear(u8),
}

impl BoardCell {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Clear(0))
    }
}

impl Default for BoardCell {
    fn default() -> Self {
        Self::Clear(0)
    }
}

/// Hidden board: mine positions with the neighbor counts baked in.
///
/// Serialized as its mine mask only, deserializing rebuilds the counts through
/// [`Minefield::from_mine_mask`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "MineMask", try_from = "MineMask")]
pub struct Minefield {
    cells: Array2<BoardCell>,
    mine_count: CellCount,
}

impl Minefield {
    /// Builds the board from a mine mask, computing every neighbor count once.
    ///
    /// The mask must describe a valid game: non-empty, with at least one mine and one safe cell.
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        let invalid = || GameError::InvalidConfiguration {
            rows: rows.try_into().unwrap_or(Coord::MAX),
            cols: cols.try_into().unwrap_or(Coord::MAX),
            mines: mine_count.try_into().unwrap_or(CellCount::MAX),
        };

        let size: Coord2 = (
            rows.try_into().map_err(|_| invalid())?,
            cols.try_into().map_err(|_| invalid())?,
        );
        let mines = mine_count.try_into().map_err(|_| invalid())?;
        GameConfig::new(size, mines)?;

        let cells = Array2::from_shape_fn(mine_mask.dim(), |(x, y)| {
            let coords = (x as Coord, y as Coord);
            if mine_mask[coords.to_nd_index()] {
                BoardCell::Mine
            } else {
                let count = mine_mask
                    .iter_neighbors(coords)
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count();
                BoardCell::Clear(count as u8)
            }
        });

        Ok(Self {
            cells,
            mine_count: mines,
        })
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &(x, y) in mine_coords {
            if x >= size.0 || y >= size.1 {
                return Err(GameError::OutOfBounds { x, y });
            }
            mine_mask[(x, y).to_nd_index()] = true;
        }

        Self::from_mine_mask(&mine_mask)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds {
                x: coords.0,
                y: coords.1,
            })
        }
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.cells)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.game_config().safe_cells()
    }

    pub fn cell_at(&self, coords: Coord2) -> BoardCell {
        self[coords]
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine()
    }

    /// All mine coordinates in row-major order.
    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| cell.is_mine())
            .map(|((x, y), _)| (x as Coord, y as Coord))
    }

    pub(crate) fn iter_orthogonal(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_orthogonal(coords)
    }
}

#[derive(Serialize, Deserialize)]
struct MineMask {
    mines: Array2<bool>,
}

impl From<Minefield> for MineMask {
    fn from(minefield: Minefield) -> Self {
        Self {
            mines: minefield.cells.mapv(BoardCell::is_mine),
        }
    }
}

impl TryFrom<MineMask> for Minefield {
    type Error = GameError;

    fn try_from(mask: MineMask) -> Result<Self> {
        Self::from_mine_mask(&mask.mines)
    }
}

impl Index<Coord2> for Minefield {
    type Output = BoardCell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_match_live_neighbors() {
        // * . .
        // . . .
        // . . *
        let field = Minefield::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(field.cell_at((0, 0)), BoardCell::Mine);
        assert_eq!(field.cell_at((0, 1)), BoardCell::Clear(1));
        assert_eq!(field.cell_at((1, 1)), BoardCell::Clear(2));
        assert_eq!(field.cell_at((0, 2)), BoardCell::Clear(0));
        assert_eq!(field.cell_at((2, 0)), BoardCell::Clear(0));
        assert_eq!(field.mine_count(), 2);
        assert_eq!(field.safe_cell_count(), 7);
    }

    #[test]
    fn surrounded_cell_counts_eight() {
        let mines: Vec<_> = (0..3)
            .flat_map(|x| (0..3).map(move |y| (x, y)))
            .filter(|&pos| pos != (1, 1))
            .collect();
        let field = Minefield::from_mine_coords((3, 4), &mines).unwrap();

        assert_eq!(field.cell_at((1, 1)), BoardCell::Clear(8));
        assert_eq!(field.cell_at((1, 3)), BoardCell::Clear(3));
    }

    #[test]
    fn duplicate_coords_count_once() {
        let field = Minefield::from_mine_coords((2, 2), &[(1, 1), (1, 1)]).unwrap();
        assert_eq!(field.mine_count(), 1);
        assert_eq!(field.iter_mines().collect::<Vec<_>>(), vec![(1, 1)]);
    }

    #[test]
    fn rejects_out_of_bounds_mine() {
        assert_eq!(
            Minefield::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::OutOfBounds { x: 2, y: 0 })
        );
    }

    #[test]
    fn rejects_layouts_without_mines_or_safe_cells() {
        assert!(matches!(
            Minefield::from_mine_coords((3, 3), &[]),
            Err(GameError::InvalidConfiguration { mines: 0, .. })
        ));
        assert!(matches!(
            Minefield::from_mine_coords((1, 2), &[(0, 0), (0, 1)]),
            Err(GameError::InvalidConfiguration { mines: 2, .. })
        ));
    }

    #[test]
    fn serializes_as_mine_mask_and_rebuilds_counts() {
        let field = Minefield::from_mine_coords((2, 2), &[(0, 0)]).unwrap();

        let json = serde_json::to_value(&field).unwrap();
        assert!(json.get("mine_count").is_none());
        let back: Minefield = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(back, field);

        let mut grown = json;
        grown["mines"]["data"][3] = serde_json::Value::Bool(true);
        let back: Minefield = serde_json::from_value(grown).unwrap();
        assert_eq!(back.mine_count(), 2);
        assert_eq!(back.safe_cell_count(), 2);
        assert_eq!(back.cell_at((0, 1)), BoardCell::Clear(2));
    }

    #[test]
    fn deserializing_rejects_boards_without_safe_cells() {
        let field = Minefield::from_mine_coords((2, 2), &[(0, 0)]).unwrap();
        let mut json = serde_json::to_value(&field).unwrap();
        json["mines"]["data"] = serde_json::json!([true, true, true, true]);

        assert!(serde_json::from_value::<Minefield>(json).is_err());
    }

    #[test]
    fn validate_coords_reports_position() {
        let field = Minefield::from_mine_coords((2, 3), &[(0, 0)]).unwrap();
        assert_eq!(field.validate_coords((1, 2)), Ok((1, 2)));
        assert_eq!(
            field.validate_coords((1, 3)),
            Err(GameError::OutOfBounds { x: 1, y: 3 })
        );
    }
}
