use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    /// Indicates the game has ended and no moves change anything anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Outcome of toggling a flag
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the view
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Outcome of revealing a cell
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the view
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// One game session: the hidden board, what the player sees of it, and the game status.
///
/// The engine owns both grids and only hands out shared references, every mutation goes
/// through [`MinefieldEngine::reveal`], [`MinefieldEngine::toggle_flag`] or a new game.
#[derive(Clone, Debug)]
pub struct MinefieldEngine {
    generator: RandomMinefieldGenerator,
    minefield: Minefield,
    view: PlayerView,
    revealed_count: CellCount,
    flag_count: CellCount,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

impl MinefieldEngine {
    /// Starts a game on a board seeded from the thread RNG.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_generator(config, RandomMinefieldGenerator::from_entropy())
    }

    /// Starts a game whose boards, including those of later new games, follow from `seed`.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomMinefieldGenerator::new(seed))
    }

    fn with_generator(config: GameConfig, mut generator: RandomMinefieldGenerator) -> Result<Self> {
        let minefield = generator.generate(config)?;
        Ok(Self::start(generator, minefield))
    }

    /// Starts a game on a fixed board. Later new games are random again.
    pub fn from_minefield(minefield: Minefield) -> Self {
        Self::start(RandomMinefieldGenerator::from_entropy(), minefield)
    }

    fn start(generator: RandomMinefieldGenerator, minefield: Minefield) -> Self {
        let size = minefield.size();
        log::debug!(
            "New game {}x{} with {} mines",
            size.0,
            size.1,
            minefield.mine_count()
        );
        Self {
            generator,
            minefield,
            view: PlayerView::new(size),
            revealed_count: 0,
            flag_count: 0,
            status: GameStatus::default(),
            triggered_mine: None,
        }
    }

    /// Replaces the board and view with a fresh game. On error the current game is kept.
    pub fn new_game(&mut self, config: GameConfig) -> Result<()> {
        let minefield = self.generator.generate(config)?;
        let generator = self.generator.clone();
        *self = Self::start(generator, minefield);
        Ok(())
    }

    /// New game with the current configuration.
    pub fn restart(&mut self) -> Result<()> {
        self.new_game(self.config())
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn view(&self) -> &PlayerView {
        &self.view
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.minefield.validate_coords(coords)?;
        Ok(self.view[coords])
    }

    pub fn config(&self) -> GameConfig {
        self.minefield.game_config()
    }

    pub fn size(&self) -> Coord2 {
        self.minefield.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.minefield.mine_count()
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn mines_left(&self) -> isize {
        (self.minefield.mine_count() as isize) - (self.flag_count as isize)
    }

    /// The mine whose reveal lost the game, if any.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use CellView::*;
        use FlagOutcome::*;

        let coords = self.minefield.validate_coords(coords)?;
        if self.status.is_finished() {
            return Ok(NoChange);
        }

        Ok(match self.view[coords] {
            Hidden => {
                self.view.set(coords, Flagged);
                self.flag_count += 1;
                Changed
            }
            Flagged => {
                self.view.set(coords, Hidden);
                self.flag_count -= 1;
                Changed
            }
            Revealed(_) => NoChange,
        })
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.minefield.validate_coords(coords)?;
        if self.status.is_finished() || self.view[coords].is_revealed() {
            return Ok(RevealOutcome::NoChange);
        }

        let cell = self.minefield[coords];
        if cell.is_mine() {
            log::debug!("Hit mine at {:?}", coords);
            self.uncover(coords);
            self.triggered_mine = Some(coords);
            self.end_game(GameStatus::Lost);
            return Ok(RevealOutcome::HitMine);
        }

        self.uncover(coords);
        if cell.is_zero() {
            self.flood_fill(coords);
        }

        if self.revealed_count == self.minefield.safe_cell_count() {
            self.end_game(GameStatus::Won);
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    /// Reveals the zero region orthogonally connected to `origin` together with its border.
    fn flood_fill(&mut self, origin: Coord2) {
        let mut to_visit: VecDeque<Coord2> = VecDeque::from([origin]);

        while let Some(coords) = to_visit.pop_front() {
            for neighbor in self.minefield.iter_orthogonal(coords) {
                let cell = self.minefield[neighbor];
                if cell.is_mine() || self.view[neighbor].is_revealed() {
                    continue;
                }

                self.uncover(neighbor);
                log::trace!("Flood revealed {:?} as {:?}", neighbor, cell);

                if cell.is_zero() {
                    to_visit.push_back(neighbor);
                }
            }
        }
    }

    /// Marks a single unrevealed cell as revealed, dropping any flag on it.
    fn uncover(&mut self, coords: Coord2) {
        let cell = self.minefield[coords];
        if self.view[coords] == CellView::Flagged {
            self.flag_count -= 1;
        }
        self.view.set(coords, CellView::Revealed(cell));
        if !cell.is_mine() {
            self.revealed_count += 1;
        }
    }

    fn end_game(&mut self, status: GameStatus) {
        if self.status.is_finished() {
            return;
        }

        log::debug!("Game ended: {:?}", status);
        self.status = status;
        self.disclose_mines();
    }

    /// Reveals every mine, leaving safe cells as they are.
    fn disclose_mines(&mut self) {
        let mines: Vec<Coord2> = self.minefield.iter_mines().collect();
        for coords in mines {
            if self.view[coords].is_unrevealed() {
                self.uncover(coords);
            }
        }
    }
}
