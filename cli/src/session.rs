use core::fmt;
use minefield_core::*;

/// Renders whole seconds as `MM:SS`, minutes keep growing past 99.
pub fn format_elapsed(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Front-end bookkeeping around one engine: which mode is being played and how long it has run.
///
/// Time only moves through [`Session::tick`] and [`Session::advance_to`], the engine itself has no
/// clock.
#[derive(Debug)]
pub struct Session {
    engine: MinefieldEngine,
    difficulty: Option<Difficulty>,
    elapsed_secs: u32,
}

impl Session {
    /// `difficulty` is `None` for a custom board.
    pub fn new(config: GameConfig, difficulty: Option<Difficulty>, seed: Option<u64>) -> Result<Self> {
        let engine = match seed {
            Some(seed) => MinefieldEngine::with_seed(config, seed)?,
            None => MinefieldEngine::new(config)?,
        };
        Ok(Self {
            engine,
            difficulty,
            elapsed_secs: 0,
        })
    }

    pub fn engine(&self) -> &MinefieldEngine {
        &self.engine
    }

    pub fn mode_name(&self) -> &'static str {
        self.difficulty.map_or("custom", Difficulty::name)
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// One second passed. Ignored once the game is over.
    pub fn tick(&mut self) {
        if !self.engine.is_finished() {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        }
    }

    /// Catches the counter up to `secs`, it never moves backwards.
    pub fn advance_to(&mut self, secs: u32) {
        while self.elapsed_secs < secs && !self.engine.is_finished() {
            self.tick();
        }
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let outcome = self.engine.reveal(coords)?;
        match outcome {
            RevealOutcome::HitMine => log::info!("Lost after {} seconds", self.elapsed_secs),
            RevealOutcome::Won => log::info!("Won after {} seconds", self.elapsed_secs),
            _ => {}
        }
        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        self.engine.toggle_flag(coords)
    }

    /// Starts over, optionally switching difficulty. The timer restarts at zero.
    pub fn new_game(&mut self, difficulty: Option<Difficulty>) -> Result<()> {
        match difficulty {
            Some(difficulty) => {
                self.engine.new_game(difficulty.config())?;
                self.difficulty = Some(difficulty);
            }
            None => self.engine.restart()?,
        }
        self.elapsed_secs = 0;
        Ok(())
    }

    pub fn status_line(&self) -> String {
        let status = match self.engine.status() {
            GameStatus::InProgress => "playing",
            GameStatus::Won => "you won!",
            GameStatus::Lost => "boom, you lost",
        };
        format!(
            "{} | mines left: {} | time: {} | {}",
            self.mode_name(),
            self.engine.mines_left(),
            format_elapsed(self.elapsed_secs),
            status
        )
    }
}

/// Board with row and column labels, followed by the status line.
impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.engine.view();
        let (_, cols) = view.size();
        write!(f, "    ")?;
        for y in 0..cols {
            write!(f, "{y:>3}")?;
        }
        writeln!(f)?;

        let mut current_row = None;
        for ((x, _), cell) in view.iter() {
            if current_row != Some(x) {
                if current_row.is_some() {
                    writeln!(f)?;
                }
                write!(f, "{x:>3} ")?;
                current_row = Some(x);
            }
            write!(f, "{:>3}", cell.symbol())?;
        }
        writeln!(f)?;
        f.write_str(&self.status_line())
    }
}
