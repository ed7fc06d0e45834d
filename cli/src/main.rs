use std::io::{self, BufRead, Write};

use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use minefield_core::{Difficulty, FlagOutcome, GameConfig, RevealOutcome};
use web_time::Instant;

use command::{Command, HELP};
use session::Session;

mod command;
mod session;

/// Play minefield in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Preset board: easy (8x8, 10 mines), medium (10x10, 20) or hard (12x12, 30)
    #[arg(short, long, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Custom number of rows, needs --cols and --mines
    #[arg(long, requires_all = ["cols", "mines"])]
    rows: Option<u8>,

    /// Custom number of columns
    #[arg(long, requires_all = ["rows", "mines"])]
    cols: Option<u8>,

    /// Custom number of mines, must leave at least one safe cell
    #[arg(long, requires_all = ["rows", "cols"])]
    mines: Option<u16>,

    /// Seed for reproducible boards
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

impl Args {
    fn game_setup(&self) -> anyhow::Result<(GameConfig, Option<Difficulty>)> {
        Ok(match (self.rows, self.cols, self.mines) {
            (Some(rows), Some(cols), Some(mines)) => (GameConfig::new((rows, cols), mines)?, None),
            _ => (self.difficulty.config(), Some(self.difficulty)),
        })
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();

    let (config, difficulty) = args.game_setup()?;
    log::debug!("Starting with {:?}", config);
    let mut session = Session::new(config, difficulty, args.seed)?;
    let mut started_at = Instant::now();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    println!("{HELP}\n");
    println!("{session}");

    for line in stdin.lock().lines() {
        let line = line?;
        session.advance_to(started_at.elapsed().as_secs().try_into().unwrap_or(u32::MAX));

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err:#}");
                continue;
            }
        };

        let result = match command {
            Command::Reveal(coords) => session.reveal(coords).map(RevealOutcome::has_update),
            Command::Flag(coords) => session.toggle_flag(coords).map(FlagOutcome::has_update),
            Command::NewGame(difficulty) => session.new_game(difficulty).map(|()| {
                started_at = Instant::now();
                true
            }),
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::Quit => break,
        };

        match result {
            Ok(true) => println!("{session}"),
            Ok(false) if session.engine().is_finished() => {
                println!("game over, type n for a new game")
            }
            Ok(false) => println!("nothing to do there"),
            Err(err) => println!("{err}"),
        }
        stdout.flush()?;
    }

    Ok(())
}
