use anyhow::{Context, bail};
use minefield_core::{Coord, Coord2, Difficulty};

pub const HELP: &str = "\
commands:
  r <x> <y>       reveal the cell at row x, column y
  f <x> <y>       toggle a flag on the cell at row x, column y
  n [difficulty]  new game, same settings or easy/medium/hard
  h               show this help
  q               quit";

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    NewGame(Option<Difficulty>),
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command, type h for help");
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Self::Reveal(parse_coords(&mut words)?),
            "f" | "flag" => Self::Flag(parse_coords(&mut words)?),
            "n" | "new" => Self::NewGame(words.next().map(str::parse).transpose()?),
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            other => bail!("unknown command {other:?}, type h for help"),
        };

        if let Some(extra) = words.next() {
            bail!("unexpected argument {extra:?}");
        }
        Ok(command)
    }
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> anyhow::Result<Coord2> {
    let mut next = |axis: &str| -> anyhow::Result<Coord> {
        let word = words.next().with_context(|| format!("missing {axis} coordinate"))?;
        word.parse()
            .with_context(|| format!("invalid {axis} coordinate {word:?}"))
    };
    let x = next("x")?;
    let y = next("y")?;
    Ok((x, y))
}
