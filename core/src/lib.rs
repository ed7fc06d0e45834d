//! Single-player minefield engine: board generation, the player's view of it, reveal and flag
//! moves with cascading reveal, and win/loss evaluation.

pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use minefield::*;
pub use types::*;
pub use view::*;

mod config;
mod engine;
mod error;
mod generator;
mod minefield;
mod types;
mod view;
