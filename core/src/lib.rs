#![no_std]

extern crate alloc;

use core::ops::Index;

use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod types;

/// Validated game parameters: board dimensions and mine count.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    /// The one place setup misuse surfaces as an error: a zero-sized board,
    /// or a mine count that leaves no safe cell (or none at all), is rejected
    /// before any mine is placed.
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::EmptyBoard);
        }
        if mines == 0 || mines >= area(width, height) {
            return Err(GameError::InvalidMineCount);
        }
        Ok(Self::new_unchecked(width, height, mines))
    }

    pub const fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.width, self.height)
    }
}

/// Mine positions for one game, fixed once generated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Minefield {
    mines: Array2<bool>,
    count: CellCount,
}

impl Minefield {
    /// Places exactly `config.mines` mines uniformly at random, redrawing any
    /// position that already holds one. Terminates because the config
    /// guarantees at least one free cell.
    pub fn random(config: GameConfig, seed: u64) -> Self {
        let mut mines: Array2<bool> = Array2::default(nd(config.size()));
        let mut rng = SmallRng::seed_from_u64(seed);

        let mut placed: CellCount = 0;
        while placed < config.mines {
            let x = rng.random_range(0..config.width);
            let y = rng.random_range(0..config.height);
            let cell = &mut mines[nd((x, y))];
            if !*cell {
                *cell = true;
                placed += 1;
            }
        }
        log::debug!(
            "placed {} mines on a {}x{} board",
            placed,
            config.width,
            config.height
        );

        Self {
            mines,
            count: placed,
        }
    }

    /// Deterministic constructor from explicit mine positions. Duplicate
    /// positions collapse into one mine.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mines: Array2<bool> = Array2::default(nd(size));

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mines[nd(coords)] = true;
        }

        let count = mines.iter().filter(|&&mine| mine).count() as CellCount;
        Ok(Self { mines, count })
    }

    pub fn size(&self) -> Coord2 {
        let (width, height) = self.mines.dim();
        (width as Coord, height as Coord)
    }

    pub fn mine_count(&self) -> CellCount {
        self.count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mines.len() as CellCount
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Number of mines among the up-to-8 in-bounds neighbors.
    pub fn adjacent_mines(&self, coords: Coord2) -> u8 {
        self.neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    pub(crate) fn neighbors(&self, coords: Coord2) -> Neighbors {
        Neighbors::new(coords, self.size())
    }

    pub(crate) fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (width, height) = self.size();
        if coords.0 < width && coords.1 < height {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }
}

impl Index<Coord2> for Minefield {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mines[nd(coords)]
    }
}

/// Resolved content of a cell: a mine, or the count of adjacent mines.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellContent {
    Mine,
    Number(u8),
}

/// Outcome of a reveal request.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    /// Nothing happened: the cell was already revealed or is flagged.
    NoChange,
    /// A safe cell (and possibly its zero-connected region) was opened.
    Revealed,
    /// A mine was opened; the game is lost.
    HitMine,
    /// The last safe cell was opened; the game is won.
    Won,
}

impl RevealOutcome {
    /// Whether this outcome changed the board.
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Outcome of a flag request.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    /// The cell is already revealed; flagging it is meaningless.
    NoChange,
    /// The flag was set or removed.
    Toggled,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Toggled)
    }
}
