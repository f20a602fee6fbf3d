use std::{
    fmt::{Display, Write},
    ops::Index,
    str::FromStr,
};

use itertools::Itertools;
use rand::{seq::SliceRandom, Rng};
use smallvec::SmallVec;
use thiserror::Error;

pub const SIZE: usize = 3;
pub const CELLS: usize = SIZE * SIZE;
pub const BLANK: u8 = 0;

pub const GOAL: State = State([1, 2, 3, 4, 5, 6, 7, 8, 0]);

// grid-adjacent cells of each cell, row-major
const NEIGHBOURS: [&[usize]; CELLS] = [
    &[1, 3],
    &[0, 2, 4],
    &[1, 5],
    &[0, 4, 6],
    &[1, 3, 5, 7],
    &[2, 4, 8],
    &[3, 7],
    &[4, 6, 8],
    &[5, 7],
];

/// A 3x3 board flattened row-major, `0` being the blank.
///
/// The only ways to obtain one are the validating constructors and [`GOAL`],
/// so every `State` holds each of `0..=8` exactly once.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct State([u8; CELLS]);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("expected 9 tiles, got {len}")]
    WrongLength { len: usize },
    #[error("tile {tile} is outside 0-8")]
    InvalidTile { tile: u32 },
    #[error("tile {tile} appears more than once")]
    DuplicateTile { tile: u8 },
    #[error("`{token}` is not a tile number")]
    BadToken { token: String },
}

impl State {
    pub fn new(tiles: [u8; CELLS]) -> Result<State, StateError> {
        let mut seen = [false; CELLS];
        for &tile in &tiles {
            let slot = seen
                .get_mut(tile as usize)
                .ok_or(StateError::InvalidTile { tile: tile.into() })?;
            if *slot {
                return Err(StateError::DuplicateTile { tile });
            }
            *slot = true;
        }

        Ok(State(tiles))
    }

    pub const fn tiles(&self) -> &[u8; CELLS] {
        &self.0
    }

    pub fn blank(&self) -> usize {
        match self.0.iter().position(|&t| t == BLANK) {
            Some(ix) => ix,
            None => unreachable!("state without a blank"),
        }
    }

    /// Tiles that can currently slide into the blank.
    pub fn moves(&self) -> SmallVec<[u8; 4]> {
        NEIGHBOURS[self.blank()].iter().map(|&ix| self.0[ix]).collect()
    }

    /// Slides `tile` into the blank, if it is next to it.
    pub fn slide(&self, tile: u8) -> Option<State> {
        successors(self)
            .into_iter()
            .find(|&(_, moved)| moved == tile)
            .map(|(next, _)| next)
    }

    /// Shuffles until the permutation is solvable; half of all shuffles are.
    pub fn random_solvable<R: Rng + ?Sized>(rng: &mut R) -> State {
        let mut tiles = GOAL.0;
        loop {
            tiles.shuffle(rng);
            let state = State(tiles);
            if is_solvable(&state) {
                return state;
            }
        }
    }
}

/// Every state reachable by one slide, paired with the tile that moved.
pub fn successors(state: &State) -> SmallVec<[(State, u8); 4]> {
    let blank = state.blank();
    NEIGHBOURS[blank]
        .iter()
        .map(|&ix| {
            let mut next = state.0;
            next.swap(blank, ix);
            (State(next), state.0[ix])
        })
        .collect()
}

/// Pairs of non-blank tiles that appear out of order.
pub fn inversions(state: &State) -> usize {
    state
        .0
        .iter()
        .filter(|&&t| t != BLANK)
        .tuple_combinations()
        .filter(|(a, b)| a > b)
        .count()
}

// on an odd-width board a slide never changes inversion parity,
// and the goal has none
pub fn is_solvable(state: &State) -> bool {
    inversions(state) % 2 == 0
}

impl TryFrom<[u8; CELLS]> for State {
    type Error = StateError;

    fn try_from(tiles: [u8; CELLS]) -> Result<Self, Self::Error> {
        State::new(tiles)
    }
}

// accepts "123456780" as well as "1 2 3 4 5 6 7 8 0" or "1,2,3,..."
impl FromStr for State {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let values: Vec<u32> = if s.bytes().all(|b| b.is_ascii_digit()) {
            s.bytes().map(|b| u32::from(b - b'0')).collect()
        } else {
            s.split(|c: char| c == ',' || c.is_whitespace())
                .filter(|token| !token.is_empty())
                .map(|token| {
                    token.parse::<u32>().map_err(|_| StateError::BadToken {
                        token: token.to_string(),
                    })
                })
                .collect::<Result<_, _>>()?
        };

        if values.len() != CELLS {
            return Err(StateError::WrongLength { len: values.len() });
        }

        let mut tiles = [BLANK; CELLS];
        for (slot, &value) in tiles.iter_mut().zip(&values) {
            *slot =
                u8::try_from(value).map_err(|_| StateError::InvalidTile { tile: value })?;
        }

        State::new(tiles)
    }
}

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for row in self.0.chunks(SIZE) {
            if !first {
                f.write_char('\n')?;
            } else {
                first = false;
            }

            let line = row
                .iter()
                .map(|&t| if t == BLANK { '.' } else { (b'0' + t) as char })
                .join(" ");
            f.write_str(&line)?;
        }

        Ok(())
    }
}

impl Index<usize> for State {
    type Output = u8;
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}
