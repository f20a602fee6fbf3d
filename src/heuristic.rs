use std::{fmt::Display, str::FromStr};

use itertools::Itertools;
use thiserror::Error;

use crate::state::{State, BLANK, CELLS, GOAL, SIZE};

// tile -> index of that tile in GOAL
const GOAL_INDEX: [usize; CELLS] = {
    let mut index = [0; CELLS];
    let mut ix = 0;
    while ix < CELLS {
        index[GOAL.tiles()[ix] as usize] = ix;
        ix += 1;
    }
    index
};

/// A lower bound on the number of moves left to reach [`GOAL`].
///
/// Implementations must be admissible and consistent for [`crate::search()`]
/// to return optimal paths.
pub trait Estimate {
    fn estimate(&self, state: &State) -> u32;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heuristic {
    Hamming,
    Manhattan,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown heuristic `{0}` (expected `hamming` or `manhattan`)")]
pub struct UnknownHeuristic(String);

impl Heuristic {
    pub const ALL: [Heuristic; 2] = [Heuristic::Hamming, Heuristic::Manhattan];

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Hamming => "hamming",
            Heuristic::Manhattan => "manhattan",
        }
    }
}

impl Estimate for Heuristic {
    fn estimate(&self, state: &State) -> u32 {
        match self {
            Heuristic::Hamming => hamming(state),
            Heuristic::Manhattan => manhattan(state),
        }
    }
}

impl Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = UnknownHeuristic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Heuristic::ALL
            .into_iter()
            .find(|h| h.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownHeuristic(s.to_string()))
    }
}

/// Number of tiles, blank excluded, that are not where the goal has them.
pub fn hamming(state: &State) -> u32 {
    state
        .tiles()
        .iter()
        .zip_eq(GOAL.tiles())
        .filter(|&(&t, &g)| t != BLANK && t != g)
        .count() as u32
}

/// Sum over tiles, blank excluded, of the grid distance to their goal cell.
pub fn manhattan(state: &State) -> u32 {
    state
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(_, &t)| t != BLANK)
        .map(|(ix, &t)| grid_distance(ix, GOAL_INDEX[t as usize]))
        .sum()
}

fn grid_distance(from: usize, to: usize) -> u32 {
    let rows = (from / SIZE).abs_diff(to / SIZE);
    let cols = (from % SIZE).abs_diff(to % SIZE);
    (rows + cols) as u32
}

#[cfg(test)]
mod test {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::state::successors;

    fn state(s: &str) -> State {
        s.parse().unwrap()
    }

    #[test]
    fn goal_index_inverts_goal() {
        for (ix, &tile) in GOAL.tiles().iter().enumerate() {
            assert_eq!(GOAL_INDEX[tile as usize], ix);
        }
    }

    #[test]
    fn goal_costs_nothing() {
        assert_eq!(hamming(&GOAL), 0);
        assert_eq!(manhattan(&GOAL), 0);
    }

    #[test]
    fn known_values() {
        // 8 one step right of home
        let s = state("123456708");
        assert_eq!(hamming(&s), 1);
        assert_eq!(manhattan(&s), 1);

        // 3, 4 and 7 are home; 8 is three steps away
        let s = state("813402765");
        assert_eq!(hamming(&s), 5);
        assert_eq!(manhattan(&s), 10);
    }

    #[test]
    fn manhattan_dominates_hamming() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let s = State::random_solvable(&mut rng);
            if s == GOAL {
                continue;
            }
            assert!(hamming(&s) > 0);
            assert!(manhattan(&s) >= hamming(&s));
        }
    }

    #[test]
    fn both_are_consistent() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let s = State::random_solvable(&mut rng);
            for (next, _) in successors(&s) {
                for h in Heuristic::ALL {
                    assert!(h.estimate(&s) <= 1 + h.estimate(&next), "{} at {:?}", h, s);
                }
            }
        }
    }

    #[test]
    fn enum_dispatches_to_functions() {
        let s = state("867254301");
        assert_eq!(Heuristic::Hamming.estimate(&s), hamming(&s));
        assert_eq!(Heuristic::Manhattan.estimate(&s), manhattan(&s));
    }

    #[test]
    fn parses_names() {
        assert_eq!("hamming".parse::<Heuristic>(), Ok(Heuristic::Hamming));
        assert_eq!(" Manhattan ".parse::<Heuristic>(), Ok(Heuristic::Manhattan));
        assert!("euclid".parse::<Heuristic>().is_err());
        for h in Heuristic::ALL {
            assert_eq!(h.to_string().parse::<Heuristic>(), Ok(h));
        }
    }
}
