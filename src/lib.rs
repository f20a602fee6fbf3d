//! Optimal 8-puzzle solving with A*.
//!
//! Callers build a [`State`] (parsing validates it), gate on [`is_solvable`],
//! then call [`search()`] with one of the [`Heuristic`]s.

mod heuristic;
mod node;
mod search;
mod state;

pub use heuristic::{hamming, manhattan, Estimate, Heuristic, UnknownHeuristic};
pub use node::{Node, NodeId};
pub use search::{search, Solution};
pub use state::{
    inversions, is_solvable, successors, State, StateError, BLANK, CELLS, GOAL, SIZE,
};
