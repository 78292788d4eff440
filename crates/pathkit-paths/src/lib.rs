//! Priority queue and A* search for implicit graphs.
//!
//! - [`PriorityQueue`] is an array-backed binary heap ordered by any strict
//!   "has higher priority than" predicate.
//! - [`search`] / [`find_path`] run A* over any [`AstarPather`], stopping at
//!   the first node that satisfies a goal predicate.
//! - [`astar`] / [`astar_to`] take the graph as plain closures instead.
//! - [`GridMap`] is a small maze type, handy for puzzles and tests.
//!
//! The graph is never materialised: it is defined entirely by the
//! neighbor, cost and estimate functions. Searches run to completion on
//! the calling thread and keep no state between calls.
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | node type, neighbor enumeration |
//! | [`WeightedPather`] : [`Pather`] | edge costs |
//! | [`AstarPather`] : [`WeightedPather`] | remaining-cost estimate |

mod astar;
mod grid;
mod heap;
mod traits;

pub use astar::{
    Path, SearchOutcome, SearchStats, astar, astar_to, find_path, find_path_to, search,
};
pub use grid::{GridError, GridMap, Movement, chebyshev, manhattan};
pub use heap::{MinOrder, PriorityQueue};
pub use traits::{AstarPather, Cost, FnPather, Pather, WeightedPather};
