//! Best-first branch-and-bound packing search.

mod frontier;
mod placement;
mod runner;
mod scan;

pub use frontier::{Frontier, SCORE_BUCKETS};
pub use placement::test_word;
pub use runner::{Search, SearchOptions, SearchStats};
