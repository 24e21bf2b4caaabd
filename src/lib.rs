//! Crossword-style grid packer.
//!
//! Given a word list, searches for a dense, fully interlocking packing of
//! the words into a fixed-size square grid, optionally with 180-degree
//! rotational symmetry. The search is best-first over whole grid states:
//! states are scored by interlock density, queued in a score-bucketed
//! frontier with exact duplicate elimination, and expanded in rounds until
//! the frontier converges or a time budget runs out.

pub mod config;
pub mod error;
pub mod grid;
pub mod lexicon;
pub mod search;

pub use config::SearchParams;
pub use error::{PackError, PackResult};
pub use grid::GridState;
pub use lexicon::Lexicon;
pub use search::{Search, SearchOptions};
