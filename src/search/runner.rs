//! The round-based search loop and its context object.
//!
//! All mutable search state -- arena, frontier, solution slot, counters --
//! lives in one `Search` value, so independent searches can run side by
//! side (tests do). Each round drains the whole frontier in descending
//! score order and expands states one scan step at a time; successors are
//! deferred to the next round. The wall clock is only consulted between
//! rounds: a pathological round is bounded by the node budget instead.

use std::time::{Duration, Instant};

use tracing::{debug, error};

use crate::config::SearchParams;
use crate::grid::arena::Arena;
use crate::grid::{Dir, GridState, GRID};
use crate::lexicon::Lexicon;

use super::frontier::Frontier;

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub symmetrical: bool,
    /// Wall-clock budget, checked once per round. Zero still lets seeding
    /// and the first round complete.
    pub time_max: Duration,
    /// Per-round budget of completed-state expansions.
    pub node_max: usize,
    /// Hard ceiling on arena slots before the search gives up.
    pub max_states: usize,
    /// Print the best grid after every round.
    pub dump_rounds: bool,
    /// Print every grid accepted by the frontier.
    pub dump_inserts: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            symmetrical: false,
            time_max: Duration::from_secs(585),
            node_max: 15_000,
            max_states: 4_000_000,
            dump_rounds: false,
            dump_inserts: false,
        }
    }
}

impl From<&SearchParams> for SearchOptions {
    fn from(params: &SearchParams) -> Self {
        SearchOptions {
            symmetrical: params.symmetrical,
            time_max: Duration::from_secs(params.time_max),
            node_max: params.node_max,
            max_states: params.max_states,
            dump_rounds: false,
            dump_inserts: false,
        }
    }
}

/// Counters; the per-round ones reset at every round start.
#[derive(Debug, Default)]
pub struct SearchStats {
    /// Global insertion sequence.
    pub seqnr: u64,
    pub rounds: u64,
    /// States accepted by the frontier this round.
    pub inserted: usize,
    /// Accepted states with an empty worklist this round; the node budget
    /// counts these.
    pub completed: usize,
    /// Completed-state expansions this round.
    pub scans: usize,
    /// Full grid compares triggered by score+hash matches this round.
    pub hash_tests: usize,
    /// Compares that turned out not to be duplicates.
    pub hash_collisions: usize,
}

impl SearchStats {
    fn begin_round(&mut self) {
        self.inserted = 0;
        self.completed = 0;
        self.scans = 0;
        self.hash_tests = 0;
        self.hash_collisions = 0;
    }
}

/// One packing search over a fixed lexicon.
pub struct Search<'a> {
    pub lex: &'a Lexicon,
    pub opts: SearchOptions,
    pub arena: Arena,
    pub frontier: Frontier,
    /// Best complete grid seen so far; only ever replaced by a strictly
    /// better one.
    pub solution: GridState,
    pub stats: SearchStats,
}

impl<'a> Search<'a> {
    pub fn new(lex: &'a Lexicon, opts: SearchOptions) -> Self {
        Search {
            lex,
            opts,
            arena: Arena::new(),
            frontier: Frontier::new(),
            solution: GridState::default(),
            stats: SearchStats::default(),
        }
    }

    /// Queue the initial single-word grids.
    pub fn seed(&mut self) {
        let lex = self.lex;
        let g = GRID as i32;
        let mut init = GridState::seed();
        if self.opts.symmetrical {
            // Work from the middle out; short words leave the forced mirror
            // placement nothing to cross with.
            for w in (0..lex.num_words()).rev() {
                let wlen = lex.word(w).len() as i32;
                if wlen >= 5 {
                    let anchor = (g / 2 + 2 - wlen) + (g / 2) * g;
                    self.place_word(&init, anchor, w, Dir::Across);
                }
            }
        } else {
            // Work from the top-left corner down.
            init.first_level = 2;
            for w in (0..lex.num_words()).rev() {
                self.place_word(&init, g, w, Dir::Across);
            }
        }
    }

    /// Run rounds until the frontier converges, the deadline passes, or the
    /// arena ceiling is hit. Returns the best grid found (possibly empty).
    pub fn run(&mut self) -> &GridState {
        self.seed();
        let start = Instant::now();

        loop {
            self.stats.begin_round();

            let todo = self.frontier.drain();
            let mut exhausted = false;
            for id in todo {
                if self.arena.allocated() >= self.opts.max_states {
                    exhausted = true;
                    break;
                }
                let mut state = self.arena.take(id);
                if !state.adj.is_empty() || self.stats.completed < self.opts.node_max {
                    if state.adj.is_empty() {
                        self.stats.scans += 1;
                    }
                    self.scan_step(&mut state);
                }
            }
            self.stats.rounds += 1;

            if exhausted {
                error!(
                    states = self.arena.allocated(),
                    "state arena exhausted, reporting best grid found so far"
                );
                break;
            }

            if start.elapsed() >= self.opts.time_max {
                debug!(
                    elapsed = ?start.elapsed(),
                    words = self.solution.numword,
                    "time budget spent"
                );
                break;
            }

            debug!(
                round = self.stats.rounds,
                words = self.solution.numword,
                score = self.solution.score,
                level_lo = self.solution.first_level,
                level_hi = self.solution.last_level,
                scans = self.stats.scans,
                completed = self.stats.completed,
                inserted = self.stats.inserted,
                hash_tests = self.stats.hash_tests,
                hash_collisions = self.stats.hash_collisions,
                elapsed_s = start.elapsed().as_secs(),
                "round finished"
            );
            if self.opts.dump_rounds {
                println!("{}", self.solution);
            }

            // A round that accepted nothing means the frontier is truly
            // spent.
            if self.stats.inserted == 0 {
                break;
            }
        }
        &self.solution
    }

    pub fn solution(&self) -> &GridState {
        &self.solution
    }
}
