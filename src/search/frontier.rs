//! Score-bucketed frontier with exact duplicate elimination.
//!
//! States are clustered into buckets by quantized score; within a bucket
//! they are kept ordered by descending score, then descending hash, so
//! candidate duplicates sit next to each other. Hash equality only triggers
//! a full cell-array compare; the hash can produce false positives but a
//! genuine duplicate is always caught.

use crate::grid::arena::{Arena, NodeId};

use super::runner::{SearchOptions, SearchStats};

/// Score quantization resolution.
pub const SCORE_BUCKETS: usize = 1000;

pub struct Frontier {
    buckets: Vec<Vec<NodeId>>,
}

impl Default for Frontier {
    fn default() -> Self {
        Frontier::new()
    }
}

impl Frontier {
    pub fn new() -> Self {
        Frontier {
            buckets: vec![Vec::new(); SCORE_BUCKETS],
        }
    }

    /// Score the state, insert it in order, and drop it back into the arena
    /// if an identical grid is already queued. Returns whether it was kept.
    pub fn insert(
        &mut self,
        id: NodeId,
        arena: &mut Arena,
        opts: &SearchOptions,
        stats: &mut SearchStats,
    ) -> bool {
        let (score, hash, adj_empty) = {
            let state = arena.get(id);
            let score = if state.numchar == 0 {
                0.0
            } else {
                state.numconn as f32 / state.numchar as f32
            };
            (score, state.hash, state.adj.is_empty())
        };
        arena.get_mut(id).score = score;

        let bi = ((score * (SCORE_BUCKETS - 1) as f32) as isize)
            .clamp(0, SCORE_BUCKETS as isize - 1) as usize;
        let bucket = &mut self.buckets[bi];

        // Ordered positional insert: first entry we outrank (or tie with on
        // hash) marks the spot.
        let mut i = 0;
        while i < bucket.len() {
            let other = arena.get(bucket[i]);
            if score > other.score || (score == other.score && hash >= other.hash) {
                break;
            }
            i += 1;
        }

        // Everything from here with matching score and hash is a duplicate
        // suspect; only a byte-identical grid is a true duplicate.
        while i < bucket.len() {
            let other = arena.get(bucket[i]);
            if score != other.score || hash != other.hash {
                break;
            }
            stats.hash_tests += 1;
            if arena.get(id).cells == other.cells {
                arena.release(id);
                return false;
            }
            stats.hash_collisions += 1;
            i += 1;
        }

        if opts.dump_inserts {
            println!("{}", arena.get(id));
        }

        let state = arena.get_mut(id);
        state.seqnr = stats.seqnr;
        stats.seqnr += 1;
        if adj_empty {
            stats.completed += 1;
        }
        stats.inserted += 1;
        bucket.insert(i, id);
        true
    }

    /// Empty every bucket into one worklist, highest score first; bucket
    /// order (descending score, then hash) is preserved.
    pub fn drain(&mut self) -> Vec<NodeId> {
        let mut out = Vec::new();
        for bucket in self.buckets.iter_mut().rev() {
            out.append(bucket);
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|b| b.is_empty())
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.len()).sum()
    }
}
