//! One expansion step for a state popped off the frontier.
//!
//! Priorities per step: a pending symmetry anchor forces the mirrored
//! placement; else one pending adjacency pair is resolved; else the state
//! is a solution candidate and the hotspot sweep looks for the next
//! placement. The sweep fills the grid from the top-left diagonal outward
//! and prefers words that butt up tightly against what is already there --
//! picking freely anywhere would branch far too wide.

use crate::grid::{
    is_free, is_letter, is_marker, level_of, level_start, mirror, Dir, GridState, ATTR_BORDER,
    GRID, LEVEL_MAX, MARKER,
};

use super::runner::Search;

impl Search<'_> {
    /// Expand `state` by one placement decision (or a batch of
    /// symmetry-forced ones). Successors land on the frontier; `state`
    /// itself is spent afterwards and may be mutated freely here.
    pub fn scan_step(&mut self, state: &mut GridState) {
        let lex = self.lex;

        if self.opts.symmetrical {
            if let Some(anchor) = state.sym {
                // The mirror image of the previous word is owed: every
                // unplaced word of the right length gets a try, nothing
                // else happens this step.
                for w in (0..lex.num_words()).rev() {
                    if !state.words.contains(w) && lex.word(w).len() == anchor.len {
                        self.place_word(state, anchor.xy, w, anchor.dir);
                    }
                }
                return;
            }
        }

        // Resolve one pending crossing: each word in its chain is a
        // candidate successor.
        if let Some(pair) = state.adj.pop() {
            for (_, link) in lex.chain(pair.link) {
                let anchor = pair.xy + link.ofs as i32 * pair.dir.step();
                self.place_word(state, anchor, link.word as usize, pair.dir);
            }
            return;
        }

        // No outstanding obligations: the grid is internally consistent and
        // may claim the solution slot.
        if state.numword > self.solution.numword {
            self.solution.clone_from(state);
        }

        let g = GRID as i32;
        let mut level = state.first_level;
        while level <= state.last_level && level <= LEVEL_MAX {
            if !self.opts.symmetrical {
                // Tight fit: only words whose last cell lands exactly on the
                // sweep's lower bound, keeping the frontier diagonal moving.
                let mut placed = 0;
                let mut xy = level_start(level);
                while state.attr(xy) & ATTR_BORDER == 0 {
                    for dir in [Dir::Across, Dir::Down] {
                        if state.attr(xy) & dir.attr() == 0 {
                            continue;
                        }
                        for (_, link) in lex.chain(lex.link1(state.cell(xy))) {
                            let anchor = xy + link.ofs as i32 * dir.step();
                            if anchor >= 0
                                && level_of(anchor) == state.first_level
                                && self.place_word(state, anchor, link.word as usize, dir)
                            {
                                placed += 1;
                            }
                        }
                    }
                    if placed > 0 {
                        return;
                    }
                    xy += g - 1;
                }
            }

            // Abutting words: anchor marker falls on an existing marker, so
            // the word packs flush against a previous word or the border.
            let mut placed = 0;
            let mut xy = level_start(level);
            while state.attr(xy) & ATTR_BORDER == 0 {
                for dir in [Dir::Across, Dir::Down] {
                    if state.attr(xy) & dir.attr() == 0 {
                        continue;
                    }
                    for (_, link) in lex.chain(lex.link1(state.cell(xy))) {
                        let anchor = xy + link.ofs as i32 * dir.step();
                        if is_marker(state.cell(anchor))
                            && self.place_word(state, anchor, link.word as usize, dir)
                        {
                            placed += 1;
                        }
                        if self.opts.symmetrical {
                            let wlen = lex.word(link.word as usize).len() as i32;
                            let end = anchor + (wlen - 1) * dir.step();
                            if is_marker(state.cell(mirror(end)))
                                && self.place_word(state, anchor, link.word as usize, dir)
                            {
                                placed += 1;
                            }
                        }
                    }
                }
                if placed > 0 {
                    return;
                }
                xy += g - 1;
            }

            // Word fragments: anything overlapping existing letters. A cell
            // that cannot host a single word in an orientation gets its hint
            // cleared and its neighbors blocked. That pruning is knowingly
            // not 100% correct -- it can discard completable grids -- but it
            // is what keeps the branching factor survivable.
            let mut placed = 0;
            let mut has_free = false;
            let mut xy = level_start(level);
            while state.attr(xy) & ATTR_BORDER == 0 {
                if is_free(state.cell(xy)) {
                    has_free = true;
                }
                for dir in [Dir::Across, Dir::Down] {
                    if state.attr(xy) & dir.attr() == 0 {
                        continue;
                    }
                    let mut cnt = 0;
                    for (_, link) in lex.chain(lex.link1(state.cell(xy))) {
                        let anchor = xy + link.ofs as i32 * dir.step();
                        if !is_marker(state.cell(anchor))
                            && self.place_word(state, anchor, link.word as usize, dir)
                        {
                            cnt += 1;
                        }
                        // One word is enough to keep the cell alive.
                        if !self.opts.symmetrical && cnt != 0 {
                            break;
                        }
                    }
                    if cnt == 0 {
                        state.attrs[xy as usize] &= !dir.attr();
                        let s = dir.step();
                        state.cells[(xy - s) as usize] = MARKER;
                        state.cells[(xy + s) as usize] = MARKER;
                        if self.opts.symmetrical {
                            for nb in [xy - s, xy + s] {
                                let m = mirror(nb);
                                if is_letter(state.cell(m)) {
                                    // Mirror cell already committed: the
                                    // whole state is contradictory.
                                    return;
                                }
                                state.cells[m as usize] = MARKER;
                            }
                        }
                    }
                    placed += cnt;
                }
                if placed > 0 {
                    return;
                }
                xy += g - 1;
            }

            // A diagonal with no free cell left is settled for good.
            if !has_free {
                state.first_level = level + 1;
            }
            level += 1;
        }
    }
}
