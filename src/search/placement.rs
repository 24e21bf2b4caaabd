//! Placement legality and execution.
//!
//! `test_word` answers "could this word go here" without touching anything.
//! `Search::place_word` re-runs the same scan while recording every crossing
//! the new letters would form, confirms each crossing can actually be
//! satisfied by some word, and only then pays for the state copy. Crossings
//! are *not* placed here; they stay on the state's worklist and are resolved
//! by later scan steps, which keeps per-placement cost bounded.

use crate::grid::{
    is_free, is_letter, is_marker, level_of, mirror, AdjPair, Dir, GridState, ADJ_MAX, CELLS,
};
use crate::lexicon::{Lexicon, WordId};

use super::runner::Search;

/// Non-mutating legality check for `word` anchored (leading marker cell) at
/// `anchor` in orientation `dir`.
///
/// Every crossing the new letters would form must exist as a 2- or 3-cell
/// window somewhere in the lexicon; which word will satisfy it is left open.
pub fn test_word(
    lex: &Lexicon,
    state: &GridState,
    symmetrical: bool,
    anchor: i32,
    word: WordId,
    dir: Dir,
) -> bool {
    let w = lex.word(word);
    let step = dir.step();
    let cstep = dir.cross().step();
    let last = anchor + (w.len() as i32 - 1) * step;

    if anchor < 0 || last > CELLS as i32 - 1 {
        return false;
    }
    if symmetrical {
        // Both mirror-image end cells are reserved for the mirrored word.
        if is_letter(state.cell(mirror(anchor))) || is_letter(state.cell(mirror(last))) {
            return false;
        }
    }

    let mut xy = anchor;
    for &wc in w.cells() {
        let cur = state.cell(xy);
        if cur != wc {
            if !is_free(cur) {
                return false;
            }
            if !is_marker(wc) {
                let before = state.cell(xy - cstep);
                let after = state.cell(xy + cstep);
                if is_letter(before) || is_letter(after) {
                    let head = if is_free(before) {
                        lex.link2(wc, after)
                    } else if is_free(after) {
                        lex.link2(before, wc)
                    } else {
                        lex.link3(before, wc, after)
                    };
                    if head == 0 {
                        return false;
                    }
                }
            }
        }
        xy += step;
    }
    true
}

impl Search<'_> {
    /// Try to place `word` at `anchor` in orientation `dir`, derived from
    /// `src`. On success the new state is scored and queued (where exact
    /// duplicate elimination may still swallow it) and `true` is returned;
    /// on rejection nothing changes and `false` is returned.
    ///
    /// `src` is read-only and must not be arena-resident.
    pub fn place_word(&mut self, src: &GridState, anchor: i32, word: WordId, dir: Dir) -> bool {
        let lex = self.lex;
        let w = lex.word(word);
        let step = dir.step();
        let cross = dir.cross();
        let cstep = cross.step();
        let last = anchor + (w.len() as i32 - 1) * step;

        if src.words.contains(word) {
            return false;
        }
        if anchor < 0 || last > CELLS as i32 - 1 {
            return false;
        }
        if self.opts.symmetrical
            && (is_letter(src.cell(mirror(anchor))) || is_letter(src.cell(mirror(last))))
        {
            return false;
        }

        // Pass 1: the conflict/crossing scan of test_word, but recording
        // each crossing as a pending adjacency pair.
        let mut pending: Vec<AdjPair> = Vec::new();
        let mut xy = anchor;
        for &wc in w.cells() {
            let cur = src.cell(xy);
            if cur != wc {
                if !is_free(cur) {
                    return false;
                }
                if !is_marker(wc) {
                    let before = src.cell(xy - cstep);
                    let after = src.cell(xy + cstep);
                    if is_letter(before) || is_letter(after) {
                        let (axy, head) = if is_free(before) {
                            (xy, lex.link2(wc, after))
                        } else if is_free(after) {
                            (xy - cstep, lex.link2(before, wc))
                        } else {
                            (xy - cstep, lex.link3(before, wc, after))
                        };
                        if head == 0 || src.adj.len() + pending.len() == ADJ_MAX - 1 {
                            return false;
                        }
                        pending.push(AdjPair {
                            dir: cross,
                            xy: axy,
                            link: head,
                        });
                    }
                }
            }
            xy += step;
        }

        // Pass 2: confirm each new pair against the pre-placement grid --
        // some word in its chain must be placeable at its implied anchor.
        // The surviving chain position is kept so the cost is paid once.
        for pair in &mut pending {
            let mut found = 0;
            for (link_id, link) in lex.chain(pair.link) {
                let a = pair.xy + link.ofs as i32 * pair.dir.step();
                if test_word(lex, src, self.opts.symmetrical, a, link.word as usize, pair.dir) {
                    found = link_id;
                    break;
                }
            }
            if found == 0 {
                return false;
            }
            pair.link = found;
        }

        // Pass 3: all checks passed, pay for the copy and apply.
        let id = self.arena.alloc_from(src);
        {
            let state = self.arena.get_mut(id);
            state.words.insert(word);
            state.numword += 1;
            state.adj.extend_from_slice(&pending);

            let mut xy = anchor;
            for &wc in w.cells() {
                let i = xy as usize;
                if !is_marker(wc) {
                    state.attrs[i] &= !dir.attr();

                    // A pending pair covered by this word is now resolved;
                    // a cell carries at most one per orientation.
                    if let Some(k) = state
                        .adj
                        .iter()
                        .position(|e| e.dir == dir && e.xy == xy)
                    {
                        state.adj.swap_remove(k);
                    }

                    if is_free(state.cells[i]) {
                        state.hash = state.hash.wrapping_add(
                            (123_456u32.wrapping_add(xy as u32))
                                .wrapping_mul(123_456u32.wrapping_sub(wc as u32)),
                        );
                        state.attrs[i] |= cross.attr();
                        state.numchar += 1;
                    } else {
                        state.numconn += 1;
                    }
                }
                state.cells[i] = wc;
                xy += step;
            }

            let lv = level_of(last);
            if lv > state.last_level {
                state.last_level = lv;
            }

            if self.opts.symmetrical {
                state.sym = match state.sym {
                    // The mirrored counterpart of this word is owed next.
                    None => Some(crate::grid::SymAnchor {
                        dir,
                        xy: mirror(last),
                        len: w.len(),
                    }),
                    // This placement just paid off the pending anchor.
                    Some(_) => None,
                };
            }
        }

        self.frontier
            .insert(id, &mut self.arena, &self.opts, &mut self.stats);
        true
    }
}
