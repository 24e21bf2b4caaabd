//! The word list and its substring link table.
//!
//! Every word is stored flanked by boundary markers, so the marker cells
//! take part in 2- and 3-letter lookups: the window `(MARKER, c, a)` only
//! matches words that actually *start* with "ca", and `(t, MARKER)` only
//! words ending in "t". The link table maps every 1-, 2- and 3-cell window
//! occurring inside a word (markers included, except that 1-cell windows
//! are letters only) to a chain of (word, offset) entries. Offsets are
//! negative: adding `ofs * step` to the window's first cell yields the
//! anchor where the word's leading marker must sit.
//!
//! Legality of a crossing can then be pre-screened in O(1): if the window a
//! new letter would form with its neighbors has no chain, no word in the
//! list can ever justify that crossing.

use std::io::BufRead;

use crate::error::{PackError, PackResult};
use crate::grid::{LETTER_BASE, MARKER};

/// Bitset capacity for placed-word tracking; at most `WORD_MAX - 1` words
/// are accepted.
pub const WORD_MAX: usize = 256;
/// Cells per stored word, the two boundary markers included.
pub const WORD_CELLS_MAX: usize = 30;
/// Letters per word.
pub const WORD_LETTERS_MAX: usize = WORD_CELLS_MAX - 2;

pub type WordId = usize;

/// Index into the link chain store; 0 is the empty chain.
pub type LinkId = u16;

/// One normalized word: `MARKER, letters.., MARKER`.
#[derive(Debug)]
pub struct Word {
    cells: Vec<u8>,
}

impl Word {
    /// Cell sequence including both boundary markers.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Cell count including both boundary markers.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.len() <= 2
    }

    /// The word as text.
    pub fn letters(&self) -> String {
        self.cells[1..self.cells.len() - 1]
            .iter()
            .map(|&c| (LETTER_BASE + c) as char)
            .collect()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Link {
    pub next: LinkId,
    pub word: u16,
    /// Signed offset from the window's first cell back to the word's anchor.
    pub ofs: i16,
}

#[derive(Debug)]
pub struct Lexicon {
    words: Vec<Word>,
    links1: [LinkId; 32],
    links2: [[LinkId; 32]; 32],
    links3: Box<[[[LinkId; 32]; 32]; 32]>,
    links: Vec<Link>,
}

impl Lexicon {
    /// Read a newline-delimited word list: each line's leading run of
    /// alphabetic characters is the word, case-folded; one-letter words are
    /// dropped silently.
    pub fn from_reader<R: BufRead>(reader: R) -> PackResult<Lexicon> {
        let mut lex = Lexicon::empty();
        for line in reader.lines() {
            lex.add_line(&line?)?;
        }
        lex.build_links();
        Ok(lex)
    }

    /// Build directly from word strings, normalized the same way as file
    /// input.
    pub fn from_words<'w, I>(words: I) -> PackResult<Lexicon>
    where
        I: IntoIterator<Item = &'w str>,
    {
        let mut lex = Lexicon::empty();
        for w in words {
            lex.add_line(w)?;
        }
        lex.build_links();
        Ok(lex)
    }

    fn empty() -> Lexicon {
        Lexicon {
            words: Vec::new(),
            links1: [0; 32],
            links2: [[0; 32]; 32],
            links3: Box::new([[[0; 32]; 32]; 32]),
            // Slot 0 is the empty-chain sentinel.
            links: vec![Link {
                next: 0,
                word: 0,
                ofs: 0,
            }],
        }
    }

    fn add_line(&mut self, line: &str) -> PackResult<()> {
        let mut letters = Vec::new();
        for ch in line.chars() {
            if !ch.is_ascii_alphabetic() {
                break;
            }
            letters.push(ch.to_ascii_lowercase() as u8 - LETTER_BASE);
        }
        if letters.len() < 2 {
            return Ok(());
        }
        if letters.len() > WORD_LETTERS_MAX {
            return Err(PackError::WordTooLong {
                word: letters
                    .iter()
                    .map(|&c| (LETTER_BASE + c) as char)
                    .collect(),
                limit: WORD_LETTERS_MAX,
            });
        }
        if self.words.len() == WORD_MAX - 1 {
            return Err(PackError::TooManyWords {
                limit: WORD_MAX - 1,
            });
        }
        let mut cells = Vec::with_capacity(letters.len() + 2);
        cells.push(MARKER);
        cells.extend_from_slice(&letters);
        cells.push(MARKER);
        self.words.push(Word { cells });
        Ok(())
    }

    /// Register every window of every word. Offset-major, words in
    /// descending index order, pushing at chain heads: chain order is part
    /// of the engine's deterministic tie-breaking and must stay stable.
    fn build_links(&mut self) {
        let mut offset = 0;
        let mut done = false;
        while !done && offset < WORD_CELLS_MAX {
            done = true;
            for w in (0..self.words.len()).rev() {
                let cells = &self.words[w].cells;
                let n = cells.len();
                let ofs = -(offset as i16);
                if offset + 3 <= n {
                    let head =
                        &mut self.links3[cells[offset] as usize][cells[offset + 1] as usize]
                            [cells[offset + 2] as usize];
                    let next = *head;
                    *head = push_link(&mut self.links, next, w, ofs);
                    done = false;
                }
                if offset + 2 <= n {
                    let head =
                        &mut self.links2[cells[offset] as usize][cells[offset + 1] as usize];
                    let next = *head;
                    *head = push_link(&mut self.links, next, w, ofs);
                    done = false;
                }
                if offset >= 1 && offset + 2 <= n {
                    let head = &mut self.links1[cells[offset] as usize];
                    let next = *head;
                    *head = push_link(&mut self.links, next, w, ofs);
                    done = false;
                }
            }
            offset += 1;
        }
    }

    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    pub fn word(&self, w: WordId) -> &Word {
        &self.words[w]
    }

    pub fn num_links(&self) -> usize {
        self.links.len() - 1
    }

    /// Chain of words containing the single letter `c` in their interior.
    #[inline]
    pub fn link1(&self, c: u8) -> LinkId {
        self.links1[c as usize]
    }

    /// Chain of words containing the cell pair `a, b`.
    #[inline]
    pub fn link2(&self, a: u8, b: u8) -> LinkId {
        self.links2[a as usize][b as usize]
    }

    /// Chain of words containing the cell triple `a, b, c`.
    #[inline]
    pub fn link3(&self, a: u8, b: u8, c: u8) -> LinkId {
        self.links3[a as usize][b as usize][c as usize]
    }

    /// Walk a chain from `head` (which may be a mid-chain id).
    pub fn chain(&self, head: LinkId) -> LinkChain<'_> {
        LinkChain { lex: self, cur: head }
    }
}

fn push_link(links: &mut Vec<Link>, next: LinkId, word: usize, ofs: i16) -> LinkId {
    links.push(Link {
        next,
        word: word as u16,
        ofs,
    });
    (links.len() - 1) as LinkId
}

pub struct LinkChain<'a> {
    lex: &'a Lexicon,
    cur: LinkId,
}

impl Iterator for LinkChain<'_> {
    type Item = (LinkId, Link);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cur == 0 {
            return None;
        }
        let id = self.cur;
        let link = self.lex.links[id as usize];
        self.cur = link.next;
        Some((id, link))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(c: char) -> u8 {
        c as u8 - LETTER_BASE
    }

    #[test]
    fn windows_include_boundary_markers() {
        let lex = Lexicon::from_words(["cat"]).unwrap();
        assert_ne!(lex.link2(MARKER, code('c')), 0);
        assert_ne!(lex.link2(code('t'), MARKER), 0);
        assert_ne!(lex.link3(MARKER, code('c'), code('a')), 0);
        assert_ne!(lex.link3(code('a'), code('t'), MARKER), 0);
        // 1-cell windows never key on a bare marker.
        assert_eq!(lex.link1(MARKER), 0);
        assert_eq!(lex.link2(code('x'), code('y')), 0);
    }

    #[test]
    fn offsets_point_back_to_the_anchor() {
        let lex = Lexicon::from_words(["cat"]).unwrap();
        let hits: Vec<Link> = lex.chain(lex.link1(code('a'))).map(|(_, l)| l).collect();
        assert_eq!(hits.len(), 1);
        // 'a' sits two cells past the leading marker.
        assert_eq!(hits[0].ofs, -2);
        assert_eq!(hits[0].word, 0);
    }
}
