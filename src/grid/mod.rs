//! Grid state: cell encoding, per-cell hints, and the candidate snapshot
//! type the search expands.
//!
//! The grid is a bordered square; only the interior can hold letters. Cells
//! hold letter codes 1..=26, a boundary marker (word delimiter / blocked
//! cell), or the free marker. A parallel attribute plane carries the
//! "a word of this orientation could still start through here" hints plus
//! the border flag.

pub mod arena;

use std::fmt;

use crate::lexicon::LinkId;

/// Side of the bordered grid square.
pub const GRID: usize = 22;
/// Total cell count.
pub const CELLS: usize = GRID * GRID;

/// Letter codes are 1..=26; adding this yields the ASCII letter.
pub const LETTER_BASE: u8 = b'a' - 1;
/// Word delimiter / blocked cell.
pub const MARKER: u8 = 28;
/// Unoccupied interior cell.
pub const FREE: u8 = 31;

/// An across word may still run through this cell.
pub const ATTR_ACROSS: u8 = 1;
/// A down word may still run through this cell.
pub const ATTR_DOWN: u8 = 2;
/// Cell belongs to the grid border.
pub const ATTR_BORDER: u8 = 4;

/// Bound on unresolved adjacency pairs carried by one state.
pub const ADJ_MAX: usize = 128;

/// Deepest diagonal level the sweep will visit.
pub const LEVEL_MAX: i16 = (GRID * 2 - 4) as i16;

#[inline]
pub fn is_letter(c: u8) -> bool {
    c < MARKER
}

#[inline]
pub fn is_marker(c: u8) -> bool {
    c == MARKER
}

#[inline]
pub fn is_free(c: u8) -> bool {
    c == FREE
}

/// Diagonal distance of a cell from the top-left corner.
#[inline]
pub fn level_of(xy: i32) -> i16 {
    (xy % GRID as i32 + xy / GRID as i32) as i16
}

/// First cell of a diagonal, walked towards bottom-left in steps of
/// `GRID - 1`.
pub fn level_start(level: i16) -> i32 {
    let l = level as i32;
    let g = GRID as i32;
    if l < g {
        l + g - 1
    } else {
        g * g - (2 * g - 3 - l) * g - 2
    }
}

/// Point reflection through the grid center.
#[inline]
pub fn mirror(xy: i32) -> i32 {
    CELLS as i32 - 1 - xy
}

/// Word orientation. `cross` is the orientation of any word formed
/// perpendicular to a placement.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Dir {
    Across,
    Down,
}

impl Dir {
    /// Cell index delta between consecutive letters.
    #[inline]
    pub fn step(self) -> i32 {
        match self {
            Dir::Across => 1,
            Dir::Down => GRID as i32,
        }
    }

    #[inline]
    pub fn cross(self) -> Dir {
        match self {
            Dir::Across => Dir::Down,
            Dir::Down => Dir::Across,
        }
    }

    /// Hint bit for words of this orientation.
    #[inline]
    pub fn attr(self) -> u8 {
        match self {
            Dir::Across => ATTR_ACROSS,
            Dir::Down => ATTR_DOWN,
        }
    }
}

/// Fixed-capacity set of placed word indices.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct WordSet {
    bits: [u64; 4],
}

impl WordSet {
    #[inline]
    pub fn insert(&mut self, w: usize) {
        self.bits[w >> 6] |= 1 << (w & 63);
    }

    #[inline]
    pub fn contains(&self, w: usize) -> bool {
        self.bits[w >> 6] & (1 << (w & 63)) != 0
    }

    pub fn len(&self) -> u32 {
        self.bits.iter().map(|b| b.count_ones()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&b| b == 0)
    }
}

/// Where the mirror image of the previous placement must go next.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SymAnchor {
    pub dir: Dir,
    pub xy: i32,
    pub len: usize,
}

/// A freshly created letter adjacency whose crossing word has been
/// validated tentatively but not yet placed. `xy` is the first cell of the
/// pair in `dir` order; `link` heads the lexicon chain that can satisfy it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AdjPair {
    pub dir: Dir,
    pub xy: i32,
    pub link: LinkId,
}

/// One candidate grid. Cheap to copy wholesale; the search produces a new
/// state per placement instead of mutating shared ones.
#[derive(Clone)]
pub struct GridState {
    /// Insertion sequence number, diagnostics only.
    pub seqnr: u64,
    pub words: WordSet,
    /// Placed words.
    pub numword: u32,
    /// Letters newly written into previously free cells.
    pub numchar: u32,
    /// Letter reuses (intersections).
    pub numconn: u32,
    /// Incremental content hash for duplicate pre-filtering.
    pub hash: u32,
    /// Sweep window: diagonals below `first_level` are settled, nothing was
    /// placed beyond `last_level`.
    pub first_level: i16,
    pub last_level: i16,
    /// numconn / numchar, filled in on frontier insertion.
    pub score: f32,
    pub sym: Option<SymAnchor>,
    /// Pending adjacency pairs awaiting a covering placement.
    pub adj: Vec<AdjPair>,
    pub cells: [u8; CELLS],
    pub attrs: [u8; CELLS],
}

impl Default for GridState {
    fn default() -> Self {
        GridState {
            seqnr: 0,
            words: WordSet::default(),
            numword: 0,
            numchar: 0,
            numconn: 0,
            hash: 0,
            first_level: 0,
            last_level: 0,
            score: 0.0,
            sym: None,
            adj: Vec::new(),
            cells: [MARKER; CELLS],
            attrs: [ATTR_BORDER; CELLS],
        }
    }
}

impl GridState {
    /// Empty grid: marked border ring, free interior.
    pub fn seed() -> Self {
        let mut g = GridState::default();
        for y in 1..GRID - 1 {
            for x in 1..GRID - 1 {
                g.cells[x + y * GRID] = FREE;
                g.attrs[x + y * GRID] = 0;
            }
        }
        g
    }

    /// Cell content; out-of-range reads behave like the border.
    #[inline]
    pub fn cell(&self, xy: i32) -> u8 {
        if (0..CELLS as i32).contains(&xy) {
            self.cells[xy as usize]
        } else {
            MARKER
        }
    }

    /// Cell attributes; out-of-range reads behave like the border.
    #[inline]
    pub fn attr(&self, xy: i32) -> u8 {
        if (0..CELLS as i32).contains(&xy) {
            self.attrs[xy as usize]
        } else {
            ATTR_BORDER
        }
    }

    /// Letter cells currently in the grid.
    pub fn letter_count(&self) -> usize {
        self.cells.iter().filter(|&&c| is_letter(c)).count()
    }

    /// Recount placed words from cell contents alone (a word starts where a
    /// letter has no predecessor and at least one successor).
    pub fn count_word_starts(&self) -> usize {
        let mut cnt = 0;
        for xy in 0..CELLS as i32 {
            if !is_letter(self.cell(xy)) {
                continue;
            }
            if !is_letter(self.cell(xy - 1)) && is_letter(self.cell(xy + 1)) {
                cnt += 1;
            }
            if !is_letter(self.cell(xy - GRID as i32)) && is_letter(self.cell(xy + GRID as i32)) {
                cnt += 1;
            }
        }
        cnt
    }

    /// Every maximal horizontal or vertical run of two or more letters.
    pub fn word_runs(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut flush = |run: &mut String| {
            if run.len() >= 2 {
                out.push(std::mem::take(run));
            } else {
                run.clear();
            }
        };
        for y in 0..GRID {
            let mut run = String::new();
            for x in 0..GRID {
                let c = self.cells[x + y * GRID];
                if is_letter(c) {
                    run.push((LETTER_BASE + c) as char);
                } else {
                    flush(&mut run);
                }
            }
            flush(&mut run);
        }
        for x in 0..GRID {
            let mut run = String::new();
            for y in 0..GRID {
                let c = self.cells[x + y * GRID];
                if is_letter(c) {
                    run.push((LETTER_BASE + c) as char);
                } else {
                    flush(&mut run);
                }
            }
            flush(&mut run);
        }
        out
    }
}

impl fmt::Display for GridState {
    /// Interior rows only: letters as themselves, everything else as `-`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 1..GRID - 1 {
            for x in 1..GRID - 1 {
                let c = self.cells[x + y * GRID];
                let ch = if is_letter(c) {
                    (LETTER_BASE + c) as char
                } else {
                    '-'
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
