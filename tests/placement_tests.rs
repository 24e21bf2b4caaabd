use crosspack::grid::{
    is_free, is_letter, is_marker, mirror, Dir, GridState, ATTR_ACROSS, ATTR_DOWN, GRID,
};
use crosspack::lexicon::Lexicon;
use crosspack::search::{test_word, Search, SearchOptions};

fn lexicon(words: &[&str]) -> Lexicon {
    Lexicon::from_words(words.iter().copied()).unwrap()
}

fn code(c: char) -> u8 {
    c as u8 - (b'a' - 1)
}

/// Pop the single queued state off the search's frontier.
fn take_sole(search: &mut Search) -> GridState {
    let ids = search.frontier.drain();
    assert_eq!(ids.len(), 1, "expected exactly one queued state");
    search.arena.take(ids[0])
}

// Row 1, column 0: the leading boundary marker sits on the border and the
// letters start at column 1.
const ROW1: i32 = GRID as i32;

// --- PLACEMENT MECHANICS ---

#[test]
fn placing_a_word_writes_letters_and_bookkeeping() {
    let lex = lexicon(&["cat"]);
    let mut search = Search::new(&lex, SearchOptions::default());
    let seed = GridState::seed();

    assert!(search.place_word(&seed, ROW1, 0, Dir::Across));
    let state = take_sole(&mut search);

    assert_eq!(state.cell(ROW1 + 1), code('c'));
    assert_eq!(state.cell(ROW1 + 2), code('a'));
    assert_eq!(state.cell(ROW1 + 3), code('t'));
    // Both flanking markers are stamped, the trailing one into a free cell.
    assert!(is_marker(state.cell(ROW1 + 4)));

    assert_eq!(state.numword, 1);
    assert_eq!(state.numchar, 3);
    assert_eq!(state.numconn, 0);
    assert!(state.adj.is_empty());
    assert!(state.words.contains(0));

    // The across hint is spent on every letter cell; the down hint opens up.
    for xy in [ROW1 + 1, ROW1 + 2, ROW1 + 3] {
        assert_eq!(state.attr(xy) & ATTR_ACROSS, 0);
        assert_eq!(state.attr(xy) & ATTR_DOWN, ATTR_DOWN);
    }
}

#[test]
fn duplicate_grids_are_swallowed_by_the_frontier() {
    let lex = lexicon(&["cat"]);
    let mut search = Search::new(&lex, SearchOptions::default());
    let seed = GridState::seed();

    assert!(search.place_word(&seed, ROW1, 0, Dir::Across));
    assert!(search.place_word(&seed, ROW1, 0, Dir::Across));
    assert_eq!(search.frontier.len(), 1);
    assert_eq!(search.arena.live(), 1);
    assert_eq!(search.stats.hash_tests, 1);
    assert_eq!(search.stats.hash_collisions, 0);
}

#[test]
fn an_already_placed_word_is_rejected() {
    let lex = lexicon(&["cat"]);
    let mut search = Search::new(&lex, SearchOptions::default());
    let seed = GridState::seed();

    assert!(search.place_word(&seed, ROW1, 0, Dir::Across));
    let state = take_sole(&mut search);
    assert!(!search.place_word(&state, ROW1 + 3 * GRID as i32, 0, Dir::Across));
}

#[test]
fn conflicting_letters_are_rejected() {
    let lex = lexicon(&["cat", "dog"]);
    let mut search = Search::new(&lex, SearchOptions::default());
    let seed = GridState::seed();

    assert!(search.place_word(&seed, ROW1, 0, Dir::Across));
    let state = take_sole(&mut search);

    // "dog" straight over "cat" collides on every letter.
    assert!(!search.place_word(&state, ROW1, 1, Dir::Across));
}

#[test]
fn impossible_crossings_are_rejected() {
    let lex = lexicon(&["cat", "dog"]);
    let mut search = Search::new(&lex, SearchOptions::default());
    let seed = GridState::seed();

    assert!(search.place_word(&seed, ROW1, 0, Dir::Across));
    let state = take_sole(&mut search);

    // "dog" in the row below would form the vertical pairs cd, oa, gt.
    // None of them starts any listed word, so the placement must fail.
    assert_eq!(lex.link2(code('c'), code('d')), 0);
    assert!(!search.place_word(&state, ROW1 + GRID as i32, 1, Dir::Across));
}

#[test]
fn valid_crossings_are_recorded_as_pending_work() {
    let lex = lexicon(&["cat", "car", "art"]);
    let mut search = Search::new(&lex, SearchOptions::default());
    let seed = GridState::seed();

    assert!(search.place_word(&seed, ROW1, 0, Dir::Across));
    let cat = take_sole(&mut search);

    // "car" down through cat's 'c': the shared cell is a reuse, not a
    // crossing, so nothing is pending and numconn counts it.
    assert!(search.place_word(&cat, ROW1 + 1 - GRID as i32, 1, Dir::Down));
    let both = take_sole(&mut search);
    assert_eq!(both.numword, 2);
    assert_eq!(both.numconn, 1);
    assert_eq!(both.numchar, 5);
    assert!(both.adj.is_empty());
}

#[test]
fn out_of_bounds_anchors_are_rejected() {
    let lex = lexicon(&["cat"]);
    let mut search = Search::new(&lex, SearchOptions::default());
    let seed = GridState::seed();

    assert!(!search.place_word(&seed, -1, 0, Dir::Across));
    assert!(!search.place_word(&seed, GRID as i32 * GRID as i32 - 2, 0, Dir::Down));
    assert_eq!(search.frontier.len(), 0);
}

// --- TEST_WORD ---

#[test]
fn test_word_is_pure() {
    let lex = lexicon(&["cat"]);
    let state = GridState::seed();
    let before = state.cells;

    assert!(test_word(&lex, &state, false, ROW1, 0, Dir::Across));
    assert_eq!(state.cells, before);
    assert_eq!(state.numword, 0);
}

#[test]
fn test_word_rejects_conflicts() {
    let lex = lexicon(&["cat", "dog"]);
    let mut search = Search::new(&lex, SearchOptions::default());
    let seed = GridState::seed();
    assert!(search.place_word(&seed, ROW1, 0, Dir::Across));
    let state = take_sole(&mut search);

    assert!(!test_word(&lex, &state, false, ROW1, 1, Dir::Across));
    assert!(!test_word(&lex, &state, false, ROW1 + GRID as i32, 1, Dir::Across));
}

// --- SYMMETRY ---

#[test]
fn symmetric_placement_records_the_mirror_anchor() {
    let lex = lexicon(&["abcde"]);
    let opts = SearchOptions {
        symmetrical: true,
        ..SearchOptions::default()
    };
    let mut search = Search::new(&lex, opts);
    let seed = GridState::seed();

    let anchor = 6 + 11 * GRID as i32;
    assert!(search.place_word(&seed, anchor, 0, Dir::Across));
    let state = take_sole(&mut search);

    let sym = state.sym.expect("mirror placement must be owed");
    assert_eq!(sym.dir, Dir::Across);
    assert_eq!(sym.len, lex.word(0).len());
    // The owed anchor is the point reflection of this word's trailing
    // marker cell.
    assert_eq!(sym.xy, mirror(anchor + 6));
}

#[test]
fn symmetric_placement_respects_reserved_mirror_cells() {
    let lex = lexicon(&["abcde"]);
    let opts = SearchOptions {
        symmetrical: true,
        ..SearchOptions::default()
    };
    let mut search = Search::new(&lex, opts);

    let mut seed = GridState::seed();
    let anchor = 6 + 11 * GRID as i32;
    // Occupy the mirror of the trailing marker with a letter.
    let blocked = mirror(anchor + 6);
    assert!(is_free(seed.cell(blocked)));
    seed.cells[blocked as usize] = code('z');
    assert!(is_letter(seed.cell(blocked)));

    assert!(!search.place_word(&seed, anchor, 0, Dir::Across));
}
