use std::time::Duration;

use proptest::collection::vec;
use proptest::prelude::*;

use crosspack::grid::{is_letter, CELLS, GRID};
use crosspack::lexicon::Lexicon;
use crosspack::search::{Search, SearchOptions};

/// Recompute the incremental content hash from the cells alone. Every
/// letter cell was written into a free cell exactly once, so folding over
/// the final letters reproduces the running value.
fn hash_of_cells(cells: &[u8; CELLS]) -> u32 {
    let mut hash = 0u32;
    for (xy, &c) in cells.iter().enumerate() {
        if is_letter(c) {
            hash = hash.wrapping_add(
                (123_456u32.wrapping_add(xy as u32))
                    .wrapping_mul(123_456u32.wrapping_sub(c as u32)),
            );
        }
    }
    hash
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn solutions_are_internally_consistent(
        words in vec("[a-e]{2,5}", 1..12),
        symmetrical in any::<bool>(),
    ) {
        let lex = Lexicon::from_words(words.iter().map(String::as_str)).unwrap();
        let opts = SearchOptions {
            symmetrical,
            time_max: Duration::from_secs(10),
            node_max: 200,
            max_states: 100_000,
            ..SearchOptions::default()
        };
        let mut search = Search::new(&lex, opts);
        search.run();
        let solution = search.solution();

        // Counters agree with the cell plane.
        prop_assert_eq!(solution.letter_count(), solution.numchar as usize);
        prop_assert_eq!(solution.count_word_starts(), solution.numword as usize);
        prop_assert_eq!(hash_of_cells(&solution.cells), solution.hash);

        // Every run of letters on the grid is a word from the input.
        for run in solution.word_runs() {
            prop_assert!(
                words.contains(&run),
                "grid contains unlisted word '{}'", run
            );
        }

        // Letters stay in the interior and within the alphabet.
        for (xy, &c) in solution.cells.iter().enumerate() {
            if is_letter(c) {
                let (x, y) = (xy % GRID, xy / GRID);
                prop_assert!((1..GRID - 1).contains(&x) && (1..GRID - 1).contains(&y));
                prop_assert!((1..=26).contains(&c));
            }
        }
    }
}
