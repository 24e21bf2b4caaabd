use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};

use crosspack::lexicon::Lexicon;
use crosspack::search::{Search, SearchOptions};

const WORDS: &[&str] = &[
    "stone", "notes", "tones", "onset", "seton", "steno", "tensor", "nestor",
    "stoner", "tenors", "toners", "trones", "snort", "snore", "store", "torse",
];

fn bench_lexicon_build(c: &mut Criterion) {
    c.bench_function("lexicon_build", |b| {
        b.iter(|| Lexicon::from_words(black_box(WORDS).iter().copied()).unwrap())
    });
}

fn bench_bounded_search(c: &mut Criterion) {
    let lex = Lexicon::from_words(WORDS.iter().copied()).unwrap();
    let opts = SearchOptions {
        time_max: Duration::from_secs(60),
        node_max: 50,
        max_states: 100_000,
        ..SearchOptions::default()
    };

    c.bench_function("bounded_search", |b| {
        b.iter(|| {
            let mut search = Search::new(&lex, opts.clone());
            search.run();
            black_box(search.solution().numword)
        })
    });
}

criterion_group!(benches, bench_lexicon_build, bench_bounded_search);
criterion_main!(benches);
