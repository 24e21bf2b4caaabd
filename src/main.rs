use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::info;
use tracing::level_filters::LevelFilter;

use crosspack::config::SearchParams;
use crosspack::lexicon::Lexicon;
use crosspack::search::{Search, SearchOptions};

/// Pack a word list into a dense interlocking crossword grid.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Word list file, one word per line; reads stdin when omitted.
    wordlist: Option<PathBuf>,

    #[command(flatten)]
    params: SearchParams,

    /// Increase log verbosity (-d: debug, -dd: trace).
    #[arg(short = 'd', long = "debug", action = clap::ArgAction::Count)]
    debug: u8,

    /// Dump intermediate grids (-D: per round, -DD: every accepted grid).
    #[arg(short = 'D', long = "dump", action = clap::ArgAction::Count)]
    dump: u8,
}

fn init_tracing(debug: u8) {
    let level = match debug {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn load_lexicon(path: Option<&PathBuf>) -> crosspack::PackResult<Lexicon> {
    match path {
        Some(p) => Lexicon::from_reader(BufReader::new(File::open(p)?)),
        None => Lexicon::from_reader(io::stdin().lock()),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let lex = match load_lexicon(cli.wordlist.as_ref()) {
        Ok(lex) => lex,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    };
    info!(
        words = lex.num_words(),
        links = lex.num_links(),
        "word list loaded"
    );

    let mut opts = SearchOptions::from(&cli.params);
    opts.dump_rounds = cli.dump >= 1;
    opts.dump_inserts = cli.dump >= 2;

    let mut search = Search::new(&lex, opts);
    search.run();
    let solution = search.solution();

    println!("{solution}");
    info!(
        words = solution.numword,
        letters = solution.numchar,
        crossings = solution.numconn,
        score = solution.score,
        rounds = search.stats.rounds,
        "search finished"
    );
}
