use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("word '{word}' is too long (limit {limit} letters)")]
    WordTooLong { word: String, limit: usize },

    #[error("too many words (limit {limit})")]
    TooManyWords { limit: usize },
}

pub type PackResult<T> = Result<T, PackError>;
