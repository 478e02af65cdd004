use std::io;

use thiserror::Error;

/// Fatal conditions. Anything here unwinds to `main`, which reports the
/// error after the terminal guard has restored cooked mode.
#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal i/o: {0}")]
    Terminal(#[from] io::Error),

    #[error("could not determine window size")]
    WindowSize,

    #[error("cannot open {path}: {source}")]
    Open { path: String, source: io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
