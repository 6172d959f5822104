use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A producer line that cannot be interpreted as a relative path
    /// under the tree root. Never fatal: the tree builder counts and
    /// skips these.
    #[error("malformed path line: {line:?}")]
    MalformedInput { line: String },

    /// The find command could not be run and the fallback walk also
    /// produced nothing usable.
    #[error("cannot run find command `{cmd}`: {source}")]
    Producer { cmd: String, source: io::Error },

    /// Terminal setup, drawing or event-read failure. Fatal to the
    /// session; the terminal is restored before this propagates.
    #[error("terminal failure: {0}")]
    Render(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
