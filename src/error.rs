use thiserror::Error;

/// Only invalid user input is rejectable: storage failures degrade to
/// defaults and operations on missing identifiers are silent no-ops.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("validation failed: {0}")]
    Validation(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
