//! Errors of the surface layers. The evaluator core has none: every
//! well-formed term is reducible or already normal.

use std::path::PathBuf;

use thiserror::Error;

use crate::parser::Rule;

#[derive(Debug, Error)]
pub enum Error {
    /// Lex or parse failure; pest renders it with the offending span
    /// underlined.
    #[error("{0}")]
    Parse(#[from] Box<pest::error::Error<Rule>>),
    /// A file could not be read for `:load` or preloading.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
