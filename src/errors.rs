use thiserror::Error as ThisError;

/// Faults the engine raises as Rust errors. Player-facing validation
/// failures are never errors; they travel back as reply text
/// ([`crate::Reply`]) with the session otherwise unchanged.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("could not load config: {0}")]
    Config(#[from] config::ConfigError),
}

/// Malformed input to the table renderer.
#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum RenderError {
    #[error("no rows were returned")]
    NoRows,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}
