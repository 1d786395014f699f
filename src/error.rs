use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while converting drawings.
///
/// `Parse`, `Geometry` and `Serialization` are scoped to a single input file, the run loop recovers
/// from them. `Discovery` and `Plot` abort the run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot scan '{}': {message}", root.display())]
    Discovery { root: PathBuf, message: String },

    #[error("cannot read drawing '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("{0}")]
    Geometry(String),

    #[error("cannot write '{}': {message}", path.display())]
    Serialization { path: PathBuf, message: String },

    #[error("debug plot failed: {0}")]
    Plot(String),
}

impl Error {
    pub fn parse(path: impl Into<PathBuf>, e: impl std::fmt::Display) -> Self {
        Error::Parse {
            path: path.into(),
            message: e.to_string(),
        }
    }

    pub fn serialization(path: impl Into<PathBuf>, e: impl std::fmt::Display) -> Self {
        Error::Serialization {
            path: path.into(),
            message: e.to_string(),
        }
    }

    /// Errors the run loop handles per file.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Parse { .. } | Error::Geometry(_) | Error::Serialization { .. }
        )
    }
}
