//! Error types shared by every reducer in the crate.

use thiserror::Error;

/// Result type for reducer operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while building or running reducers.
///
/// All of these are reported synchronously to the direct caller. Nothing is
/// retried or swallowed.
#[derive(Error, Debug)]
pub enum Error {
    /// A state that already carries a dependency snapshot was wrapped again.
    #[error("state is already wrapped with a dependency snapshot")]
    AlreadyWrapped,

    /// A reducer with dependencies returned a wrapped state instead of a plain value.
    #[error("reducer `{reducer}` returned a wrapped state")]
    WrappedOutput { reducer: String },

    /// The same name was given to two reducers in one mapping.
    #[error("duplicate reducer name `{0}`")]
    DuplicateName(String),

    /// Converting between typed values and states failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Application reducer failure, passed through untouched.
    #[error(transparent)]
    Reducer(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap an application error raised inside a reducer.
    pub fn reducer(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Reducer(err.into())
    }
}
