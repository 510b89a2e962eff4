use std::ops::Range;

use thiserror::Error;

/// The top-level error type for this crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// An argument was rejected before any work started.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The divisor was the zero complex value.
    #[error("attempted to divide by zero")]
    DivisionByZero,

    /// `0^0` has no value.
    #[error("0^0 is undefined")]
    UndefinedPower,

    #[error("could not parse {input:?} as a complex number: {reason}")]
    Parse { input: String, reason: &'static str },

    /// A band task did not complete and the scheduler was configured to
    /// propagate such failures.
    #[error("band {band} (rows {rows:?}) failed: {reason}")]
    WorkerFailure {
        band: usize,
        rows: Range<usize>,
        reason: String,
    },

    #[error("request {request_id} was cancelled")]
    Cancelled { request_id: u64 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) const fn parse(input: String, reason: &'static str) -> Self {
        Self::Parse { input, reason }
    }

    /// Errors that only affect the single computation they occurred in.
    #[must_use]
    pub const fn is_arithmetic(&self) -> bool {
        matches!(self, Self::DivisionByZero | Self::UndefinedPower)
    }
}
