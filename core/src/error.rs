//! Error taxonomy of the assessment pipeline.
//!
//! None of these reach the caller of `Engine::assess`: they are converted into
//! the generic technical-error result at the top of the call.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    #[error("{field} is {len} characters long, limit is {max}")]
    InputTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("internal error: {0}")]
    Internal(String),
}
