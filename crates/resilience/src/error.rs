// crates/resilience/src/error.rs
//! Error type for retried operations

use thiserror::Error;

/// Returned when every attempt of a retried operation failed
///
/// Carries the error from the final attempt so callers see exactly what the
/// operation last reported, not a stringified summary.
#[derive(Debug, Error)]
pub enum RetryError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    /// All attempts exhausted; `source` is the final attempt's error
    #[error("all {attempts} attempts failed: {source}")]
    Exhausted {
        attempts: usize,
        #[source]
        source: E,
    },
}

impl<E> RetryError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    /// Number of attempts that were made
    pub fn attempts(&self) -> usize {
        match self {
            Self::Exhausted { attempts, .. } => *attempts,
        }
    }

    /// Consumes the wrapper and yields the final attempt's error
    pub fn into_source(self) -> E {
        match self {
            Self::Exhausted { source, .. } => source,
        }
    }

    /// Borrows the final attempt's error
    pub fn last_error(&self) -> &E {
        match self {
            Self::Exhausted { source, .. } => source,
        }
    }
}
