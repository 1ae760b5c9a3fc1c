// crates/resilience/src/lib.rs
//! Retry support for fault-tolerant remote operations
//!
//! The storefront API is known to return semantically incomplete results on
//! the first call after a period of inactivity; an identical repeated call
//! typically succeeds. Callers wrap their whole fetch-and-validate unit in
//! [`with_retry`] under an explicit [`RetryPolicy`].
//!
//! # Example
//!
//! ```rust
//! use shelfsync_resilience::{with_retry, RetryPolicy};
//!
//! # async fn example() {
//! let policy = RetryPolicy::new(3);
//! let result = with_retry(&policy, || async { Ok::<_, std::io::Error>(42) }).await;
//! assert_eq!(result.ok(), Some(42));
//! # }
//! ```

mod error;
mod retry;

pub use error::RetryError;
pub use retry::{with_retry, RetryPolicy};
