//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Upstream call:
//!     → gateway issues request (client-level request timeout)
//!     → On failure: retries.rs (check if retryable, sleep per backoff.rs)
//!     → budget exhausted: last error returned to the caller unchanged
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every upstream call has a deadline
//! - Retry budget is measured in elapsed time, not attempt count
//! - Backoff is per call; concurrent calls retry independently

pub mod backoff;
pub mod retries;

pub use retries::{retry_with_backoff, RetryPolicy, Retryable};
