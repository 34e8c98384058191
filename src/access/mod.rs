//! Access layer subsystem.
//!
//! # Data Flow
//! ```text
//! Route handler
//!     → layer.rs (cache lookup)
//!     → hit: cached value
//!     → miss: upstream gateway (possibly many concurrent calls)
//!         → store in cache → return
//! ```

pub mod error;
pub mod layer;

pub use error::{AccessError, AccessResult};
pub use layer::AccessLayer;
