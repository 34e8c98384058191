//! In-memory caching for upstream responses.
//!
//! Nothing here survives a restart; every cache is owned by the
//! `AccessLayer` that created it.

pub mod ttl;

pub use ttl::TtlCache;
