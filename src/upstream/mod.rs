//! Upstream game-data API subsystem.
//!
//! # Data Flow
//! ```text
//! AccessLayer (cache miss)
//!     → Upstream trait (this file)
//!     → gateway.rs (build URL, attach session cookie, GET)
//!     → resilience::retries (backoff on transport / status failures)
//!     → types.rs (deserialize Team / Player)
//! ```
//!
//! # Design Decisions
//! - Pure request/response; no caching at this level
//! - One long-lived HTTP client, credential fixed at construction
//! - The trait is the seam the access layer is generic over

pub mod gateway;
pub mod types;

use std::future::Future;

pub use gateway::UpstreamGateway;
pub use types::{Player, RosterKind, Team, UpstreamError, UpstreamResult};

/// Source of raw team and player records.
pub trait Upstream: Send + Sync + 'static {
    /// GET `database/allTeams`.
    fn fetch_all_teams(&self) -> impl Future<Output = UpstreamResult<Vec<Team>>> + Send;

    /// GET `database/team?id={id}`.
    fn fetch_team(&self, id: &str) -> impl Future<Output = UpstreamResult<Team>> + Send;

    /// GET `database/players?ids={ids}`; an empty `ids` yields an empty list.
    fn fetch_players(&self, ids: &[String]) -> impl Future<Output = UpstreamResult<Vec<Player>>> + Send;
}
