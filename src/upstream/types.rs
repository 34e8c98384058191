//! Upstream record types and error definitions.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;

use crate::resilience::Retryable;

/// The four player lists carried by every team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RosterKind {
    Bench,
    Lineup,
    Rotation,
    Bullpen,
}

impl RosterKind {
    /// Fan-out order used when assembling all players.
    pub const ALL: [RosterKind; 4] = [
        RosterKind::Bench,
        RosterKind::Lineup,
        RosterKind::Rotation,
        RosterKind::Bullpen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RosterKind::Bench => "bench",
            RosterKind::Lineup => "lineup",
            RosterKind::Rotation => "rotation",
            RosterKind::Bullpen => "bullpen",
        }
    }
}

/// A team as returned by upstream.
///
/// Only the id and roster lists are interpreted here; every other field is
/// kept verbatim for the route layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub lineup: Vec<String>,
    #[serde(default)]
    pub rotation: Vec<String>,
    #[serde(default)]
    pub bullpen: Vec<String>,
    #[serde(default)]
    pub bench: Vec<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Team {
    /// Player ids on one of the team's rosters.
    pub fn roster(&self, kind: RosterKind) -> &[String] {
        match kind {
            RosterKind::Bench => &self.bench,
            RosterKind::Lineup => &self.lineup,
            RosterKind::Rotation => &self.rotation,
            RosterKind::Bullpen => &self.bullpen,
        }
    }
}

/// A player as returned by upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Errors that can occur while talking to upstream.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Upstream answered with a non-2xx status.
    #[error("upstream {route} returned HTTP {status}")]
    Status { route: &'static str, status: StatusCode },

    /// Connection, timeout or body transfer failure.
    #[error("upstream {route} request failed: {source}")]
    Transport {
        route: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The retry budget ran out while the first attempt was in flight.
    #[error("upstream {route} did not answer within {budget:?}")]
    DeadlineExceeded { route: &'static str, budget: Duration },

    /// A 2xx body that is not the expected JSON shape.
    #[error("upstream {route} returned an unreadable body: {source}")]
    Decode {
        route: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The request was rejected before it was sent.
    #[error("invalid upstream request: {0}")]
    InvalidRequest(String),

    /// The configured base URL cannot be joined with a route.
    #[error("invalid upstream URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl UpstreamError {
    /// HTTP status carried by the error, if upstream answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            UpstreamError::Transport { source, .. } => source.status(),
            _ => None,
        }
    }
}

impl Retryable for UpstreamError {
    fn is_retryable(&self) -> bool {
        matches!(self, UpstreamError::Status { .. } | UpstreamError::Transport { .. })
    }

    fn deadline_exceeded(route: &'static str, budget: Duration) -> Self {
        UpstreamError::DeadlineExceeded { route, budget }
    }
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;
