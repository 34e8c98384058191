//! Read-through caching hub for the Blaseball game-data API.

pub mod access;
pub mod api;
pub mod cache;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod upstream;

pub use access::{AccessError, AccessLayer};
pub use config::schema::HubConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use upstream::{Upstream, UpstreamGateway};
