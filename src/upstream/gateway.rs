//! HTTP gateway to the upstream game-data API.
//!
//! # Responsibilities
//! - Build upstream URLs from the configured base
//! - Attach the session cookie to every request
//! - Retry transport and status failures within the elapsed budget
//! - Deserialize JSON bodies into upstream records

use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::Instant;
use url::Url;

use crate::config::{RetryConfig, UpstreamConfig};
use crate::resilience::{retry_with_backoff, RetryPolicy};
use crate::upstream::types::{Player, Team, UpstreamError, UpstreamResult};
use crate::upstream::Upstream;

const ALL_TEAMS_ROUTE: &str = "database/allTeams";
const TEAM_ROUTE: &str = "database/team";
const PLAYERS_ROUTE: &str = "database/players";

/// Issues individual upstream calls. Holds one pooled client for its
/// whole lifetime.
#[derive(Clone)]
pub struct UpstreamGateway {
    client: reqwest::Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl UpstreamGateway {
    /// Create a gateway for `config.base_url`, authenticating every request
    /// with `config.auth_cookie`.
    pub fn new(config: &UpstreamConfig, retries: &RetryConfig) -> UpstreamResult<Self> {
        let base_url = Url::parse(&config.base_url)?;

        let mut cookie = HeaderValue::from_str(&format!("connect.sid={}", config.auth_cookie))
            .map_err(|_| UpstreamError::InvalidRequest("auth cookie is not a valid header value".to_string()))?;
        cookie.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, cookie);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("splortshub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| UpstreamError::Transport { route: "client", source })?;

        tracing::info!(
            base_url = %base_url,
            request_timeout_secs = config.request_timeout_secs,
            "Upstream gateway initialized"
        );

        Ok(Self {
            client,
            base_url,
            retry: RetryPolicy::from(retries),
        })
    }

    /// GET `route` with `query`, retrying per policy, and decode the body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        route: &'static str,
        query: &[(&str, &str)],
    ) -> UpstreamResult<T> {
        let url = self.base_url.join(route)?;
        let started = Instant::now();

        let url_ref = &url;
        let result = retry_with_backoff(&self.retry, route, move || self.get_once(url_ref, route, query)).await;

        let outcome = if result.is_ok() { "ok" } else { "error" };
        metrics::counter!("hub_upstream_requests_total", "route" => route, "outcome" => outcome).increment(1);
        tracing::debug!(route, outcome, elapsed = ?started.elapsed(), "Upstream call finished");

        result
    }

    async fn get_once<T: DeserializeOwned>(
        &self,
        url: &Url,
        route: &'static str,
        query: &[(&str, &str)],
    ) -> UpstreamResult<T> {
        let response = self
            .client
            .get(url.clone())
            .query(query)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport { route, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status { route, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| UpstreamError::Transport { route, source })?;

        serde_json::from_slice(&body).map_err(|source| UpstreamError::Decode { route, source })
    }
}

impl Upstream for UpstreamGateway {
    async fn fetch_all_teams(&self) -> UpstreamResult<Vec<Team>> {
        self.get_json(ALL_TEAMS_ROUTE, &[]).await
    }

    async fn fetch_team(&self, id: &str) -> UpstreamResult<Team> {
        if id.trim().is_empty() {
            return Err(UpstreamError::InvalidRequest("team id must not be empty".to_string()));
        }
        self.get_json(TEAM_ROUTE, &[("id", id)]).await
    }

    async fn fetch_players(&self, ids: &[String]) -> UpstreamResult<Vec<Player>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let joined = ids.join(",");
        self.get_json(PLAYERS_ROUTE, &[("ids", joined.as_str())]).await
    }
}

impl std::fmt::Debug for UpstreamGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamGateway")
            .field("base_url", &self.base_url.as_str())
            .field("retry", &self.retry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> UpstreamConfig {
        UpstreamConfig {
            base_url: base_url.to_string(),
            auth_cookie: "s%3Acookie".to_string(),
            request_timeout_secs: 1,
        }
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = UpstreamGateway::new(&config("::not a url::"), &RetryConfig::default());
        assert!(matches!(result, Err(UpstreamError::InvalidUrl(_))));
    }

    #[test]
    fn test_invalid_cookie_rejected() {
        let mut config = config("http://127.0.0.1:1/");
        config.auth_cookie = "line\nbreak".to_string();
        let result = UpstreamGateway::new(&config, &RetryConfig::default());
        assert!(matches!(result, Err(UpstreamError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_empty_team_id_skips_network() {
        // Port 1 is never listening; an attempted request would surface as Transport.
        let gateway = UpstreamGateway::new(&config("http://127.0.0.1:1/"), &RetryConfig::default()).unwrap();
        let err = gateway.fetch_team("").await.unwrap_err();
        assert!(matches!(err, UpstreamError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_empty_player_batch_skips_network() {
        let gateway = UpstreamGateway::new(&config("http://127.0.0.1:1/"), &RetryConfig::default()).unwrap();
        let players = gateway.fetch_players(&[]).await.unwrap();
        assert!(players.is_empty());
    }

    #[test]
    fn test_routes_join_onto_base() {
        let base = Url::parse("https://blaseball.com/").unwrap();
        assert_eq!(base.join(ALL_TEAMS_ROUTE).unwrap().as_str(), "https://blaseball.com/database/allTeams");
    }
}
