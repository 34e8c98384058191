//! Cached access to upstream teams and players.
//!
//! # Responsibilities
//! - Memoize all-teams, team-by-id and all-players with short TTLs
//! - Pass player batches straight through to upstream
//! - Assemble the full player list by fanning out over every team roster
//!
//! # Design Decisions
//! - Concurrent misses are not coalesced; last writer wins in the cache
//! - Fan-out is all-or-nothing: the first failed roster fetch aborts the
//!   whole call and nothing is cached
//! - Fan-out results are collected positionally, so output order is
//!   (team order × roster order) regardless of completion order

use futures_util::future::try_join_all;
use std::sync::Arc;
use std::time::Duration;

use crate::access::error::{AccessError, AccessResult};
use crate::cache::TtlCache;
use crate::config::CacheConfig;
use crate::upstream::{Player, RosterKind, Team, Upstream, UpstreamGateway};

/// The public contract for obtaining teams and players.
pub struct AccessLayer<U = UpstreamGateway> {
    upstream: U,
    teams: TtlCache<(), Arc<Vec<Team>>>,
    team: TtlCache<String, Team>,
    players: TtlCache<(), Arc<Vec<Player>>>,
}

impl<U: Upstream> AccessLayer<U> {
    /// Create an access layer over `upstream` with cache settings from `config`.
    pub fn new(upstream: U, config: &CacheConfig) -> Self {
        Self {
            upstream,
            teams: TtlCache::new("all_teams", 1, Duration::from_secs(config.teams_ttl_secs)),
            team: TtlCache::new("team", config.team_capacity, Duration::from_secs(config.team_ttl_secs)),
            players: TtlCache::new("all_players", 1, Duration::from_secs(config.players_ttl_secs)),
        }
    }

    /// The upstream this layer reads through to.
    pub fn upstream(&self) -> &U {
        &self.upstream
    }

    /// Every team, served from cache while fresh.
    pub async fn all_teams(&self) -> AccessResult<Arc<Vec<Team>>> {
        self.teams.get_or_try_insert_with((), || self.fetch_all_teams()).await
    }

    /// One team by id. Only the most recently fetched ids are memoized.
    pub async fn team(&self, id: &str) -> AccessResult<Team> {
        self.team
            .get_or_try_insert_with(id.to_string(), || self.fetch_team(id))
            .await
    }

    /// A batch of players, uncached. Order is whatever upstream returns.
    pub async fn players(&self, ids: &[String]) -> AccessResult<Vec<Player>> {
        Ok(self.upstream.fetch_players(ids).await?)
    }

    /// A single player, or `NotFound` if upstream has no record for `id`.
    pub async fn player(&self, id: &str) -> AccessResult<Player> {
        let players = self.players(&[id.to_string()]).await?;
        players.into_iter().next().ok_or_else(|| AccessError::NotFound {
            kind: "player",
            id: id.to_string(),
        })
    }

    /// Every rostered player across all teams, served from cache while fresh.
    pub async fn all_players(&self) -> AccessResult<Arc<Vec<Player>>> {
        self.players.get_or_try_insert_with((), || self.fetch_all_players()).await
    }

    async fn fetch_all_teams(&self) -> AccessResult<Arc<Vec<Team>>> {
        let teams = self.upstream.fetch_all_teams().await?;
        tracing::info!(count = teams.len(), "Fetched all teams");
        Ok(Arc::new(teams))
    }

    async fn fetch_team(&self, id: &str) -> AccessResult<Team> {
        let team = self.upstream.fetch_team(id).await?;
        tracing::debug!(team_id = %team.id, "Fetched team");
        Ok(team)
    }

    // The players endpoint fails on very large batches, so fetch per roster.
    async fn fetch_all_players(&self) -> AccessResult<Arc<Vec<Player>>> {
        let teams = self.all_teams().await?;

        let per_team = try_join_all(teams.iter().map(|team| self.team_players(team)))
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Player fan-out failed"))?;

        let players: Vec<Player> = per_team.into_iter().flatten().collect();
        tracing::info!(teams = teams.len(), players = players.len(), "Assembled all players");
        Ok(Arc::new(players))
    }

    async fn team_players(&self, team: &Team) -> AccessResult<Vec<Player>> {
        let sublists = try_join_all(
            RosterKind::ALL
                .iter()
                .map(|kind| self.players(team.roster(*kind))),
        )
        .await?;

        Ok(sublists.into_iter().flatten().collect())
    }
}

impl<U> std::fmt::Debug for AccessLayer<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessLayer")
            .field("teams", &self.teams)
            .field("team", &self.team)
            .field("players", &self.players)
            .finish()
    }
}
