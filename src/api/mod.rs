//! Public API routes.
//!
//! Maps `/api/v1beta/*` endpoints onto access layer calls and renames
//! upstream fields into the public schema.

pub mod players;
pub mod schema;
pub mod status;
pub mod teams;

use axum::{routing::get, Router};
use crate::http::server::AppState;

pub fn setup_api_router() -> Router<AppState> {
    Router::new()
        .route("/", get(status::root))
        .route("/api/v1beta/status/", get(status::get_status))
        .route("/api/v1beta/teams/", get(teams::list_teams))
        .route("/api/v1beta/team/{team_id}", get(teams::get_team))
        .route("/api/v1beta/teams/search/", get(teams::search_teams))
        .route("/api/v1beta/players", get(players::list_players))
        .route("/api/v1beta/players/search/", get(players::search_players))
        .route("/api/v1beta/player/{player_id}", get(players::get_player))
}
