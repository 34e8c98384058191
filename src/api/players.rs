use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::api::schema::{PlayerView, PlayersResponse};
use crate::http::response::ApiError;
use crate::http::server::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PlayerSearch {
    #[serde(default)]
    pub name: String,
}

pub async fn list_players(State(state): State<AppState>) -> Result<Json<PlayersResponse>, ApiError> {
    let players = state.access.all_players().await?;
    let players = players.iter().map(PlayerView::try_from).collect::<Result<Vec<_>, _>>()?;
    Ok(Json(PlayersResponse { players }))
}

pub async fn get_player(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<PlayerView>, ApiError> {
    let player = state.access.player(&player_id).await?;
    Ok(Json(PlayerView::try_from(&player)?))
}

/// First player whose `name` matches exactly; any player when the query is
/// empty.
pub async fn search_players(
    State(state): State<AppState>,
    Query(search): Query<PlayerSearch>,
) -> Result<Json<PlayerView>, ApiError> {
    let players = state.access.all_players().await?;
    let found = players
        .iter()
        .find(|player| {
            search.name.is_empty()
                || player.fields.get("name").and_then(Value::as_str) == Some(search.name.as_str())
        })
        .ok_or(ApiError::NotFound("Player not found"))?;

    Ok(Json(PlayerView::try_from(found)?))
}
