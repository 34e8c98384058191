use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::api::schema::{TeamView, TeamsResponse};
use crate::http::response::ApiError;
use crate::http::server::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct TeamSearch {
    #[serde(default)]
    pub full_name: String,
}

pub async fn list_teams(State(state): State<AppState>) -> Result<Json<TeamsResponse>, ApiError> {
    let teams = state.access.all_teams().await?;
    let teams = teams.iter().map(TeamView::try_from).collect::<Result<Vec<_>, _>>()?;
    Ok(Json(TeamsResponse { teams }))
}

pub async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<TeamView>, ApiError> {
    let team = state.access.team(&team_id).await?;
    Ok(Json(TeamView::try_from(&team)?))
}

/// First team whose upstream `fullName` matches exactly; any team when the
/// query is empty.
pub async fn search_teams(
    State(state): State<AppState>,
    Query(search): Query<TeamSearch>,
) -> Result<Json<TeamView>, ApiError> {
    let teams = state.access.all_teams().await?;
    let found = teams
        .iter()
        .find(|team| {
            search.full_name.is_empty()
                || team.fields.get("fullName").and_then(Value::as_str) == Some(search.full_name.as_str())
        })
        .ok_or(ApiError::NotFound("Team not found"))?;

    Ok(Json(TeamView::try_from(found)?))
}
