//! Public response schema.
//!
//! Upstream records use camelCase and `_id`; the public API uses snake_case
//! and `id`. Each view deserializes from the upstream names and serializes
//! under the public ones.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::http::response::ApiError;
use crate::upstream::{Player, Team};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct TeamView {
    #[serde(rename(deserialize = "_id"))]
    pub id: String,
    pub full_name: String,
    pub location: String,
    pub nickname: String,
    pub emoji: String,
    pub season_shames: i64,
    pub season_shamings: i64,
    pub shame_runs: i64,
    pub total_shames: i64,
    pub total_shamings: i64,
    pub slogan: String,
    pub championships: i64,
    pub lineup: Vec<String>,
    pub rotation: Vec<String>,
    pub bullpen: Vec<String>,
    pub bench: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct PlayerView {
    #[serde(rename(deserialize = "_id"))]
    pub id: String,
    pub anticapitalism: f64,
    pub base_thirst: f64,
    pub buoyancy: f64,
    pub chasiness: f64,
    pub coldness: f64,
    pub continuation: f64,
    pub divinity: f64,
    pub ground_friction: f64,
    pub indulgence: f64,
    pub laserlikeness: f64,
    pub martyrdom: f64,
    pub moxie: f64,
    pub musclitude: f64,
    pub name: String,
    pub bat: String,
    pub omniscience: f64,
    pub overpowerment: f64,
    pub patheticism: f64,
    pub ruthlessness: f64,
    pub shakespearianism: f64,
    pub suppression: f64,
    pub tenaciousness: f64,
    pub thwackability: f64,
    pub tragicness: f64,
    pub unthwackability: f64,
    pub watchfulness: f64,
    pub pressurization: f64,
    pub total_fingers: i64,
    pub soul: i64,
    pub deceased: bool,
    pub peanut_allergy: bool,
    pub cinnamon: f64,
    pub fate: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TeamsResponse {
    pub teams: Vec<TeamView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayersResponse {
    pub players: Vec<PlayerView>,
}

fn convert<S: Serialize, T: DeserializeOwned>(kind: &'static str, record: &S) -> Result<T, ApiError> {
    serde_json::to_value(record)
        .and_then(serde_json::from_value)
        .map_err(|source| ApiError::Malformed { kind, source })
}

impl TryFrom<&Team> for TeamView {
    type Error = ApiError;

    fn try_from(team: &Team) -> Result<Self, Self::Error> {
        convert("team", team)
    }
}

impl TryFrom<&Player> for PlayerView {
    type Error = ApiError;

    fn try_from(player: &Player) -> Result<Self, Self::Error> {
        convert("player", player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn upstream_team() -> serde_json::Value {
        json!({
            "_id": "T1",
            "fullName": "Hades Tigers",
            "location": "Hades",
            "nickname": "Tigers",
            "emoji": "0x1F405",
            "seasonShames": 1,
            "seasonShamings": 2,
            "shameRuns": 0,
            "totalShames": 3,
            "totalShamings": 4,
            "slogan": "Tiger Tiger",
            "championships": 1,
            "lineup": ["P1"],
            "rotation": ["P2"],
            "bullpen": [],
            "bench": []
        })
    }

    #[test]
    fn test_team_fields_renamed() {
        let team: Team = serde_json::from_value(upstream_team()).unwrap();
        let view = TeamView::try_from(&team).unwrap();
        assert_eq!(view.id, "T1");
        assert_eq!(view.full_name, "Hades Tigers");
        assert_eq!(view.season_shamings, 2);

        let public = serde_json::to_value(&view).unwrap();
        assert_eq!(public["full_name"], "Hades Tigers");
        assert_eq!(public["id"], "T1");
        assert!(public.get("fullName").is_none());
        assert!(public.get("_id").is_none());
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let mut raw = upstream_team();
        raw.as_object_mut().unwrap().remove("slogan");
        let team: Team = serde_json::from_value(raw).unwrap();

        let err = TeamView::try_from(&team).unwrap_err();
        assert!(matches!(err, ApiError::Malformed { kind: "team", .. }));
    }

    #[test]
    fn test_player_missing_fields_is_malformed() {
        let player: Player = serde_json::from_value(json!({ "_id": "P1", "name": "Ace" })).unwrap();
        assert!(PlayerView::try_from(&player).is_err());
    }
}
