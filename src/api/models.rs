use serde::{Deserialize, Serialize};

use crate::database::models::TopPlayer;

#[derive(Deserialize)]
pub struct UpdateRatingRequest {
    // unsigned so a negative score is rejected at deserialization
    pub score: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    pub id: String,
    pub league: i64,
    pub best_score: i64,
    pub last_update: String,
}

#[derive(Serialize)]
pub struct TopPlayersResponse {
    pub users: Vec<TopPlayer>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_response_serializes_camel_case() {
        let body = serde_json::to_value(RatingResponse {
            id: "alice".to_string(),
            league: 2,
            best_score: 150,
            last_update: "2024-05-01 12:00:00".to_string(),
        })
        .unwrap();

        assert_eq!(body["id"], "alice");
        assert_eq!(body["league"], 2);
        assert_eq!(body["bestScore"], 150);
        assert_eq!(body["lastUpdate"], "2024-05-01 12:00:00");
    }

    #[test]
    fn top_players_response_wraps_users_array() {
        let body = serde_json::to_value(TopPlayersResponse {
            users: vec![TopPlayer {
                id: "bob".to_string(),
                score: 90,
            }],
        })
        .unwrap();

        assert_eq!(body["users"][0]["id"], "bob");
        assert_eq!(body["users"][0]["score"], 90);
    }

    #[test]
    fn negative_score_is_rejected_at_deserialization() {
        assert!(serde_json::from_str::<UpdateRatingRequest>(r#"{"score":-5}"#).is_err());
        let req: UpdateRatingRequest = serde_json::from_str(r#"{"score":42}"#).unwrap();
        assert_eq!(req.score, 42);
    }
}
