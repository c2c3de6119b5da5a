// src/models/review.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::spot::SpotSummary;
use super::user::UserSummary;

/// Upper bound on images attached to a single review.
pub const MAX_REVIEW_IMAGES: i64 = 10;

/// A stored review. Field order here is the serialized order:
/// id, userId, spotId, review, stars, createdAt, updatedAt.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    pub spot_id: i64,
    pub review: String,
    pub stars: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReviewImage {
    pub id: i64,
    pub url: String,
}

/// One entry of `GET /api/reviews/current`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CurrentUserReview {
    #[serde(flatten)]
    pub review: Review,
    #[serde(rename = "User")]
    pub user: UserSummary,
    #[serde(rename = "Spot")]
    pub spot: SpotSummary,
    #[serde(rename = "ReviewImages")]
    pub images: Vec<ReviewImage>,
}

/// One entry of `GET /api/spots/{spotId}/reviews`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SpotReview {
    #[serde(flatten)]
    pub review: Review,
    #[serde(rename = "User")]
    pub user: UserSummary,
    #[serde(rename = "ReviewImages")]
    pub images: Vec<ReviewImage>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReviewsEnvelope<T> {
    #[serde(rename = "Reviews")]
    pub reviews: Vec<T>,
}

/// Body of review create/update requests. Values stay untyped until
/// validation so falsy inputs (`0`, `null`, `""`) can be told apart from
/// malformed JSON.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ReviewPayload {
    #[serde(default)]
    pub review: Option<Value>,
    #[serde(default)]
    pub stars: Option<Value>,
}

impl ReviewPayload {
    pub fn new(review: &str, stars: u8) -> Self {
        Self {
            review: Some(Value::from(review)),
            stars: Some(Value::from(stars)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ReviewImagePayload {
    #[serde(default)]
    pub url: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_review() -> Review {
        Review {
            id: 7,
            user_id: 2,
            spot_id: 3,
            review: "Lovely".into(),
            stars: 4,
            created_at: "2024-01-01T00:00:00.000Z".into(),
            updated_at: "2024-01-02T00:00:00.000Z".into(),
        }
    }

    #[test]
    fn test_review_serializes_in_canonical_order() {
        let json = serde_json::to_string(&sample_review()).unwrap();
        let keys = ["\"id\"", "\"userId\"", "\"spotId\"", "\"review\"", "\"stars\"", "\"createdAt\"", "\"updatedAt\""];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_current_user_review_shape() {
        let entry = CurrentUserReview {
            review: sample_review(),
            user: UserSummary {
                id: 2,
                first_name: "Ada".into(),
                last_name: "Byron".into(),
            },
            spot: SpotSummary {
                id: 3,
                owner_id: 1,
                address: "1 Main St".into(),
                city: "Town".into(),
                state: "CA".into(),
                country: "USA".into(),
                lat: 1.5,
                lng: -2.5,
                name: "Cabin".into(),
                price: 99.0,
                preview_image: "img url".into(),
            },
            images: vec![ReviewImage {
                id: 1,
                url: "https://img/1.png".into(),
            }],
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["userId"], json!(2));
        assert_eq!(value["spotId"], json!(3));
        assert_eq!(value["User"]["firstName"], json!("Ada"));
        assert_eq!(value["Spot"]["previewImage"], json!("img url"));
        assert_eq!(value["ReviewImages"][0]["url"], json!("https://img/1.png"));

        let back: CurrentUserReview = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_payload_treats_null_as_missing() {
        let payload: ReviewPayload = serde_json::from_value(json!({"review": null})).unwrap();
        assert!(payload.review.is_none());
        assert!(payload.stars.is_none());
    }
}
