use serde::{Deserialize, Serialize};

/// Reported as `previewImage` when a spot has no image flagged as preview.
pub const PREVIEW_IMAGE_FALLBACK: &str = "img url";

/// Spot fields embedded in the current user's review listing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpotSummary {
    pub id: i64,
    pub owner_id: i64,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub lat: f64,
    pub lng: f64,
    pub name: String,
    pub price: f64,
    pub preview_image: String,
}
