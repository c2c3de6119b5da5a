use serde::{Deserialize, Serialize};

/// Author identity embedded in review listings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

/// The logged-in user as reported by the session endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SessionResponse {
    pub user: Option<SessionUser>,
}

/// Login body. Fields are optional so that a missing one is reported as a
/// field error instead of a malformed payload.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub credential: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}
