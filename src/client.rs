//! Browser-side calls to the JSON API.
use gloo_net::http::{Request, Response};
use leptos::logging::log;
use serde::de::DeserializeOwned;

use crate::models::message::{ErrorBody, MessageResponse};
use crate::models::review::{CurrentUserReview, Review, ReviewPayload, ReviewsEnvelope};
use crate::models::user::{LoginRequest, SessionResponse, SessionUser};

fn network_error(err: gloo_net::Error) -> ErrorBody {
    log!("[CLIENT] Request failed: {:?}", err);
    ErrorBody::new(err.to_string())
}

/// Decodes a success body, or the server's [`ErrorBody`] on a non-2xx status.
async fn read<T: DeserializeOwned>(response: Response) -> Result<T, ErrorBody> {
    if response.ok() {
        return response.json::<T>().await.map_err(network_error);
    }
    let status = response.status();
    Err(response
        .json::<ErrorBody>()
        .await
        .unwrap_or_else(|_| ErrorBody::new(format!("Request failed with status {status}"))))
}

pub async fn login(credential: &str, password: &str) -> Result<SessionUser, ErrorBody> {
    let body = LoginRequest {
        credential: Some(credential.to_string()),
        password: Some(password.to_string()),
    };
    let response = Request::post("/api/session")
        .json(&body)
        .map_err(network_error)?
        .send()
        .await
        .map_err(network_error)?;
    let session: SessionResponse = read(response).await?;
    session
        .user
        .ok_or_else(|| ErrorBody::new("Login did not return a user"))
}

pub async fn logout() -> Result<(), ErrorBody> {
    let response = Request::delete("/api/session")
        .send()
        .await
        .map_err(network_error)?;
    read::<MessageResponse>(response).await.map(|_| ())
}

pub async fn restore_session() -> Result<Option<SessionUser>, ErrorBody> {
    let response = Request::get("/api/session")
        .send()
        .await
        .map_err(network_error)?;
    read::<SessionResponse>(response).await.map(|session| session.user)
}

pub async fn current_reviews() -> Result<Vec<CurrentUserReview>, ErrorBody> {
    let response = Request::get("/api/reviews/current")
        .send()
        .await
        .map_err(network_error)?;
    read::<ReviewsEnvelope<CurrentUserReview>>(response)
        .await
        .map(|envelope| envelope.reviews)
}

pub async fn create_review(spot_id: i64, text: &str, stars: u8) -> Result<Review, ErrorBody> {
    let response = Request::post(&format!("/api/spots/{spot_id}/reviews"))
        .json(&ReviewPayload::new(text, stars))
        .map_err(network_error)?
        .send()
        .await
        .map_err(network_error)?;
    read(response).await
}

pub async fn delete_review(review_id: i64) -> Result<(), ErrorBody> {
    let response = Request::delete(&format!("/api/reviews/{review_id}"))
        .send()
        .await
        .map_err(network_error)?;
    read::<MessageResponse>(response).await.map(|_| ())
}
