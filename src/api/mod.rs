//! JSON API mounted under `/api`.
use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{web, HttpRequest};
use leptos::logging::warn;

use crate::error::{ApiError, INVALID_BODY};

pub mod reviews;
pub mod session;

#[cfg(test)]
pub(crate) mod fixtures;

/// Unreadable bodies answer with a `body` field error instead of actix's
/// plain-text rejection.
fn json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!("[API] Rejected body for {} {}: {}", req.method(), req.path(), err);
    ApiError::field("body", INVALID_BODY).into()
}

/// An id segment that is not an integer cannot name a stored row.
fn path_error(err: PathError, req: &HttpRequest) -> actix_web::Error {
    warn!("[API] Rejected path {}: {}", req.path(), err);
    if req.match_info().get("spot_id").is_some() {
        ApiError::spot_not_found().into()
    } else {
        ApiError::review_not_found().into()
    }
}

/// Registers every API route. Shared by the server binary and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(json_error))
            .app_data(web::PathConfig::default().error_handler(path_error))
            .route("/session", web::get().to(session::restore_session_handler))
            .route("/session", web::post().to(session::login_handler))
            .route("/session", web::delete().to(session::logout_handler))
            .route("/reviews/current", web::get().to(reviews::current_user_reviews_handler))
            .route("/reviews/{review_id}", web::put().to(reviews::update_review_handler))
            .route("/reviews/{review_id}", web::delete().to(reviews::delete_review_handler))
            .route("/reviews/{review_id}/images", web::post().to(reviews::add_review_image_handler))
            .route("/spots/{spot_id}/reviews", web::get().to(reviews::spot_reviews_handler))
            .route("/spots/{spot_id}/reviews", web::post().to(reviews::create_review_handler)),
    );
}

#[cfg(test)]
mod tests {
    use super::fixtures::{app, seeded};
    use super::*;
    use crate::error::{REVIEW_NOT_FOUND, SPOT_NOT_FOUND};
    use crate::utils::validation::IMAGE_URL_ERROR;
    use actix_web::http::header::ContentType;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_non_string_image_url_is_a_field_error() {
        let fixture = seeded().await;
        let app = test::init_service(app(&fixture)).await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/reviews/{}/images", fixture.alice_review))
            .cookie(fixture.alice_cookie())
            .set_json(json!({"url": 5}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"message": "Bad Request", "errors": {"url": IMAGE_URL_ERROR}}));
    }

    #[actix_web::test]
    async fn test_malformed_body_returns_json_error() {
        let fixture = seeded().await;
        let app = test::init_service(app(&fixture)).await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/reviews/{}", fixture.alice_review))
            .cookie(fixture.alice_cookie())
            .insert_header(ContentType::json())
            .set_payload("{review: oops")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"message": "Bad Request", "errors": {"body": INVALID_BODY}}));
    }

    #[actix_web::test]
    async fn test_mistyped_login_fields_return_json_error() {
        let fixture = seeded().await;
        let app = test::init_service(app(&fixture)).await;

        let req = test::TestRequest::post()
            .uri("/api/session")
            .set_json(json!({"credential": 5, "password": true}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["errors"]["body"], INVALID_BODY);
    }

    #[actix_web::test]
    async fn test_unparseable_ids_return_not_found_bodies() {
        let fixture = seeded().await;
        let app = test::init_service(app(&fixture)).await;

        let req = test::TestRequest::put()
            .uri("/api/reviews/abc")
            .cookie(fixture.alice_cookie())
            .set_json(json!({"review": "Fine", "stars": 3}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"message": REVIEW_NOT_FOUND}));

        let req = test::TestRequest::get().uri("/api/spots/abc/reviews").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"message": SPOT_NOT_FOUND}));
    }
}
