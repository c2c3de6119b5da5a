use actix_web::{web, HttpRequest, HttpResponse};
use leptos::logging::log;

use crate::auth::{removal_cookie, resolve_session, session_cookie, verify_password, SESSION_COOKIE};
use crate::config::AppConfig;
use crate::db::Database;
use crate::error::{ApiError, ApiResult};
use crate::models::message::{FieldErrors, MessageResponse};
use crate::models::user::{LoginRequest, SessionResponse, SessionUser};
use crate::repos::{SessionsRepo, UsersRepo};
use crate::utils::validation::{CREDENTIAL_REQUIRED, PASSWORD_REQUIRED};

/// Checks credentials and opens a session. Returns the user and the new
/// session token.
pub async fn login(db: &Database, request: &LoginRequest) -> ApiResult<(SessionUser, String)> {
    let credential = request.credential.as_deref().map(str::trim).unwrap_or_default();
    let password = request.password.as_deref().unwrap_or_default();

    let mut errors = FieldErrors::new();
    if credential.is_empty() {
        errors.insert("credential".to_string(), CREDENTIAL_REQUIRED.to_string());
    }
    if password.is_empty() {
        errors.insert("password".to_string(), PASSWORD_REQUIRED.to_string());
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let conn = db.lock().await;
    let user = UsersRepo::new(&conn)
        .find_by_credential(credential)?
        .filter(|user| verify_password(password, &user.hashed_password))
        .ok_or(ApiError::InvalidCredentials)?;

    let token = SessionsRepo::new(&conn).create(user.id)?;
    Ok((user.to_session_user(), token))
}

// POST /api/session
pub async fn login_handler(
    db: web::Data<Database>,
    config: web::Data<AppConfig>,
    request: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    log!("[API] Login attempt for {:?}", request.credential);
    let (user, token) = login(&db, &request).await.map_err(|e| {
        log!("[AUTH] Login failed: {}", e);
        e
    })?;
    log!("[AUTH] User {} logged in", user.id);
    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&token, config.secure_cookies))
        .json(SessionResponse { user: Some(user) }))
}

// DELETE /api/session
pub async fn logout_handler(db: web::Data<Database>, req: HttpRequest) -> ApiResult<HttpResponse> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        let conn = db.lock().await;
        if SessionsRepo::new(&conn).delete(cookie.value())? {
            log!("[AUTH] Session closed");
        }
    }
    Ok(HttpResponse::Ok()
        .cookie(removal_cookie())
        .json(MessageResponse::new("success")))
}

// GET /api/session
pub async fn restore_session_handler(db: web::Data<Database>, req: HttpRequest) -> ApiResult<HttpResponse> {
    let Some(cookie) = req.cookie(SESSION_COOKIE) else {
        return Ok(HttpResponse::Ok().json(SessionResponse::default()));
    };
    let user = match resolve_session(&db, cookie.value()).await? {
        Some(principal) => {
            let conn = db.lock().await;
            UsersRepo::new(&conn)
                .get_by_id(principal.id)?
                .map(|record| record.to_session_user())
        }
        None => None,
    };
    Ok(HttpResponse::Ok().json(SessionResponse { user }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fixtures::{app, seeded, ALICE_PASSWORD};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_login_sets_cookie_and_grants_access() {
        let fixture = seeded().await;
        fixture.set_alice_password().await;
        let app = test::init_service(app(&fixture)).await;

        let req = test::TestRequest::post()
            .uri("/api/session")
            .set_json(json!({"credential": "alice", "password": ALICE_PASSWORD}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .expect("session cookie")
            .into_owned();
        let body: SessionResponse = test::read_body_json(resp).await;
        assert_eq!(body.user.unwrap().username, "alice");

        let req = test::TestRequest::get()
            .uri("/api/reviews/current")
            .cookie(cookie)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_login_by_email() {
        let fixture = seeded().await;
        fixture.set_alice_password().await;
        let (user, token) = login(
            &fixture.db,
            &LoginRequest {
                credential: Some("alice@example.com".into()),
                password: Some(ALICE_PASSWORD.into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(user.id, fixture.alice);
        assert!(!token.is_empty());
    }

    #[actix_web::test]
    async fn test_login_rejects_bad_password() {
        let fixture = seeded().await;
        fixture.set_alice_password().await;
        let app = test::init_service(app(&fixture)).await;

        let req = test::TestRequest::post()
            .uri("/api/session")
            .set_json(json!({"credential": "alice", "password": "wrong-password"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"message": "Invalid credentials"}));
    }

    #[actix_web::test]
    async fn test_login_requires_fields() {
        let fixture = seeded().await;
        let app = test::init_service(app(&fixture)).await;

        let req = test::TestRequest::post()
            .uri("/api/session")
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["errors"],
            json!({"credential": CREDENTIAL_REQUIRED, "password": PASSWORD_REQUIRED})
        );
    }

    #[actix_web::test]
    async fn test_restore_and_logout() {
        let fixture = seeded().await;
        let app = test::init_service(app(&fixture)).await;

        let req = test::TestRequest::get()
            .uri("/api/session")
            .cookie(fixture.bob_cookie())
            .to_request();
        let body: SessionResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.user.unwrap().id, fixture.bob);

        let req = test::TestRequest::delete()
            .uri("/api/session")
            .cookie(fixture.bob_cookie())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/api/session")
            .cookie(fixture.bob_cookie())
            .to_request();
        let body: SessionResponse = test::call_and_read_body_json(&app, req).await;
        assert!(body.user.is_none());

        let req = test::TestRequest::get()
            .uri("/api/reviews/current")
            .cookie(fixture.bob_cookie())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }
}
