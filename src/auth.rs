//! Session gate: password hashing, the `token` cookie, and the extractor that
//! turns a request into an authenticated [`Principal`].
use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use leptos::logging::log;
use std::future::Future;
use std::pin::Pin;

use crate::db::Database;
use crate::error::ApiError;
use crate::repos::{SessionsRepo, UsersRepo};

pub const SESSION_COOKIE: &str = "token";

/// The authenticated user making the request.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub id: i64,
    pub username: String,
}

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// False for a wrong password and for a stored hash that does not parse.
pub fn verify_password(password: &str, hashed: &str) -> bool {
    match PasswordHash::new(hashed) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

pub fn session_cookie(token: &str, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .finish()
}

pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// Resolves the session token to a principal, if the session is live.
pub async fn resolve_session(db: &Database, token: &str) -> Result<Option<Principal>, ApiError> {
    let conn = db.lock().await;
    let Some(user_id) = SessionsRepo::new(&conn).user_id_for(token)? else {
        return Ok(None);
    };
    let user = UsersRepo::new(&conn).get_by_id(user_id)?;
    Ok(user.map(|user| Principal {
        id: user.id,
        username: user.username,
    }))
}

/// Extractor for routes that require a logged-in user. Requests without a
/// live session are answered with 401 before the handler body runs.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let db = req.app_data::<web::Data<Database>>().cloned();
        let token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());
        let path = req.path().to_string();

        Box::pin(async move {
            let (Some(db), Some(token)) = (db, token) else {
                log!("[AUTH] Rejected unauthenticated request to {}", path);
                return Err(ApiError::Unauthorized);
            };
            match resolve_session(&db, &token).await? {
                Some(principal) => Ok(AuthUser(principal)),
                None => {
                    log!("[AUTH] Unknown session token on {}", path);
                    Err(ApiError::Unauthorized)
                }
            }
        })
    }
}
