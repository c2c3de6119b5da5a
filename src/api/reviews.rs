use actix_web::{web, HttpResponse};
use leptos::logging::log;

use crate::auth::{AuthUser, Principal};
use crate::db::Database;
use crate::error::{ApiError, ApiResult, DUPLICATE_REVIEW, IMAGE_QUOTA_REACHED};
use crate::models::message::{FieldErrors, MessageResponse};
use crate::models::review::{
    CurrentUserReview, Review, ReviewImage, ReviewImagePayload, ReviewPayload, ReviewsEnvelope,
    SpotReview, MAX_REVIEW_IMAGES,
};
use crate::repos::{ReviewImagesRepo, ReviewsRepo, SpotsRepo, UsersRepo};
use crate::utils::validation::{parse_image_url, parse_review_text, parse_stars};

/// Fetches a review and checks that `principal` wrote it.
/// Missing review wins over wrong author.
fn owned_review(reviews: &ReviewsRepo<'_>, principal: &Principal, review_id: i64) -> ApiResult<Review> {
    let review = reviews
        .get_by_id(review_id)?
        .ok_or_else(ApiError::review_not_found)?;
    if review.user_id != principal.id {
        log!(
            "[API] User {} denied access to review {} owned by {}",
            principal.id,
            review_id,
            review.user_id
        );
        return Err(ApiError::forbidden());
    }
    Ok(review)
}

/// Every review written by `principal`, each with its author, its spot
/// (including the preview image) and its images.
pub async fn list_current_user_reviews(
    db: &Database,
    principal: &Principal,
) -> ApiResult<ReviewsEnvelope<CurrentUserReview>> {
    let conn = db.lock().await;
    let users = UsersRepo::new(&conn);
    let spots = SpotsRepo::new(&conn);
    let images = ReviewImagesRepo::new(&conn);

    let mut listing = Vec::new();
    for review in ReviewsRepo::new(&conn).list_by_user(principal.id)? {
        let user = users
            .summary(review.user_id)?
            .ok_or_else(|| ApiError::Internal(format!("review {} has no author", review.id)))?;
        let spot = spots
            .summary(review.spot_id)?
            .ok_or_else(|| ApiError::Internal(format!("review {} has no spot", review.id)))?;
        let review_images = images.list_for_review(review.id)?;
        listing.push(CurrentUserReview {
            review,
            user,
            spot,
            images: review_images,
        });
    }

    Ok(ReviewsEnvelope { reviews: listing })
}

/// Replaces a review's text and stars. Checks run in order: existence,
/// ownership, stars, text.
pub async fn update_review(
    db: &Database,
    principal: &Principal,
    review_id: i64,
    payload: &ReviewPayload,
) -> ApiResult<Review> {
    let mut conn = db.lock().await;
    let tx = conn.transaction()?;
    let reviews = ReviewsRepo::new(&tx);

    owned_review(&reviews, principal, review_id)?;
    let stars = parse_stars(payload.stars.as_ref()).map_err(|msg| ApiError::field("stars", msg))?;
    let text = parse_review_text(payload.review.as_ref()).map_err(|msg| ApiError::field("review", msg))?;

    let updated = reviews.update(review_id, &text, stars)?;
    tx.commit()?;
    Ok(updated)
}

pub async fn delete_review(db: &Database, principal: &Principal, review_id: i64) -> ApiResult<MessageResponse> {
    let mut conn = db.lock().await;
    let tx = conn.transaction()?;
    let reviews = ReviewsRepo::new(&tx);

    owned_review(&reviews, principal, review_id)?;
    reviews.delete(review_id)?;
    tx.commit()?;
    Ok(MessageResponse::new("Successfully deleted"))
}

/// Attaches an image to a review. Checks run in order: existence,
/// ownership, quota, url.
pub async fn add_review_image(
    db: &Database,
    principal: &Principal,
    review_id: i64,
    payload: &ReviewImagePayload,
) -> ApiResult<ReviewImage> {
    let mut conn = db.lock().await;
    let tx = conn.transaction()?;
    let reviews = ReviewsRepo::new(&tx);
    let images = ReviewImagesRepo::new(&tx);

    owned_review(&reviews, principal, review_id)?;
    if images.count_for_review(review_id)? >= MAX_REVIEW_IMAGES {
        return Err(ApiError::Forbidden(IMAGE_QUOTA_REACHED.to_string()));
    }
    let url = parse_image_url(payload.url.as_ref()).map_err(|msg| ApiError::field("url", msg))?;

    let image = images.create(review_id, &url)?;
    tx.commit()?;
    Ok(image)
}

/// Writes a new review of `spot_id` by `principal`. Both field errors are
/// reported together.
pub async fn create_review(
    db: &Database,
    principal: &Principal,
    spot_id: i64,
    payload: &ReviewPayload,
) -> ApiResult<Review> {
    let mut conn = db.lock().await;
    let tx = conn.transaction()?;

    if !SpotsRepo::new(&tx).exists(spot_id)? {
        return Err(ApiError::spot_not_found());
    }

    let mut errors = FieldErrors::new();
    let text = parse_review_text(payload.review.as_ref())
        .map_err(|msg| errors.insert("review".to_string(), msg.to_string()))
        .ok();
    let stars = parse_stars(payload.stars.as_ref())
        .map_err(|msg| errors.insert("stars".to_string(), msg.to_string()))
        .ok();
    let (Some(text), Some(stars)) = (text, stars) else {
        return Err(ApiError::Validation(errors));
    };

    let reviews = ReviewsRepo::new(&tx);
    if reviews.exists_for(spot_id, principal.id)? {
        return Err(ApiError::Conflict(DUPLICATE_REVIEW.to_string()));
    }
    let review = reviews.create(spot_id, principal.id, &text, stars)?;
    tx.commit()?;
    Ok(review)
}

pub async fn list_spot_reviews(db: &Database, spot_id: i64) -> ApiResult<ReviewsEnvelope<SpotReview>> {
    let conn = db.lock().await;
    if !SpotsRepo::new(&conn).exists(spot_id)? {
        return Err(ApiError::spot_not_found());
    }
    let users = UsersRepo::new(&conn);
    let images = ReviewImagesRepo::new(&conn);

    let mut listing = Vec::new();
    for review in ReviewsRepo::new(&conn).list_by_spot(spot_id)? {
        let user = users
            .summary(review.user_id)?
            .ok_or_else(|| ApiError::Internal(format!("review {} has no author", review.id)))?;
        let review_images = images.list_for_review(review.id)?;
        listing.push(SpotReview {
            review,
            user,
            images: review_images,
        });
    }
    Ok(ReviewsEnvelope { reviews: listing })
}

// GET /api/reviews/current
pub async fn current_user_reviews_handler(
    db: web::Data<Database>,
    AuthUser(principal): AuthUser,
) -> ApiResult<HttpResponse> {
    log!("[API] Listing reviews for user {}", principal.id);
    let listing = list_current_user_reviews(&db, &principal)
        .await
        .inspect_err(|e| log!("[API] Listing reviews for user {} failed: {}", principal.id, e))?;
    log!("[API] Returning {} reviews for user {}", listing.reviews.len(), principal.id);
    Ok(HttpResponse::Ok().json(listing))
}

// PUT /api/reviews/{review_id}
pub async fn update_review_handler(
    db: web::Data<Database>,
    AuthUser(principal): AuthUser,
    path: web::Path<i64>,
    payload: web::Json<ReviewPayload>,
) -> ApiResult<HttpResponse> {
    let review_id = path.into_inner();
    log!("[API] User {} updating review {}", principal.id, review_id);
    let review = update_review(&db, &principal, review_id, &payload)
        .await
        .inspect_err(|e| log!("[API] Update of review {} failed: {}", review_id, e))?;
    log!("[API] Review {} updated to {} stars", review.id, review.stars);
    Ok(HttpResponse::Ok().json(review))
}

// DELETE /api/reviews/{review_id}
pub async fn delete_review_handler(
    db: web::Data<Database>,
    AuthUser(principal): AuthUser,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let review_id = path.into_inner();
    log!("[API] User {} deleting review {}", principal.id, review_id);
    let message = delete_review(&db, &principal, review_id)
        .await
        .inspect_err(|e| log!("[API] Delete of review {} failed: {}", review_id, e))?;
    log!("[API] Review {} deleted", review_id);
    Ok(HttpResponse::Ok().json(message))
}

// POST /api/reviews/{review_id}/images
pub async fn add_review_image_handler(
    db: web::Data<Database>,
    AuthUser(principal): AuthUser,
    path: web::Path<i64>,
    payload: web::Json<ReviewImagePayload>,
) -> ApiResult<HttpResponse> {
    let review_id = path.into_inner();
    log!("[API] User {} adding image to review {}", principal.id, review_id);
    let image = add_review_image(&db, &principal, review_id, &payload)
        .await
        .inspect_err(|e| log!("[API] Adding image to review {} failed: {}", review_id, e))?;
    log!("[API] Image {} attached to review {}", image.id, review_id);
    Ok(HttpResponse::Ok().json(image))
}

// POST /api/spots/{spot_id}/reviews
pub async fn create_review_handler(
    db: web::Data<Database>,
    AuthUser(principal): AuthUser,
    path: web::Path<i64>,
    payload: web::Json<ReviewPayload>,
) -> ApiResult<HttpResponse> {
    let spot_id = path.into_inner();
    log!("[API] User {} reviewing spot {}", principal.id, spot_id);
    let review = create_review(&db, &principal, spot_id, &payload)
        .await
        .inspect_err(|e| log!("[API] Review of spot {} by user {} failed: {}", spot_id, principal.id, e))?;
    log!("[API] Review {} created for spot {}", review.id, spot_id);
    Ok(HttpResponse::Created().json(review))
}

// GET /api/spots/{spot_id}/reviews
pub async fn spot_reviews_handler(db: web::Data<Database>, path: web::Path<i64>) -> ApiResult<HttpResponse> {
    let spot_id = path.into_inner();
    log!("[API] Listing reviews for spot {}", spot_id);
    let listing = list_spot_reviews(&db, spot_id)
        .await
        .inspect_err(|e| log!("[API] Listing reviews for spot {} failed: {}", spot_id, e))?;
    log!("[API] Returning {} reviews for spot {}", listing.reviews.len(), spot_id);
    Ok(HttpResponse::Ok().json(listing))
}
