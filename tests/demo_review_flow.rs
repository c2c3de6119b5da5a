#![cfg(feature = "ssr")]

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};
use spotstay::api;
use spotstay::auth::SESSION_COOKIE;
use spotstay::config::AppConfig;
use spotstay::db::Database;
use spotstay::seed::seed_demo_data;
use spotstay::utils::validation::{DEMO_CREDENTIAL, DEMO_PASSWORD};

// Demo user logs in, reviews the seeded spot that has no images, sees both
// seeded and new reviews, edits, attaches an image, and deletes.
#[actix_web::test]
async fn test_demo_user_review_lifecycle() {
    let db = Database::new(":memory:").unwrap();
    db.create_schema().await.unwrap();
    assert!(seed_demo_data(&db).await.unwrap());

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(db))
            .app_data(web::Data::new(AppConfig::default()))
            .configure(api::configure),
    )
    .await;

    // login
    let req = test::TestRequest::post()
        .uri("/api/session")
        .set_json(json!({"credential": DEMO_CREDENTIAL, "password": DEMO_PASSWORD}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .unwrap()
        .into_owned();
    let session: Value = test::read_body_json(resp).await;
    let demo_id = session["user"]["id"].as_i64().unwrap();

    // seeded reviews: spot 1 (with preview) and spot 3
    let req = test::TestRequest::get()
        .uri("/api/reviews/current")
        .cookie(cookie.clone())
        .to_request();
    let listing: Value = test::call_and_read_body_json(&app, req).await;
    let reviews = listing["Reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 2);
    assert!(reviews.iter().all(|r| r["userId"] == json!(demo_id)));
    let first = reviews.iter().find(|r| r["spotId"] == json!(1)).unwrap();
    assert!(first["Spot"]["previewImage"].as_str().unwrap().starts_with("https://"));

    // spot 4 has no images at all
    let req = test::TestRequest::post()
        .uri("/api/spots/4/reviews")
        .cookie(cookie.clone())
        .set_json(json!({"review": "Sunsets every night", "stars": 5}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let review_id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri("/api/reviews/current")
        .cookie(cookie.clone())
        .to_request();
    let listing: Value = test::call_and_read_body_json(&app, req).await;
    let new_entry = listing["Reviews"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"] == json!(review_id))
        .cloned()
        .unwrap();
    assert_eq!(new_entry["Spot"]["previewImage"], json!("img url"));
    assert_eq!(new_entry["User"]["firstName"], json!("Demo"));

    // edit
    let req = test::TestRequest::put()
        .uri(&format!("/api/reviews/{review_id}"))
        .cookie(cookie.clone())
        .set_json(json!({"review": "Sunsets and dolphins", "stars": 4}))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["review"], json!("Sunsets and dolphins"));
    assert_eq!(updated["stars"], json!(4));

    // image
    let req = test::TestRequest::post()
        .uri(&format!("/api/reviews/{review_id}/images"))
        .cookie(cookie.clone())
        .set_json(json!({"url": "https://img.example/dolphin.png"}))
        .to_request();
    let image: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(image["url"], json!("https://img.example/dolphin.png"));

    // someone else's seeded review (FakeUser1 on spot 2)
    let req = test::TestRequest::delete()
        .uri("/api/reviews/2")
        .cookie(cookie.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    // delete own
    let req = test::TestRequest::delete()
        .uri(&format!("/api/reviews/{review_id}"))
        .cookie(cookie.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"message": "Successfully deleted"}));

    let req = test::TestRequest::get()
        .uri("/api/reviews/current")
        .cookie(cookie)
        .to_request();
    let listing: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listing["Reviews"].as_array().unwrap().len(), 2);
}
