//! Small dataset shared by the handler tests.
use actix_web::cookie::Cookie;
use actix_web::{web, App};

use crate::auth::{hash_password, SESSION_COOKIE};
use crate::config::AppConfig;
use crate::db::Database;
use crate::repos::spots::NewSpot;
use crate::repos::users::NewUser;
use crate::repos::{ReviewImagesRepo, ReviewsRepo, SessionsRepo, SpotsRepo, UsersRepo};

pub const PREVIEW_URL: &str = "https://img.example/cabin-preview.png";
pub const ALICE_PASSWORD: &str = "alicepass";

/// Ids and session tokens created by [`seeded`].
pub struct Fixture {
    pub db: web::Data<Database>,
    pub alice: i64,
    pub bob: i64,
    pub alice_token: String,
    pub bob_token: String,
    /// Owned by bob, has a preview image.
    pub cabin: i64,
    /// Owned by bob, no images at all.
    pub loft: i64,
    /// Alice's review of the cabin.
    pub alice_review: i64,
}

impl Fixture {
    pub fn alice_cookie(&self) -> Cookie<'static> {
        Cookie::new(SESSION_COOKIE, self.alice_token.clone())
    }

    pub fn bob_cookie(&self) -> Cookie<'static> {
        Cookie::new(SESSION_COOKIE, self.bob_token.clone())
    }

    /// Gives alice a real password hash. Only login tests pay for hashing.
    pub async fn set_alice_password(&self) {
        let hashed = hash_password(ALICE_PASSWORD).unwrap();
        let conn = self.db.lock().await;
        conn.execute(
            "UPDATE users SET hashed_password = ? WHERE id = ?",
            rusqlite::params![hashed, self.alice],
        )
        .unwrap();
    }

    pub async fn add_images(&self, review_id: i64, count: usize) {
        let conn = self.db.lock().await;
        let images = ReviewImagesRepo::new(&conn);
        for i in 0..count {
            images
                .create(review_id, &format!("https://img.example/{review_id}/{i}.png"))
                .unwrap();
        }
    }
}

fn spot(owner_id: i64, name: &'static str) -> NewSpot<'static> {
    NewSpot {
        owner_id,
        address: "1 Test Way",
        city: "Testville",
        state: "TS",
        country: "Testland",
        lat: 10.5,
        lng: -20.25,
        name,
        description: "for tests",
        price: 100.0,
    }
}

pub async fn seeded() -> Fixture {
    let db = Database::new(":memory:").unwrap();
    db.create_schema().await.unwrap();

    let (alice, bob, alice_token, bob_token, cabin, loft, alice_review) = {
        let conn = db.lock().await;
        let users = UsersRepo::new(&conn);
        let alice = users
            .create(&NewUser {
                first_name: "Alice",
                last_name: "Liddell",
                email: "alice@example.com",
                username: "alice",
                hashed_password: "unset",
            })
            .unwrap();
        let bob = users
            .create(&NewUser {
                first_name: "Bob",
                last_name: "Builder",
                email: "bob@example.com",
                username: "bobby",
                hashed_password: "unused",
            })
            .unwrap();

        let spots = SpotsRepo::new(&conn);
        let cabin = spots.create(&spot(bob, "Cabin")).unwrap();
        spots.add_image(cabin, "https://img.example/cabin-other.png", false).unwrap();
        spots.add_image(cabin, PREVIEW_URL, true).unwrap();
        let loft = spots.create(&spot(bob, "Loft")).unwrap();

        let alice_review = ReviewsRepo::new(&conn)
            .create(cabin, alice, "Cozy and quiet", 4)
            .unwrap()
            .id;

        let sessions = SessionsRepo::new(&conn);
        let alice_token = sessions.create(alice).unwrap();
        let bob_token = sessions.create(bob).unwrap();
        (alice, bob, alice_token, bob_token, cabin, loft, alice_review)
    };

    Fixture {
        db: web::Data::new(db),
        alice,
        bob,
        alice_token,
        bob_token,
        cabin,
        loft,
        alice_review,
    }
}

/// The application under test, wired like the server binary.
pub fn app(
    fixture: &Fixture,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(fixture.db.clone())
        .app_data(web::Data::new(AppConfig::default()))
        .configure(super::configure)
}
