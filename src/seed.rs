//! Demo dataset loaded into an empty database at startup.
use leptos::logging::log;
use thiserror::Error;

use crate::auth::hash_password;
use crate::db::Database;
use crate::repos::spots::NewSpot;
use crate::repos::users::NewUser;
use crate::repos::{ReviewsRepo, SpotsRepo, UsersRepo};
use crate::utils::validation::{DEMO_CREDENTIAL, DEMO_PASSWORD};

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Password hashing failed: {0}")]
    Hash(String),
}

struct SeedUser {
    first_name: &'static str,
    last_name: &'static str,
    email: &'static str,
    username: &'static str,
    password: &'static str,
}

const USERS: [SeedUser; 3] = [
    SeedUser {
        first_name: "Demo",
        last_name: "Lition",
        email: "demo@user.io",
        username: DEMO_CREDENTIAL,
        password: DEMO_PASSWORD,
    },
    SeedUser {
        first_name: "Fake",
        last_name: "User",
        email: "user1@user.io",
        username: "FakeUser1",
        password: "password2",
    },
    SeedUser {
        first_name: "Other",
        last_name: "Person",
        email: "user2@user.io",
        username: "FakeUser2",
        password: "password3",
    },
];

// (owner index, address, city, state, country, lat, lng, name, description, price)
const SPOTS: [(usize, &str, &str, &str, &str, f64, f64, &str, &str, f64); 4] = [
    (0, "123 Disney Lane", "San Francisco", "California", "United States of America",
     37.7645358, -122.4730327, "App Academy", "Place where web developers are created", 123.0),
    (1, "742 Evergreen Terrace", "Springfield", "Oregon", "United States of America",
     44.0462, -123.0220, "Evergreen Cottage", "Quiet family home close to the plant", 89.0),
    (2, "13 Hollow Road", "Sleepy Hollow", "New York", "United States of America",
     41.0856, -73.8585, "Headless Manor", "Historic manor with a lively past", 166.0),
    (0, "1 Ocean View", "Malibu", "California", "United States of America",
     34.0259, -118.7798, "Beach Bungalow", "Steps from the sand", 240.0),
];

// (spot index, url, preview). The last spot has no images so listings show
// the preview fallback.
const SPOT_IMAGES: [(usize, &str, bool); 5] = [
    (0, "https://a0.muscache.com/im/pictures/miso/Hosting-669738651494426046/original/aec3bfdd-a7c7-4da1-ad41-826c62b5147e.jpeg", true),
    (0, "https://a0.muscache.com/im/pictures/miso/Hosting-669738651494426046/original/dbd485b3-7830-454b-8548-742da7a1f483.jpeg", false),
    (0, "https://a0.muscache.com/im/pictures/miso/Hosting-669738651494426046/original/3c8132b0-42e0-4614-9224-cd3c30e32b05.jpeg", false),
    (1, "https://a0.muscache.com/im/pictures/miso/Hosting-669738651494426046/original/97977537-7faf-4643-8ed8-daa30445119a.jpeg", true),
    (2, "https://a0.muscache.com/im/pictures/e25a9b25-fa98-4160-bfd1-039287bf38b6.jpg", true),
];

// (spot index, user index, text, stars)
const REVIEWS: [(usize, usize, &str, i64); 5] = [
    (0, 0, "Great place to stay!", 5),
    (1, 1, "Had a wonderful experience here. I loved the decor and location of the place!", 4),
    (0, 1, "Big cleaning fee, other than that enjoyed our trip!", 3),
    (2, 0, "No one warned us it would be THAT scary.", 1),
    (3, 2, "Me and the family had fun!", 5),
];

/// Inserts the demo dataset when no users exist yet. Returns whether
/// anything was written.
pub async fn seed_demo_data(db: &Database) -> Result<bool, SeedError> {
    // Hash before taking the lock.
    let hashes = USERS
        .iter()
        .map(|user| hash_password(user.password).map_err(|e| SeedError::Hash(e.to_string())))
        .collect::<Result<Vec<_>, _>>()?;

    let mut conn = db.lock().await;
    if UsersRepo::new(&conn).count()? > 0 {
        log!("[SEED] Users present, skipping demo data");
        return Ok(false);
    }

    let tx = conn.transaction()?;
    let users = UsersRepo::new(&tx);
    let spots = SpotsRepo::new(&tx);
    let reviews = ReviewsRepo::new(&tx);

    let mut user_ids = Vec::with_capacity(USERS.len());
    for (user, hashed) in USERS.iter().zip(&hashes) {
        user_ids.push(users.create(&NewUser {
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            username: user.username,
            hashed_password: hashed,
        })?);
    }

    let mut spot_ids = Vec::with_capacity(SPOTS.len());
    for (owner, address, city, state, country, lat, lng, name, description, price) in SPOTS {
        spot_ids.push(spots.create(&NewSpot {
            owner_id: user_ids[owner],
            address,
            city,
            state,
            country,
            lat,
            lng,
            name,
            description,
            price,
        })?);
    }

    for (spot, url, preview) in SPOT_IMAGES {
        spots.add_image(spot_ids[spot], url, preview)?;
    }

    for (spot, user, text, stars) in REVIEWS {
        reviews.create(spot_ids[spot], user_ids[user], text, stars)?;
    }

    tx.commit()?;
    log!(
        "[SEED] Inserted {} users, {} spots, {} reviews",
        USERS.len(),
        SPOTS.len(),
        REVIEWS.len()
    );
    Ok(true)
}
