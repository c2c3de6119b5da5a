//! Per-entity data access over a borrowed connection.
//!
//! Repositories are cheap views: lock the [`Database`](crate::db::Database),
//! optionally open a transaction, and build the repos you need on top of it.

pub mod review_images;
pub mod reviews;
pub mod sessions;
pub mod spots;
pub mod users;

use chrono::{SecondsFormat, Utc};

pub use review_images::ReviewImagesRepo;
pub use reviews::ReviewsRepo;
pub use sessions::SessionsRepo;
pub use spots::SpotsRepo;
pub use users::UsersRepo;

/// Current time in the format stored in every `created_at`/`updated_at` column.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
