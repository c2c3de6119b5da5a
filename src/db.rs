#[cfg(feature = "ssr")]
mod db_impl {
    use leptos::logging::log;
    use rusqlite::{Connection, Error};
    use std::sync::Arc;
    use tokio::sync::{Mutex, MutexGuard};


    /// Shared SQLite handle. Every request locks the single connection, so
    /// reads and writes issued under one guard never interleave with another
    /// request's.
    #[derive(Debug)]
    pub struct Database {
        conn: Arc<Mutex<Connection>>,
    }

    impl Database {
        // Create a new database connection
        pub fn new(db_path: &str) -> Result<Self, Error> {
            let conn = Connection::open(db_path)?;
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            log!("[DB] Database connection established at: {}", db_path);
            Ok(Database {
                conn: Arc::new(Mutex::new(conn)),
            })
        }

        /// Waits for exclusive use of the connection.
        pub async fn lock(&self) -> MutexGuard<'_, Connection> {
            self.conn.lock().await
        }

        // Create the database schema
        pub async fn create_schema(&self) -> Result<(), Error> {
            let conn = self.conn.lock().await;

            // 1. Users and their sessions
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS users (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    first_name TEXT NOT NULL,
                    last_name TEXT NOT NULL,
                    email TEXT NOT NULL UNIQUE,
                    username TEXT NOT NULL UNIQUE,
                    hashed_password TEXT NOT NULL,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );
                CREATE TABLE IF NOT EXISTS sessions (
                    token TEXT PRIMARY KEY,
                    user_id INTEGER NOT NULL,
                    created_at TEXT NOT NULL,
                    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
                );",
            )
            .map_err(|e| {
                log!("[DB] Failed creating user tables: {}", e);
                e
            })?;

            // 2. Spots and their images
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS spots (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    owner_id INTEGER NOT NULL,
                    address TEXT NOT NULL,
                    city TEXT NOT NULL,
                    state TEXT NOT NULL,
                    country TEXT NOT NULL,
                    lat REAL NOT NULL,
                    lng REAL NOT NULL,
                    name TEXT NOT NULL,
                    description TEXT NOT NULL,
                    price REAL NOT NULL,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL,
                    FOREIGN KEY (owner_id) REFERENCES users(id) ON DELETE CASCADE
                );
                CREATE TABLE IF NOT EXISTS spot_images (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    spot_id INTEGER NOT NULL,
                    url TEXT NOT NULL,
                    preview INTEGER NOT NULL DEFAULT 0,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL,
                    FOREIGN KEY (spot_id) REFERENCES spots(id) ON DELETE CASCADE
                );",
            )
            .map_err(|e| {
                log!("[DB] Failed creating spot tables: {}", e);
                e
            })?;

            // 3. Reviews and their images
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS reviews (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    spot_id INTEGER NOT NULL,
                    user_id INTEGER NOT NULL,
                    review TEXT NOT NULL,
                    stars INTEGER NOT NULL CHECK (stars BETWEEN 1 AND 5),
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL,
                    UNIQUE (spot_id, user_id),
                    FOREIGN KEY (spot_id) REFERENCES spots(id) ON DELETE CASCADE,
                    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
                );
                CREATE TABLE IF NOT EXISTS review_images (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    review_id INTEGER NOT NULL,
                    url TEXT NOT NULL,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL,
                    FOREIGN KEY (review_id) REFERENCES reviews(id) ON DELETE CASCADE
                );
                CREATE INDEX IF NOT EXISTS idx_reviews_user ON reviews(user_id);
                CREATE INDEX IF NOT EXISTS idx_review_images_review ON review_images(review_id);",
            )
            .map_err(|e| {
                log!("[DB] Failed creating review tables: {}", e);
                e
            })?;

            log!("[DB] Schema ready");
            Ok(())
        }
    }
}

#[cfg(feature = "ssr")]
pub use db_impl::Database;
