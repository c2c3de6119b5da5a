use rusqlite::{params, Connection, Error};

use super::timestamp;
use crate::models::review::ReviewImage;

pub struct ReviewImagesRepo<'a> {
    conn: &'a Connection,
}

impl<'a> ReviewImagesRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn count_for_review(&self, review_id: i64) -> Result<i64, Error> {
        self.conn.query_row(
            "SELECT COUNT(*) FROM review_images WHERE review_id = ?",
            [review_id],
            |row| row.get(0),
        )
    }

    pub fn list_for_review(&self, review_id: i64) -> Result<Vec<ReviewImage>, Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, url FROM review_images WHERE review_id = ? ORDER BY id")?;
        let rows = stmt.query_map([review_id], |row| {
            Ok(ReviewImage {
                id: row.get(0)?,
                url: row.get(1)?,
            })
        })?;
        rows.collect()
    }

    pub fn create(&self, review_id: i64, url: &str) -> Result<ReviewImage, Error> {
        let now = timestamp();
        self.conn.execute(
            "INSERT INTO review_images (review_id, url, created_at, updated_at) VALUES (?, ?, ?, ?)",
            params![review_id, url, now, now],
        )?;
        Ok(ReviewImage {
            id: self.conn.last_insert_rowid(),
            url: url.to_string(),
        })
    }
}
