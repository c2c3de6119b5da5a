use rusqlite::{params, Connection, Error, OptionalExtension, Row};

use super::timestamp;
use crate::models::review::Review;

const REVIEW_COLUMNS: &str = "id, user_id, spot_id, review, stars, created_at, updated_at";

fn review_from_row(row: &Row<'_>) -> Result<Review, Error> {
    Ok(Review {
        id: row.get(0)?,
        user_id: row.get(1)?,
        spot_id: row.get(2)?,
        review: row.get(3)?,
        stars: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

pub struct ReviewsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> ReviewsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Review>, Error> {
        self.conn
            .query_row(
                &format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?"),
                [id],
                review_from_row,
            )
            .optional()
    }

    pub fn list_by_user(&self, user_id: i64) -> Result<Vec<Review>, Error> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE user_id = ? ORDER BY id"
        ))?;
        let rows = stmt.query_map([user_id], review_from_row)?;
        rows.collect()
    }

    pub fn list_by_spot(&self, spot_id: i64) -> Result<Vec<Review>, Error> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE spot_id = ? ORDER BY id"
        ))?;
        let rows = stmt.query_map([spot_id], review_from_row)?;
        rows.collect()
    }

    pub fn exists_for(&self, spot_id: i64, user_id: i64) -> Result<bool, Error> {
        self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM reviews WHERE spot_id = ? AND user_id = ?)",
            [spot_id, user_id],
            |row| row.get(0),
        )
    }

    pub fn create(&self, spot_id: i64, user_id: i64, text: &str, stars: i64) -> Result<Review, Error> {
        let now = timestamp();
        self.conn.execute(
            "INSERT INTO reviews (spot_id, user_id, review, stars, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![spot_id, user_id, text, stars, now, now],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_by_id(id)?.ok_or(Error::QueryReturnedNoRows)
    }

    /// Rewrites text and stars and returns the stored record.
    pub fn update(&self, id: i64, text: &str, stars: i64) -> Result<Review, Error> {
        let changed = self.conn.execute(
            "UPDATE reviews SET review = ?, stars = ?, updated_at = ? WHERE id = ?",
            params![text, stars, timestamp(), id],
        )?;
        if changed == 0 {
            return Err(Error::QueryReturnedNoRows);
        }
        self.get_by_id(id)?.ok_or(Error::QueryReturnedNoRows)
    }

    /// Removes a review; its images go with it through the foreign key cascade.
    pub fn delete(&self, id: i64) -> Result<bool, Error> {
        let removed = self.conn.execute("DELETE FROM reviews WHERE id = ?", [id])?;
        Ok(removed > 0)
    }
}
