use rusqlite::{params, Connection, Error, OptionalExtension};

use super::timestamp;
use crate::models::spot::{SpotSummary, PREVIEW_IMAGE_FALLBACK};

#[derive(Debug, Clone)]
pub struct NewSpot<'a> {
    pub owner_id: i64,
    pub address: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub country: &'a str,
    pub lat: f64,
    pub lng: f64,
    pub name: &'a str,
    pub description: &'a str,
    pub price: f64,
}

pub struct SpotsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> SpotsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, spot: &NewSpot<'_>) -> Result<i64, Error> {
        let now = timestamp();
        self.conn.execute(
            "INSERT INTO spots (owner_id, address, city, state, country, lat, lng, name, description, price, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                spot.owner_id,
                spot.address,
                spot.city,
                spot.state,
                spot.country,
                spot.lat,
                spot.lng,
                spot.name,
                spot.description,
                spot.price,
                now,
                now
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn add_image(&self, spot_id: i64, url: &str, preview: bool) -> Result<i64, Error> {
        let now = timestamp();
        self.conn.execute(
            "INSERT INTO spot_images (spot_id, url, preview, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
            params![spot_id, url, preview, now, now],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn exists(&self, id: i64) -> Result<bool, Error> {
        self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM spots WHERE id = ?)",
            [id],
            |row| row.get(0),
        )
    }

    /// Spot summary with its preview image, or the fallback string when no
    /// image is flagged as preview.
    pub fn summary(&self, id: i64) -> Result<Option<SpotSummary>, Error> {
        self.conn
            .query_row(
                "SELECT s.id, s.owner_id, s.address, s.city, s.state, s.country,
                        s.lat, s.lng, s.name, s.price,
                        (SELECT si.url FROM spot_images si
                         WHERE si.spot_id = s.id AND si.preview = 1
                         ORDER BY si.id LIMIT 1)
                 FROM spots s WHERE s.id = ?",
                [id],
                |row| {
                    let preview: Option<String> = row.get(10)?;
                    Ok(SpotSummary {
                        id: row.get(0)?,
                        owner_id: row.get(1)?,
                        address: row.get(2)?,
                        city: row.get(3)?,
                        state: row.get(4)?,
                        country: row.get(5)?,
                        lat: row.get(6)?,
                        lng: row.get(7)?,
                        name: row.get(8)?,
                        price: row.get(9)?,
                        preview_image: preview
                            .unwrap_or_else(|| PREVIEW_IMAGE_FALLBACK.to_string()),
                    })
                },
            )
            .optional()
    }
}
