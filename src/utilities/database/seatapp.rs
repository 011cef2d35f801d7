use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};
use serde::Serialize;

use crate::utilities::database::Database;

/// Account row for the bundled seat-booking endpoints. The password is
/// stored as a SHA-256 hex digest, never in the clear.
#[derive(Debug, Clone)]
pub struct AppUser {
    pub id: i64,
    pub upn: String,
    pub name: Option<String>,
    pub dept: Option<String>,
    pub roles: Option<String>,
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Floor {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Seat {
    pub id: i64,
    pub code: String,
    pub zone_id: i64,
    pub floor_id: i64,
}

/// Attendance breakdown over a date range. "Office" days are bookings in
/// any of the confirmed, checked_in or held states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceCounts {
    pub office: i64,
    pub remote: i64,
    pub no_show: i64,
}

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<AppUser> {
    Ok(AppUser {
        id: row.get(0)?,
        upn: row.get(1)?,
        name: row.get(2)?,
        dept: row.get(3)?,
        roles: row.get(4)?,
        password_hash: row.get(5)?,
    })
}

pub async fn get_user_by_upn(db: &Database, upn: &str) -> Result<Option<AppUser>> {
    let conn = db.conn.lock().await;
    conn.query_row(
        "SELECT id, upn, name, dept, roles, password_hash FROM app_user WHERE upn = ?1",
        params![upn],
        row_to_user,
    )
    .optional()
    .context("Failed to look up user by UPN")
}

pub async fn get_user_by_id(db: &Database, id: i64) -> Result<Option<AppUser>> {
    let conn = db.conn.lock().await;
    conn.query_row(
        "SELECT id, upn, name, dept, roles, password_hash FROM app_user WHERE id = ?1",
        params![id],
        row_to_user,
    )
    .optional()
    .context("Failed to look up user by id")
}

pub async fn list_floors(db: &Database) -> Result<Vec<Floor>> {
    let conn = db.conn.lock().await;
    let mut stmt = conn
        .prepare("SELECT id, name FROM floor ORDER BY id")
        .context("Failed to prepare floor query")?;
    let floors = stmt
        .query_map([], |row| {
            Ok(Floor {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })
        .context("Failed to query floors")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read floor rows")?;
    Ok(floors)
}

/// Seats of one floor, resolved through their zone.
pub async fn list_seats(db: &Database, floor_id: i64) -> Result<Vec<Seat>> {
    let conn = db.conn.lock().await;
    let mut stmt = conn
        .prepare(
            "SELECT s.id, s.code, s.zone_id, z.floor_id
             FROM seat s JOIN zone z ON z.id = s.zone_id
             WHERE z.floor_id = ?1
             ORDER BY s.id",
        )
        .context("Failed to prepare seat query")?;
    let seats = stmt
        .query_map(params![floor_id], |row| {
            Ok(Seat {
                id: row.get(0)?,
                code: row.get(1)?,
                zone_id: row.get(2)?,
                floor_id: row.get(3)?,
            })
        })
        .context("Failed to query seats")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read seat rows")?;
    Ok(seats)
}

pub async fn attendance_counts(
    db: &Database,
    user_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<AttendanceCounts> {
    let conn = db.conn.lock().await;
    let mut stmt = conn
        .prepare(
            "SELECT status, COUNT(*) FROM booking
             WHERE user_id = ?1 AND date >= ?2 AND date <= ?3
             GROUP BY status",
        )
        .context("Failed to prepare attendance query")?;
    let rows = stmt
        .query_map(
            params![user_id, from.to_string(), to.to_string()],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
        )
        .context("Failed to query bookings")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read booking rows")?;

    let mut counts = AttendanceCounts::default();
    for (status, n) in rows {
        match status.as_str() {
            "confirmed" | "checked_in" | "held" => counts.office += n,
            "remote" => counts.remote += n,
            "no_show" => counts.no_show += n,
            _ => {}
        }
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utilities::database::init::init_in_memory;

    async fn seed(db: &Database) {
        let conn = db.conn.lock().await;
        conn.execute_batch(
            "INSERT INTO app_user (upn, name, dept, roles, password_hash)
             VALUES ('mika@example.com', 'Mika', 'IT', 'user',
                     '5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8');
             INSERT INTO floor (name) VALUES ('Prizemlje');
             INSERT INTO floor (name) VALUES ('Sprat 1');
             INSERT INTO zone (floor_id) VALUES (1);
             INSERT INTO zone (floor_id) VALUES (2);
             INSERT INTO seat (code, zone_id) VALUES ('A-01', 1);
             INSERT INTO seat (code, zone_id) VALUES ('A-02', 1);
             INSERT INTO seat (code, zone_id) VALUES ('B-01', 2);
             INSERT INTO booking (user_id, date, status) VALUES (1, '2025-08-18', 'confirmed');
             INSERT INTO booking (user_id, date, status) VALUES (1, '2025-08-19', 'checked_in');
             INSERT INTO booking (user_id, date, status) VALUES (1, '2025-08-20', 'held');
             INSERT INTO booking (user_id, date, status) VALUES (1, '2025-08-21', 'remote');
             INSERT INTO booking (user_id, date, status) VALUES (1, '2025-08-22', 'no_show');
             INSERT INTO booking (user_id, date, status) VALUES (1, '2025-09-01', 'confirmed');",
        )
        .unwrap();
    }

    #[tokio::test]
    async fn looks_up_users_both_ways() {
        let db = init_in_memory().unwrap();
        seed(&db).await;

        let by_upn = get_user_by_upn(&db, "mika@example.com").await.unwrap().unwrap();
        assert_eq!(by_upn.name.as_deref(), Some("Mika"));

        let by_id = get_user_by_id(&db, by_upn.id).await.unwrap().unwrap();
        assert_eq!(by_id.upn, "mika@example.com");

        assert!(get_user_by_upn(&db, "nema@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn seats_are_scoped_to_their_floor() {
        let db = init_in_memory().unwrap();
        seed(&db).await;

        let floors = list_floors(&db).await.unwrap();
        assert_eq!(floors.len(), 2);

        let ground = list_seats(&db, floors[0].id).await.unwrap();
        assert_eq!(ground.len(), 2);
        assert_eq!(ground[0].code, "A-01");

        let upstairs = list_seats(&db, floors[1].id).await.unwrap();
        assert_eq!(upstairs.len(), 1);
        assert_eq!(upstairs[0].floor_id, floors[1].id);
    }

    #[tokio::test]
    async fn attendance_buckets_and_range_bounds() {
        let db = init_in_memory().unwrap();
        seed(&db).await;

        let counts = attendance_counts(
            &db,
            1,
            NaiveDate::from_ymd_opt(2025, 8, 18).unwrap(),
            NaiveDate::from_ymd_opt(2025, 8, 24).unwrap(),
        )
        .await
        .unwrap();
        assert_eq!(
            counts,
            AttendanceCounts {
                office: 3,
                remote: 1,
                no_show: 1
            }
        );
    }
}
