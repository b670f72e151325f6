//! # Activity Repository
//!
//! Database operations for activities.
//!
//! ## Cascade Delete
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Deleting an Activity                                 │
//! │                                                                         │
//! │  BEGIN                                                                 │
//! │    DELETE FROM signups    WHERE activity_id = ?   (N rows)             │
//! │    DELETE FROM activities WHERE id = ?            (1 row, or 0 → abort)│
//! │  COMMIT                                                                │
//! │                                                                         │
//! │  Either every signup and the activity go, or nothing does.             │
//! │  Campers are never touched.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use camp_core::{Activity, Camper, NewActivity, Resource};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for activity database operations.
#[derive(Debug, Clone)]
pub struct ActivityRepository {
    pool: SqlitePool,
}

impl ActivityRepository {
    /// Creates a new ActivityRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ActivityRepository { pool }
    }

    /// Lists every activity in storage order.
    pub async fn list_all(&self) -> DbResult<Vec<Activity>> {
        let activities = sqlx::query_as::<_, Activity>(
            r#"
            SELECT id, name, difficulty, created_at, updated_at
            FROM activities
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(activities)
    }

    /// Gets an activity by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Activity))` - Activity found
    /// * `Ok(None)` - Activity not found
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Activity>> {
        let activity = sqlx::query_as::<_, Activity>(
            r#"
            SELECT id, name, difficulty, created_at, updated_at
            FROM activities
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(activity)
    }

    /// Checks whether an activity with this id exists.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM activities WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    /// Inserts a new activity, stamping both timestamps.
    pub async fn create(&self, new: &NewActivity) -> DbResult<Activity> {
        let now = Utc::now();

        debug!(name = %new.name, difficulty = new.difficulty, "Creating activity");

        let result = sqlx::query(
            r#"
            INSERT INTO activities (name, difficulty, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&new.name)
        .bind(new.difficulty)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Activity {
            id: result.last_insert_rowid(),
            name: new.name.clone(),
            difficulty: new.difficulty,
            created_at: now,
            updated_at: now,
        })
    }

    /// Deletes an activity together with all of its signups.
    ///
    /// ## Returns
    /// The number of signups removed alongside the activity.
    ///
    /// ## Errors
    /// `DbError::NotFound` when no activity has this id; nothing is deleted.
    pub async fn delete(&self, id: i64) -> DbResult<u64> {
        debug!(id = %id, "Deleting activity and its signups");

        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let signups = sqlx::query("DELETE FROM signups WHERE activity_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM activities WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Err(DbError::not_found(Resource::Activity, id));
        }

        tx.commit().await?;

        debug!(id = %id, signups = signups, "Activity deleted");
        Ok(signups)
    }

    /// Campers signed up for an activity, one entry per signup, in signup order.
    ///
    /// A camper booked into two slots appears twice. Signups whose camper was
    /// deleted are skipped.
    pub async fn campers(&self, id: i64) -> DbResult<Vec<Camper>> {
        let campers = sqlx::query_as::<_, Camper>(
            r#"
            SELECT c.id, c.name, c.age, c.created_at, c.updated_at
            FROM signups s
            INNER JOIN campers c ON c.id = s.camper_id
            WHERE s.activity_id = ?1
            ORDER BY s.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(campers)
    }

    /// Counts activities (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM activities")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
