//! # Camper Repository
//!
//! Database operations for campers.
//!
//! ## Key Operations
//! - CRUD with partial updates (`update` applies a validated [`CamperPatch`])
//! - Derived "activities" relation through signups
//!
//! Deleting a camper removes only the camper row. Its signups stay behind and
//! keep pointing at the old id.

use camp_core::{Activity, Camper, CamperPatch, NewCamper, Resource};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for camper database operations.
#[derive(Debug, Clone)]
pub struct CamperRepository {
    pool: SqlitePool,
}

impl CamperRepository {
    /// Creates a new CamperRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CamperRepository { pool }
    }

    /// Lists every camper in storage order.
    pub async fn list_all(&self) -> DbResult<Vec<Camper>> {
        let campers = sqlx::query_as::<_, Camper>(
            r#"
            SELECT id, name, age, created_at, updated_at
            FROM campers
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(campers)
    }

    /// Gets a camper by id, `None` when absent.
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Camper>> {
        let camper = sqlx::query_as::<_, Camper>(
            r#"
            SELECT id, name, age, created_at, updated_at
            FROM campers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(camper)
    }

    /// Checks whether a camper with this id exists.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM campers WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    /// Inserts a validated camper, stamping both timestamps.
    pub async fn create(&self, new: &NewCamper) -> DbResult<Camper> {
        let now = Utc::now();

        debug!(name = %new.name, age = new.age, "Creating camper");

        let result = sqlx::query(
            r#"
            INSERT INTO campers (name, age, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&new.name)
        .bind(new.age)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Camper {
            id: result.last_insert_rowid(),
            name: new.name.clone(),
            age: new.age,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a validated patch to a camper and persists it.
    ///
    /// Fields absent from the patch keep their current value. `updated_at` is
    /// stamped even when the patch is empty.
    ///
    /// ## Errors
    /// `DbError::NotFound` when the camper was deleted in the meantime.
    pub async fn update(&self, camper: &Camper, patch: &CamperPatch) -> DbResult<Camper> {
        let mut updated = camper.clone();
        updated.apply(patch);
        updated.updated_at = Utc::now();

        debug!(id = %updated.id, ?patch, "Updating camper");

        let result = sqlx::query(
            r#"
            UPDATE campers
            SET
                name = ?2,
                age = ?3,
                updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(updated.id)
        .bind(&updated.name)
        .bind(updated.age)
        .bind(updated.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(Resource::Camper, camper.id));
        }

        Ok(updated)
    }

    /// Deletes a camper row only; its signups are left in place.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting camper");

        let result = sqlx::query("DELETE FROM campers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(Resource::Camper, id));
        }

        Ok(())
    }

    /// Activities a camper signed up for, one entry per signup, in signup order.
    pub async fn activities(&self, id: i64) -> DbResult<Vec<Activity>> {
        let activities = sqlx::query_as::<_, Activity>(
            r#"
            SELECT a.id, a.name, a.difficulty, a.created_at, a.updated_at
            FROM signups s
            INNER JOIN activities a ON a.id = s.activity_id
            WHERE s.camper_id = ?1
            ORDER BY s.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(activities)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures::{archery, ava, database};
    use camp_core::{NewActivity, NewSignup};

    #[tokio::test]
    async fn test_create_and_find() {
        let db = database().await;
        let repo = db.campers();

        let created = repo.create(&ava()).await.unwrap();
        assert_eq!(created.id, 1);

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Ava");
        assert_eq!(found.age, 12);
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
        assert!(repo.find_by_id(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_applies_only_patched_fields() {
        let db = database().await;
        let repo = db.campers();
        let camper = repo.create(&ava()).await.unwrap();

        let updated = repo
            .update(
                &camper,
                &CamperPatch {
                    name: None,
                    age: Some(10),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Ava");
        assert_eq!(updated.age, 10);
        assert_eq!(updated.created_at, camper.created_at);
        assert!(updated.updated_at >= camper.updated_at);

        let stored = repo.find_by_id(camper.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Ava");
        assert_eq!(stored.age, 10);
    }

    #[tokio::test]
    async fn test_update_deleted_camper() {
        let db = database().await;
        let repo = db.campers();
        let camper = repo.create(&ava()).await.unwrap();
        repo.delete(camper.id).await.unwrap();

        let err = repo
            .update(&camper, &CamperPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_does_not_cascade_to_signups() {
        let db = database().await;
        let activity = db.activities().create(&archery()).await.unwrap();
        let camper = db.campers().create(&ava()).await.unwrap();
        let signup = db
            .signups()
            .create(&NewSignup {
                activity_id: activity.id,
                camper_id: camper.id,
                time: 9,
            })
            .await
            .unwrap();

        db.campers().delete(camper.id).await.unwrap();

        assert!(db.campers().find_by_id(camper.id).await.unwrap().is_none());
        let kept = db.signups().find_by_id(signup.id).await.unwrap().unwrap();
        assert_eq!(kept.camper_id, camper.id);
    }

    #[tokio::test]
    async fn test_delete_missing_camper() {
        let db = database().await;
        assert!(matches!(
            db.campers().delete(3).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_activities_follows_signups() {
        let db = database().await;
        let archery = db.activities().create(&archery()).await.unwrap();
        let canoe = db
            .activities()
            .create(&NewActivity::new("Canoeing", 3))
            .await
            .unwrap();
        let camper = db.campers().create(&ava()).await.unwrap();

        for (activity_id, time) in [(canoe.id, 8), (archery.id, 13)] {
            db.signups()
                .create(&NewSignup {
                    activity_id,
                    camper_id: camper.id,
                    time,
                })
                .await
                .unwrap();
        }

        let names: Vec<String> = db
            .campers()
            .activities(camper.id)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["Canoeing", "Archery"]);
    }
}
