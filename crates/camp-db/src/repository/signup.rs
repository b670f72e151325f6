//! # Signup Repository
//!
//! Database operations for signups, the join between campers and activities.
//!
//! ## Signup Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Signup Lifecycle                                  │
//! │                                                                         │
//! │  1. RESOLVE REFERENCES                                                 │
//! │     └── resolve_references() → ExistingReferences (feeds validation)   │
//! │                                                                         │
//! │  2. CREATE                                                             │
//! │     └── create() → BEGIN, re-check both references, INSERT, COMMIT     │
//! │         (a reference missing at this point → IntegrityViolation)       │
//! │                                                                         │
//! │  3. DESTROY                                                            │
//! │     ├── delete()                  (individually)                       │
//! │     └── ActivityRepository::delete (cascade)                           │
//! │                                                                         │
//! │  Signups are never updated.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use camp_core::validation::{ExistingReferences, SignupReferences};
use camp_core::{NewSignup, Resource, Signup, SignupView};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};

/// Repository for signup database operations.
#[derive(Debug, Clone)]
pub struct SignupRepository {
    pool: SqlitePool,
}

impl SignupRepository {
    /// Creates a new SignupRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SignupRepository { pool }
    }

    /// Lists every signup row in storage order.
    pub async fn list_all(&self) -> DbResult<Vec<Signup>> {
        let signups = sqlx::query_as::<_, Signup>(
            r#"
            SELECT id, time, camper_id, activity_id, created_at, updated_at
            FROM signups
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(signups)
    }

    /// Lists signups flattened to `{id, time, activity, camper}`.
    ///
    /// `camper` is `None` for signups whose camper was deleted.
    pub async fn list_views(&self) -> DbResult<Vec<SignupView>> {
        let views = sqlx::query_as::<_, SignupView>(
            r#"
            SELECT
                s.id,
                s.time,
                a.name AS activity,
                c.name AS camper
            FROM signups s
            INNER JOIN activities a ON a.id = s.activity_id
            LEFT JOIN campers c ON c.id = s.camper_id
            ORDER BY s.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(views)
    }

    /// Gets a signup by id, `None` when absent.
    pub async fn find_by_id(&self, id: i64) -> DbResult<Option<Signup>> {
        let signup = sqlx::query_as::<_, Signup>(
            r#"
            SELECT id, time, camper_id, activity_id, created_at, updated_at
            FROM signups
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(signup)
    }

    /// Looks up whether the rows a signup payload names exist.
    ///
    /// Ids that were missing or not integers resolve to `false` without a query.
    pub async fn resolve_references(
        &self,
        refs: &SignupReferences,
    ) -> DbResult<ExistingReferences> {
        let activity = match refs.activity_id {
            Some(id) => row_exists(&self.pool, Resource::Activity, id).await?,
            None => false,
        };
        let camper = match refs.camper_id {
            Some(id) => row_exists(&self.pool, Resource::Camper, id).await?,
            None => false,
        };

        Ok(ExistingReferences { activity, camper })
    }

    /// Inserts a validated signup.
    ///
    /// Both references are checked again inside the write transaction, so a
    /// camper or activity deleted after validation cannot leave a dangling row.
    ///
    /// ## Errors
    /// `DbError::IntegrityViolation` when a reference no longer resolves.
    pub async fn create(&self, new: &NewSignup) -> DbResult<Signup> {
        let now = Utc::now();

        debug!(
            activity_id = new.activity_id,
            camper_id = new.camper_id,
            time = new.time,
            "Creating signup"
        );

        // IMMEDIATE takes the write lock up front; a deferred transaction that
        // reads first cannot be upgraded once another connection has written.
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        for (resource, id) in [
            (Resource::Activity, new.activity_id),
            (Resource::Camper, new.camper_id),
        ] {
            if !row_exists(&mut *tx, resource, id).await? {
                tx.rollback().await?;
                warn!(%resource, id, "Rejected signup with dangling reference");
                return Err(DbError::integrity(format!("{resource} {id} does not exist")));
            }
        }

        let result = sqlx::query(
            r#"
            INSERT INTO signups (time, camper_id, activity_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(new.time)
        .bind(new.camper_id)
        .bind(new.activity_id)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Signup {
            id: result.last_insert_rowid(),
            time: new.time,
            camper_id: new.camper_id,
            activity_id: new.activity_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Deletes a single signup.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting signup");

        let result = sqlx::query("DELETE FROM signups WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(Resource::Signup, id));
        }

        Ok(())
    }
}

/// `SELECT 1` probe against the resource's table, on a pool or inside a transaction.
async fn row_exists<'e, E>(executor: E, resource: Resource, id: i64) -> DbResult<bool>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let sql = match resource {
        Resource::Activity => "SELECT 1 FROM activities WHERE id = ?1",
        Resource::Camper => "SELECT 1 FROM campers WHERE id = ?1",
        Resource::Signup => "SELECT 1 FROM signups WHERE id = ?1",
    };

    let found: Option<i64> = sqlx::query_scalar(sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(found.is_some())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures::{archery, ava, database};
    use crate::{Database, DbConfig};
    use camp_core::NewCamper;

    #[tokio::test]
    async fn test_create_and_list_views() {
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
        assert_eq!(signup.id, 1);

        let views = db.signups().list_views().await.unwrap();
        assert_eq!(
            views,
            vec![SignupView {
                id: signup.id,
                time: 9,
                activity: "Archery".to_string(),
                camper: Some("Ava".to_string()),
            }]
        );
        assert_eq!(db.signups().list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_resolve_references() {
        let db = database().await;
        let activity = db.activities().create(&archery()).await.unwrap();

        let existing = db
            .signups()
            .resolve_references(&SignupReferences {
                activity_id: Some(activity.id),
                camper_id: Some(5),
            })
            .await
            .unwrap();
        assert_eq!(
            existing,
            ExistingReferences {
                activity: true,
                camper: false
            }
        );

        let existing = db
            .signups()
            .resolve_references(&SignupReferences::default())
            .await
            .unwrap();
        assert_eq!(existing, ExistingReferences::default());
    }

    #[tokio::test]
    async fn test_create_rejects_dangling_camper() {
        let db = database().await;
        let activity = db.activities().create(&archery()).await.unwrap();

        let err = db
            .signups()
            .create(&NewSignup {
                activity_id: activity.id,
                camper_id: 77,
                time: 9,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::IntegrityViolation { .. }));
        assert!(db.signups().list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_dangling_activity() {
        let db = database().await;
        let camper = db.campers().create(&ava()).await.unwrap();

        let err = db
            .signups()
            .create(&NewSignup {
                activity_id: 3,
                camper_id: camper.id,
                time: 9,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::IntegrityViolation { .. }));
    }

    #[tokio::test]
    async fn test_views_survive_camper_deletion() {
        let db = database().await;
        let activity = db.activities().create(&archery()).await.unwrap();
        let camper = db.campers().create(&ava()).await.unwrap();
        db.signups()
            .create(&NewSignup {
                activity_id: activity.id,
                camper_id: camper.id,
                time: 9,
            })
            .await
            .unwrap();

        db.campers().delete(camper.id).await.unwrap();

        let views = db.signups().list_views().await.unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].camper, None);
        assert_eq!(views[0].activity, "Archery");
    }

    #[tokio::test]
    async fn test_delete_single_signup() {
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

        db.signups().delete(signup.id).await.unwrap();

        assert!(db.signups().find_by_id(signup.id).await.unwrap().is_none());
        assert!(db.activities().exists(activity.id).await.unwrap());
        assert!(matches!(
            db.signups().delete(signup.id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_all_commit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("camp.db");
        let db = Database::new(DbConfig::new(path.display().to_string()).max_connections(8))
            .await
            .unwrap();

        let activity_id = db.activities().create(&archery()).await.unwrap().id;
        let mut camper_ids = Vec::new();
        for i in 0..40 {
            let camper = db
                .campers()
                .create(&NewCamper {
                    name: format!("Camper {i}"),
                    age: 12,
                })
                .await
                .unwrap();
            camper_ids.push(camper.id);
        }

        let handles: Vec<_> = camper_ids
            .into_iter()
            .map(|camper_id| {
                let db = db.clone();
                tokio::spawn(async move {
                    db.signups()
                        .create(&NewSignup {
                            activity_id,
                            camper_id,
                            time: 9,
                        })
                        .await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(db.signups().list_all().await.unwrap().len(), 40);
        db.close().await;
    }
}
