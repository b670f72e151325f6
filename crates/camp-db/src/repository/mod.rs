//! # Repository Module
//!
//! Database repository implementations for Camp Roster.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.activities().delete(id)                                    │
//! │       ▼                                                                 │
//! │  ActivityRepository                                                    │
//! │  ├── list_all(&self)                                                   │
//! │  ├── find_by_id(&self, id)                                             │
//! │  ├── create(&self, new)                                                │
//! │  ├── delete(&self, id)        ← cascades to signups                    │
//! │  └── campers(&self, id)       ← derived relation (join)                │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Conventions
//! - `find_by_id` returns `Ok(None)` for a missing row; absence is not an error
//! - `list_all` has no ORDER BY contract; rows come back in storage order
//! - `created_at` / `updated_at` are stamped here, never by callers
//!
//! ## Available Repositories
//!
//! - [`ActivityRepository`](activity::ActivityRepository) - Activities and the cascade delete
//! - [`CamperRepository`](camper::CamperRepository) - Campers and partial updates
//! - [`SignupRepository`](signup::SignupRepository) - Signups, reference checks, flattened listing

pub mod activity;
pub mod camper;
pub mod signup;

#[cfg(test)]
pub(crate) mod fixtures {
    use camp_core::{NewActivity, NewCamper};

    use crate::{Database, DbConfig};

    pub async fn database() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    pub fn archery() -> NewActivity {
        NewActivity::new("Archery", 2)
    }

    pub fn ava() -> NewCamper {
        NewCamper {
            name: "Ava".to_string(),
            age: 12,
        }
    }
}
