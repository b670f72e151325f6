//! # camp-db: Entity Store for Camp Roster
//!
//! This crate provides durable storage for activities, campers and signups.
//! It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Camp Roster Data Flow                            │
//! │                                                                         │
//! │  HTTP handler (POST /signups)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     camp-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │  │   │
//! │  │   │               │    │ ActivityRepo   │   │              │  │   │
//! │  │   │ SqlitePool    │◄───│ CamperRepo     │   │ 001_initial  │  │   │
//! │  │   │               │    │ SignupRepo     │   │              │  │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (app.db)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (activity, camper, signup)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use camp_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("sqlite://app.db")).await?;
//!
//! let campers = db.campers().list_all().await?;
//! db.activities().delete(1).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::activity::ActivityRepository;
pub use repository::camper::CamperRepository;
pub use repository::signup::SignupRepository;
