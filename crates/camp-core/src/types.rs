//! # Domain Types
//!
//! Core domain types used throughout Camp Roster.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Activity     │   │     Signup      │   │     Camper      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  activity_id    │   │  id             │       │
//! │  │  name           │   │  camper_id      │──►│  name           │       │
//! │  │  difficulty     │   │  time (0-23)    │   │  age (8-18)     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Activity 1 ── * Signup * ── 1 Camper                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persisted vs Candidate Types
//! Persisted rows (`Activity`, `Camper`, `Signup`) carry a store-assigned `id`
//! and timestamps. Candidates (`NewActivity`, `NewCamper`, `NewSignup`,
//! `CamperPatch`) are what the validation engine produces and the store
//! accepts; they never carry ids or timestamps.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Resource
// =============================================================================

/// The kinds of entity the store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Activity,
    Camper,
    Signup,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Activity => "Activity",
            Resource::Camper => "Camper",
            Resource::Signup => "Signup",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Activity
// =============================================================================

/// Something campers can sign up for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Activity {
    pub id: i64,
    pub name: String,
    pub difficulty: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An activity about to be inserted.
///
/// Activities have no HTTP create route; they come from seeding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewActivity {
    pub name: String,
    pub difficulty: i64,
}

impl NewActivity {
    pub fn new(name: impl Into<String>, difficulty: i64) -> Self {
        NewActivity {
            name: name.into(),
            difficulty,
        }
    }
}

// =============================================================================
// Camper
// =============================================================================

/// A camper enrolled at camp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Camper {
    pub id: i64,
    /// Always a non-empty string once persisted.
    pub name: String,
    /// Always within [8, 18] once persisted.
    pub age: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Camper {
    /// Applies an already validated patch in place.
    ///
    /// Fields absent from the patch keep their current value.
    pub fn apply(&mut self, patch: &CamperPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
    }
}

/// A validated camper about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCamper {
    pub name: String,
    pub age: i64,
}

/// A validated partial update for a camper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CamperPatch {
    pub name: Option<String>,
    pub age: Option<i64>,
}

impl CamperPatch {
    /// Returns true when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none()
    }
}

// =============================================================================
// Signup
// =============================================================================

/// A camper booked into an activity at an hour slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Signup {
    pub id: i64,
    /// Hour of day, 0 through 23.
    pub time: i64,
    pub camper_id: i64,
    pub activity_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated signup about to be inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSignup {
    pub activity_id: i64,
    pub camper_id: i64,
    pub time: i64,
}

/// Flattened signup as listed to clients.
///
/// `camper` is `None` when the camper was deleted after signing up,
/// since camper deletion does not cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SignupView {
    pub id: i64,
    pub time: i64,
    pub activity: String,
    pub camper: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn camper() -> Camper {
        let now = Utc::now();
        Camper {
            id: 1,
            name: "Ava".to_string(),
            age: 12,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_resource_display() {
        assert_eq!(Resource::Activity.to_string(), "Activity");
        assert_eq!(Resource::Camper.to_string(), "Camper");
        assert_eq!(Resource::Signup.to_string(), "Signup");
    }

    #[test]
    fn test_apply_partial_patch_keeps_absent_fields() {
        let mut c = camper();
        c.apply(&CamperPatch {
            name: None,
            age: Some(10),
        });

        assert_eq!(c.name, "Ava");
        assert_eq!(c.age, 10);
    }

    #[test]
    fn test_empty_patch() {
        assert!(CamperPatch::default().is_empty());

        let before = camper();
        let mut after = before.clone();
        after.apply(&CamperPatch::default());
        assert_eq!(after, before);
    }
}
