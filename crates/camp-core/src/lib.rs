//! # camp-core: Pure Domain Logic for Camp Roster
//!
//! This crate holds the camp scheduling domain as plain types and pure
//! functions, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Camp Roster Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    camp-api (axum)                              │   │
//! │  │    /activities   /campers   /signups                            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ camp-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐        ┌───────────┐        ┌───────────┐      │   │
//! │  │   │   types   │        │   error   │        │ validation│      │   │
//! │  │   │  Camper   │        │ Validation│        │  engine   │      │   │
//! │  │   │  Activity │        │   Error   │        │  rules    │      │   │
//! │  │   │  Signup   │        │ CoreError │        │           │      │   │
//! │  │   └───────────┘        └───────────┘        └───────────┘      │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    camp-db (Entity Store)                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Activity, Camper, Signup, drafts and patches)
//! - [`error`] - Domain error types
//! - [`validation`] - The validation engine
//!
//! ## Example Usage
//!
//! ```rust
//! use camp_core::validation::validate_new_camper;
//! use serde_json::json;
//!
//! let payload = json!({ "name": "Ava", "age": 12 });
//! let camper = validate_new_camper(payload.as_object().unwrap()).unwrap();
//! assert_eq!(camper.age, 12);
//!
//! let payload = json!({ "name": "", "age": 30 });
//! let errors = validate_new_camper(payload.as_object().unwrap()).unwrap_err();
//! assert_eq!(
//!     errors.messages(),
//!     vec!["Camper must have a name.", "Age must be between 8 and 18."]
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError, ValidationErrors};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Youngest camper accepted.
pub const MIN_CAMPER_AGE: i64 = 8;

/// Oldest camper accepted.
pub const MAX_CAMPER_AGE: i64 = 18;

/// First hour slot of the day a signup can be booked for.
pub const FIRST_TIME_SLOT: i64 = 0;

/// Last hour slot of the day a signup can be booked for.
pub const LAST_TIME_SLOT: i64 = 23;
