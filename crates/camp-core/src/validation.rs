//! # Validation Module
//!
//! The validation engine: every write is gated by a pass through here.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Pass                                    │
//! │                                                                         │
//! │  JSON payload (serde_json::Map)                                        │
//! │       │                                                                 │
//! │       ├── field validator: name  ──► Ok(value) | record message        │
//! │       ├── field validator: age   ──► Ok(value) | record message        │
//! │       └── ...                    (every validator runs, no short-cut)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ValidationErrors empty?                                               │
//! │  ├── yes → Ok(NewCamper / CamperPatch / NewSignup)                     │
//! │  └── no  → Err(ValidationErrors)  (candidate is discarded)             │
//! │                                                                         │
//! │  Each call owns its own error list; nothing is shared between calls.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Referential Rules
//! Whether a signup's camper and activity exist is a store question. The store
//! answers it up front ([`ExistingReferences`]) for the ids named by
//! [`SignupReferences::from_payload`], and this module turns the answer into
//! messages alongside the field rules.
//!
//! ## Usage
//! ```rust
//! use camp_core::validation::{validate_new_signup, ExistingReferences};
//! use serde_json::json;
//!
//! let payload = json!({ "activity_id": 1, "time": 25, "camper_id": 1 });
//! let existing = ExistingReferences { activity: true, camper: true };
//!
//! let errors = validate_new_signup(payload.as_object().unwrap(), existing).unwrap_err();
//! assert_eq!(errors.messages(), vec!["Time must be between 0 and 23."]);
//! ```

use serde_json::{Map, Value};

use crate::error::{ValidationError, ValidationErrors};
use crate::types::{CamperPatch, NewCamper, NewSignup};
use crate::{FIRST_TIME_SLOT, LAST_TIME_SLOT, MAX_CAMPER_AGE, MIN_CAMPER_AGE};

/// Result of a single field validator.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result of a whole validation pass.
pub type Validated<T> = Result<T, ValidationErrors>;

/// Fields a camper patch may touch.
pub const PATCHABLE_CAMPER_FIELDS: &[&str] = &["name", "age"];

static NULL: Value = Value::Null;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a camper name.
///
/// ## Rules
/// - Must be a JSON string
/// - Must not be empty
pub fn validate_camper_name(value: &Value) -> ValidationResult<String> {
    match value {
        Value::String(name) if !name.is_empty() => Ok(name.clone()),
        _ => Err(ValidationError::CamperNameRequired),
    }
}

/// Validates a camper age.
///
/// ## Rules
/// - Must be a JSON integer (`12.0`, `"12"` and `true` are rejected)
/// - Must be within [8, 18]
///
/// ## Example
/// ```rust
/// use camp_core::validation::validate_camper_age;
/// use serde_json::json;
///
/// assert_eq!(validate_camper_age(&json!(8)), Ok(8));
/// assert!(validate_camper_age(&json!(19)).is_err());
/// assert!(validate_camper_age(&json!("12")).is_err());
/// ```
pub fn validate_camper_age(value: &Value) -> ValidationResult<i64> {
    let age = as_integer(value).ok_or(ValidationError::AgeNotInteger)?;

    if !(MIN_CAMPER_AGE..=MAX_CAMPER_AGE).contains(&age) {
        return Err(ValidationError::AgeOutOfRange);
    }

    Ok(age)
}

/// Validates a signup hour slot.
///
/// ## Rules
/// - Must be a JSON integer
/// - Must be within [0, 23]
pub fn validate_signup_time(value: &Value) -> ValidationResult<i64> {
    let time = as_integer(value).ok_or(ValidationError::TimeNotInteger)?;

    if !(FIRST_TIME_SLOT..=LAST_TIME_SLOT).contains(&time) {
        return Err(ValidationError::TimeOutOfRange);
    }

    Ok(time)
}

/// Reads a JSON integer. Integers beyond `i64` saturate so range checks fail.
///
/// The number's literal decides: `100000000000000000000` is an integer,
/// `1e20` and `12.0` are not.
fn as_integer(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(i);
    }

    let literal = n.to_string();
    let (negative, digits) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal.as_str()),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(if negative { i64::MIN } else { i64::MAX })
}

/// Missing keys validate as `null`.
fn field<'a>(payload: &'a Map<String, Value>, key: &str) -> &'a Value {
    payload.get(key).unwrap_or(&NULL)
}

/// Records a failed check and hands back the accepted value, if any.
fn check<T>(errors: &mut ValidationErrors, result: ValidationResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            errors.push(err);
            None
        }
    }
}

// =============================================================================
// Camper
// =============================================================================

/// Validates a camper creation payload `{name, age}`.
///
/// Keys other than `name` and `age` are ignored.
pub fn validate_new_camper(payload: &Map<String, Value>) -> Validated<NewCamper> {
    let mut errors = ValidationErrors::new();

    let name = check(&mut errors, validate_camper_name(field(payload, "name")));
    let age = check(&mut errors, validate_camper_age(field(payload, "age")));

    match (name, age) {
        (Some(name), Some(age)) => Ok(NewCamper { name, age }),
        _ => Err(errors),
    }
}

/// Validates a partial camper update.
///
/// ## Rules
/// - Only keys present are validated; absent fields stay untouched
/// - Keys outside [`PATCHABLE_CAMPER_FIELDS`] are rejected
///
/// Messages come in the order name, age, then unknown keys.
pub fn validate_camper_patch(payload: &Map<String, Value>) -> Validated<CamperPatch> {
    let mut errors = ValidationErrors::new();
    let mut patch = CamperPatch::default();

    if let Some(value) = payload.get("name") {
        patch.name = check(&mut errors, validate_camper_name(value));
    }

    if let Some(value) = payload.get("age") {
        patch.age = check(&mut errors, validate_camper_age(value));
    }

    for key in payload.keys() {
        if !PATCHABLE_CAMPER_FIELDS.contains(&key.as_str()) {
            errors.push(ValidationError::UnknownField(key.clone()));
        }
    }

    errors.into_result(|| patch)
}

// =============================================================================
// Signup
// =============================================================================

/// Foreign ids named by a signup payload.
///
/// `None` means the payload value was missing or not an integer, which can
/// never match a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignupReferences {
    pub activity_id: Option<i64>,
    pub camper_id: Option<i64>,
}

impl SignupReferences {
    /// Extracts `activity_id` and `camper_id` from a signup payload.
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        SignupReferences {
            activity_id: field(payload, "activity_id").as_i64(),
            camper_id: field(payload, "camper_id").as_i64(),
        }
    }
}

/// Whether the rows named by [`SignupReferences`] exist, as reported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExistingReferences {
    pub activity: bool,
    pub camper: bool,
}

/// Validates a signup creation payload `{activity_id, time, camper_id}`.
///
/// Messages come in payload order: activity, time, camper.
pub fn validate_new_signup(
    payload: &Map<String, Value>,
    existing: ExistingReferences,
) -> Validated<NewSignup> {
    let refs = SignupReferences::from_payload(payload);
    let mut errors = ValidationErrors::new();

    let activity_id = check(
        &mut errors,
        refs.activity_id
            .filter(|_| existing.activity)
            .ok_or(ValidationError::ActivityNotFound),
    );
    let time = check(&mut errors, validate_signup_time(field(payload, "time")));
    let camper_id = check(
        &mut errors,
        refs.camper_id
            .filter(|_| existing.camper)
            .ok_or(ValidationError::CamperNotFound),
    );

    match (activity_id, time, camper_id) {
        (Some(activity_id), Some(time), Some(camper_id)) => Ok(NewSignup {
            activity_id,
            camper_id,
            time,
        }),
        _ => Err(errors),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    const ALL_FOUND: ExistingReferences = ExistingReferences {
        activity: true,
        camper: true,
    };

    #[test]
    fn test_validate_camper_name() {
        assert_eq!(validate_camper_name(&json!("Ava")), Ok("Ava".to_string()));

        assert!(validate_camper_name(&json!("")).is_err());
        assert!(validate_camper_name(&json!(null)).is_err());
        assert!(validate_camper_name(&json!(42)).is_err());
        assert!(validate_camper_name(&json!(["Ava"])).is_err());
    }

    #[test]
    fn test_validate_camper_age() {
        assert_eq!(validate_camper_age(&json!(8)), Ok(8));
        assert_eq!(validate_camper_age(&json!(18)), Ok(18));

        assert_eq!(
            validate_camper_age(&json!(7)),
            Err(ValidationError::AgeOutOfRange)
        );
        assert_eq!(
            validate_camper_age(&json!(19)),
            Err(ValidationError::AgeOutOfRange)
        );
        assert_eq!(
            validate_camper_age(&json!(u64::MAX)),
            Err(ValidationError::AgeOutOfRange)
        );
        assert_eq!(
            validate_camper_age(&json!(12.0)),
            Err(ValidationError::AgeNotInteger)
        );

        let wide: Value = serde_json::from_str("100000000000000000000").unwrap();
        assert_eq!(validate_camper_age(&wide), Err(ValidationError::AgeOutOfRange));
        let wide: Value = serde_json::from_str("-100000000000000000000").unwrap();
        assert_eq!(validate_signup_time(&wide), Err(ValidationError::TimeOutOfRange));
        let exponent: Value = serde_json::from_str("1e20").unwrap();
        assert_eq!(validate_camper_age(&exponent), Err(ValidationError::AgeNotInteger));
        assert_eq!(
            validate_camper_age(&json!("12")),
            Err(ValidationError::AgeNotInteger)
        );
        assert_eq!(
            validate_camper_age(&json!(true)),
            Err(ValidationError::AgeNotInteger)
        );
    }

    #[test]
    fn test_validate_signup_time() {
        assert_eq!(validate_signup_time(&json!(0)), Ok(0));
        assert_eq!(validate_signup_time(&json!(23)), Ok(23));

        assert_eq!(
            validate_signup_time(&json!(24)),
            Err(ValidationError::TimeOutOfRange)
        );
        assert_eq!(
            validate_signup_time(&json!(-1)),
            Err(ValidationError::TimeOutOfRange)
        );
        assert_eq!(
            validate_signup_time(&json!("9")),
            Err(ValidationError::TimeNotInteger)
        );
    }

    #[test]
    fn test_new_camper_reports_every_violation() {
        let errors = validate_new_camper(&object(json!({ "name": "", "age": "ten" })))
            .unwrap_err();

        assert_eq!(
            errors.messages(),
            vec!["Camper must have a name.", "Age must be an integer."]
        );
    }

    #[test]
    fn test_new_camper_missing_fields_validate_as_null() {
        let errors = validate_new_camper(&object(json!({}))).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_new_camper_ok() {
        let camper = validate_new_camper(&object(json!({ "name": "Ava", "age": 12 }))).unwrap();
        assert_eq!(
            camper,
            NewCamper {
                name: "Ava".to_string(),
                age: 12
            }
        );
    }

    #[test]
    fn test_passes_do_not_share_state() {
        let bad = object(json!({ "name": "", "age": 3 }));
        let good = object(json!({ "name": "Ben", "age": 9 }));

        assert!(validate_new_camper(&bad).is_err());
        assert!(validate_new_camper(&good).is_ok());
    }

    #[test]
    fn test_patch_only_touches_present_fields() {
        let patch = validate_camper_patch(&object(json!({ "age": 10 }))).unwrap();
        assert_eq!(
            patch,
            CamperPatch {
                name: None,
                age: Some(10)
            }
        );

        let patch = validate_camper_patch(&object(json!({}))).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_patch_rejects_unknown_fields() {
        let errors = validate_camper_patch(&object(json!({ "age": 10, "id": 99 }))).unwrap_err();
        assert_eq!(errors.errors(), &[ValidationError::UnknownField("id".to_string())]);
    }

    #[test]
    fn test_patch_validates_present_values() {
        let errors =
            validate_camper_patch(&object(json!({ "name": null, "age": 40 }))).unwrap_err();
        assert_eq!(
            errors.messages(),
            vec!["Camper must have a name.", "Age must be between 8 and 18."]
        );
    }

    #[test]
    fn test_signup_references_from_payload() {
        let refs = SignupReferences::from_payload(&object(
            json!({ "activity_id": 3, "camper_id": "7", "time": 9 }),
        ));
        assert_eq!(refs.activity_id, Some(3));
        assert_eq!(refs.camper_id, None);
    }

    #[test]
    fn test_new_signup_ok() {
        let signup = validate_new_signup(
            &object(json!({ "activity_id": 1, "time": 9, "camper_id": 2 })),
            ALL_FOUND,
        )
        .unwrap();

        assert_eq!(
            signup,
            NewSignup {
                activity_id: 1,
                camper_id: 2,
                time: 9
            }
        );
    }

    #[test]
    fn test_new_signup_missing_references() {
        let errors = validate_new_signup(
            &object(json!({ "activity_id": 1, "time": 9, "camper_id": 2 })),
            ExistingReferences::default(),
        )
        .unwrap_err();

        assert_eq!(
            errors.messages(),
            vec!["Activity was not found.", "Camper was not found."]
        );
    }

    #[test]
    fn test_new_signup_non_integer_id_is_not_found() {
        let errors = validate_new_signup(
            &object(json!({ "activity_id": "1", "time": 9, "camper_id": 2 })),
            ALL_FOUND,
        )
        .unwrap_err();

        assert_eq!(errors.errors(), &[ValidationError::ActivityNotFound]);
    }

    #[test]
    fn test_new_signup_reports_in_payload_order() {
        let errors = validate_new_signup(
            &object(json!({ "activity_id": 1, "time": "noon", "camper_id": 2 })),
            ExistingReferences {
                activity: false,
                camper: false,
            },
        )
        .unwrap_err();

        assert_eq!(
            errors.messages(),
            vec![
                "Activity was not found.",
                "Time must be an integer.",
                "Camper was not found."
            ]
        );
    }
}
