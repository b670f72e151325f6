//! # HTTP Routes
//!
//! ```text
//! GET    /                   200 (empty)
//! GET    /activities         200 [{id, name, difficulty}]
//! GET    /activities/:id     200 {id, name, difficulty} | 404
//! DELETE /activities/:id     204 | 404                    (cascades to signups)
//! GET    /campers            200 [{id, name, age}]
//! POST   /campers            201 {id, name, age} | 422
//! GET    /campers/:id        200 {id, name, age} | 404
//! PATCH  /campers/:id        200 {id, name, age} | 404 | 422
//! GET    /signups            200 [{id, time, activity, camper}]
//! POST   /signups            201 {id, name, difficulty} of the activity | 422
//! ```

pub mod activities;
pub mod campers;
pub mod signups;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use camp_core::{Activity, Camper, CoreError, Resource};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;

/// Message for requests that match no route.
pub const ROUTE_NOT_FOUND: &str = "Resource was not found.";

/// Every route, still needing state.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .merge(activities::routes())
        .merge(campers::routes())
        .merge(signups::routes())
        .fallback(route_not_found)
}

async fn index() -> StatusCode {
    StatusCode::OK
}

async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "errors": [ROUTE_NOT_FOUND] })),
    )
}

/// Parses a path id; anything that is not an integer names no row.
pub(crate) fn parse_id(raw: &str, resource: Resource) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::Core(CoreError::NotFound(resource)))
}

// =============================================================================
// Response DTOs
// =============================================================================
// Relationship fields are never serialized; rosters are available through the
// store joins only.

/// Activity as sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDto {
    pub id: i64,
    pub name: String,
    pub difficulty: i64,
}

impl From<Activity> for ActivityDto {
    fn from(activity: Activity) -> Self {
        ActivityDto {
            id: activity.id,
            name: activity.name,
            difficulty: activity.difficulty,
        }
    }
}

/// Camper as sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CamperDto {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

impl From<Camper> for CamperDto {
    fn from(camper: Camper) -> Self {
        CamperDto {
            id: camper.id,
            name: camper.name,
            age: camper.age,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("7", Resource::Camper).unwrap(), 7);

        for raw in ["abc", "1.5", "", "99999999999999999999"] {
            let err = parse_id(raw, Resource::Camper).unwrap_err();
            assert_eq!(err.status(), StatusCode::NOT_FOUND);
            assert_eq!(err.messages(), vec!["Camper was not found."]);
        }
    }

    #[test]
    fn test_dto_shape() {
        let dto = CamperDto {
            id: 1,
            name: "Ava".to_string(),
            age: 12,
        };
        assert_eq!(
            serde_json::to_value(&dto).unwrap(),
            serde_json::json!({"id": 1, "name": "Ava", "age": 12})
        );
    }
}
