//! Signup endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use camp_core::validation::{validate_new_signup, SignupReferences};
use camp_core::{CoreError, Resource, SignupView};
use tracing::info;

use super::ActivityDto;
use crate::error::ApiResult;
use crate::extract::JsonObject;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/signups", get(list_signups).post(create_signup))
}

async fn list_signups(State(state): State<AppState>) -> ApiResult<Json<Vec<SignupView>>> {
    Ok(Json(state.db.signups().list_views().await?))
}

/// Books a camper into an activity and answers with the activity, not the signup.
async fn create_signup(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> ApiResult<(StatusCode, Json<ActivityDto>)> {
    let refs = SignupReferences::from_payload(&body);
    let existing = state.db.signups().resolve_references(&refs).await?;
    let new = validate_new_signup(&body, existing)?;

    let signup = state.db.signups().create(&new).await?;
    info!(
        id = signup.id,
        activity_id = signup.activity_id,
        camper_id = signup.camper_id,
        "Signup created"
    );

    let activity = state
        .db
        .activities()
        .find_by_id(signup.activity_id)
        .await?
        .ok_or(CoreError::NotFound(Resource::Activity))?;

    Ok((StatusCode::CREATED, Json(activity.into())))
}
