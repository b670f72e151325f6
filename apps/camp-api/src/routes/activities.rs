//! Activity endpoints. Activities are read and deleted here, never created.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use camp_core::{CoreError, Resource};
use tracing::info;

use super::{parse_id, ActivityDto};
use crate::error::ApiResult;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/activities", get(list_activities))
        .route("/activities/:id", get(get_activity).delete(delete_activity))
}

async fn list_activities(State(state): State<AppState>) -> ApiResult<Json<Vec<ActivityDto>>> {
    let activities = state.db.activities().list_all().await?;
    Ok(Json(activities.into_iter().map(ActivityDto::from).collect()))
}

async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ActivityDto>> {
    let id = parse_id(&id, Resource::Activity)?;
    let activity = state
        .db
        .activities()
        .find_by_id(id)
        .await?
        .ok_or(CoreError::NotFound(Resource::Activity))?;

    Ok(Json(activity.into()))
}

async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id, Resource::Activity)?;
    let signups = state.db.activities().delete(id).await?;

    info!(id, signups, "Activity deleted");
    Ok(StatusCode::NO_CONTENT)
}
