//! Camper endpoints.
//!
//! `PATCH /campers/:id` looks the camper up before parsing or validating the
//! body, so a missing camper is a 404 whatever the body holds.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use camp_core::validation::{validate_camper_patch, validate_new_camper};
use camp_core::{CoreError, Resource};

use super::{parse_id, CamperDto};
use crate::error::ApiResult;
use crate::extract::JsonObject;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/campers", get(list_campers).post(create_camper))
        .route("/campers/:id", get(get_camper).patch(update_camper))
}

async fn list_campers(State(state): State<AppState>) -> ApiResult<Json<Vec<CamperDto>>> {
    let campers = state.db.campers().list_all().await?;
    Ok(Json(campers.into_iter().map(CamperDto::from).collect()))
}

async fn create_camper(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> ApiResult<(StatusCode, Json<CamperDto>)> {
    let new = validate_new_camper(&body)?;
    let camper = state.db.campers().create(&new).await?;

    Ok((StatusCode::CREATED, Json(camper.into())))
}

async fn get_camper(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CamperDto>> {
    let id = parse_id(&id, Resource::Camper)?;
    let camper = state
        .db
        .campers()
        .find_by_id(id)
        .await?
        .ok_or(CoreError::NotFound(Resource::Camper))?;

    Ok(Json(camper.into()))
}

async fn update_camper(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<CamperDto>> {
    let id = parse_id(&id, Resource::Camper)?;
    let campers = state.db.campers();

    let camper = campers
        .find_by_id(id)
        .await?
        .ok_or(CoreError::NotFound(Resource::Camper))?;
    let JsonObject(body) = JsonObject::parse(&body)?;
    let patch = validate_camper_patch(&body)?;
    let updated = campers.update(&camper, &patch).await?;

    Ok(Json(updated.into()))
}
