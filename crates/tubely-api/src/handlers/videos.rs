//! Video record endpoints.

use crate::auth::AuthenticatedUser;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use crate::utils::upload::parse_video_id;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tubely_core::models::CreateVideoRequest;
use tubely_core::{AppError, Video};

#[utoipa::path(
    post,
    path = "/api/videos",
    tag = "videos",
    request_body = CreateVideoRequest,
    responses(
        (status = 201, description = "Draft video created", body = Video),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_video(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateVideoRequest>,
) -> Result<(StatusCode, Json<Video>), HttpAppError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::InvalidInput("Title is required".to_string()).into());
    }

    let video = Video::new(user.user_id, title.to_string(), request.description);
    let created = state
        .records
        .create_video(&video)
        .await
        .map_err(|e| AppError::Database(format!("{:#}", e)))?;

    tracing::info!(video_id = %created.id, user_id = %user.user_id, "Video created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/videos/{video_id}",
    tag = "videos",
    params(("video_id" = String, Path, description = "Video record ID")),
    responses(
        (status = 200, description = "Video record", body = Video),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 403, description = "Caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Path(video_id): Path<String>,
) -> Result<Json<Video>, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;

    let video = state
        .records
        .get_video(video_id)
        .await
        .map_err(|e| AppError::Database(format!("{:#}", e)))?
        .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;

    if !video.is_owned_by(user.user_id) {
        return Err(AppError::Forbidden("Not authorized to view this video".to_string()).into());
    }

    Ok(Json(video))
}
