use crate::auth::AuthenticatedUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{field_to_asset, missing_field, parse_video_id};
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use std::sync::Arc;
use tubely_core::constants::VIDEO_FORM_FIELD;
use tubely_core::Video;

#[utoipa::path(
    post,
    path = "/api/video_upload/{video_id}",
    tag = "uploads",
    params(("video_id" = String, Path, description = "Video record ID")),
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Form field `video` with an MP4 file"),
    responses(
        (status = 200, description = "Video stored and record updated", body = Video),
        (status = 400, description = "Invalid ID or malformed form", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 415, description = "Unsupported media type", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Path(video_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<Video>, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(VIDEO_FORM_FIELD) {
            continue;
        }

        let video = state
            .pipeline
            .upload_video(video_id, user.user_id, field_to_asset(field))
            .await?;
        return Ok(Json(video));
    }

    Err(missing_field(VIDEO_FORM_FIELD).into())
}
