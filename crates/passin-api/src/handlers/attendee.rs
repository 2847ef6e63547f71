use crate::{error::Result, models::*, params, state::AppState};
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info};

/// 参会者签到
#[utoipa::path(
    get,
    path = "/attendees/{attendeeId}/check-in",
    tag = "check-ins",
    summary = "Check-in an attendee",
    params(("attendeeId" = i32, Path, description = "参会者 ID")),
    responses(
        (status = 201, description = "Attendee checked in"),
        (status = 400, description = "Already checked in or invalid id", body = ErrorBody),
        (status = 404, description = "Attendee not found", body = ErrorBody),
    )
)]
pub async fn check_in(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<StatusCode> {
    let Path(raw_id) = path?;
    let attendee_id = params::parse_attendee_id(&raw_id)?;
    info!(attendee_id, "Checking in attendee");

    state.manager.check_in(attendee_id).await?;

    Ok(StatusCode::CREATED)
}

/// 获取参会者胸牌
#[utoipa::path(
    get,
    path = "/attendees/{attendeeId}/badge",
    tag = "attendees",
    summary = "Get an attendee badge",
    params(("attendeeId" = i32, Path, description = "参会者 ID")),
    responses(
        (status = 200, description = "Badge data", body = BadgeResponse),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "Attendee not found", body = ErrorBody),
    )
)]
pub async fn get_attendee_badge(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<BadgeResponse>> {
    let Path(raw_id) = path?;
    let attendee_id = params::parse_attendee_id(&raw_id)?;
    debug!(attendee_id, "Getting attendee badge");

    let badge = state.manager.attendee_badge(attendee_id).await?;

    Ok(Json(BadgeResponse::from(badge)))
}
