use crate::{error::Result, models::*, params, state::AppState};
use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use tracing::debug;
use uuid::Uuid;

/// 获取活动概要
#[utoipa::path(
    get,
    path = "/events/{eventId}",
    tag = "events",
    summary = "Get an event",
    params(("eventId" = Uuid, Path, description = "活动 ID")),
    responses(
        (status = 200, description = "Event with attendee count", body = EventResponse),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "Event not found", body = ErrorBody),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<EventResponse>> {
    let Path(raw_id) = path?;
    let event_id = params::parse_event_id(&raw_id)?;
    debug!(event_id = %event_id, "Getting event");

    let event = state.manager.event_summary(event_id).await?;

    Ok(Json(EventResponse::from(event)))
}

/// 列出活动参会者
#[utoipa::path(
    get,
    path = "/events/{eventId}/attendees",
    tag = "events",
    summary = "Get event attendees",
    params(
        ("eventId" = Uuid, Path, description = "活动 ID"),
        ("pageIndex" = Option<String>, Query, description = "页码，从 0 开始"),
        ("query" = Option<String>, Query, description = "姓名关键词"),
    ),
    responses(
        (status = 200, description = "One page of attendees", body = AttendeesResponse),
        (status = 400, description = "Invalid parameters", body = ErrorBody),
    )
)]
pub async fn get_event_attendees(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
    query: std::result::Result<Query<params::ListAttendeesQuery>, QueryRejection>,
) -> Result<Json<AttendeesResponse>> {
    let Path(raw_id) = path?;
    let Query(query) = query?;
    let filter = params::parse_list_attendees(&raw_id, query)?;
    debug!(
        event_id = %filter.event_id,
        page_index = filter.page_index,
        query = ?filter.name_query(),
        "Listing event attendees"
    );

    let attendees = state.manager.list_attendees(&filter).await?;

    Ok(Json(AttendeesResponse::from(attendees)))
}
