use chrono::{DateTime, Utc};
use passin_core::{AttendeeBadge, AttendeeSummary, EventSummary};
use crate::params::FieldError;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// 胸牌响应
#[derive(Debug, Serialize, ToSchema)]
pub struct BadgeResponse {
    pub attendee: BadgeAttendee,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BadgeAttendee {
    pub name: String,
    pub email: String,
    pub event: BadgeEvent,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BadgeEvent {
    pub title: String,
}

impl From<AttendeeBadge> for BadgeResponse {
    fn from(badge: AttendeeBadge) -> Self {
        Self {
            attendee: BadgeAttendee {
                name: badge.name,
                email: badge.email,
                event: BadgeEvent {
                    title: badge.event_title,
                },
            },
        }
    }
}

/// 参会者列表响应
#[derive(Debug, Serialize, ToSchema)]
pub struct AttendeesResponse {
    pub attendees: Vec<AttendeeItem>,
}

/// 参会者列表项
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeItem {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub checked_in_at: Option<DateTime<Utc>>,
}

impl From<AttendeeSummary> for AttendeeItem {
    fn from(attendee: AttendeeSummary) -> Self {
        Self {
            id: attendee.id,
            name: attendee.name,
            email: attendee.email,
            created_at: attendee.created_at,
            checked_in_at: attendee.checked_in_at,
        }
    }
}

impl From<Vec<AttendeeSummary>> for AttendeesResponse {
    fn from(attendees: Vec<AttendeeSummary>) -> Self {
        Self {
            attendees: attendees.into_iter().map(AttendeeItem::from).collect(),
        }
    }
}

/// 活动响应
#[derive(Debug, Serialize, ToSchema)]
pub struct EventResponse {
    pub event: EventDetails,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub details: Option<String>,
    pub maximum_attendees: Option<i32>,
    pub attendees_amount: u64,
}

impl From<EventSummary> for EventResponse {
    fn from(event: EventSummary) -> Self {
        Self {
            event: EventDetails {
                id: event.id,
                title: event.title,
                slug: event.slug,
                details: event.details,
                maximum_attendees: event.maximum_attendees,
                attendees_amount: event.attendees_amount,
            },
        }
    }
}

/// 错误响应体
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub status: u16,
    /// 仅参数校验失败时出现
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldError>>,
}
