use crate::{Attendee, CheckIn, Event, NewAttendee, NewEvent, PassInError, Result};
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use uuid::Uuid;

/// 新活动转换为数据库实体（生成新的 UUID）
impl From<NewEvent> for super::event::ActiveModel {
    fn from(event: NewEvent) -> Self {
        Self {
            id: Set(Uuid::new_v4().to_string()),
            title: Set(event.title),
            slug: Set(event.slug),
            details: Set(event.details),
            maximum_attendees: Set(event.maximum_attendees),
        }
    }
}

impl TryFrom<super::event::Model> for Event {
    type Error = PassInError;

    fn try_from(model: super::event::Model) -> Result<Self> {
        Ok(Self {
            id: parse_uuid(&model.id)?,
            title: model.title,
            slug: model.slug,
            details: model.details,
            maximum_attendees: model.maximum_attendees,
        })
    }
}

/// 新参会者转换为数据库实体（ID 由数据库自增）
impl From<NewAttendee> for super::attendee::ActiveModel {
    fn from(attendee: NewAttendee) -> Self {
        Self {
            id: NotSet,
            name: Set(attendee.name),
            email: Set(attendee.email),
            created_at: Set(attendee.created_at.unwrap_or_else(Utc::now)),
            event_id: Set(attendee.event_id.to_string()),
        }
    }
}

impl TryFrom<super::attendee::Model> for Attendee {
    type Error = PassInError;

    fn try_from(model: super::attendee::Model) -> Result<Self> {
        Ok(Self {
            id: model.id,
            name: model.name,
            email: model.email,
            created_at: model.created_at,
            event_id: parse_uuid(&model.event_id)?,
        })
    }
}

impl From<super::check_in::Model> for CheckIn {
    fn from(model: super::check_in::Model) -> Self {
        Self {
            id: model.id,
            attendee_id: model.attendee_id,
            created_at: model.created_at,
        }
    }
}

/// 解析数据库中存储的 UUID 文本
pub(crate) fn parse_uuid(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| PassInError::internal(format!("malformed event id {value:?} in store: {e}")))
}
