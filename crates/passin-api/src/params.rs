//! 请求参数校验
//!
//! 路径和查询参数以字符串接收，在进入业务逻辑前逐字段校验，
//! 失败时返回包含字段名和原因的 [`FieldError`]。

use passin_core::AttendeeFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// 字段校验错误
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, ToSchema)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// 字段路径，例如 `attendeeId`、`pageIndex`
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// 参会者列表查询参数
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAttendeesQuery {
    /// 页码字符串，缺省为 "0"
    pub page_index: Option<String>,
    /// 姓名关键词
    pub query: Option<String>,
}

/// 解析参会者 ID：正整数
pub fn parse_attendee_id(raw: &str) -> Result<i32, FieldError> {
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(FieldError::new(
            "attendeeId",
            format!("expected a positive integer, received {raw:?}"),
        )),
    }
}

/// 解析活动 ID：UUID
pub fn parse_event_id(raw: &str) -> Result<Uuid, FieldError> {
    Uuid::parse_str(raw).map_err(|_| FieldError::new("eventId", format!("invalid uuid {raw:?}")))
}

/// 解析页码：非负整数，缺省或空字符串为 0
pub fn parse_page_index(raw: Option<&str>) -> Result<u32, FieldError> {
    match raw {
        None | Some("") => Ok(0),
        Some(value) => value.parse::<u32>().map_err(|_| {
            FieldError::new(
                "pageIndex",
                format!("expected a non-negative integer, received {value:?}"),
            )
        }),
    }
}

/// 校验参会者列表请求，汇总所有字段错误
pub fn parse_list_attendees(
    raw_event_id: &str,
    query: ListAttendeesQuery,
) -> Result<AttendeeFilter, Vec<FieldError>> {
    let event_id = parse_event_id(raw_event_id);
    let page_index = parse_page_index(query.page_index.as_deref());

    match (event_id, page_index) {
        (Ok(event_id), Ok(page_index)) => {
            let mut filter = AttendeeFilter::new(event_id).with_page(page_index);
            if let Some(name_query) = query.query {
                filter = filter.with_query(name_query);
            }
            Ok(filter)
        }
        (event_id, page_index) => Err(event_id
            .err()
            .into_iter()
            .chain(page_index.err())
            .collect()),
    }
}
