use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{PassInError, Result};

/// 参会者列表每页数量
pub const ATTENDEES_PAGE_SIZE: u64 = 10;

/// 活动信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// 活动 ID
    pub id: Uuid,

    /// 标题
    pub title: String,

    /// URL 友好标识（唯一）
    pub slug: String,

    /// 详情
    pub details: Option<String>,

    /// 最大参会人数
    pub maximum_attendees: Option<i32>,
}

/// 参会者信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendee {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub event_id: Uuid,
}

/// 签到记录
///
/// 记录存在即表示参会者已签到，每个参会者最多一条
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
    pub id: i32,
    pub attendee_id: i32,
    pub created_at: DateTime<Utc>,
}

/// 胸牌展示数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendeeBadge {
    pub name: String,
    pub email: String,
    pub event_title: String,
}

/// 参会者列表项（含签到状态）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendeeSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    /// 签到时间，未签到为 None
    pub checked_in_at: Option<DateTime<Utc>>,
}

/// 活动概要（含参会人数）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub details: Option<String>,
    pub maximum_attendees: Option<i32>,
    /// 参会人数，读取时实时统计
    pub attendees_amount: u64,
}

/// 参会者查询条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendeeFilter {
    /// 所属活动
    pub event_id: Uuid,
    /// 页码（从 0 开始）
    pub page_index: u32,
    /// 姓名关键词（不区分大小写的子串匹配）
    pub query: Option<String>,
}

impl AttendeeFilter {
    /// 创建查询条件（第 0 页，无关键词）
    pub fn new(event_id: Uuid) -> Self {
        Self {
            event_id,
            page_index: 0,
            query: None,
        }
    }

    pub fn with_page(mut self, page_index: u32) -> Self {
        self.page_index = page_index;
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn limit(&self) -> u64 {
        ATTENDEES_PAGE_SIZE
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page_index) * ATTENDEES_PAGE_SIZE
    }

    /// 有效的姓名关键词，空字符串视为未提供
    pub fn name_query(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.is_empty())
    }
}

/// 新建活动
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub slug: String,
    pub details: Option<String>,
    pub maximum_attendees: Option<i32>,
}

impl NewEvent {
    /// 根据标题创建活动，slug 由标题生成
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        let slug = slugify(&title);
        Self {
            title,
            slug,
            details: None,
            maximum_attendees: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_maximum_attendees(mut self, maximum: i32) -> Self {
        self.maximum_attendees = Some(maximum);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().len() < 4 {
            return Err(PassInError::validation(
                "event title must have at least 4 characters",
            ));
        }
        if self.slug.is_empty() {
            return Err(PassInError::validation("event slug cannot be empty"));
        }
        if matches!(self.maximum_attendees, Some(max) if max <= 0) {
            return Err(PassInError::validation(
                "maximum attendees must be a positive integer",
            ));
        }
        Ok(())
    }
}

/// 新建参会者
#[derive(Debug, Clone)]
pub struct NewAttendee {
    pub event_id: Uuid,
    pub name: String,
    pub email: String,
    /// 注册时间，None 时使用当前时间
    pub created_at: Option<DateTime<Utc>>,
}

impl NewAttendee {
    pub fn new(event_id: Uuid, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            event_id,
            name: name.into(),
            email: email.into(),
            created_at: None,
        }
    }

    pub fn registered_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PassInError::validation("attendee name cannot be empty"));
        }
        if !EmailAddress::is_valid(&self.email) {
            return Err(PassInError::validation(format!(
                "invalid email address: {}",
                self.email
            )));
        }
        Ok(())
    }
}

/// 将标题转换为 slug：小写、去除标点、空白替换为连字符
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.trim().chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_pagination() {
        let filter = AttendeeFilter::new(Uuid::new_v4());
        assert_eq!(filter.limit(), 10);
        assert_eq!(filter.offset(), 0);

        let filter = filter.with_page(2);
        assert_eq!(filter.offset(), 20);

        let filter = filter.with_page(u32::MAX);
        assert_eq!(filter.offset(), u64::from(u32::MAX) * 10);
    }

    #[test]
    fn test_filter_empty_query_is_ignored() {
        let filter = AttendeeFilter::new(Uuid::new_v4()).with_query("");
        assert_eq!(filter.name_query(), None);

        let filter = filter.with_query("Ali");
        assert_eq!(filter.name_query(), Some("Ali"));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Unite Summit"), "unite-summit");
        assert_eq!(slugify("  Rust & Friends: 2024  "), "rust-friends-2024");
        assert_eq!(slugify("already-a-slug"), "already-a-slug");
        assert_eq!(slugify("Café Conf"), "café-conf");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_new_event_validation() {
        assert!(NewEvent::new("Unite Summit").validate().is_ok());
        assert!(NewEvent::new("abc").validate().is_err());
        assert!(NewEvent::new("Unite Summit")
            .with_maximum_attendees(0)
            .validate()
            .is_err());
        assert!(NewEvent::new("Unite Summit")
            .with_maximum_attendees(120)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_new_attendee_validation() {
        let event_id = Uuid::new_v4();
        assert!(NewAttendee::new(event_id, "Diego Fernandes", "diego@rocketseat.com.br")
            .validate()
            .is_ok());
        assert!(NewAttendee::new(event_id, "Bob", "bob@example.com")
            .validate()
            .is_ok());
        assert!(NewAttendee::new(event_id, "   ", "blank@example.com")
            .validate()
            .is_err());

        for email in [
            "no-at-sign",
            "@example.com",
            "a@.com",
            "a b@example.com",
            "a@b@c.com",
            "a@b..com",
            "a,b@x.com",
        ] {
            let result = NewAttendee::new(event_id, "Valid Name", email).validate();
            assert!(
                matches!(result, Err(PassInError::ValidationError(_))),
                "{email} should be rejected"
            );
        }
    }
}
