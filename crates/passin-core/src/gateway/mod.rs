use crate::{AttendeeBadge, AttendeeFilter, AttendeeSummary, CheckIn, EventSummary, Result};
use async_trait::async_trait;
use uuid::Uuid;

pub mod database;

pub use database::DatabaseGateway;

/// 持久化网关抽象 trait
///
/// 只负责数据访问，不包含业务规则。业务操作见 [`crate::CheckInManager`]。
#[async_trait]
pub trait AttendeeGateway: Send + Sync {
    /// 查询参会者的签到记录
    async fn find_check_in_by_attendee(&self, attendee_id: i32) -> Result<Option<CheckIn>>;

    /// 创建签到记录（时间戳为当前时间）
    ///
    /// # 错误
    /// * `ConstraintViolation` - 该参会者已有签到记录
    /// * `AttendeeNotFound` - 参会者不存在
    async fn create_check_in(&self, attendee_id: i32) -> Result<CheckIn>;

    /// 查询参会者及所属活动标题
    async fn find_attendee_with_event(&self, attendee_id: i32) -> Result<Option<AttendeeBadge>>;

    /// 分页查询活动的参会者，按注册时间倒序
    async fn find_attendees_by_event(&self, filter: &AttendeeFilter)
        -> Result<Vec<AttendeeSummary>>;

    /// 查询活动信息及参会人数
    async fn find_event_with_attendee_count(&self, event_id: Uuid)
        -> Result<Option<EventSummary>>;
}
