use crate::{
    AttendeeBadge, AttendeeFilter, AttendeeGateway, AttendeeSummary, CheckIn, EventSummary,
    PassInError, Result,
};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// 签到管理器
///
/// 签到、胸牌、参会者列表和活动概要四个业务操作的统一入口。
/// 持久化网关由调用方注入，便于替换存储或使用测试替身。
#[derive(Clone)]
pub struct CheckInManager {
    gateway: Arc<dyn AttendeeGateway>,
}

impl CheckInManager {
    /// 创建新的签到管理器
    pub fn new(gateway: Arc<dyn AttendeeGateway>) -> Self {
        Self { gateway }
    }

    /// 参会者签到
    ///
    /// 每个参会者最多签到一次。先查询已有记录；并发请求同时通过查询时，
    /// 由存储层唯一约束拦截第二次插入，此处同样转换为 `AlreadyCheckedIn`。
    ///
    /// # 错误
    /// * `AlreadyCheckedIn` - 参会者已签到
    /// * `AttendeeNotFound` - 参会者不存在
    pub async fn check_in(&self, attendee_id: i32) -> Result<CheckIn> {
        if self
            .gateway
            .find_check_in_by_attendee(attendee_id)
            .await?
            .is_some()
        {
            debug!(attendee_id, "Attendee already checked in");
            return Err(PassInError::AlreadyCheckedIn(attendee_id));
        }

        match self.gateway.create_check_in(attendee_id).await {
            Ok(check_in) => {
                info!(
                    attendee_id,
                    checked_in_at = %check_in.created_at,
                    "Attendee checked in"
                );
                Ok(check_in)
            }
            Err(PassInError::ConstraintViolation(detail)) => {
                warn!(
                    attendee_id,
                    detail = %detail,
                    "Concurrent check-in rejected by unique constraint"
                );
                Err(PassInError::AlreadyCheckedIn(attendee_id))
            }
            Err(err) => Err(err),
        }
    }

    /// 获取参会者胸牌数据
    ///
    /// # 错误
    /// * `AttendeeNotFound` - 参会者不存在
    pub async fn attendee_badge(&self, attendee_id: i32) -> Result<AttendeeBadge> {
        self.gateway
            .find_attendee_with_event(attendee_id)
            .await?
            .ok_or(PassInError::AttendeeNotFound(attendee_id))
    }

    /// 分页列出活动参会者
    ///
    /// 活动不存在时返回空列表
    pub async fn list_attendees(&self, filter: &AttendeeFilter) -> Result<Vec<AttendeeSummary>> {
        self.gateway.find_attendees_by_event(filter).await
    }

    /// 获取活动概要
    ///
    /// # 错误
    /// * `EventNotFound` - 活动不存在
    pub async fn event_summary(&self, event_id: Uuid) -> Result<EventSummary> {
        self.gateway
            .find_event_with_attendee_count(event_id)
            .await?
            .ok_or(PassInError::EventNotFound(event_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 模拟竞态：查询总是返回无记录，插入在第一次之后报告唯一约束冲突
    #[derive(Default)]
    struct RacingGateway {
        inserts: AtomicUsize,
    }

    #[async_trait]
    impl AttendeeGateway for RacingGateway {
        async fn find_check_in_by_attendee(&self, _attendee_id: i32) -> Result<Option<CheckIn>> {
            Ok(None)
        }

        async fn create_check_in(&self, attendee_id: i32) -> Result<CheckIn> {
            if self.inserts.fetch_add(1, Ordering::SeqCst) > 0 {
                return Err(PassInError::ConstraintViolation(
                    "UNIQUE constraint failed: check_ins.attendee_id".to_string(),
                ));
            }
            Ok(CheckIn {
                id: 1,
                attendee_id,
                created_at: Utc::now(),
            })
        }

        async fn find_attendee_with_event(&self, _attendee_id: i32) -> Result<Option<AttendeeBadge>> {
            Ok(None)
        }

        async fn find_attendees_by_event(
            &self,
            _filter: &AttendeeFilter,
        ) -> Result<Vec<AttendeeSummary>> {
            Ok(Vec::new())
        }

        async fn find_event_with_attendee_count(
            &self,
            _event_id: Uuid,
        ) -> Result<Option<EventSummary>> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_lost_race_maps_to_already_checked_in() {
        let manager = CheckInManager::new(Arc::new(RacingGateway::default()));

        let first = manager.check_in(7).await;
        assert!(first.is_ok());

        let second = manager.check_in(7).await;
        assert!(matches!(second, Err(PassInError::AlreadyCheckedIn(7))));
    }

    #[tokio::test]
    async fn test_missing_rows_are_classified() {
        let manager = CheckInManager::new(Arc::new(RacingGateway::default()));

        let badge = manager.attendee_badge(42).await;
        assert!(matches!(badge, Err(PassInError::AttendeeNotFound(42))));

        let event_id = Uuid::new_v4();
        let summary = manager.event_summary(event_id).await;
        assert!(matches!(summary, Err(PassInError::EventNotFound(id)) if id == event_id));

        let attendees = manager
            .list_attendees(&AttendeeFilter::new(event_id))
            .await
            .unwrap();
        assert!(attendees.is_empty());
    }
}
