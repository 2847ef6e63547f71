use super::AttendeeGateway;
use crate::db::converter::parse_uuid;
use crate::db::{attendee, check_in, event};
use crate::{
    Attendee, AttendeeBadge, AttendeeFilter, AttendeeSummary, CheckIn, Event, EventSummary,
    NewAttendee, NewEvent, PassInError, Result,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{BinOper, Expr, Func, SimpleExpr};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    QueryFilter, QueryOrder, QuerySelect, SqlErr,
};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// 基于 sea-orm 的持久化网关
///
/// 支持 sea-orm 启用的所有后端（SQLite、PostgreSQL）
pub struct DatabaseGateway {
    db: Arc<DatabaseConnection>,
}

#[derive(Debug, FromQueryResult)]
struct BadgeRow {
    name: String,
    email: String,
    event_title: String,
}

#[derive(Debug, FromQueryResult)]
struct AttendeeRow {
    id: i32,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
    checked_in_at: Option<DateTime<Utc>>,
}

#[derive(Debug, FromQueryResult)]
struct EventCountRow {
    id: String,
    title: String,
    slug: String,
    details: Option<String>,
    maximum_attendees: Option<i32>,
    attendees_amount: i64,
}

impl DatabaseGateway {
    /// 创建新的网关
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// 数据库连接
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// 新建活动
    ///
    /// 活动的创建不在 HTTP 接口范围内，供数据导入和测试使用
    ///
    /// # 错误
    /// * `ValidationError` - 活动信息验证失败
    /// * `ConstraintViolation` - slug 已存在
    pub async fn insert_event(&self, new_event: NewEvent) -> Result<Event> {
        new_event.validate()?;

        let active_model: event::ActiveModel = new_event.into();
        let model = active_model
            .insert(&*self.db)
            .await
            .map_err(|err| match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(detail)) => {
                    PassInError::ConstraintViolation(detail)
                }
                _ => PassInError::DatabaseError(err),
            })?;

        info!(event_id = %model.id, slug = %model.slug, "Event created");
        Event::try_from(model)
    }

    /// 新建参会者
    ///
    /// # 错误
    /// * `ValidationError` - 参会者信息验证失败
    /// * `EventNotFound` - 活动不存在
    /// * `ConstraintViolation` - 同一活动中邮箱已注册
    pub async fn insert_attendee(&self, new_attendee: NewAttendee) -> Result<Attendee> {
        new_attendee.validate()?;

        let event_id = new_attendee.event_id;
        let active_model: attendee::ActiveModel = new_attendee.into();
        let model = active_model
            .insert(&*self.db)
            .await
            .map_err(|err| match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(detail)) => {
                    PassInError::ConstraintViolation(detail)
                }
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    PassInError::EventNotFound(event_id)
                }
                _ => PassInError::DatabaseError(err),
            })?;

        info!(attendee_id = model.id, event_id = %event_id, "Attendee registered");
        Attendee::try_from(model)
    }
}

#[async_trait]
impl AttendeeGateway for DatabaseGateway {
    async fn find_check_in_by_attendee(&self, attendee_id: i32) -> Result<Option<CheckIn>> {
        let model = check_in::Entity::find()
            .filter(check_in::Column::AttendeeId.eq(attendee_id))
            .one(&*self.db)
            .await?;

        Ok(model.map(CheckIn::from))
    }

    async fn create_check_in(&self, attendee_id: i32) -> Result<CheckIn> {
        let active_model = check_in::ActiveModel {
            id: NotSet,
            created_at: Set(Utc::now()),
            attendee_id: Set(attendee_id),
        };

        let model = active_model
            .insert(&*self.db)
            .await
            .map_err(|err| map_check_in_error(attendee_id, err))?;

        debug!(attendee_id, check_in_id = model.id, "Check-in row inserted");
        Ok(CheckIn::from(model))
    }

    async fn find_attendee_with_event(&self, attendee_id: i32) -> Result<Option<AttendeeBadge>> {
        let row = attendee::Entity::find_by_id(attendee_id)
            .select_only()
            .column(attendee::Column::Name)
            .column(attendee::Column::Email)
            .column_as(event::Column::Title, "event_title")
            .inner_join(event::Entity)
            .into_model::<BadgeRow>()
            .one(&*self.db)
            .await?;

        Ok(row.map(|row| AttendeeBadge {
            name: row.name,
            email: row.email,
            event_title: row.event_title,
        }))
    }

    async fn find_attendees_by_event(
        &self,
        filter: &AttendeeFilter,
    ) -> Result<Vec<AttendeeSummary>> {
        let mut query = attendee::Entity::find()
            .select_only()
            .columns([
                attendee::Column::Id,
                attendee::Column::Name,
                attendee::Column::Email,
                attendee::Column::CreatedAt,
            ])
            .column_as(check_in::Column::CreatedAt, "checked_in_at")
            .left_join(check_in::Entity)
            .filter(attendee::Column::EventId.eq(filter.event_id.to_string()));

        if let Some(name_query) = filter.name_query() {
            query = query.filter(name_contains(name_query));
        }

        let rows = query
            .order_by_desc(attendee::Column::CreatedAt)
            .order_by_desc(attendee::Column::Id)
            .limit(filter.limit())
            .offset(filter.offset())
            .into_model::<AttendeeRow>()
            .all(&*self.db)
            .await?;

        debug!(
            event_id = %filter.event_id,
            page_index = filter.page_index,
            count = rows.len(),
            "Attendees listed from database"
        );

        Ok(rows
            .into_iter()
            .map(|row| AttendeeSummary {
                id: row.id,
                name: row.name,
                email: row.email,
                created_at: row.created_at,
                checked_in_at: row.checked_in_at,
            })
            .collect())
    }

    async fn find_event_with_attendee_count(
        &self,
        event_id: Uuid,
    ) -> Result<Option<EventSummary>> {
        let row = event::Entity::find_by_id(event_id.to_string())
            .select_only()
            .columns([
                event::Column::Id,
                event::Column::Title,
                event::Column::Slug,
                event::Column::Details,
                event::Column::MaximumAttendees,
            ])
            .column_as(
                Expr::col((attendee::Entity, attendee::Column::Id)).count(),
                "attendees_amount",
            )
            .left_join(attendee::Entity)
            .group_by(event::Column::Id)
            .into_model::<EventCountRow>()
            .one(&*self.db)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let attendees_amount = u64::try_from(row.attendees_amount).map_err(|_| {
            PassInError::internal(format!(
                "negative attendee count {} for event {}",
                row.attendees_amount, row.id
            ))
        })?;

        Ok(Some(EventSummary {
            id: parse_uuid(&row.id)?,
            title: row.title,
            slug: row.slug,
            details: row.details,
            maximum_attendees: row.maximum_attendees,
            attendees_amount,
        }))
    }
}

/// 将签到插入失败转换为业务可识别的错误
fn map_check_in_error(attendee_id: i32, err: DbErr) -> PassInError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            PassInError::ConstraintViolation(detail)
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            PassInError::AttendeeNotFound(attendee_id)
        }
        _ => PassInError::DatabaseError(err),
    }
}

/// 姓名包含关键词（不区分大小写，关键词按字面匹配）
///
/// 两侧都交给数据库的 `LOWER()` 折叠，保证大小写规则一致
fn name_contains(query: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(query));
    let name = Expr::expr(Func::lower(Expr::col((
        attendee::Entity,
        attendee::Column::Name,
    ))));

    name.binary(
        BinOper::Like,
        SimpleExpr::Binary(
            Box::new(Func::lower(Expr::val(pattern)).into()),
            BinOper::Escape,
            Box::new(SimpleExpr::Constant('\\'.into())),
        ),
    )
}

/// 转义 LIKE 通配符
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
