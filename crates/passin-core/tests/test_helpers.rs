#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use passin_core::{setup_schema, Attendee, DatabaseGateway, Event, NewAttendee, NewEvent};
use sea_orm::{Database, DbErr};
use std::sync::Arc;

/// 创建测试用的 SQLite 内存数据库网关
pub async fn create_test_gateway() -> Result<Arc<DatabaseGateway>, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    setup_schema(&db).await?;
    Ok(Arc::new(DatabaseGateway::new(Arc::new(db))))
}

/// 基准注册时间
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

/// 创建测试活动
pub async fn create_event(gateway: &DatabaseGateway, title: &str) -> Event {
    gateway
        .insert_event(NewEvent::new(title).with_maximum_attendees(100))
        .await
        .unwrap()
}

/// 按顺序注册参会者，第 i 个的注册时间为基准时间 + i 分钟
pub async fn register_attendees(
    gateway: &DatabaseGateway,
    event: &Event,
    names: &[&str],
) -> Vec<Attendee> {
    let mut attendees = Vec::with_capacity(names.len());
    for (i, name) in names.iter().enumerate() {
        let email = format!("attendee{}@{}.dev", i, event.slug);
        let attendee = gateway
            .insert_attendee(
                NewAttendee::new(event.id, *name, email)
                    .registered_at(base_time() + Duration::minutes(i as i64)),
            )
            .await
            .unwrap();
        attendees.push(attendee);
    }
    attendees
}
