use super::{attendee, check_in, event};
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Schema};
use tracing::info;

/// 参会者 (event_id, email) 唯一索引名
pub const ATTENDEE_EMAIL_INDEX: &str = "attendees_event_id_email_key";

/// 根据实体定义创建表结构（已存在则跳过）
///
/// 依赖顺序创建：events -> attendees -> check_ins
pub async fn setup_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut tables = [
        schema.create_table_from_entity(event::Entity),
        schema.create_table_from_entity(attendee::Entity),
        schema.create_table_from_entity(check_in::Entity),
    ];
    for stmt in tables.iter_mut() {
        stmt.if_not_exists();
        db.execute(backend.build(&*stmt)).await?;
    }

    // 同一活动内邮箱唯一
    let index = Index::create()
        .if_not_exists()
        .name(ATTENDEE_EMAIL_INDEX)
        .table(attendee::Entity)
        .col(attendee::Column::EventId)
        .col(attendee::Column::Email)
        .unique()
        .to_owned();
    db.execute(backend.build(&index)).await?;

    info!(backend = ?backend, "Database schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{Database, EntityTrait, PaginatorTrait};

    #[tokio::test]
    async fn test_setup_schema_is_idempotent() {
        let db = Database::connect("sqlite::memory:").await.unwrap();

        setup_schema(&db).await.unwrap();
        setup_schema(&db).await.unwrap();

        assert_eq!(event::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(attendee::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(check_in::Entity::find().count(&db).await.unwrap(), 0);
    }
}
