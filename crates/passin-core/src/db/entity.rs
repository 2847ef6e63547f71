use chrono::{DateTime as ChronoDateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 活动实体
pub mod event {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "events")]
    pub struct Model {
        /// 小写带连字符的 UUID 文本
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub title: String,
        #[sea_orm(unique)]
        pub slug: String,
        pub details: Option<String>,
        pub maximum_attendees: Option<i32>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::attendee::Entity")]
        Attendee,
    }

    impl Related<super::attendee::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Attendee.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// 参会者实体
pub mod attendee {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "attendees")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub email: String,
        pub created_at: ChronoDateTime<Utc>,
        pub event_id: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::event::Entity",
            from = "Column::EventId",
            to = "super::event::Column::Id",
            on_delete = "Cascade"
        )]
        Event,
        #[sea_orm(has_one = "super::check_in::Entity")]
        CheckIn,
    }

    impl Related<super::event::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Event.def()
        }
    }

    impl Related<super::check_in::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::CheckIn.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// 签到实体
pub mod check_in {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "check_ins")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub created_at: ChronoDateTime<Utc>,
        /// 唯一约束保证每个参会者最多签到一次
        #[sea_orm(unique)]
        pub attendee_id: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::attendee::Entity",
            from = "Column::AttendeeId",
            to = "super::attendee::Column::Id",
            on_delete = "Cascade"
        )]
        Attendee,
    }

    impl Related<super::attendee::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Attendee.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
