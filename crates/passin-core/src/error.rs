use thiserror::Error;
use uuid::Uuid;

/// 签到业务错误类型
#[derive(Error, Debug)]
pub enum PassInError {
    /// 参会者未找到
    #[error("Attendee not found: {0}")]
    AttendeeNotFound(i32),

    /// 活动未找到
    #[error("Event not found: {0}")]
    EventNotFound(Uuid),

    /// 参会者已签到
    #[error("Attendee already checked in: {0}")]
    AlreadyCheckedIn(i32),

    /// 唯一约束冲突（由存储层报告）
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 数据库错误
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// 签到业务结果类型
pub type Result<T> = std::result::Result<T, PassInError>;

impl PassInError {
    /// 创建验证错误
    pub fn validation(msg: impl Into<String>) -> Self {
        PassInError::ValidationError(msg.into())
    }

    /// 创建内部错误
    pub fn internal(msg: impl Into<String>) -> Self {
        PassInError::InternalError(msg.into())
    }
}
