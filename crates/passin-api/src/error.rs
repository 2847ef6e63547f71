use crate::{models::ErrorBody, params::FieldError};
use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use passin_core::PassInError;
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

/// API 错误类型
#[derive(Debug, Error)]
pub enum ApiError {
    /// 参会者未找到
    #[error("Attendee not found: {0}")]
    AttendeeNotFound(i32),
    /// 活动未找到
    #[error("Event not found: {0}")]
    EventNotFound(Uuid),
    /// 重复签到
    #[error("Attendee already checked in: {0}")]
    AlreadyCheckedIn(i32),
    /// 存储层约束冲突
    #[error("Conflict: {0}")]
    Conflict(String),
    /// 参数校验错误
    #[error("Validation error: {}", describe_fields(.0))]
    ValidationError(Vec<FieldError>),
    /// 数据库错误
    #[error("Database error: {0}")]
    DatabaseError(String),
    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::AttendeeNotFound(_) | ApiError::EventNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::AlreadyCheckedIn(_) | ApiError::ValidationError(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::DatabaseError(_) | ApiError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            ApiError::ValidationError(ref fields) => ErrorBody {
                error: self.to_string(),
                status: status.as_u16(),
                fields: Some(fields.clone()),
            },
            ApiError::DatabaseError(_) | ApiError::InternalError(_) => {
                error!(error = %self, "Request failed");
                ErrorBody {
                    error: "Internal server error".to_string(),
                    status: status.as_u16(),
                    fields: None,
                }
            }
            _ => ErrorBody {
                error: self.to_string(),
                status: status.as_u16(),
                fields: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

// 从 passin_core::PassInError 转换
impl From<PassInError> for ApiError {
    fn from(err: PassInError) -> Self {
        match err {
            PassInError::AttendeeNotFound(id) => ApiError::AttendeeNotFound(id),
            PassInError::EventNotFound(id) => ApiError::EventNotFound(id),
            PassInError::AlreadyCheckedIn(id) => ApiError::AlreadyCheckedIn(id),
            PassInError::ConstraintViolation(msg) => ApiError::Conflict(msg),
            PassInError::ValidationError(msg) => {
                ApiError::ValidationError(vec![FieldError::new("body", msg)])
            }
            PassInError::DatabaseError(err) => ApiError::DatabaseError(err.to_string()),
            PassInError::InternalError(msg) => ApiError::InternalError(msg),
        }
    }
}

impl From<FieldError> for ApiError {
    fn from(err: FieldError) -> Self {
        ApiError::ValidationError(vec![err])
    }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        ApiError::ValidationError(errors)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::ValidationError(vec![FieldError::new("params", rejection.body_text())])
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::ValidationError(vec![FieldError::new("querystring", rejection.body_text())])
    }
}

fn describe_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::AttendeeNotFound(1).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::EventNotFound(Uuid::nil()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::AlreadyCheckedIn(1).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(FieldError::new("eventId", "invalid uuid")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InternalError("boom".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_core_error_conversion() {
        let err: ApiError = PassInError::AlreadyCheckedIn(3).into();
        assert!(matches!(err, ApiError::AlreadyCheckedIn(3)));

        let err: ApiError = PassInError::ConstraintViolation("dup".to_string()).into();
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_validation_message_lists_fields() {
        let err = ApiError::ValidationError(vec![
            FieldError::new("eventId", "invalid uuid"),
            FieldError::new("pageIndex", "expected a non-negative integer"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation error: eventId: invalid uuid; pageIndex: expected a non-negative integer"
        );
    }
}
