use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;

/// Kind of entity a lookup failed for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Entity {
    User,
    Record,
}

/// Input field that failed validation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    Date,
    Month,
    Year,
}

#[derive(Debug, derive_more::Display)]
pub enum AttendanceError {
    #[display(fmt = "{} {} not found", _0, _1)]
    NotFound(Entity, u64),

    #[display(fmt = "invalid {}: {}", _0, _1)]
    InvalidInput(Field, String),

    #[display(fmt = "store error: {}", _0)]
    Store(sqlx::Error),
}

impl AttendanceError {
    pub fn user_not_found(user_id: u64) -> Self {
        Self::NotFound(Entity::User, user_id)
    }

    pub fn record_not_found(record_id: u64) -> Self {
        Self::NotFound(Entity::Record, record_id)
    }

    pub fn invalid(field: Field, value: impl ToString) -> Self {
        Self::InvalidInput(field, value.to_string())
    }
}

impl std::error::Error for AttendanceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for AttendanceError {
    fn from(e: sqlx::Error) -> Self {
        Self::Store(e)
    }
}

impl ResponseError for AttendanceError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(..) => StatusCode::NOT_FOUND,
            Self::InvalidInput(..) => StatusCode::BAD_REQUEST,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            Self::Store(e) => {
                tracing::error!(error = %e, "Attendance store failure");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}
