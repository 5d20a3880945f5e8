use assistant_chemistry::ChemistryError;
use assistant_math::MathError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Unknown,
    EntityNotFound,
    InvalidInput,
    DbFailed,
    UnsupportedMlModel,
}

impl ErrorCode {
    pub fn code(self) -> i32 {
        match self {
            ErrorCode::Unknown => -1,
            ErrorCode::EntityNotFound => 1,
            ErrorCode::InvalidInput => 2,
            ErrorCode::DbFailed => 1000,
            ErrorCode::UnsupportedMlModel => 2000,
        }
    }

    pub fn http_status(self) -> StatusCode {
        match self {
            ErrorCode::EntityNotFound => StatusCode::NOT_FOUND,
            ErrorCode::InvalidInput | ErrorCode::UnsupportedMlModel => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub code: ErrorCode,
    pub source: anyhow::Error,
}

impl AppError {
    pub fn new(code: ErrorCode, err: anyhow::Error) -> Self {
        Self { code, source: err }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, anyhow::anyhow!(message.into()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("CODE: {}, MESSAGE: {:#}", self.code.code(), self.source);
        let body = json!({
            "errorCode": self.code.code(),
            "errorMessage": self.source.to_string(),
        });
        (self.code.http_status(), Json(body)).into_response()
    }
}

// `?` on anything convertible to `anyhow::Error`; the code is picked from the
// error chain.
impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        let code = if err.chain().any(|cause| cause.is::<ChemistryError>() || cause.is::<MathError>()) {
            ErrorCode::InvalidInput
        } else if err.chain().any(|cause| cause.is::<sqlx::Error>()) {
            ErrorCode::DbFailed
        } else {
            ErrorCode::Unknown
        };
        Self::new(code, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        assert_eq!(ErrorCode::Unknown.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ErrorCode::EntityNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::InvalidInput.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::DbFailed.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ErrorCode::UnsupportedMlModel.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_classification() {
        let chemistry: AppError = ChemistryError::UnknownElement("Xx".to_string()).into();
        assert_eq!(chemistry.code, ErrorCode::InvalidInput);

        let math: AppError = MathError::UnsupportedOperation("a*b".to_string()).into();
        assert_eq!(math.code, ErrorCode::InvalidInput);

        let db: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(db.code, ErrorCode::DbFailed);

        let wrapped: AppError = anyhow::Error::new(sqlx::Error::PoolTimedOut).context("batch insert").into();
        assert_eq!(wrapped.code, ErrorCode::DbFailed);

        let other: AppError = anyhow::anyhow!("boom").into();
        assert_eq!(other.code, ErrorCode::Unknown);
    }
}
