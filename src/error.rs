//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 `{ "error": "..." }` HTTP 응답으로 자동 변환

use crate::services::validation::ValidationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 해당 식별자의 게임이 없음 (HTTP 404)
    #[error("Game not found: {0}")]
    NotFound(String),

    /// 입력값이 규칙을 어김 (HTTP 400)
    /// #[from]: `?`로 ValidationError를 바로 전파할 수 있습니다.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// 본문을 해석할 수 없음 (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 저장소 연결이 준비되지 않았거나 끊김 (HTTP 503)
    #[error("Store unavailable")]
    StoreUnavailable,

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// 연결 관련 오류는 아래 `From` 구현에서 StoreUnavailable로 바뀝니다.
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// 마이그레이션 실패 (시작 시에만 발생)
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// 파일 입출력 오류 (HTTP 500)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// sqlx::Error는 #[from] 대신 직접 변환합니다.
// 풀에서 연결을 얻지 못한 경우는 "저장소 없음"으로, 나머지는 DB 오류로 분류합니다.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                tracing::warn!("Store connection failed: {}", err);
                AppError::StoreUnavailable
            }
            other => AppError::Database(other),
        }
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, IO, Internal 등)는 실제 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Validation(ref err) => {
                // 검증 에러는 어느 필드가 왜 실패했는지 함께 알려줍니다.
                let body = Json(json!({
                    "error": self.to_string(),
                    "field": err.field,
                    "reason": err.reason,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::StoreUnavailable => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            AppError::Migration(ref e) => {
                tracing::error!("Migration error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            AppError::Io(ref e) => {
                tracing::error!("IO error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An IO error occurred".to_string(),
                )
            }
        };

        // 결과: { "error": "Game not found: ..." }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
