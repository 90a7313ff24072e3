//! # 게임(Game) 라우트 핸들러
//!
//! 게임 레코드의 생성/조회/교체/삭제를 처리하는 HTTP 핸들러 함수들입니다.
//!
//! ## 엔드포인트
//! - `GET    /data`        → 게임 목록 (삽입 순서, `?q=`로 제목/설명 검색)
//! - `POST   /data`        → 새 게임 생성 (201)
//! - `GET    /data/stats`  → 컬렉션 요약
//! - `GET    /data/{id}`   → 단일 게임 조회
//! - `PUT    /data/{id}`   → 게임 전체 교체 (이미지는 새 업로드가 없으면 유지)
//! - `DELETE /data/{id}`   → 게임 삭제 (`{}` 반환)
//!
//! 생성/교체 본문은 JSON, 폼(urlencoded), multipart(이미지 업로드) 모두 받습니다.
//! 검증은 항상 저장소 호출보다 먼저 일어납니다.

use crate::{
    db::{self, StoreStatus},
    error::AppError,
    models::*,
    services,
};
use axum::{
    extract::{FromRequest, Multipart, Path, Query, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    Form, Json,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use sqlx::SqlitePool;
use std::collections::HashMap;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀 (내부적으로 Arc로 공유)
    pub pool: SqlitePool,
    /// 저장소 연결 준비 상태
    pub store: StoreStatus,
}

impl AppState {
    /// 저장소가 준비된 경우에만 풀을 돌려줍니다.
    pub fn pool(&self) -> Result<&SqlitePool, AppError> {
        if self.store.is_ready() {
            return Ok(&self.pool);
        }
        if !self.store.is_settled() {
            tracing::debug!("Store connection still pending");
        }
        Err(AppError::StoreUnavailable)
    }
}

/// 요청 본문에서 원시 제출값을 꺼내는 Extractor
///
/// Content-Type에 따라:
/// - `multipart/form-data` → 텍스트 필드 + `image` 파일
/// - `application/x-www-form-urlencoded` → 텍스트 필드
/// - 그 외 → JSON 객체
impl<S> FromRequest<S> for Submission
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            return from_multipart(multipart).await;
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(form) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            return Ok(Submission::from_form(form));
        }

        let Json(object) = Json::<Map<String, Value>>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(Submission::from_json(object))
    }
}

async fn from_multipart(mut multipart: Multipart) -> Result<Submission, AppError> {
    let mut submission = Submission::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name.is_empty() {
            continue;
        }

        // 파일 파트는 바이트로, 나머지는 텍스트로 읽습니다.
        let value = if field.file_name().is_some() {
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            RawValue::File {
                content_type,
                bytes: bytes.to_vec(),
            }
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            RawValue::Text(text)
        };
        submission.insert(name, value);
    }

    Ok(submission)
}

/// 목록/페이지의 검색 쿼리 파라미터
///
/// `GET /data?q=portal` → `SearchQuery { q: Some("portal") }`
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// 제목/설명에서 찾을 문자열 (대소문자 무시). 없거나 비어 있으면 전체.
    pub q: Option<String>,
}

/// `GET /data` — 게임 목록을 삽입 순서대로 반환합니다.
pub async fn list_games(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Game>>, AppError> {
    let games = db::find_all(state.pool()?).await?;
    Ok(Json(services::search::filter(games, query.q.as_deref())))
}

/// `GET /data/stats` — 전체/완료/진행 중/멀티플레이 게임 수
pub async fn game_stats(
    State(state): State<AppState>,
) -> Result<Json<CollectionStats>, AppError> {
    let games = db::find_all(state.pool()?).await?;
    Ok(Json(services::summarize(&games)))
}

/// `GET /data/{id}` — 단일 게임을 조회합니다.
pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Game>, AppError> {
    let game = db::find_by_id(state.pool()?, &id)
        .await?
        .ok_or(AppError::NotFound(id))?;
    Ok(Json(game))
}

/// `POST /data` — 새 게임을 생성합니다.
///
/// 본문에 `id`가 있어도 무시하고, 저장소가 새 ID를 부여합니다.
pub async fn create_game(
    State(state): State<AppState>,
    submission: Submission,
) -> Result<(StatusCode, Json<Game>), AppError> {
    let candidate = services::validate(&submission)?;
    let pool = state.pool()?;

    let intent = services::prepare(pool, candidate, None).await?;
    let game = services::persist(pool, intent).await?;
    Ok((StatusCode::CREATED, Json(game)))
}

/// `PUT /data/{id}` — 게임 레코드 전체를 교체합니다.
///
/// 새 이미지가 없으면 저장된 이미지를 유지합니다.
/// 존재하지 않는 ID는 404이며, 새로 생성하지 않습니다.
pub async fn update_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
    submission: Submission,
) -> Result<Json<Game>, AppError> {
    let candidate = services::validate(&submission)?;
    let pool = state.pool()?;

    let intent = services::prepare(pool, candidate, Some(&id)).await?;
    let game = services::persist(pool, intent).await?;
    Ok(Json(game))
}

/// `DELETE /data/{id}` — 게임을 삭제합니다.
///
/// 성공하면 빈 JSON 객체, 없는 ID면 404를 반환합니다.
pub async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let deleted = db::delete_by_id(state.pool()?, &id).await?;
    if !deleted {
        return Err(AppError::NotFound(id));
    }
    Ok(Json(json!({})))
}
