//! # 컬렉션 페이지 핸들러
//!
//! - `GET /` → 서버에서 렌더링한 컬렉션 HTML
//! - `GET /?q=...` → 제목/설명에 검색어가 들어간 카드만 표시 (통계는 전체 기준)
//!
//! 저장소가 준비되지 않았으면 에러 대신 오프라인 배너와 빈 목록을 보여줍니다.

use crate::{
    db,
    error::AppError,
    routes::games::{AppState, SearchQuery},
    services,
    views::collection,
};
use axum::{
    extract::{Query, State},
    response::Html,
};

pub async fn collection_page(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Html<String>, AppError> {
    let games = match state.pool() {
        Ok(pool) => db::find_all(pool).await?,
        Err(_) => Vec::new(),
    };
    let stats = services::summarize(&games);
    let shown = services::search::filter(games, query.q.as_deref());

    Ok(Html(collection::page(
        &shown,
        &stats,
        state.store.is_ready(),
        query.q.as_deref(),
    )))
}
