//! # 상태 확인(Status) 핸들러
//!
//! ## 엔드포인트
//! - `GET /status` → `{ "ok": true, "store": true | false }`
//!
//! 서버 자체는 항상 `ok: true`이고, `store`는 저장소 연결이
//! 성공으로 확정되었는지를 나타냅니다. 프론트엔드가 온라인/오프라인 표시에 씁니다.

use crate::routes::games::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// `GET /status` — 서버와 저장소 상태를 확인합니다.
///
/// 저장소를 호출하지 않고 준비 상태 셀만 읽으므로 실패하지 않습니다.
pub async fn status_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "ok": true,
        "store": state.store.is_ready()
    }))
}
