//! # 저장소 준비 상태(readiness)
//!
//! 프로세스 시작 시에는 "미정", 백그라운드 연결 시도가 끝나면 단 한 번
//! 성공/실패로 확정되는 상태 셀입니다. `/status`와 모든 저장소 핸들러가 읽습니다.

use std::sync::{Arc, OnceLock};

/// 저장소 연결 상태. clone해도 같은 셀을 가리킵니다.
#[derive(Debug, Clone, Default)]
pub struct StoreStatus {
    connected: Arc<OnceLock<bool>>,
}

impl StoreStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// 연결 시도 결과를 기록합니다. 두 번째 호출부터는 무시됩니다.
    pub fn settle(&self, connected: bool) {
        if self.connected.set(connected).is_err() {
            tracing::warn!(connected, "Store status already settled, ignoring");
        }
    }

    /// 연결이 성공으로 확정되었을 때만 true
    pub fn is_ready(&self) -> bool {
        self.connected.get().copied().unwrap_or(false)
    }

    pub fn is_settled(&self) -> bool {
        self.connected.get().is_some()
    }
}
