//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 저장소와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `games`: 게임 레코드의 생성/조회/교체/삭제 쿼리
//! - `status`: 저장소 연결 준비 상태 셀
//!
//! 연결 풀은 시작 시 연결하지 않는(lazy) 풀로 만들고,
//! 실제 연결과 마이그레이션은 `initialize`가 백그라운드에서 수행합니다.

pub mod games;
pub mod status;

pub use games::*;
pub use status::StoreStatus;

use crate::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::{str::FromStr, time::Duration};

/// 아직 연결하지 않은 SQLite 연결 풀을 만듭니다.
///
/// 연결마다 `acquire_timeout`이 적용되어, 저장소 호출이 무한히 기다리지 않습니다.
pub fn lazy_pool(database_url: &str, timeout: Duration) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    Ok(SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(timeout)
        .connect_lazy_with(options))
}

/// 저장소에 연결하고 마이그레이션을 실행한 뒤, 결과를 `status`에 한 번 기록합니다.
///
/// `tokio::spawn`으로 띄워서 서버 시작을 막지 않습니다.
pub async fn initialize(pool: SqlitePool, status: StoreStatus) {
    match migrate(&pool).await {
        Ok(()) => {
            tracing::info!("Store connected");
            status.settle(true);
        }
        Err(e) => {
            tracing::error!("Store connection error: {}", e);
            status.settle(false);
        }
    }
}

async fn migrate(pool: &SqlitePool) -> Result<(), AppError> {
    // 파일 DB라면 상위 디렉토리가 있어야 SQLite가 파일을 만들 수 있습니다.
    let filename = pool.connect_options().get_filename().to_path_buf();
    if let Some(parent) = filename.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
            tracing::info!("Created data directory: {}", parent.display());
        }
    }

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
