//! # GameShelf 웹 서버 진입점
//!
//! 게임 컬렉션을 관리하는 HTTP 서버의 **시작점(entry point)**입니다.
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 연결 풀 생성 (지연 연결)
//! 4. 백그라운드에서 저장소 연결 + 마이그레이션
//! 5. 라우터 설정 (API, 페이지, 정적 파일)
//! 6. HTTP 서버 시작
//!
//! 저장소 연결을 기다리지 않고 바로 요청을 받습니다.
//! 연결이 확정되기 전의 데이터 요청은 503으로 응답합니다.

mod config;
mod db;
mod error;
mod models;
mod routes;
mod services;
mod views;

use anyhow::Result;
use config::Config;
use db::StoreStatus;
use routes::AppState;
use std::path::Path;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 없으면 gameshelf, tower_http, axum 모듈을 debug 레벨로 설정
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gameshelf=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env();
    tracing::info!("Starting GameShelf server on {}:{}", config.host, config.port);

    // ── 4단계: 연결 풀 생성 + 백그라운드 연결 ──
    // connect_lazy: 실제 연결은 첫 사용 시점에 일어나므로 여기서는 기다리지 않습니다.
    // 연결 결과는 StoreStatus에 정확히 한 번 기록됩니다.
    let pool = db::lazy_pool(&config.database_url, config.store_timeout)?;
    let store = StoreStatus::new();
    tokio::spawn(db::initialize(pool.clone(), store.clone()));

    // ── 5단계: 라우터 설정 ──
    let state = AppState { pool, store };
    let api = routes::router(state, config.body_limit);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 정적 파일 디렉토리가 있으면 매칭되지 않는 경로를 그쪽으로 넘깁니다.
    let app = if Path::new(&config.public_path).exists() {
        tracing::info!("Serving static files from {}", config.public_path);
        api.fallback_service(ServeDir::new(&config.public_path))
    } else {
        tracing::warn!(
            "Static directory {} not found, serving API and page only",
            config.public_path
        );
        api
    }
    .layer(cors)
    .layer(TraceLayer::new_for_http());

    // ── 6단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
