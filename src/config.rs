//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목 (모두 기본값이 있습니다):
//! - `DATABASE_URL`: SQLite 데이터베이스 경로
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호
//! - `PUBLIC_PATH`: 정적 파일(프론트엔드) 디렉토리
//! - `BODY_LIMIT_BYTES`: 요청 본문 최대 크기
//! - `STORE_TIMEOUT_SECS`: 저장소 연결 대기 시간

use std::{env, time::Duration};

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후,
/// 애플리케이션 전체에서 공유됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 파일 경로 (예: "sqlite:data/gameshelf.db")
    pub database_url: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 3003)
    pub port: u16,
    /// 정적 파일을 서빙할 디렉토리 (기본값: "public")
    pub public_path: String,
    /// 요청 본문 최대 크기. 이미지가 data URI로 들어오므로 넉넉하게 잡습니다.
    pub body_limit: usize,
    /// 저장소 연결을 기다리는 최대 시간
    pub store_timeout: Duration,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// 값이 없거나 숫자 파싱에 실패하면 기본값을 사용합니다.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 키 → 값 조회 함수로부터 설정을 만듭니다. 테스트에서 환경변수 대신 씁니다.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Self {
            database_url: text("DATABASE_URL", "sqlite:data/gameshelf.db"),
            host: text("HOST", "0.0.0.0"),
            port: text("PORT", "3003").parse().unwrap_or(3003),
            public_path: text("PUBLIC_PATH", "public"),
            body_limit: text("BODY_LIMIT_BYTES", "10485760")
                .parse()
                .unwrap_or(10 * 1024 * 1024),
            store_timeout: Duration::from_secs(
                text("STORE_TIMEOUT_SECS", "5").parse().unwrap_or(5),
            ),
        }
    }
}
