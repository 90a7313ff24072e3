//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체들을 정의합니다.
//! - `game`: 게임 레코드, 원시 제출값, 컬렉션 통계
//!
//! `pub use game::*;`로 재공개하여 `crate::models::Game`처럼 짧게 접근합니다.

pub mod game;

pub use game::*;
