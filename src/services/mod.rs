//! # 비즈니스 로직 모듈
//!
//! 라우트 핸들러와 저장소 사이에서 동작하는 규칙들입니다.
//! - `validation`: 원시 제출값 → 정규화된 레코드 (순수 함수)
//! - `resolver`: 생성/교체 결정과 이미지 유지, 저장 실행
//! - `search`: 제목/설명 검색
//! - `stats`: 컬렉션 요약 통계

pub mod resolver;
pub mod search;
pub mod stats;
pub mod validation;

pub use resolver::{persist, prepare};
pub use stats::summarize;
pub use validation::validate;
