//! # 화면 렌더링 모듈
//!
//! - `markup`: 이스케이프가 내장된 HTML 노드 빌더
//! - `collection`: 컬렉션 페이지와 게임 카드

pub mod collection;
pub mod markup;
