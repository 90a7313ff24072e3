//! # 컬렉션 검색
//!
//! 제목이나 설명에 검색어가 들어 있는 게임만 남깁니다.
//! 대소문자는 구분하지 않고, 빈 검색어는 전체 목록을 그대로 돌려줍니다.

use crate::models::Game;

/// `query`로 게임 목록을 거릅니다. 순서는 유지합니다.
pub fn filter(games: Vec<Game>, query: Option<&str>) -> Vec<Game> {
    let needle = match query.map(str::trim) {
        Some(q) if !q.is_empty() => q.to_lowercase(),
        _ => return games,
    };

    games
        .into_iter()
        .filter(|game| {
            game.record.title.to_lowercase().contains(&needle)
                || game.record.description.to_lowercase().contains(&needle)
        })
        .collect()
}
