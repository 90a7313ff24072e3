//! 컬렉션 요약 통계 (전체/완료/진행 중/멀티플레이 수)

use crate::models::{CollectionStats, Game};

pub fn summarize(games: &[Game]) -> CollectionStats {
    let total = games.len();
    let completed = games.iter().filter(|g| g.record.completed).count();
    let multiplayer = games.iter().filter(|g| g.record.multiplayer).count();

    CollectionStats {
        total,
        completed,
        in_progress: total - completed,
        multiplayer,
    }
}
