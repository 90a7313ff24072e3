//! # 식별자/수정 해석(resolve) 서비스
//!
//! 검증된 레코드를 "새로 만들기"와 "기존 레코드 교체" 중 어느 쪽으로 저장할지 결정합니다.
//!
//! ## 처리 흐름
//! 1. ID가 없으면 `Create`, 비어 있는 척도(difficulty, replayValue)는 기본값 5
//! 2. ID가 있으면 먼저 저장된 레코드를 읽고 (읽기 → 쓰기, 두 단계)
//!    - 없으면 `NotFound` (절대 생성으로 바꾸지 않음)
//!    - 있으면 `Update`, 새 이미지가 없으면 기존 이미지를 그대로 사용
//! 3. `persist`가 결정된 작업을 저장소에 한 번 실행

use crate::{db, error::AppError, models::*, services::validation::DEFAULT_SCALE_VALUE};
use sqlx::SqlitePool;

/// 저장소에 실행할 작업
#[derive(Debug, Clone, PartialEq)]
pub enum PersistenceIntent {
    Create(GameRecord),
    Update { id: String, record: GameRecord },
}

/// 후보 레코드와 (있다면) 현재 저장된 레코드로 저장 작업을 결정합니다.
///
/// `stored`는 `supplied_id`로 미리 조회한 결과입니다.
pub fn resolve(
    mut candidate: GameRecord,
    supplied_id: Option<&str>,
    stored: Option<&Game>,
) -> Result<PersistenceIntent, AppError> {
    let Some(id) = supplied_id else {
        candidate.difficulty.get_or_insert(DEFAULT_SCALE_VALUE);
        candidate.replay_value.get_or_insert(DEFAULT_SCALE_VALUE);
        return Ok(PersistenceIntent::Create(candidate));
    };

    let stored = stored
        .filter(|game| game.id == id)
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;

    if candidate.image.is_none() {
        candidate.image = stored.record.image.clone();
    }

    Ok(PersistenceIntent::Update {
        id: id.to_string(),
        record: candidate,
    })
}

/// 필요한 경우 저장된 레코드를 먼저 읽은 뒤 `resolve`를 호출합니다.
pub async fn prepare(
    pool: &SqlitePool,
    candidate: GameRecord,
    supplied_id: Option<&str>,
) -> Result<PersistenceIntent, AppError> {
    let stored = match supplied_id {
        Some(id) => db::find_by_id(pool, id).await?,
        None => None,
    };
    resolve(candidate, supplied_id, stored.as_ref())
}

/// 결정된 작업을 실행하고 저장된 게임을 반환합니다.
///
/// 읽기와 쓰기 사이에 레코드가 삭제되면 `NotFound`가 됩니다.
/// 같은 ID에 대한 동시 수정은 마지막 쓰기가 남습니다.
pub async fn persist(pool: &SqlitePool, intent: PersistenceIntent) -> Result<Game, AppError> {
    match intent {
        PersistenceIntent::Create(record) => db::create(pool, &record).await,
        PersistenceIntent::Update { id, record } => db::replace(pool, &id, &record)
            .await?
            .ok_or(AppError::NotFound(id)),
    }
}
