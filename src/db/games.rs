//! # 게임 데이터베이스 쿼리 모듈
//!
//! `games` 테이블에 대한 생성/조회/교체/삭제 쿼리 함수들입니다.
//! 각 함수는 정확히 한 번의 저장소 작업을 수행합니다 (트랜잭션, 배치 없음).
//! 에러 발생 시 `AppError`를 반환합니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

/// 모든 게임을 삽입 순서(rowid)대로 조회합니다.
///
/// 이 계층에서는 별도의 정렬 기준을 두지 않습니다.
pub async fn find_all(pool: &SqlitePool) -> Result<Vec<Game>, AppError> {
    let games = sqlx::query_as::<_, Game>(
        r#"
        SELECT id, title, description, image, genre, platform, publisher, developer,
               rating, price, hours_played, difficulty, replay_value,
               multiplayer, completed, release_date
        FROM games
        ORDER BY rowid
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(games)
}

/// ID로 게임 하나를 조회합니다.
///
/// # 반환값
/// - `Ok(Some(Game))`: 찾은 경우
/// - `Ok(None)`: 해당 ID가 없는 경우
pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Game>, AppError> {
    let game = sqlx::query_as::<_, Game>(
        r#"
        SELECT id, title, description, image, genre, platform, publisher, developer,
               rating, price, hours_played, difficulty, replay_value,
               multiplayer, completed, release_date
        FROM games
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(game)
}

/// 새 게임을 저장하고, 새로 부여한 식별자와 함께 반환합니다.
///
/// UUIDv7은 시간 기반이라 삭제된 레코드의 ID가 다시 나오지 않습니다.
pub async fn create(pool: &SqlitePool, record: &GameRecord) -> Result<Game, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query(
        r#"
        INSERT INTO games (id, title, description, image, genre, platform, publisher, developer,
                           rating, price, hours_played, difficulty, replay_value,
                           multiplayer, completed, release_date)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&record.title)
    .bind(&record.description)
    .bind(&record.image)
    .bind(&record.genre)
    .bind(&record.platform)
    .bind(&record.publisher)
    .bind(&record.developer)
    .bind(record.rating)
    .bind(record.price)
    .bind(record.hours_played)
    .bind(record.difficulty)
    .bind(record.replay_value)
    .bind(record.multiplayer)
    .bind(record.completed)
    .bind(&record.release_date)
    .execute(pool)
    .await?;

    tracing::info!(game_id = %id, title = %record.title, "Game created");

    find_by_id(pool, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created game".to_string()))
}

/// 게임 레코드 전체를 교체합니다 (부분 수정 없음).
///
/// # 반환값
/// - `Ok(Some(Game))`: 교체 성공
/// - `Ok(None)`: 해당 ID가 없음 (0행 영향)
pub async fn replace(
    pool: &SqlitePool,
    id: &str,
    record: &GameRecord,
) -> Result<Option<Game>, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE games
        SET title = ?, description = ?, image = ?, genre = ?, platform = ?,
            publisher = ?, developer = ?, rating = ?, price = ?, hours_played = ?,
            difficulty = ?, replay_value = ?, multiplayer = ?, completed = ?,
            release_date = ?
        WHERE id = ?
        "#,
    )
    .bind(&record.title)
    .bind(&record.description)
    .bind(&record.image)
    .bind(&record.genre)
    .bind(&record.platform)
    .bind(&record.publisher)
    .bind(&record.developer)
    .bind(record.rating)
    .bind(record.price)
    .bind(record.hours_played)
    .bind(record.difficulty)
    .bind(record.replay_value)
    .bind(record.multiplayer)
    .bind(record.completed)
    .bind(&record.release_date)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    tracing::info!(game_id = %id, "Game replaced");
    find_by_id(pool, id).await
}

/// 게임을 삭제합니다.
///
/// # 반환값
/// - `Ok(true)`: 삭제됨
/// - `Ok(false)`: 해당 ID가 없음
pub async fn delete_by_id(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM games WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    let deleted = result.rows_affected() > 0;
    if deleted {
        tracing::info!(game_id = %id, "Game deleted");
    }
    Ok(deleted)
}
