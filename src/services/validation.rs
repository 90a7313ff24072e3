//! # 게임 입력 검증/정규화 서비스
//!
//! 클라이언트가 보낸 원시 필드(`Submission`)를 정규화된 `GameRecord`로 바꾸거나,
//! 어느 필드가 왜 실패했는지 알려주는 `ValidationError`를 반환합니다.
//!
//! 규칙 요약:
//! - `title`: 앞뒤 공백 제거 후 비어 있으면 `empty`
//! - `description`: 공백 제거 후 20자 미만이면 `too_short` (다른 필드보다 먼저 검사)
//! - 숫자/정수/날짜/불리언 변환 실패는 `invalid_type`, 허용 범위 밖은 `out_of_range`
//! - 비어 있는 선택 필드는 모두 `None` (척도 기본값은 생성 시 resolver가 채움)
//!
//! 부수 효과가 없는 순수 함수입니다. 저장소는 전혀 건드리지 않습니다.

use crate::models::{GameRecord, RawValue, Submission};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;
use std::{fmt, num::IntErrorKind};
use thiserror::Error;

pub const TITLE: &str = "title";
pub const DESCRIPTION: &str = "description";
pub const IMAGE: &str = "image";
pub const GENRE: &str = "genre";
pub const PLATFORM: &str = "platform";
pub const PUBLISHER: &str = "publisher";
pub const DEVELOPER: &str = "developer";
pub const RATING: &str = "rating";
pub const PRICE: &str = "price";
pub const HOURS_PLAYED: &str = "hoursPlayed";
pub const DIFFICULTY: &str = "difficulty";
pub const REPLAY_VALUE: &str = "replayValue";
pub const MULTIPLAYER: &str = "multiplayer";
pub const COMPLETED: &str = "completed";
pub const RELEASE_DATE: &str = "releaseDate";

/// 설명(description)의 최소 글자 수 (유니코드 문자 기준)
pub const MIN_DESCRIPTION_CHARS: usize = 20;

/// 새 레코드를 만들 때 난이도/재플레이 가치가 비어 있으면 쓰는 값
pub const DEFAULT_SCALE_VALUE: i64 = 5;

/// 검증 실패 사유
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    Empty,
    TooShort,
    InvalidType,
    OutOfRange,
}

impl Reason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::Empty => "empty",
            Reason::TooShort => "too_short",
            Reason::InvalidType => "invalid_type",
            Reason::OutOfRange => "out_of_range",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 어느 필드가(`field`) 왜(`reason`) 규칙을 어겼는지
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[error("{field} is {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: Reason,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: Reason) -> Self {
        Self { field, reason }
    }
}

/// 제출값 전체를 검증하고 정규화된 레코드를 만듭니다.
///
/// 제목 → 설명 → 나머지 필드 순서로 검사하며, 처음 만난 실패를 반환합니다.
/// `id` 같은 알 수 없는 키는 무시합니다.
pub fn validate(submission: &Submission) -> Result<GameRecord, ValidationError> {
    let title = text(submission, TITLE)?
        .ok_or(ValidationError::new(TITLE, Reason::Empty))?;

    let description = text(submission, DESCRIPTION)?.unwrap_or_default();
    if description.chars().count() < MIN_DESCRIPTION_CHARS {
        return Err(ValidationError::new(DESCRIPTION, Reason::TooShort));
    }

    Ok(GameRecord {
        title,
        description,
        image: image(submission)?,
        genre: text(submission, GENRE)?,
        platform: text(submission, PLATFORM)?,
        publisher: text(submission, PUBLISHER)?,
        developer: text(submission, DEVELOPER)?,
        rating: number(submission, RATING)?
            .map(|v| within(RATING, v, 0.0, 10.0))
            .transpose()?,
        price: number(submission, PRICE)?
            .map(|v| within(PRICE, v, 0.0, f64::MAX))
            .transpose()?,
        hours_played: integer(submission, HOURS_PLAYED)?
            .map(|v| within(HOURS_PLAYED, v, 0, i64::MAX))
            .transpose()?,
        difficulty: scale(submission, DIFFICULTY)?,
        replay_value: scale(submission, REPLAY_VALUE)?,
        multiplayer: flag(submission, MULTIPLAYER)?,
        completed: flag(submission, COMPLETED)?,
        release_date: date(submission, RELEASE_DATE)?,
    })
}

fn invalid(field: &'static str) -> ValidationError {
    ValidationError::new(field, Reason::InvalidType)
}

fn within<T: PartialOrd>(field: &'static str, value: T, min: T, max: T) -> Result<T, ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::new(field, Reason::OutOfRange));
    }
    Ok(value)
}

/// 텍스트 필드: 공백을 제거하고, 비어 있으면 None
fn text(submission: &Submission, field: &'static str) -> Result<Option<String>, ValidationError> {
    match submission.get(field) {
        None | Some(RawValue::Null) => Ok(None),
        Some(RawValue::Text(value)) => {
            let trimmed = value.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
        }
        Some(_) => Err(invalid(field)),
    }
}

/// 숫자 필드: JSON 숫자나 숫자 텍스트를 받습니다. NaN/무한대는 거부합니다.
fn number(submission: &Submission, field: &'static str) -> Result<Option<f64>, ValidationError> {
    let value = match submission.get(field) {
        None | Some(RawValue::Null) => return Ok(None),
        Some(RawValue::Number(n)) => n.as_f64().ok_or(invalid(field))?,
        Some(RawValue::Text(value)) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed.parse::<f64>().map_err(|_| invalid(field))?
        }
        Some(_) => return Err(invalid(field)),
    };

    if !value.is_finite() {
        return Err(invalid(field));
    }
    Ok(Some(value))
}

/// `f64`가 정확히 표현하는 정수의 한계 (2^53)
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// 정수 필드: 소수부가 있으면 `invalid_type`, `i64`에 담기지 않으면 `out_of_range`
///
/// 정수 입력은 `f64`를 거치지 않고 그대로 파싱하므로 값이 바뀌지 않습니다.
fn integer(submission: &Submission, field: &'static str) -> Result<Option<i64>, ValidationError> {
    match submission.get(field) {
        None | Some(RawValue::Null) => Ok(None),
        Some(RawValue::Number(n)) => match n.as_i64() {
            Some(value) => Ok(Some(value)),
            // i64 범위를 넘는 양의 정수
            None if n.is_u64() => Err(ValidationError::new(field, Reason::OutOfRange)),
            None => whole_number(field, n.as_f64().ok_or(invalid(field))?).map(Some),
        },
        Some(RawValue::Text(value)) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            match trimmed.parse::<i64>() {
                Ok(value) => Ok(Some(value)),
                Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                    Err(ValidationError::new(field, Reason::OutOfRange))
                }
                // "8.0"처럼 소수점 표기된 정수
                Err(_) => {
                    let value = trimmed.parse::<f64>().map_err(|_| invalid(field))?;
                    whole_number(field, value).map(Some)
                }
            }
        }
        Some(_) => Err(invalid(field)),
    }
}

fn whole_number(field: &'static str, value: f64) -> Result<i64, ValidationError> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(invalid(field));
    }
    if value.abs() >= MAX_EXACT_INTEGER {
        return Err(ValidationError::new(field, Reason::OutOfRange));
    }
    Ok(value as i64)
}

/// 0–10 척도 필드 (difficulty, replayValue). 비어 있으면 `None`이고,
/// 기본값은 생성할 때만 채웁니다.
fn scale(submission: &Submission, field: &'static str) -> Result<Option<i64>, ValidationError> {
    integer(submission, field)?
        .map(|value| within(field, value, 0, 10))
        .transpose()
}

/// 체크박스 필드: 값이 없으면 false
fn flag(submission: &Submission, field: &'static str) -> Result<bool, ValidationError> {
    match submission.get(field) {
        None | Some(RawValue::Null) => Ok(false),
        Some(RawValue::Flag(value)) => Ok(*value),
        Some(RawValue::Number(n)) if n.as_f64() == Some(0.0) => Ok(false),
        Some(RawValue::Number(n)) if n.as_f64() == Some(1.0) => Ok(true),
        Some(RawValue::Text(value)) => match value.trim().to_ascii_lowercase().as_str() {
            "on" | "true" | "1" => Ok(true),
            "" | "off" | "false" | "0" => Ok(false),
            _ => Err(invalid(field)),
        },
        Some(_) => Err(invalid(field)),
    }
}

/// 날짜 필드를 UTC ISO-8601 문자열(밀리초 포함)로 정규화합니다.
///
/// `YYYY-MM-DD`는 UTC 자정으로, RFC 3339 타임스탬프는 UTC로 변환합니다.
/// 이미 정규화된 값을 다시 넣으면 같은 값이 나옵니다.
fn date(submission: &Submission, field: &'static str) -> Result<Option<String>, ValidationError> {
    let Some(raw) = text(submission, field)? else {
        return Ok(None);
    };

    let instant = if let Ok(day) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        day.and_hms_opt(0, 0, 0)
            .ok_or(invalid(field))?
            .and_utc()
    } else {
        DateTime::parse_from_rfc3339(&raw)
            .map_err(|_| invalid(field))?
            .with_timezone(&Utc)
    };

    Ok(Some(instant.to_rfc3339_opts(SecondsFormat::Millis, true)))
}

/// 이미지 필드: `data:` URI 텍스트는 그대로, 업로드 파일은 base64 data URI로 인코딩
fn image(submission: &Submission) -> Result<Option<String>, ValidationError> {
    match submission.get(IMAGE) {
        None | Some(RawValue::Null) => Ok(None),
        Some(RawValue::Text(value)) if value.trim().is_empty() => Ok(None),
        Some(RawValue::Text(value)) if value.starts_with("data:") => Ok(Some(value.clone())),
        // 파일 선택 없이 제출된 폼은 빈 파일 파트를 보냅니다.
        Some(RawValue::File { bytes, .. }) if bytes.is_empty() => Ok(None),
        Some(RawValue::File {
            content_type,
            bytes,
        }) if content_type.starts_with("image/") => Ok(Some(format!(
            "data:{};base64,{}",
            content_type,
            STANDARD.encode(bytes)
        ))),
        Some(_) => Err(invalid(IMAGE)),
    }
}
