//! # 게임(Game) 모델 정의
//!
//! 컬렉션의 유일한 엔티티인 게임 레코드와, 클라이언트가 보낸
//! 원시(raw) 입력값을 표현하는 구조체들을 정의합니다.
//!
//! ## 구조체 역할
//! - `GameRecord`: 검증/정규화가 끝난 레코드 본문 (식별자 제외)
//! - `Game`: 저장소에 저장된 레코드 (`id` + `GameRecord`)
//! - `RawValue`, `Submission`: 정규화 전의 폼/JSON 입력값
//! - `CollectionStats`: 컬렉션 요약 통계

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::HashMap;

/// 정규화된 게임 레코드 본문 — DB의 `games` 테이블 한 행에서 `id`를 뺀 나머지입니다.
///
/// JSON으로 나갈 때는 camelCase 필드명(`hoursPlayed`, `releaseDate` 등)을 사용합니다.
/// 선택 필드의 "값 없음"은 항상 `None`(JSON `null`) 하나로만 표현됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub title: String,
    pub description: String,
    /// `data:` URI 형태의 이미지. 수정 시 새 업로드가 없으면 기존 값을 유지합니다.
    pub image: Option<String>,
    pub genre: Option<String>,
    pub platform: Option<String>,
    pub publisher: Option<String>,
    pub developer: Option<String>,
    /// 0–10
    pub rating: Option<f64>,
    pub price: Option<f64>,
    pub hours_played: Option<i64>,
    /// 0–10, 생성 시 입력이 없으면 5
    pub difficulty: Option<i64>,
    /// 0–10, 생성 시 입력이 없으면 5
    pub replay_value: Option<i64>,
    pub multiplayer: bool,
    pub completed: bool,
    /// UTC 기준 ISO-8601 (예: "2011-04-19T00:00:00.000Z")
    pub release_date: Option<String>,
}

/// 저장된 게임 — 저장소가 부여한 식별자와 레코드 본문.
///
/// `#[serde(flatten)]`으로 JSON에서는 `id`와 나머지 필드가 한 객체에 나란히 놓입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Game {
    /// UUIDv7 문자열. 생성 시 한 번 부여되고 바뀌지 않습니다.
    pub id: String,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub record: GameRecord,
}

/// 클라이언트가 보낸 필드 하나의 원시 값.
///
/// 폼 입력은 대부분 텍스트로 들어오고, 체크박스는 불리언,
/// 이미지는 업로드 파일로 들어올 수 있습니다.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Flag(bool),
    /// JSON 숫자. 정수 입력이 `f64`를 거치며 바뀌지 않도록 원래 표현을 유지합니다.
    Number(Number),
    File { content_type: String, bytes: Vec<u8> },
    Null,
    /// JSON 배열/객체처럼 어떤 필드에도 맞지 않는 값
    Other,
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawValue::Null,
            Value::Bool(flag) => RawValue::Flag(flag),
            Value::Number(n) => RawValue::Number(n),
            Value::String(text) => RawValue::Text(text),
            Value::Array(_) | Value::Object(_) => RawValue::Other,
        }
    }
}

/// 제출된 필드 이름 → 원시 값의 평평한(flat) 매핑.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Submission {
    fields: HashMap<String, RawValue>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// 필드를 추가합니다. 같은 이름이 이미 있으면 덮어씁니다.
    pub fn with(mut self, name: impl Into<String>, value: RawValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: RawValue) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.fields.get(name)
    }

    /// JSON 객체 본문에서 만듭니다.
    pub fn from_json(object: Map<String, Value>) -> Self {
        Self {
            fields: object
                .into_iter()
                .map(|(name, value)| (name, RawValue::from(value)))
                .collect(),
        }
    }

    /// `application/x-www-form-urlencoded` 본문에서 만듭니다. 모든 값은 텍스트입니다.
    pub fn from_form(form: HashMap<String, String>) -> Self {
        Self {
            fields: form
                .into_iter()
                .map(|(name, value)| (name, RawValue::Text(value)))
                .collect(),
        }
    }
}

/// 컬렉션 요약 — `GET /data/stats` 응답.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub multiplayer: usize,
}
