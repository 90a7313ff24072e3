//! # 컬렉션 페이지 렌더링
//!
//! `GET /`에서 보여주는 읽기 전용 컬렉션 화면입니다.
//! 저장소 상태 배너, 검색창, 통계, 게임 카드 목록(없으면 빈 상태 안내)을 그립니다.
//! 모든 출력은 `markup` 빌더를 거치므로 별도의 sanitize 단계가 없습니다.

use super::markup::{document, el, Element};
use crate::models::{CollectionStats, Game};
use chrono::{DateTime, Utc};

/// 전체 페이지 HTML을 만듭니다.
///
/// `games`는 검색어로 이미 걸러진 목록이고, `stats`는 컬렉션 전체 기준입니다.
pub fn page(
    games: &[Game],
    stats: &CollectionStats,
    store_ready: bool,
    query: Option<&str>,
) -> String {
    let query = query.map(str::trim).filter(|q| !q.is_empty());
    let content = if games.is_empty() {
        match query {
            Some(q) if stats.total > 0 => no_matches(q),
            _ => empty_state(store_ready),
        }
    } else {
        el("div")
            .attr("id", "contentArea")
            .class("cards-grid")
            .children(games.iter().map(card))
    };

    document(
        el("html")
            .attr("lang", "en")
            .child(
                el("head")
                    .child(el("meta").attr("charset", "utf-8"))
                    .child(
                        el("meta")
                            .attr("name", "viewport")
                            .attr("content", "width=device-width, initial-scale=1"),
                    )
                    .child(el("title").text("Game Collection"))
                    .child(el("link").attr("rel", "stylesheet").attr("href", "/style.css")),
            )
            .child(
                el("body")
                    .child(el("header").child(el("h1").text("🎮 Game Collection")))
                    .child(status_banner(store_ready))
                    .child(search_form(query))
                    .child_opt((stats.total > 0).then(|| stats_grid(stats)))
                    .child(content),
            ),
    )
}

fn status_banner(store_ready: bool) -> Element {
    let (id, label) = if store_ready {
        ("readyStatus", "ONLINE")
    } else {
        ("notReadyStatus", "OFFLINE")
    };
    el("div")
        .attr("id", id)
        .class("status")
        .text(format!("Database: {label}"))
}

/// 제목/설명 검색 폼. 제출하면 `GET /?q=...`
fn search_form(query: Option<&str>) -> Element {
    el("form")
        .class("search")
        .attr("method", "get")
        .attr("action", "/")
        .child(
            el("input")
                .attr("type", "search")
                .attr("id", "searchInput")
                .attr("name", "q")
                .attr("placeholder", "Search games...")
                .attr("value", query.unwrap_or_default()),
        )
}

fn no_matches(query: &str) -> Element {
    el("div")
        .class("empty-state")
        .child(el("h3").text(format!("No games match \"{query}\"")))
        .child(el("p").text("Try a different title or description keyword."))
}

fn stats_grid(stats: &CollectionStats) -> Element {
    let stat = |id: &'static str, label: &str, value: usize| {
        el("div")
            .class("stat-card")
            .child(el("span").attr("id", id).class("stat-value").text(value.to_string()))
            .child(el("span").class("stat-label").text(label))
    };

    el("div")
        .attr("id", "statsGrid")
        .class("stats-grid")
        .child(stat("statTotal", "Total Games", stats.total))
        .child(stat("statCompleted", "Completed", stats.completed))
        .child(stat("statInProgress", "In Progress", stats.in_progress))
        .child(stat("statMultiplayer", "Multiplayer", stats.multiplayer))
}

fn empty_state(store_ready: bool) -> Element {
    let message = if store_ready {
        "Add a game to start building your library!"
    } else {
        "The database is not reachable right now."
    };
    el("div")
        .class("empty-state")
        .child(el("h3").text("No games in your collection yet"))
        .child(el("p").text(message))
}

/// 게임 하나를 카드로 그립니다.
pub fn card(game: &Game) -> Element {
    let record = &game.record;

    let rating = match record.rating {
        Some(rating) => el("div").class("rating").text(format!("⭐ {rating}/10")),
        None => el("div").class("rating").child(el("i").text("Not rated")),
    };

    let cover = match &record.image {
        Some(image) => el("div")
            .class("card-image")
            .child(el("img").attr("src", image).attr("alt", &record.title)),
        None => el("div").class("card-image-placeholder").text("🎮"),
    };

    let meter = |label: &str, value: Option<i64>| {
        let gauge = match value {
            Some(value) => el("meter")
                .attr("min", "0")
                .attr("max", "10")
                .attr("value", value.to_string()),
            None => el("i").text("Not set"),
        };
        el("div")
            .class("stat")
            .child(el("span").text(label))
            .child(gauge)
    };

    let tag = |class: &'static str, text: String| el("section").class(class).text(text);

    let details = [
        record.publisher.as_ref().map(|p| format!("Publisher: {p}")),
        record.developer.as_ref().map(|d| format!("Developer: {d}")),
        record.price.map(|p| format!("Price: ${p}")),
        record.hours_played.map(|h| format!("Hours Played: {h}")),
        record.multiplayer.then(|| "Multiplayer".to_string()),
    ]
    .into_iter()
    .flatten()
    .map(|text| tag("detail", text))
    .collect::<Vec<_>>();

    el("div")
        .class("item-card")
        .attr("data-id", &game.id)
        .child(cover)
        .child(
            el("div")
                .class("item-heading")
                .child(el("h3").text(&record.title))
                .child(rating),
        )
        .child(
            el("div")
                .class("item-info")
                .child(
                    el("div")
                        .class("stats")
                        .child(meter("Difficulty", record.difficulty))
                        .child(meter("Replay Value", record.replay_value)),
                )
                .child_opt(record.release_date.as_deref().and_then(calendar)),
        )
        .child(
            el("div")
                .class("item-info")
                .child_opt(record.genre.clone().map(|g| tag("genre", g)))
                .child_opt(record.platform.clone().map(|p| tag("platform", p)))
                .child(tag(
                    "progress",
                    if record.completed { "Completed" } else { "In Progress" }.to_string(),
                )),
        )
        .child_opt((!details.is_empty()).then(|| el("div").class("item-info").children(details)))
        .child(
            el("section")
                .class("description")
                .child(el("p").text(&record.description)),
        )
}

/// 출시일 배지 — 저장된 ISO-8601 값을 UTC 기준 월/일/연도로 나눕니다.
/// 해석할 수 없는 값이면 배지를 생략합니다.
fn calendar(release_date: &str) -> Option<Element> {
    let date = DateTime::parse_from_rfc3339(release_date)
        .ok()?
        .with_timezone(&Utc);

    Some(
        el("div")
            .class("calendar")
            .child(el("div").class("month").text(date.format("%b").to_string()))
            .child(el("div").class("day").text(date.format("%d").to_string()))
            .child(el("div").class("year").text(date.format("%Y").to_string())),
    )
}
