//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 라우터 구성입니다.
//!
//! 각 하위 모듈:
//! - `games`: 게임 레코드 CRUD 핸들러와 공유 상태(AppState)
//! - `pages`: 서버 렌더링 컬렉션 페이지
//! - `status`: 서버/저장소 상태 확인

pub mod games;
pub mod pages;
pub mod status;

pub use games::*;
pub use pages::*;
pub use status::*;

use axum::{extract::DefaultBodyLimit, routing::get, Router};

/// API와 페이지 라우트를 구성합니다.
///
/// `body_limit`: base64 이미지가 본문에 들어오므로 axum 기본값(2MB)보다 크게 잡습니다.
pub fn router(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .route("/", get(collection_page))
        .route("/status", get(status_check))
        .route("/data", get(list_games).post(create_game))
        .route("/data/stats", get(game_stats))
        .route(
            "/data/{id}",
            get(get_game).put(update_game).delete(delete_game),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{self, StoreStatus};
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Method, Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use sqlx::SqlitePool;
    use tower::ServiceExt;

    const DESCRIPTION: &str = "A mind-bending puzzle platformer from Valve.";
    const IMAGE: &str = "data:image/png;base64,AAA";

    fn app(pool: SqlitePool, ready: bool) -> Router {
        let store = StoreStatus::new();
        store.settle(ready);
        router(AppState { pool, store }, 10 * 1024 * 1024)
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn create(app: &Router, body: Value) -> Value {
        let response = send(app, json_request(Method::POST, "/data", body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    // ---------------------------------------------------------------------
    // Status
    // ---------------------------------------------------------------------

    #[sqlx::test]
    async fn status_reports_store_readiness(pool: SqlitePool) {
        let response = send(&app(pool.clone(), true), empty_request(Method::GET, "/status")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "ok": true, "store": true }));

        let response = send(&app(pool, false), empty_request(Method::GET, "/status")).await;
        assert_eq!(body_json(response).await, json!({ "ok": true, "store": false }));
    }

    // ---------------------------------------------------------------------
    // Create
    // ---------------------------------------------------------------------

    #[sqlx::test]
    async fn create_normalizes_and_applies_defaults(pool: SqlitePool) {
        let app = app(pool, true);
        let game = create(
            &app,
            json!({ "title": "Portal 2", "description": DESCRIPTION, "rating": "9.5" }),
        )
        .await;

        assert!(game["id"].is_string());
        assert_eq!(game["title"], "Portal 2");
        assert_eq!(game["rating"], 9.5);
        assert_eq!(game["difficulty"], 5);
        assert_eq!(game["replayValue"], 5);
        assert_eq!(game["multiplayer"], false);
        assert_eq!(game["completed"], false);
        assert_eq!(game["image"], Value::Null);
        assert_eq!(game["genre"], Value::Null);
        assert_eq!(game["releaseDate"], Value::Null);
    }

    #[sqlx::test]
    async fn create_ignores_client_supplied_id(pool: SqlitePool) {
        let app = app(pool, true);
        let game = create(
            &app,
            json!({ "id": "forged", "title": "Celeste", "description": DESCRIPTION }),
        )
        .await;
        assert_ne!(game["id"], "forged");

        let response = send(&app, empty_request(Method::GET, "/data/forged")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[sqlx::test]
    async fn empty_title_is_rejected_before_the_store(pool: SqlitePool) {
        let app = app(pool.clone(), true);
        let response = send(
            &app,
            json_request(Method::POST, "/data", json!({ "title": "", "description": "..." })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["field"], "title");
        assert_eq!(body["reason"], "empty");
        assert!(db::find_all(&pool).await.unwrap().is_empty());
    }

    #[sqlx::test]
    async fn short_description_is_rejected(pool: SqlitePool) {
        let app = app(pool, true);
        let response = send(
            &app,
            json_request(
                Method::POST,
                "/data",
                json!({ "title": "Tetris", "description": "Blocks.", "rating": "lots" }),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["field"], "description");
        assert_eq!(body["reason"], "too_short");
    }

    #[sqlx::test]
    async fn non_numeric_rating_is_invalid_type(pool: SqlitePool) {
        let app = app(pool, true);
        let response = send(
            &app,
            json_request(
                Method::POST,
                "/data",
                json!({ "title": "Tetris", "description": DESCRIPTION, "rating": "lots" }),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["reason"], "invalid_type");
    }

    #[sqlx::test]
    async fn malformed_json_is_bad_request(pool: SqlitePool) {
        let app = app(pool, true);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/data")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{ not json"))
            .unwrap();

        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[sqlx::test]
    async fn form_encoded_submission(pool: SqlitePool) {
        let app = app(pool, true);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/data")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(
                "title=Hades&description=Roguelike+dungeon+crawler+from+Supergiant.\
                 &multiplayer=on&hoursPlayed=40&genre=&releaseDate=2020-09-17",
            ))
            .unwrap();

        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let game = body_json(response).await;
        assert_eq!(game["multiplayer"], true);
        assert_eq!(game["completed"], false);
        assert_eq!(game["hoursPlayed"], 40);
        assert_eq!(game["genre"], Value::Null);
        assert_eq!(game["releaseDate"], "2020-09-17T00:00:00.000Z");
    }

    #[sqlx::test]
    async fn multipart_upload_becomes_data_uri(pool: SqlitePool) {
        let app = app(pool, true);
        let boundary = "gameshelf-boundary";
        let mut body = Vec::new();
        for (name, value) in [("title", "Portal 2"), ("description", DESCRIPTION)] {
            body.extend_from_slice(
                format!(
                    "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"cover.png\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(&[0, 0, 0]);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/data")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await["image"], "data:image/png;base64,AAAA");
    }

    // ---------------------------------------------------------------------
    // Read
    // ---------------------------------------------------------------------

    #[sqlx::test]
    async fn list_and_get_round_trip(pool: SqlitePool) {
        let app = app(pool, true);
        let first = create(
            &app,
            json!({
                "title": "Zelda",
                "description": DESCRIPTION,
                "platform": "Switch",
                "price": 59.99,
                "completed": true,
                "releaseDate": "2017-03-03"
            }),
        )
        .await;
        let second = create(&app, json!({ "title": "Apex", "description": DESCRIPTION })).await;

        let response = send(&app, empty_request(Method::GET, "/data")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([first.clone(), second]));

        let id = first["id"].as_str().unwrap();
        let response = send(&app, empty_request(Method::GET, &format!("/data/{id}"))).await;
        assert_eq!(body_json(response).await, first);
    }

    #[sqlx::test]
    async fn get_missing_is_404(pool: SqlitePool) {
        let app = app(pool, true);
        let response = send(&app, empty_request(Method::GET, "/data/nope")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_json(response).await["error"].is_string());
    }

    #[sqlx::test]
    async fn list_filters_by_search_query(pool: SqlitePool) {
        let app = app(pool, true);
        let portal = create(&app, json!({ "title": "Portal 2", "description": DESCRIPTION })).await;
        create(
            &app,
            json!({ "title": "Hades", "description": "Roguelike dungeon crawler from Supergiant." }),
        )
        .await;

        let response = send(&app, empty_request(Method::GET, "/data?q=VALVE")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([portal]));

        let response = send(&app, empty_request(Method::GET, "/data?q=")).await;
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);

        let response = send(&app, empty_request(Method::GET, "/data?q=zelda")).await;
        assert_eq!(body_json(response).await, json!([]));
    }

    #[sqlx::test]
    async fn stats_summarize_collection(pool: SqlitePool) {
        let app = app(pool, true);
        create(
            &app,
            json!({ "title": "A", "description": DESCRIPTION, "completed": true }),
        )
        .await;
        create(
            &app,
            json!({ "title": "B", "description": DESCRIPTION, "multiplayer": true }),
        )
        .await;

        let response = send(&app, empty_request(Method::GET, "/data/stats")).await;
        assert_eq!(
            body_json(response).await,
            json!({ "total": 2, "completed": 1, "inProgress": 1, "multiplayer": 1 })
        );
    }

    // ---------------------------------------------------------------------
    // Update
    // ---------------------------------------------------------------------

    #[sqlx::test]
    async fn update_without_image_retains_stored_image(pool: SqlitePool) {
        let app = app(pool, true);
        let created = create(
            &app,
            json!({ "title": "Portal", "description": DESCRIPTION, "image": IMAGE }),
        )
        .await;
        let id = created["id"].as_str().unwrap();

        let response = send(
            &app,
            json_request(
                Method::PUT,
                &format!("/data/{id}"),
                json!({ "title": "Portal 2", "description": DESCRIPTION, "rating": 10 }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let updated = body_json(response).await;
        assert_eq!(updated["id"], id);
        assert_eq!(updated["title"], "Portal 2");
        assert_eq!(updated["rating"], 10.0);
        assert_eq!(updated["image"], IMAGE);

        let response = send(&app, empty_request(Method::GET, &format!("/data/{id}"))).await;
        assert_eq!(body_json(response).await, updated);
    }

    #[sqlx::test]
    async fn update_is_whole_record_replacement(pool: SqlitePool) {
        let app = app(pool, true);
        let created = create(
            &app,
            json!({
                "title": "Doom",
                "description": DESCRIPTION,
                "publisher": "id Software",
                "multiplayer": true
            }),
        )
        .await;
        let id = created["id"].as_str().unwrap();

        let response = send(
            &app,
            json_request(
                Method::PUT,
                &format!("/data/{id}"),
                json!({ "title": "Doom", "description": DESCRIPTION }),
            ),
        )
        .await;
        let updated = body_json(response).await;
        assert_eq!(updated["publisher"], Value::Null);
        assert_eq!(updated["multiplayer"], false);
    }

    #[sqlx::test]
    async fn update_without_scales_stores_null(pool: SqlitePool) {
        let app = app(pool, true);
        let created = create(
            &app,
            json!({
                "title": "Dark Souls",
                "description": DESCRIPTION,
                "difficulty": "9",
                "hoursPlayed": 9007199254740993_i64
            }),
        )
        .await;
        assert_eq!(created["difficulty"], 9);
        assert_eq!(created["replayValue"], 5);
        assert_eq!(created["hoursPlayed"], 9007199254740993_i64);
        let uri = format!("/data/{}", created["id"].as_str().unwrap());

        let response = send(
            &app,
            json_request(
                Method::PUT,
                &uri,
                json!({ "title": "Dark Souls", "description": DESCRIPTION }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, empty_request(Method::GET, &uri)).await;
        let stored = body_json(response).await;
        assert_eq!(stored["difficulty"], Value::Null);
        assert_eq!(stored["replayValue"], Value::Null);
        assert_eq!(stored["hoursPlayed"], Value::Null);
    }

    #[sqlx::test]
    async fn update_missing_identity_is_404_and_creates_nothing(pool: SqlitePool) {
        let app = app(pool.clone(), true);
        let response = send(
            &app,
            json_request(
                Method::PUT,
                "/data/g404",
                json!({ "title": "Ghost", "description": DESCRIPTION }),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(db::find_all(&pool).await.unwrap().is_empty());
    }

    #[sqlx::test]
    async fn update_is_validated(pool: SqlitePool) {
        let app = app(pool, true);
        let created = create(&app, json!({ "title": "Doom", "description": DESCRIPTION })).await;
        let id = created["id"].as_str().unwrap();

        let response = send(
            &app,
            json_request(
                Method::PUT,
                &format!("/data/{id}"),
                json!({ "title": "Doom", "description": DESCRIPTION, "difficulty": 11 }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["field"], "difficulty");
        assert_eq!(body["reason"], "out_of_range");
    }

    // ---------------------------------------------------------------------
    // Delete
    // ---------------------------------------------------------------------

    #[sqlx::test]
    async fn delete_twice_then_not_found(pool: SqlitePool) {
        let app = app(pool, true);
        let created = create(&app, json!({ "title": "Quake", "description": DESCRIPTION })).await;
        let uri = format!("/data/{}", created["id"].as_str().unwrap());

        let response = send(&app, empty_request(Method::DELETE, &uri)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({}));

        let response = send(&app, empty_request(Method::DELETE, &uri)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // ---------------------------------------------------------------------
    // Store unavailable
    // ---------------------------------------------------------------------

    #[sqlx::test]
    async fn store_not_ready_is_503(pool: SqlitePool) {
        let app = app(pool, false);

        let response = send(&app, empty_request(Method::GET, "/data")).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(body_json(response).await["error"].is_string());

        let response = send(
            &app,
            json_request(
                Method::POST,
                "/data",
                json!({ "title": "Portal 2", "description": DESCRIPTION }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[sqlx::test]
    async fn validation_runs_before_store_readiness(pool: SqlitePool) {
        let app = app(pool, false);
        let response = send(
            &app,
            json_request(Method::POST, "/data", json!({ "title": " " })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    // ---------------------------------------------------------------------
    // Page
    // ---------------------------------------------------------------------

    #[sqlx::test]
    async fn collection_page_renders_escaped_cards(pool: SqlitePool) {
        let app = app(pool, true);
        create(
            &app,
            json!({ "title": "<b>Bold</b> Game", "description": DESCRIPTION }),
        )
        .await;

        let response = send(&app, empty_request(Method::GET, "/")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt; Game"));
        assert!(!html.contains("<b>Bold</b>"));
        assert!(html.contains("Database: ONLINE"));
    }

    #[sqlx::test]
    async fn collection_page_search_hides_other_cards(pool: SqlitePool) {
        let app = app(pool, true);
        create(&app, json!({ "title": "Portal 2", "description": DESCRIPTION })).await;
        create(
            &app,
            json!({ "title": "Hades", "description": "Roguelike dungeon crawler from Supergiant." }),
        )
        .await;

        let response = send(&app, empty_request(Method::GET, "/?q=hades")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("<h3>Hades</h3>"));
        assert!(!html.contains("<h3>Portal 2</h3>"));
        assert!(html.contains(r#"<span id="statTotal" class="stat-value">2</span>"#));
    }

    #[sqlx::test]
    async fn collection_page_when_store_offline(pool: SqlitePool) {
        let app = app(pool, false);
        let response = send(&app, empty_request(Method::GET, "/")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Database: OFFLINE"));
    }
}
