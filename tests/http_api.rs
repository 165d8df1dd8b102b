//! HTTP API tests.
//!
//! Drive the router in-process with `tower::ServiceExt::oneshot`; the tick
//! is run by hand so every test is deterministic.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use diamond_hunt::game::diamond::Diamond;
use diamond_hunt::network::router;
use diamond_hunt::{AdminPolicy, HuntConfig, HuntService};

const ADMIN_PAGE: &str = "http://localhost:8080/admin.html";

fn setup(cheating_prevention: bool) -> (Arc<HuntService>, Router) {
    let config = HuntConfig {
        rng_seed: Some(7),
        cheating_prevention,
        ..Default::default()
    };
    let service = Arc::new(HuntService::new(&config, AdminPolicy::from_setting(Some(ADMIN_PAGE))));
    let app = router(Arc::clone(&service));
    (service, app)
}

/// Park `waiters` list requests, tick once and return the field.
async fn seed_field(service: &HuntService, waiters: usize) -> Vec<Diamond> {
    let mut pending = Vec::new();
    for _ in 0..waiters {
        pending.push(service.list_diamonds().await);
    }
    service.run_tick().await;
    for rx in pending {
        rx.await.unwrap();
    }
    service.snapshot().await.to_vec()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap()
}

fn admin(uri: &str, referer: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::REFERER, referer)
        .body(Body::empty())
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_empty_leaderboard_has_placeholder() {
    let (_, app) = setup(false);
    let response = app.oneshot(get("/api/scores/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "none": { "score": 0, "name": "nobody is playing" } })
    );
}

#[tokio::test]
async fn test_list_waits_for_tick() {
    let (service, app) = setup(false);

    let request = tokio::spawn(app.oneshot(get("/api/diamonds/")));
    while service.waiting_count().await < 1 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(!request.is_finished());

    service.run_tick().await;
    let response = request.await.unwrap().unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    // One waiter spawns nothing
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn test_list_returns_diamond_objects() {
    let (service, app) = setup(false);
    seed_field(&service, 4).await;

    let request = tokio::spawn(app.oneshot(get("/api/diamonds/")));
    while service.waiting_count().await < 1 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    service.run_tick().await;

    let json = body_json(request.await.unwrap().unwrap()).await;
    let list = json.as_array().unwrap();
    assert_eq!(list.len(), 2);
    for entry in list {
        assert_eq!(entry["isDiamond"], true);
        assert!(entry["x"].as_i64().unwrap() >= 20);
        assert!(entry["y"].as_i64().unwrap() >= 150);
        assert!(entry["color"].is_string());
    }
}

#[tokio::test]
async fn test_claim_then_gone() {
    let (service, app) = setup(false);
    let field = seed_field(&service, 2).await;
    let id = field[0].id;

    let response = app
        .clone()
        .oneshot(delete(&format!("/api/diamonds/{}?user=alice&pwd=secret&name=Alice", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "msg": format!("diamond {} is yours!", id), "score": 1 })
    );

    let response = app
        .clone()
        .oneshot(delete(&format!("/api/diamonds/{}?user=bob&pwd=pw", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::GONE);
    assert_eq!(body_text(response).await, format!("diamond gone: {}", id));

    let response = app.oneshot(get("/api/scores/")).await.unwrap();
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "alice": { "score": 1, "name": "Alice" } })
    );
}

#[tokio::test]
async fn test_claim_unknown_ids() {
    let (service, app) = setup(false);
    seed_field(&service, 2).await;

    let response = app
        .clone()
        .oneshot(delete("/api/diamonds/999?user=alice&pwd=pw"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "diamond not found: 999");

    let response = app
        .clone()
        .oneshot(delete("/api/diamonds/ruby?user=alice&pwd=pw"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "diamond not found: ruby");

    let response = app.oneshot(delete("/api/diamonds/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let (service, app) = setup(false);
    let field = seed_field(&service, 4).await;

    let response = app
        .clone()
        .oneshot(delete(&format!("/api/diamonds/{}?user=alice&pwd=right", field[0].id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(delete(&format!("/api/diamonds/{}?user=alice&pwd=wrong", field[1].id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, serde_json::json!({ "msg": "wrong player password" }));

    // The diamond is still there
    assert_eq!(service.snapshot().await.len(), 1);
}

#[tokio::test]
async fn test_teleporting_player_is_banned() {
    let (service, app) = setup(true);
    let field = seed_field(&service, 4).await;
    assert!(field[0].position.distance(field[1].position) > 1.0);

    let response = app
        .clone()
        .oneshot(delete(&format!("/api/diamonds/{}?user=alice&pwd=pw", field[0].id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(delete(&format!("/api/diamonds/{}?user=alice&pwd=pw", field[1].id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await, serde_json::json!({ "msg": "don't cheat!", "score": 1 }));

    let response = app.oneshot(get("/api/scores/")).await.unwrap();
    let json = body_json(response).await;
    assert_eq!(json["alice"]["name"], "alice (cheated, banned)");
    assert_eq!(json["alice"]["score"], 1);
}

#[tokio::test]
async fn test_admin_routes_check_referer() {
    let (_, app) = setup(false);

    for path in ["/api/scores/reset", "/api/scores/stop", "/api/scores/start"] {
        let response = app.clone().oneshot(get(path)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{}", path);
        assert_eq!(body_text(response).await, "forbidden");

        let response = app.clone().oneshot(admin(path, "http://elsewhere/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{}", path);
    }
}

#[tokio::test]
async fn test_admin_stop_start_reset() {
    let (service, app) = setup(false);

    let response = app.clone().oneshot(admin("/api/scores/stop", ADMIN_PAGE)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "stopped creating diamonds");
    assert!(seed_field(&service, 6).await.is_empty());

    let response = app.clone().oneshot(admin("/api/scores/start", ADMIN_PAGE)).await.unwrap();
    assert_eq!(body_text(response).await, "restarted creating diamonds");
    let field = seed_field(&service, 6).await;
    assert_eq!(field.len(), 3);

    app.clone()
        .oneshot(delete(&format!("/api/diamonds/{}?user=alice&pwd=pw", field[0].id)))
        .await
        .unwrap();

    let response = app.clone().oneshot(admin("/api/scores/reset", ADMIN_PAGE)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "reset and creating diamonds");
    assert!(service.snapshot().await.is_empty());

    let response = app.oneshot(get("/api/scores/")).await.unwrap();
    assert!(body_json(response).await.get("none").is_some());
}

#[tokio::test]
async fn test_collection_paths_redirect() {
    let (_, app) = setup(false);

    for (from, to) in [
        ("/api/diamonds", "/api/diamonds/"),
        ("/api/scores", "/api/scores/"),
        ("/api/scores?user=alice", "/api/scores/?user=alice"),
    ] {
        let response = app.clone().oneshot(get(from)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FOUND, "{}", from);
        assert_eq!(response.headers()[header::LOCATION], to);
    }
}

#[tokio::test]
async fn test_healthz() {
    let (_, app) = setup(false);
    let response = app.oneshot(get("/healthz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}
