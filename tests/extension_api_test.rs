use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use extension_blocker::config::AppConfig;
use extension_blocker::infrastructure::database;
use extension_blocker::services::extension_service::ExtensionService;
use extension_blocker::{AppState, create_app};
use http_body_util::BodyExt;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

async fn setup_test_db() -> DatabaseConnection {
    // A single connection keeps every query on the same in-memory database
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).sqlx_logging(false);

    let db = Database::connect(opt).await.unwrap();
    database::run_migrations(&db).await.unwrap();
    db
}

async fn setup_app() -> Router {
    let db = setup_test_db().await;

    let extension_service = Arc::new(ExtensionService::new(db.clone()));
    extension_service.seed_fixed_extensions().await.unwrap();

    let state = AppState {
        db,
        extension_service,
        config: AppConfig::development(),
    };

    create_app(state)
}

async fn request(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

#[tokio::test]
async fn test_fixed_extension_flow() {
    let app = setup_app().await;

    // Seeding happened before the router was built
    let (status, json) = request(&app, "GET", "/api/extensions/fixed", None).await;
    assert_eq!(status, StatusCode::OK);
    let fixed = json.as_array().unwrap();
    assert_eq!(fixed.len(), 7);
    assert!(fixed.iter().all(|ext| ext["blocked"] == false));

    let names: Vec<&str> = fixed.iter().map(|ext| ext["name"].as_str().unwrap()).collect();
    assert!(names.contains(&"exe"));
    assert!(names.contains(&"js"));

    // Toggle by id
    let exe_id = fixed
        .iter()
        .find(|ext| ext["name"] == "exe")
        .unwrap()["id"]
        .as_i64()
        .unwrap();

    let (status, json) = request(
        &app,
        "PUT",
        &format!("/api/extensions/fixed/{}", exe_id),
        Some(r#"{"blocked": true}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "exe");
    assert_eq!(json["blocked"], true);

    // Same value again is a no-op, not an error
    let (status, json) = request(
        &app,
        "PUT",
        &format!("/api/extensions/fixed/{}", exe_id),
        Some(r#"{"blocked": true}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["blocked"], true);

    // Toggle by name, with normalization applied to the path input
    let (status, json) = request(
        &app,
        "PATCH",
        "/api/extensions/fixed/BAT",
        Some(r#"{"blocked": true}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "bat");
    assert_eq!(json["blocked"], true);

    // Unknown id and unknown name
    let (status, json) = request(
        &app,
        "PUT",
        "/api/extensions/fixed/99999",
        Some(r#"{"blocked": true}"#),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "EXTENSION_NOT_FOUND");

    let (status, json) = request(
        &app,
        "PATCH",
        "/api/extensions/fixed/unknown",
        Some(r#"{"blocked": true}"#),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "EXTENSION_NOT_FOUND");

    // Missing blocked field
    let (status, json) = request(
        &app,
        "PUT",
        &format!("/api/extensions/fixed/{}", exe_id),
        Some(r#"{}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_EXTENSION_FORMAT");
}

#[tokio::test]
async fn test_custom_extension_flow() {
    let app = setup_app().await;

    // Input is normalized before storage
    let (status, json) = request(
        &app,
        "POST",
        "/api/extensions/custom",
        Some(r#"{"extension": " .TaR "}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["extension"], "tar");
    assert!(json["id"].is_i64());
    assert!(json["createdAt"].is_string());

    // Case-insensitive duplicate
    let (status, json) = request(
        &app,
        "POST",
        "/api/extensions/custom",
        Some(r#"{"extension": "TAR"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "DUPLICATE_EXTENSION");

    // Dots are stripped anywhere in the input
    let (status, json) = request(
        &app,
        "POST",
        "/api/extensions/custom",
        Some(r#"{"extension": "a.b"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["extension"], "ab");

    // Rejected inputs
    for bad in [r#"{"extension": ""}"#, r#"{"extension": "..."}"#, r#"{"extension": "ex e!"}"#, r#"{}"#] {
        let (status, json) = request(&app, "POST", "/api/extensions/custom", Some(bad)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "input: {}", bad);
        assert_eq!(json["code"], "INVALID_EXTENSION_FORMAT");
    }

    let too_long = format!(r#"{{"extension": "{}"}}"#, "a".repeat(21));
    let (status, json) = request(&app, "POST", "/api/extensions/custom", Some(&too_long)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_EXTENSION_FORMAT");

    // List and count reflect both inserts
    let (status, json) = request(&app, "GET", "/api/extensions/custom", None).await;
    assert_eq!(status, StatusCode::OK);
    let custom = json.as_array().unwrap();
    assert_eq!(custom.len(), 2);

    let (status, json) = request(&app, "GET", "/api/extensions/custom/count", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, 2);

    // Delete by id
    let tar_id = custom
        .iter()
        .find(|ext| ext["extension"] == "tar")
        .unwrap()["id"]
        .as_i64()
        .unwrap();

    let (status, _) = request(
        &app,
        "DELETE",
        &format!("/api/extensions/custom/id/{}", tar_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, json) = request(
        &app,
        "DELETE",
        &format!("/api/extensions/custom/id/{}", tar_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "EXTENSION_NOT_FOUND");

    // Delete by name, normalized like the insert path
    let (status, _) = request(&app, "DELETE", "/api/extensions/custom/.AB", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, json) = request(&app, "DELETE", "/api/extensions/custom/ab", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "EXTENSION_NOT_FOUND");

    let (_, json) = request(&app, "GET", "/api/extensions/custom/count", None).await;
    assert_eq!(json, 0);
}

#[tokio::test]
async fn test_config_endpoint() {
    let app = setup_app().await;

    let (status, json) = request(&app, "GET", "/api/extensions/config", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["maxExtensionLength"], 20);
    assert_eq!(json["maxCustomExtensions"], 200);

    let names = json["fixedExtensionNames"].as_array().unwrap();
    assert_eq!(names.len(), 7);
    assert!(names.contains(&Value::String("exe".to_string())));
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app().await;

    let (status, json) = request(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], "connected");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/extensions/fixed")
                .header("x-request-id", "test-request-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "test-request-42"
    );

    // A generated id is attached when the client sends none
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/extensions/fixed")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}
