use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use wordcard_core::is_word_date;
use wordcard_server::{app, state::State};

struct TestApp {
    router: Router,
    dir: TempDir,
}

impl TestApp {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let router = app(State::new(dir.path().join("db.json")));
        Self { router, dir }
    }

    fn with_file(contents: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, contents).unwrap();
        let router = app(State::new(path));
        Self { router, dir }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn json(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = self.send(method, uri, body).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn create(&self, text: &str) -> Value {
        let (status, created) = self
            .json(
                Method::POST,
                "/api/words",
                Some(json!({
                    "text": text,
                    "definition": format!("definition of {text}"),
                    "example": format!("example of {text}"),
                    "type": "noun",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        created
    }
}

#[tokio::test]
async fn empty_store_lists_no_words_and_creates_file() {
    let app = TestApp::new();
    let (status, body) = app.json(Method::GET, "/api/words", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    assert!(app.dir.path().join("db.json").exists());
}

#[tokio::test]
async fn post_ephemeral_returns_201_with_id_and_date() {
    let app = TestApp::new();
    let (status, created) = app
        .json(
            Method::POST,
            "/api/words",
            Some(json!({
                "text": "Ephemeral",
                "definition": "Lasting for a very short time.",
                "example": "The beauty of the cherry blossoms is ephemeral.",
                "type": "adjective",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(created["id"].as_u64().is_some());
    assert!(is_word_date(created["date"].as_str().unwrap()));
    assert_eq!(created["text"], "Ephemeral");
    assert_eq!(created["definition"], "Lasting for a very short time.");
    assert_eq!(
        created["example"],
        "The beauty of the cherry blossoms is ephemeral."
    );
    assert_eq!(created["type"], "adjective");

    let (status, listed) = app.json(Method::GET, "/api/words", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([created]));
}

#[tokio::test]
async fn post_with_missing_field_is_bad_request() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Method::POST,
            "/api/words",
            Some(json!({ "text": "Laconic", "definition": "Using few words.", "type": "adjective" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(String::from_utf8(body).unwrap().contains("example"));

    let (_, listed) = app.json(Method::GET, "/api/words", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn get_unknown_or_malformed_id_is_not_found() {
    let app = TestApp::new();
    app.create("Laconic").await;

    let (status, body) = app.send(Method::GET, "/api/words/12345", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(String::from_utf8(body).unwrap(), "Word not found");

    let (status, _) = app.send(Method::GET, "/api/words/not-an-id", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_by_id_returns_the_record() {
    let app = TestApp::new();
    let created = app.create("Laconic").await;
    let uri = format!("/api/words/{}", created["id"]);

    let (status, fetched) = app.json(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn put_merges_fields_and_ignores_id_and_date() {
    let app = TestApp::new();
    let created = app.create("Laconic").await;
    let uri = format!("/api/words/{}", created["id"]);

    let (status, updated) = app
        .json(
            Method::PUT,
            &uri,
            Some(json!({
                "definition": "Brief and to the point.",
                "id": 1,
                "date": "01 Jan 1999",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["date"], created["date"]);
    assert_eq!(updated["definition"], "Brief and to the point.");
    assert_eq!(updated["text"], created["text"]);
    assert_eq!(updated["example"], created["example"]);
    assert_eq!(updated["type"], created["type"]);
}

#[tokio::test]
async fn put_unknown_id_is_not_found_and_blank_field_is_bad_request() {
    let app = TestApp::new();
    let created = app.create("Laconic").await;

    let (status, _) = app
        .send(Method::PUT, "/api/words/999", Some(json!({ "text": "x" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let uri = format!("/api/words/{}", created["id"]);
    let (status, _) = app
        .send(Method::PUT, &uri, Some(json!({ "text": "   " })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_returns_204_then_404() {
    let app = TestApp::new();
    let keep = app.create("Laconic").await;
    let doomed = app.create("Verbose").await;
    let uri = format!("/api/words/{}", doomed["id"]);

    let (status, body) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (_, listed) = app.json(Method::GET, "/api/words", None).await;
    assert_eq!(listed, json!([keep]));

    let (status, _) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn file_is_pretty_printed_after_mutation() {
    let app = TestApp::new();
    app.create("Laconic").await;

    let contents = std::fs::read_to_string(app.dir.path().join("db.json")).unwrap();
    assert!(contents.starts_with("[\n  {\n    \"id\": "));
}

#[tokio::test]
async fn records_with_foreign_types_stay_readable_and_writable() {
    let app = TestApp::with_file(
        r#"[
  {"id": 1, "text": "Ephemeral", "definition": "Short-lived.", "example": "Fame.", "type": "adjective", "date": "15 Jul 2023"},
  {"id": "2", "text": "Dog", "definition": "An animal.", "example": "A dog barks.", "type": "Noun", "date": "16 Jul 2023"},
  {"id": 3, "text": "Swimming", "definition": "Moving in water.", "example": "I like swimming.", "type": "gerund", "date": "17 Jul 2023"}
]"#,
    );

    let (status, listed) = app.json(Method::GET, "/api/words", None).await;
    assert_eq!(status, StatusCode::OK);
    let types: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|word| word["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, ["adjective", "noun", "other"]);

    let created = app.create("Laconic").await;
    assert!(created["id"].as_u64().unwrap() > 3);
    let (_, listed) = app.json(Method::GET, "/api/words", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 4);
}
