//! Load/save round trip tests against a mock document server
//!
//! These tests run complete editing sessions: fetch a document, edit its
//! variables, and check the exact document the editor writes back.

use super::{init_test_env, RecordingNotifier};
use serde_json::{json, Value};
use std::sync::Arc;
use vars_editor::auth::Credentials;
use vars_editor::executor::{ExecutionConfig, LoadError, SaveError};
use vars_editor::models::{EntryKind, Vars};
use vars_editor::session::{load_editor, open_editor, EditorError};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ITEM_PATH: &str = "/api/item/fireflash/";

fn config() -> ExecutionConfig {
    ExecutionConfig::new(5)
}

async fn serve_document(server: &MockServer, document: Value) {
    Mock::given(method("GET"))
        .and(path(ITEM_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(document))
        .expect(1)
        .mount(server)
        .await;
}

fn item_uri(server: &MockServer) -> String {
    format!("{}{}", server.uri(), ITEM_PATH)
}

#[tokio::test]
async fn test_unmodified_map_document_round_trips() {
    init_test_env();
    let server = MockServer::start().await;
    serve_document(
        &server,
        json!({"name": "fireflash", "vars": {"b": "y", "a": "x"}, "tags": ["laptop"]}),
    )
    .await;

    Mock::given(method("PUT"))
        .and(path(ITEM_PATH))
        .and(header("content-type", "application/json"))
        .and(body_json(
            json!({"name": "fireflash", "vars": {"a": "x", "b": "y"}, "tags": ["laptop"]}),
        ))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = open_editor(&item_uri(&server), &config(), notifier.clone())
        .await
        .unwrap();

    let keys: Vec<&str> = session.variables().iter().map(|e| e.key()).collect();
    assert_eq!(keys, vec!["a", "b"]);

    let receipt = session.save().await.unwrap();
    assert_eq!(receipt.status, 200);
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_set_keeps_other_values_typed() {
    init_test_env();
    let server = MockServer::start().await;
    serve_document(
        &server,
        json!({"vars": {"port": 8080, "ids": [1, 2], "zero": 0, "debug": false, "host": "a"}}),
    )
    .await;

    Mock::given(method("PUT"))
        .and(path(ITEM_PATH))
        .and(body_json(json!({
            "vars": {"debug": false, "host": "b", "ids": [1, 2], "port": 8080, "zero": 0}
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = open_editor(
        &item_uri(&server),
        &config(),
        Arc::new(RecordingNotifier::default()),
    )
    .await
    .unwrap();
    session.variables_mut().set_variable("host", &json!("b"));
    session.save().await.unwrap();
}

#[tokio::test]
async fn test_list_document_saves_object_without_inherited() {
    init_test_env();
    let server = MockServer::start().await;
    serve_document(
        &server,
        json!({
            "name": "fireflash",
            "vars": [
                {"key": "hello", "value": "world"},
                {"key": "test", "value": "one", "tag": "laptop", "href": "/api/tag/laptop/"}
            ]
        }),
    )
    .await;

    Mock::given(method("PUT"))
        .and(path(ITEM_PATH))
        .and(body_json(
            json!({"name": "fireflash", "vars": {"hello": "world", "ports": ["80"]}}),
        ))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = open_editor(
        &item_uri(&server),
        &config(),
        Arc::new(RecordingNotifier::default()),
    )
    .await
    .unwrap();

    let entries = session.variables().entries();
    assert_eq!(entries.len(), 2);
    assert!(entries[1].is_inherited());

    let set = session.variables_mut();
    let id = set.add_entry(EntryKind::List);
    set.edit(id, |entry| {
        entry.set_key("ports");
        let slot = entry.list_values().unwrap()[0].id;
        entry.set_list_value(slot, "80")
    })
    .unwrap()
    .unwrap();

    session.save().await.unwrap();
    match &session.document().vars {
        Vars::Map(vars) => assert_eq!(vars.len(), 2),
        Vars::List(_) => panic!("saved document should hold object-shaped vars"),
    }
}

#[tokio::test]
async fn test_list_append_is_saved() {
    init_test_env();
    let server = MockServer::start().await;
    serve_document(&server, json!({"name": "fireflash", "vars": {"a": ["x", "y"]}})).await;

    Mock::given(method("PUT"))
        .and(path(ITEM_PATH))
        .and(body_json(json!({"name": "fireflash", "vars": {"a": ["x", "y", "z"]}})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = open_editor(
        &item_uri(&server),
        &config(),
        Arc::new(RecordingNotifier::default()),
    )
    .await
    .unwrap();

    let id = session.variables().entries()[0].id();
    let set = session.variables_mut();
    let slot = set.edit(id, |e| e.add_list_value()).unwrap().unwrap();
    set.edit(id, |e| e.set_list_value(slot, "z")).unwrap().unwrap();

    session.save().await.unwrap();
}

#[tokio::test]
async fn test_rejected_save_notifies_and_can_be_retried() {
    init_test_env();
    let server = MockServer::start().await;
    serve_document(&server, json!({"name": "fireflash", "vars": {"a": "x"}})).await;

    Mock::given(method("PUT"))
        .and(path(ITEM_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string("Bad Request"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    let notifier = Arc::new(RecordingNotifier::default());
    let mut session = open_editor(&item_uri(&server), &config(), notifier.clone())
        .await
        .unwrap();
    session.variables_mut().set_variable("b", &json!("y"));

    let err = session.save().await.unwrap_err();
    match err {
        EditorError::Save(SaveError::Rejected { status, body }) => {
            assert_eq!(status, 400);
            assert_eq!(body, "Bad Request");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(notifier.messages(), vec!["Failed to save: 400\r\nBad Request"]);

    // The edit survives the failed save and the document is untouched.
    assert_eq!(session.variables().len(), 2);
    assert_eq!(session.document().vars.len(), 1);

    Mock::given(method("PUT"))
        .and(path(ITEM_PATH))
        .and(body_json(json!({"name": "fireflash", "vars": {"a": "x", "b": "y"}})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    session.save().await.unwrap();
    assert_eq!(session.document().vars.len(), 2);
    assert_eq!(notifier.messages().len(), 1);
}

#[tokio::test]
async fn test_non_200_success_status_is_rejected() {
    init_test_env();
    let server = MockServer::start().await;
    serve_document(&server, json!({"vars": {}})).await;

    Mock::given(method("PUT"))
        .and(path(ITEM_PATH))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let mut session = open_editor(
        &item_uri(&server),
        &config(),
        Arc::new(RecordingNotifier::default()),
    )
    .await
    .unwrap();

    let err = session.save().await.unwrap_err();
    assert!(matches!(
        err,
        EditorError::Save(SaveError::Rejected { status: 204, .. })
    ));
}

#[tokio::test]
async fn test_load_failure_status_is_reported() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ITEM_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let notifier = Arc::new(RecordingNotifier::default());
    let err = open_editor(&item_uri(&server), &config(), notifier.clone())
        .await
        .unwrap_err();

    match err {
        EditorError::Load(LoadError::UnexpectedStatus { status, body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, "Not Found");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    let messages = notifier.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("Failed to load: Unexpected status 404"));
}

#[tokio::test]
async fn test_not_modified_without_document_is_reported() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ITEM_PATH))
        .respond_with(ResponseTemplate::new(304))
        .mount(&server)
        .await;

    let notifier = Arc::new(RecordingNotifier::default());
    let err = open_editor(&item_uri(&server), &config(), notifier.clone())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        EditorError::Load(LoadError::EmptyBody { status: 304 })
    ));
    assert_eq!(
        notifier.messages(),
        vec!["Failed to load: Status 304 carried no document to edit".to_string()]
    );
}

#[tokio::test]
async fn test_malformed_document_is_reported() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ITEM_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = open_editor(
        &item_uri(&server),
        &config(),
        Arc::new(RecordingNotifier::default()),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, EditorError::Load(LoadError::Parse(_))));
}

#[tokio::test]
async fn test_credentials_and_headers_are_sent() {
    init_test_env();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ITEM_PATH))
        .and(header("authorization", "Basic YWRtaW46c2VjcmV0"))
        .and(header("x-api-key", "k"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"vars": {"a": "x"}})))
        .expect(1)
        .mount(&server)
        .await;

    let config = config()
        .with_header("X-Api-Key", "k")
        .with_credentials(Credentials::new("admin", "secret"));
    let session = open_editor(
        &item_uri(&server),
        &config,
        Arc::new(RecordingNotifier::default()),
    )
    .await
    .unwrap();
    assert_eq!(session.variables().len(), 1);
}

#[tokio::test]
async fn test_load_editor_callback_receives_session() {
    init_test_env();
    let server = MockServer::start().await;
    serve_document(&server, json!({"vars": {"a": "x"}})).await;

    let mut loaded = None;
    load_editor(
        &item_uri(&server),
        &config(),
        Arc::new(RecordingNotifier::default()),
        |result| loaded = Some(result),
    )
    .await;

    let session = loaded.unwrap().unwrap();
    assert_eq!(session.variables().entries()[0].key(), "a");
}
