//! Sentence and phonetic drill API tests.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::Value;

use common::fixtures;
use common::{start_session, StubSpeech, TestContext};
use listening_core::Catalog;

fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_check_before_next_is_bad_request() {
    let server = TestContext::new().server();
    let id = start_session(&server, "easy").await;

    let response = server
        .post(&format!("/api/sessions/{}/sentence/check", id))
        .json(&fixtures::check_request("The cat sits on the mat."))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_next_sentence_comes_from_level() {
    let server = TestContext::new().server();
    let id = start_session(&server, "hard").await;
    let catalog: Value = server.get("/api/catalog/hard").await.json();
    let sentences = strings(&catalog["sentences"]);

    let response = server
        .post(&format!("/api/sessions/{}/sentence/next", id))
        .await;
    response.assert_status_ok();
    let first: Value = response.json();
    assert_eq!(first["changed"], true);
    assert!(sentences.contains(&first["item"].as_str().unwrap().to_string()));

    let second: Value = server
        .post(&format!("/api/sessions/{}/sentence/next", id))
        .await
        .json();
    assert_ne!(second["item"], first["item"]);
}

#[tokio::test]
async fn test_correct_sentence_is_checked_once() {
    let server = TestContext::new().server();
    let id = start_session(&server, "easy").await;

    let next: Value = server
        .post(&format!("/api/sessions/{}/sentence/next", id))
        .await
        .json();
    let sentence = next["item"].as_str().unwrap().to_lowercase();

    let response = server
        .post(&format!("/api/sessions/{}/sentence/check", id))
        .json(&fixtures::check_request(&sentence))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["correct"], true);
    assert_eq!(body["accuracy"], 100.0);
    assert_eq!(body["points"], 2);
    assert_eq!(body["session_score"], 2);
    assert_eq!(body["streak"], 1);
    assert_eq!(body["success_rate"], 1.0);
    assert!(body.get("diff").is_none());

    let again = server
        .post(&format!("/api/sessions/{}/sentence/check", id))
        .json(&fixtures::check_request(&sentence))
        .await;
    again.assert_status(StatusCode::CONFLICT);
    let body: Value = again.json();
    assert_eq!(body["error"], "conflict");

    let session: Value = server.get(&format!("/api/sessions/{}", id)).await.json();
    assert_eq!(session["stats"]["attempts"], 1);
    assert_eq!(session["sentence"]["checked"], true);
    assert_eq!(session["sentence"]["correct_count"], 1);
}

#[tokio::test]
async fn test_wrong_sentence_returns_diff() {
    let server = TestContext::new().server();
    let id = start_session(&server, "easy").await;

    server
        .post(&format!("/api/sessions/{}/sentence/next", id))
        .await
        .assert_status_ok();

    let response = server
        .post(&format!("/api/sessions/{}/sentence/check", id))
        .json(&fixtures::check_request(""))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["correct"], false);
    assert_eq!(body["accuracy"], 0.0);
    assert_eq!(body["points"], 0);
    assert_eq!(body["streak"], 0);
    assert_eq!(body["success_rate"], 0.0);

    let diff = fixtures::segments(&body["diff"]);
    assert!(!diff.is_empty());
    assert!(diff.iter().all(|(_, tag)| tag == "added"));
    let rebuilt: String = diff.into_iter().map(|(text, _)| text).collect();
    assert_eq!(rebuilt, body["reference"].as_str().unwrap().to_lowercase());
}

#[tokio::test]
async fn test_empty_sentence_pool_is_not_found() {
    let catalog = Catalog::from_json(r#"{"sentences": {}, "phonemes": {}}"#).unwrap();
    let server = TestContext::with_catalog(catalog, Arc::new(StubSpeech)).server();
    let id = start_session(&server, "easy").await;

    let response = server
        .post(&format!("/api/sessions/{}/sentence/next", id))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "content_error");
}

#[tokio::test]
async fn test_phonetic_defaults_to_first_phoneme() {
    let server = TestContext::new().server();
    let id = start_session(&server, "easy").await;

    let response = server
        .post(&format!("/api/sessions/{}/phonetic/next", id))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["phoneme"], "th");
    let words = strings(&body["words"]);
    assert_eq!(words.len(), 7);
    assert!(words.contains(&body["item"].as_str().unwrap().to_string()));
}

#[tokio::test]
async fn test_spelling_allows_retries() {
    let server = TestContext::new().server();
    let id = start_session(&server, "easy").await;

    let response = server
        .post(&format!("/api/sessions/{}/phonetic/next", id))
        .json(&fixtures::phonetic_request(Some("sh"), Some("shell")))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["phoneme"], "sh");
    assert_eq!(body["item"], "shell");

    let wrong: Value = server
        .post(&format!("/api/sessions/{}/phonetic/check", id))
        .json(&fixtures::check_request("shel"))
        .await
        .json();
    assert_eq!(wrong["correct"], false);
    assert_eq!(wrong["reference"], "shell");
    assert_eq!(wrong["points"], 0);

    let right: Value = server
        .post(&format!("/api/sessions/{}/phonetic/check", id))
        .json(&fixtures::check_request("  SHELL "))
        .await
        .json();
    assert_eq!(right["correct"], true);
    assert_eq!(right["points"], 1);
    assert_eq!(right["session_score"], 1);
    assert_eq!(right["success_rate"], 0.5);
}

#[tokio::test]
async fn test_phoneme_stays_selected() {
    let server = TestContext::new().server();
    let id = start_session(&server, "medium").await;

    server
        .post(&format!("/api/sessions/{}/phonetic/next", id))
        .json(&fixtures::phonetic_request(Some("wh"), None))
        .await
        .assert_status_ok();

    let body: Value = server
        .post(&format!("/api/sessions/{}/phonetic/next", id))
        .await
        .json();
    assert_eq!(body["phoneme"], "wh");
    assert_eq!(body["changed"], true);

    let session: Value = server.get(&format!("/api/sessions/{}", id)).await.json();
    assert_eq!(session["phonetic"]["phoneme"], "wh");
    assert_eq!(session["phonetic"]["current"], body["item"]);
}

#[tokio::test]
async fn test_phoneme_from_other_level_is_rejected() {
    let server = TestContext::new().server();
    let id = start_session(&server, "easy").await;

    let response = server
        .post(&format!("/api/sessions/{}/phonetic/next", id))
        .json(&fixtures::phonetic_request(Some("ough"), None))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_word_outside_group_is_rejected() {
    let server = TestContext::new().server();
    let id = start_session(&server, "easy").await;

    let response = server
        .post(&format!("/api/sessions/{}/phonetic/next", id))
        .json(&fixtures::phonetic_request(Some("ch"), Some("ship")))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rejected_word_keeps_current_drill() {
    let server = TestContext::new().server();
    let id = start_session(&server, "easy").await;

    server
        .post(&format!("/api/sessions/{}/phonetic/next", id))
        .json(&fixtures::phonetic_request(Some("sh"), Some("shoe")))
        .await
        .assert_status_ok();

    server
        .post(&format!("/api/sessions/{}/phonetic/next", id))
        .json(&fixtures::phonetic_request(Some("ch"), Some("ship")))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let session: Value = server.get(&format!("/api/sessions/{}", id)).await.json();
    assert_eq!(session["phonetic"]["phoneme"], "sh");
    assert_eq!(session["phonetic"]["current"], "shoe");
}

#[tokio::test]
async fn test_phonetic_body_with_wrong_types_is_rejected() {
    let server = TestContext::new().server();
    let id = start_session(&server, "easy").await;

    let response = server
        .post(&format!("/api/sessions/{}/phonetic/next", id))
        .json(&serde_json::json!({ "word": 5 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let session: Value = server.get(&format!("/api/sessions/{}", id)).await.json();
    assert!(session["phonetic"]["current"].is_null());
}
