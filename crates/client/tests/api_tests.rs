//! HTTP client tests against a mock backend.

use std::sync::Arc;

use chrono::NaiveDate;
use rehabfit_client::{ApiClient, ApiError, ChatSession, ClientConfig, DashboardView};
use rehabfit_core::{
    ChatMessage, Credentials, ProfileUpdate, ProgressEntry, Registration, Sender, Video,
    CHAT_FALLBACK_REPLY,
};
use rehabfit_progress::TimeWindow;
use rehabfit_storage::{CacheScope, ChatHistoryStore, JsonFileCache, MemoryCache, VideoListStore};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    let config = ClientConfig::default().with_api_url(server.uri());
    ApiClient::new(&config).unwrap()
}

fn logged_in(server: &MockServer) -> ApiClient {
    client(server).with_token(Some("tok-123".to_string()))
}

#[tokio::test]
async fn test_login_returns_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "email": "sam@example.com", "password": "secret1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok-123" })))
        .expect(1)
        .mount(&server)
        .await;

    let token = client(&server)
        .login(&Credentials {
            email: "sam@example.com".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(token, "tok-123");
}

#[tokio::test]
async fn test_login_without_token_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/google"))
        .and(body_json(json!({ "token": "google-id-token" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = client(&server).login_with_google("google-id-token").await.unwrap_err();
    assert!(matches!(err, ApiError::MissingToken));
}

#[tokio::test]
async fn test_google_login_sends_token_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/google"))
        .and(body_json(json!({ "token": "ya29.google" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok-456" })))
        .expect(1)
        .mount(&server)
        .await;

    let token = client(&server).login_with_google("ya29.google").await.unwrap();
    assert_eq!(token, "tok-456");
}

#[tokio::test]
async fn test_wrong_password_keeps_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "message": "Login failed: Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let credentials = Credentials {
        email: "sam@example.com".to_string(),
        password: "wrong".to_string(),
    };

    // A stale stored token must not turn a login failure into an expired session.
    for api in [client(&server), logged_in(&server)] {
        let err = api.login(&credentials).await.unwrap_err();
        assert!(!err.is_auth());
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Login failed: Invalid credentials");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_duplicate_registration() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "message": "Duplicate entry 'sam@example.com'" })),
        )
        .mount(&server)
        .await;

    let request = Registration {
        name: "Sam".to_string(),
        email: "sam@example.com".to_string(),
        password: "secret1".to_string(),
        confirm_password: "secret1".to_string(),
        ..Default::default()
    }
    .validate()
    .unwrap();

    let err = client(&server).register(&request).await.unwrap_err();
    assert!(matches!(err, ApiError::DuplicateAccount));
}

#[tokio::test]
async fn test_server_error_carries_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/progress"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;

    let entry = ProgressEntry::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), 5, 4, 4);
    let err = logged_in(&server).log_progress(&entry).await.unwrap_err();
    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_maps_to_session_expired() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = logged_in(&server).me().await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
    assert!(err.is_auth());
}

#[tokio::test]
async fn test_protected_call_without_token() {
    let server = MockServer::start().await;
    let err = client(&server).dashboard().await.unwrap_err();
    assert!(matches!(err, ApiError::NotLoggedIn));
}

#[tokio::test]
async fn test_progress_is_posted_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/progress"))
        .and(header("authorization", "Bearer tok-123"))
        .and(body_json(json!({
            "date": "2024-06-01",
            "painLevel": 5,
            "mobility": 4,
            "strength": 4
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("Progress saved"))
        .expect(1)
        .mount(&server)
        .await;

    let entry = ProgressEntry::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), 5, 4, 4);
    logged_in(&server).log_progress(&entry).await.unwrap();
}

#[tokio::test]
async fn test_update_profile_unwraps_user() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/auth/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "id": 7, "name": "Sam", "email": "sam@example.com", "injuryType": "knee" }
        })))
        .mount(&server)
        .await;

    let update = ProfileUpdate {
        name: Some("Sam".to_string()),
        injury_type: Some("knee".to_string()),
        ..Default::default()
    };
    let user = logged_in(&server).update_profile(&update).await.unwrap();
    assert_eq!(user.id, Some(7));
    assert_eq!(user.injury_type.as_deref(), Some("knee"));
}

#[tokio::test]
async fn test_chat_reply_replaces_cached_videos() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/rag/upsert-chat"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/rag/chat"))
        .and(body_json(json!({ "question": "my knee hurts" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "Try gentle quad sets.",
            "videos": [ { "title": "Quad sets", "url": "https://youtu.be/abcdefghijk" } ]
        })))
        .mount(&server)
        .await;

    let cache = Arc::new(MemoryCache::new());
    let scope = CacheScope::for_user(Some("7"));
    let mut session = ChatSession::open(logged_in(&server), cache.clone(), &scope)
        .await
        .unwrap();

    let outcome = session.send("  my knee hurts ").await.unwrap().unwrap();
    assert!(outcome.answered);
    assert_eq!(outcome.reply, ChatMessage::bot("Try gentle quad sets."));

    let history = ChatHistoryStore::new(cache.clone(), &scope).load().await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0], ChatMessage::user("my knee hurts"));

    let videos = VideoListStore::new(cache, &scope).load().await.unwrap();
    assert_eq!(videos, vec![Video::new("Quad sets", "https://youtu.be/abcdefghijk")]);
}

#[tokio::test]
async fn test_empty_video_list_clears_cache() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/rag/upsert-chat"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/rag/chat"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "answer": "Rest today.", "videos": [] })),
        )
        .mount(&server)
        .await;

    let cache = Arc::new(MemoryCache::new());
    let scope = CacheScope::Guest;
    let videos = VideoListStore::new(cache.clone(), &scope);
    videos
        .save(&[Video::new("Old", "https://youtu.be/abcdefghijk")])
        .await
        .unwrap();

    let mut session = ChatSession::open(client(&server), cache.clone(), &scope)
        .await
        .unwrap();
    let outcome = session.send("should I train?").await.unwrap().unwrap();
    assert_eq!(outcome.videos, Some(Vec::new()));
    assert!(videos.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_reply_without_videos_keeps_cache() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/rag/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "Ice it." })))
        .mount(&server)
        .await;

    let cache = Arc::new(MemoryCache::new());
    let scope = CacheScope::Guest;
    let videos = VideoListStore::new(cache.clone(), &scope);
    videos
        .save(&[Video::new("Old", "https://youtu.be/abcdefghijk")])
        .await
        .unwrap();

    let mut session = ChatSession::open(client(&server), cache, &scope).await.unwrap();
    let outcome = session.send("knee is swollen").await.unwrap().unwrap();
    assert!(outcome.answered);
    assert_eq!(videos.load().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_chat_failure_appends_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/rag/upsert-chat"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/rag/chat"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cache = Arc::new(JsonFileCache::new(dir.path()).await.unwrap());
    let mut session = ChatSession::open(client(&server), cache.clone(), &CacheScope::Guest)
        .await
        .unwrap();

    assert!(session.send("   ").await.unwrap().is_none());
    assert!(session.messages().is_empty());

    let outcome = session.send("hello").await.unwrap().unwrap();
    assert!(!outcome.answered);
    assert_eq!(outcome.reply.text, CHAT_FALLBACK_REPLY);

    // Reopening restores both messages from disk.
    let reopened = ChatSession::open(client(&server), cache, &CacheScope::Guest)
        .await
        .unwrap();
    let senders: Vec<_> = reopened.messages().iter().map(|m| m.sender).collect();
    assert_eq!(senders, vec![Sender::User, Sender::Bot]);
}

#[tokio::test]
async fn test_dashboard_view() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "name": "Sam",
            "email": "sam@example.com",
            "injuryDate": "2024-05-25"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/rag/dashboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "estimatedRecovery": "4 weeks",
            "recoveryPercentage": 65,
            "progressData": [
                { "date": "2024-06-01", "painLevel": 8, "mobility": 2, "strength": 2 },
                { "date": "2024-06-02", "painLevel": 6, "mobility": 4, "strength": 4 },
                { "date": "2024-06-03", "painLevel": 2, "mobility": 6, "strength": 6 }
            ],
            "videos": [ { "title": "Knee rehab", "url": "https://www.youtube.com/watch?v=abcdefghijk" } ]
        })))
        .mount(&server)
        .await;

    let cache = Arc::new(MemoryCache::new());
    let now = NaiveDate::from_ymd_opt(2024, 6, 4)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    let view = DashboardView::load(&logged_in(&server), cache.clone(), TimeWindow::All, now)
        .await
        .unwrap();

    assert_eq!(view.greeting, "Good morning");
    assert_eq!(view.overview.total_entries, 3);
    assert_eq!(view.overview.pain_reduction_percent, 75);
    assert_eq!(view.overview.days_in_recovery, 10);
    assert_eq!(view.overview.recovery_status.label(), "Good");
    assert_eq!(view.report.chart.len(), 3);
    assert_eq!(view.gallery.len(), 1);
    assert_eq!(
        view.gallery[0].thumbnail,
        "https://img.youtube.com/vi/abcdefghijk/hqdefault.jpg"
    );

    let cached = VideoListStore::new(cache, &CacheScope::for_user(Some("7")))
        .load()
        .await
        .unwrap();
    assert_eq!(cached.len(), 1);
}
