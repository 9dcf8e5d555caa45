//! End-to-end tests of the generation store against an HTTP double

#![allow(clippy::unwrap_used)] // Test code

mod common;

use branding::persistence::{STATE_KEY, TOKEN_KEY};
use branding::{
    BrandingAction, BrandingStore, TrackingPolicy, open_store, open_store_with_poll_interval,
};
use brandkit_api::{
    ApiClient, ApiConfig, AuthToken, Generation, GenerationId, GenerationKind, GenerationResult,
    GenerationStatus, LogoResult,
};
use brandkit_testing::InMemoryStorage;
use common::{StubApi, sample_brand};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http_store(server: &MockServer, storage: Arc<InMemoryStorage>) -> BrandingStore {
    let api = ApiClient::new(ApiConfig::new(server.uri()));
    open_store(Arc::new(api), storage, TrackingPolicy::PerRequest)
}

async fn dispatch(store: &BrandingStore, action: BrandingAction) {
    store
        .send_cascading(action)
        .await
        .unwrap()
        .wait_with_timeout(Duration::from_secs(5))
        .await
        .unwrap();
}

fn logo_generation(id: &str) -> Generation {
    Generation::completed(
        id,
        GenerationResult::Logo(LogoResult {
            url: format!("https://cdn.test/{id}.svg"),
            format: None,
            variations: Vec::new(),
        }),
    )
}

#[tokio::test]
async fn test_logo_generation_lands_in_history() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate/"))
        .and(body_json(json!({
            "type": "logo",
            "prompt": "blue tech logo",
            "style": "modern"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"id": "g1", "result": {"url": "https://cdn.test/g1.svg"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = http_store(&server, Arc::new(InMemoryStorage::new()));
    dispatch(
        &store,
        BrandingAction::GenerateLogo {
            prompt: "blue tech logo".to_string(),
            style: Some("modern".to_string()),
        },
    )
    .await;

    let state = store.state(Clone::clone).await;
    assert!(!state.is_generating());
    assert!(state.error.is_none());
    assert_eq!(state.generations.len(), 1);

    let generation = &state.generations[0];
    assert_eq!(generation.id.as_str(), "g1");
    assert_eq!(generation.kind, GenerationKind::Logo);
    assert!(generation.created_at.is_some());
    assert_eq!(state.logos().next().unwrap().url, "https://cdn.test/g1.svg");
}

#[tokio::test]
async fn test_pending_generation_is_polled_until_settled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/generate/g5/status/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"id": "g5", "type": "logo", "status": "pending"}
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/generate/g5/status/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "id": "g5",
                "type": "logo",
                "status": "completed",
                "result": {"url": "https://cdn.test/g5.svg"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = open_store_with_poll_interval(
        Arc::new(ApiClient::new(ApiConfig::new(server.uri()))),
        Arc::new(InMemoryStorage::new()),
        TrackingPolicy::PerRequest,
        Duration::from_millis(10),
    );
    dispatch(
        &store,
        BrandingAction::AddGeneration(Generation::pending("g5", GenerationKind::Logo)),
    )
    .await;
    dispatch(
        &store,
        BrandingAction::PollGeneration {
            id: GenerationId::new("g5"),
        },
    )
    .await;

    let state = store.state(Clone::clone).await;
    let generation = state.generation(&GenerationId::new("g5")).unwrap();
    assert_eq!(generation.status, GenerationStatus::Completed);
    assert_eq!(state.logos().next().unwrap().url, "https://cdn.test/g5.svg");
    assert_eq!(store.pending_effects(), 0);
}

#[tokio::test]
async fn test_unsuccessful_palette_generation_sets_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate/"))
        .and(body_json(json!({
            "type": "colors",
            "prompt": "Generate color palette for Finance industry",
            "industry": "Finance",
            "preferences": {"preference": "cool"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .expect(1)
        .mount(&server)
        .await;

    let store = http_store(&server, Arc::new(InMemoryStorage::new()));
    let mut preferences = serde_json::Map::new();
    preferences.insert("preference".to_string(), Value::from("cool"));
    dispatch(
        &store,
        BrandingAction::GenerateColors {
            industry: "Finance".to_string(),
            preferences: Some(preferences),
        },
    )
    .await;

    let state = store.state(Clone::clone).await;
    assert!(!state.is_generating());
    assert!(state.generations.is_empty());
    assert_eq!(
        state.error.as_deref(),
        Some("Failed to generate color palette. Please try again.")
    );
}

#[tokio::test]
async fn test_login_persists_session_and_authorizes_later_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "user": {
                    "id": "u1",
                    "email": "ada@example.com",
                    "name": "Ada",
                    "createdAt": "2025-01-01T00:00:00Z",
                    "updatedAt": "2025-01-01T00:00:00Z"
                },
                "token": "tok-1"
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/generate/"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "id": "g2",
                "type": "slogan",
                "status": "completed",
                "result": {"slogans": [{"id": "s1", "text": "Build boldly"}]}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let storage = Arc::new(InMemoryStorage::new());
    let store = http_store(&server, Arc::clone(&storage));
    dispatch(
        &store,
        BrandingAction::Login {
            email: "ada@example.com".to_string(),
            password: "secret".to_string(),
        },
    )
    .await;
    dispatch(
        &store,
        BrandingAction::GenerateSlogan {
            prompt: "developer tools".to_string(),
            style: None,
        },
    )
    .await;

    let state = store.state(Clone::clone).await;
    assert!(state.is_authenticated);
    assert_eq!(state.user.as_ref().unwrap().name, "Ada");
    assert_eq!(state.slogan_items().next().unwrap().text, "Build boldly");

    let saved = storage.snapshot();
    assert_eq!(saved.get(TOKEN_KEY).map(String::as_str), Some("tok-1"));
    let persisted: Value = serde_json::from_str(&saved[STATE_KEY]).unwrap();
    assert_eq!(persisted["state"]["isAuthenticated"], true);
    assert_eq!(persisted["state"]["user"]["email"], "ada@example.com");

    // A new store over the same medium picks the session up
    let reopened = http_store(&server, storage);
    let hydrated = reopened.state(Clone::clone).await;
    assert!(hydrated.is_authenticated);
    assert_eq!(hydrated.auth_token, Some(AuthToken::new("tok-1")));
    assert!(hydrated.generations.is_empty());
}

#[tokio::test]
async fn test_logout_clears_session_when_server_fails() {
    let storage = Arc::new(InMemoryStorage::with_entries([(TOKEN_KEY, "tok-1")]));
    let api = StubApi {
        logout_fails: true,
        ..StubApi::default()
    };
    let api = Arc::new(api);
    let store = open_store(
        Arc::clone(&api) as Arc<dyn branding::BrandingApi>,
        Arc::clone(&storage) as Arc<dyn brandkit_core::storage::KeyValueStore>,
        TrackingPolicy::PerRequest,
    );

    dispatch(&store, BrandingAction::SetAuthenticated(true)).await;
    dispatch(&store, BrandingAction::AddBrand(sample_brand("b1", "Acme"))).await;
    dispatch(&store, BrandingAction::Logout).await;

    let state = store.state(Clone::clone).await;
    assert!(!state.is_authenticated);
    assert!(state.auth_token.is_none());
    assert!(state.brands.is_empty());
    assert!(!state.is_loading);

    let seen = api.seen_tokens.lock().unwrap().clone();
    assert_eq!(seen, vec![("logout", Some("tok-1".to_string()))]);
    assert!(!storage.snapshot().contains_key(TOKEN_KEY));
}

#[tokio::test]
async fn test_corrupt_persisted_state_starts_fresh() {
    let storage = Arc::new(InMemoryStorage::with_entries([
        (STATE_KEY, "{not json"),
        (TOKEN_KEY, "tok-9"),
    ]));
    let store = open_store(
        Arc::new(StubApi::default()),
        storage,
        TrackingPolicy::PerRequest,
    );

    let state = store.state(Clone::clone).await;
    assert!(!state.is_authenticated);
    assert!(state.brands.is_empty());
    assert_eq!(state.auth_token, Some(AuthToken::new("tok-9")));
}

#[tokio::test]
async fn test_failed_writes_do_not_block_actions() {
    let storage = Arc::new(InMemoryStorage::new());
    storage.fail_writes(true);
    let store = open_store(
        Arc::new(StubApi::default()),
        Arc::clone(&storage) as Arc<dyn brandkit_core::storage::KeyValueStore>,
        TrackingPolicy::PerRequest,
    );

    dispatch(&store, BrandingAction::AddBrand(sample_brand("b1", "Acme"))).await;

    assert_eq!(store.state(|s| s.brands.len()).await, 1);
    assert!(storage.snapshot().is_empty());
}

async fn race(policy: TrackingPolicy) -> (bool, bool) {
    let gate = Arc::new(Notify::new());
    let api = StubApi {
        logo_gate: Some(Arc::clone(&gate)),
        ..StubApi::generating(logo_generation("g1"))
    };
    let store = open_store(Arc::new(api), Arc::new(InMemoryStorage::new()), policy);

    let mut logo = store
        .send(BrandingAction::GenerateLogo {
            prompt: "blue tech logo".to_string(),
            style: None,
        })
        .await
        .unwrap();
    let mut slogan = store
        .send(BrandingAction::GenerateSlogan {
            prompt: "developer tools".to_string(),
            style: None,
        })
        .await
        .unwrap();

    slogan.wait_with_timeout(Duration::from_secs(5)).await.unwrap();
    let after_first = store.state(|s| s.is_generating()).await;

    gate.notify_one();
    logo.wait_with_timeout(Duration::from_secs(5)).await.unwrap();
    let after_both = store.state(|s| s.is_generating()).await;

    (after_first, after_both)
}

#[tokio::test]
async fn test_generation_from_previous_session_is_dropped() {
    let gate = Arc::new(Notify::new());
    let api = StubApi {
        logo_gate: Some(Arc::clone(&gate)),
        ..StubApi::generating(logo_generation("old-session"))
    };
    let store = open_store(
        Arc::new(api),
        Arc::new(InMemoryStorage::new()),
        TrackingPolicy::PerRequest,
    );

    let mut logo = store
        .send(BrandingAction::GenerateLogo {
            prompt: "blue tech logo".to_string(),
            style: None,
        })
        .await
        .unwrap();
    dispatch(&store, BrandingAction::Logout).await;
    assert!(!store.state(|s| s.is_generating()).await);

    gate.notify_one();
    logo.wait_with_timeout(Duration::from_secs(5)).await.unwrap();

    let state = store.state(Clone::clone).await;
    assert!(state.generations.is_empty());
    assert!(state.error.is_none());
    assert!(!state.is_generating());
}

#[tokio::test]
async fn test_per_request_tracking_waits_for_every_request() {
    assert_eq!(race(TrackingPolicy::PerRequest).await, (true, false));
}

#[tokio::test]
async fn test_shared_tracking_clears_on_first_settle() {
    assert_eq!(race(TrackingPolicy::Shared).await, (false, false));
}

#[tokio::test]
async fn test_change_notifications_follow_reducer_steps() {
    let store = open_store(
        Arc::new(StubApi::default()),
        Arc::new(InMemoryStorage::new()),
        TrackingPolicy::PerRequest,
    );
    let mut changes = store.subscribe_changes();
    let start = *changes.borrow_and_update();

    dispatch(&store, BrandingAction::SetLoading(true)).await;

    changes.changed().await.unwrap();
    assert_eq!(*changes.borrow_and_update(), start + 1);
    assert!(store.state(|s| s.is_loading).await);
}
