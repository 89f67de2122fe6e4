//! End-to-end chat session tests: user message, resolver, and error slot
//! working together over a mock completion endpoint.

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taxwise::chat::conversation::WELCOME_ID;
use taxwise::chat::fallback::CREDITS_REPLY;
use taxwise::chat::session::FALLBACK_NOTICE;
use taxwise::chat::{ChatSession, ReplySource, ResponseResolver, Role};
use taxwise::config::GroqConfig;
use taxwise::providers::{GroqProvider, OfflineProvider};

fn groq_session(server: &MockServer) -> ChatSession {
    let provider = GroqProvider::new(GroqConfig {
        api_base: server.uri(),
        api_key: Some("gsk_test".to_string()),
        ..Default::default()
    })
    .unwrap();
    ChatSession::new(ResponseResolver::new(Box::new(provider)))
}

#[tokio::test]
async fn test_second_turn_sends_prior_exchange() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Noted." } }]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let session = groq_session(&server);
    session.submit("I'm self-employed.").await.unwrap();
    session.submit("What forms do I file?").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let second: Value = serde_json::from_slice(&requests[1].body).unwrap();
    let contents: Vec<&str> = second["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents.len(), 5);
    assert_eq!(contents[2], "I'm self-employed.");
    assert_eq!(contents[3], "Noted.");
    assert_eq!(contents[4], "What forms do I file?");

    assert_eq!(session.len(), 5);
    assert!(session.error().is_none());
}

#[tokio::test]
async fn test_failed_remote_sets_notice_then_success_clears_it() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Back online." } }]
        })))
        .mount(&server)
        .await;

    let session = groq_session(&server);

    let first = session.submit("Any credit for solar panels?").await.unwrap().unwrap();
    assert_eq!(first.source, ReplySource::Fallback);
    assert_eq!(first.message.content, CREDITS_REPLY);
    assert_eq!(session.error().as_deref(), Some(FALLBACK_NOTICE));
    assert!(!session.is_typing());

    let second = session.submit("Thanks").await.unwrap().unwrap();
    assert_eq!(second.source, ReplySource::Remote);
    assert!(session.error().is_none());
}

#[test]
fn test_offline_session_clear_restores_welcome() {
    let session = ChatSession::new(ResponseResolver::new(Box::new(OfflineProvider::new())));

    tokio_test::block_on(async {
        for text in ["tax rate?", "deductions?", "credits?", "something else"] {
            session.submit(text).await.unwrap();
        }
    });
    assert_eq!(session.len(), 9);

    let roles: Vec<Role> = session.snapshot().iter().map(|m| m.role).collect();
    assert!(roles[1..]
        .chunks(2)
        .all(|pair| pair == [Role::User, Role::Assistant]));

    session.clear().unwrap();
    let messages = session.snapshot();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].id, WELCOME_ID);
}
