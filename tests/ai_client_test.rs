use httpmock::prelude::*;
use portfolio_builder::refine::Approval;
use portfolio_builder::types::{Project, UserData};
use portfolio_builder::{AiConfig, AiError, ContentClient};
use serde_json::json;

const ENDPOINT: &str = "/v1beta/models/gemini-pro:generateContent";

fn client_for(server: &MockServer) -> ContentClient {
    let config = AiConfig {
        base_url: server.base_url(),
        api_key: Some("test-key".to_string()),
        timeout_seconds: 5,
        ..Default::default()
    };
    ContentClient::new(&config).unwrap()
}

fn text_reply(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP"
        }]
    })
}

fn profile() -> UserData {
    let mut data = UserData {
        name: "Ada Lovelace".to_string(),
        profession: "Analyst".to_string(),
        bio: "I like engines.".to_string(),
        ..Default::default()
    };
    data.add_project(Project {
        title: "Notes".to_string(),
        description: "Wrote notes on the engine.".to_string(),
        ..Default::default()
    });
    data.add_project(Project {
        title: "Empty".to_string(),
        ..Default::default()
    });
    data
}

#[tokio::test]
async fn test_generate_text_success() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(ENDPOINT)
                .query_param("key", "test-key")
                .body_contains("Hello");
            then.status(200).json_body(text_reply("Hi there"));
        })
        .await;

    let text = client_for(&server).generate_text("Hello").await.unwrap();
    assert_eq!(text, "Hi there");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rate_limit_is_reported() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(ENDPOINT);
            then.status(429).json_body(json!({
                "error": {
                    "code": 429,
                    "message": "Quota exceeded",
                    "status": "RESOURCE_EXHAUSTED"
                }
            }));
        })
        .await;

    let err = client_for(&server).generate_text("Hello").await.unwrap_err();
    assert!(matches!(err, AiError::RateLimited { ref message } if message == "Quota exceeded"));
    assert_eq!(err.category(), "rate_limit");
}

#[tokio::test]
async fn test_quota_status_without_429_is_rate_limit() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(ENDPOINT);
            then.status(403).json_body(json!({
                "error": { "message": "Out of quota", "status": "RESOURCE_EXHAUSTED" }
            }));
        })
        .await;

    let err = client_for(&server).generate_text("Hello").await.unwrap_err();
    assert_eq!(err.category(), "rate_limit");
}

#[tokio::test]
async fn test_server_error_is_api_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(ENDPOINT);
            then.status(500).body("upstream exploded");
        })
        .await;

    let err = client_for(&server).generate_text("Hello").await.unwrap_err();
    match err {
        AiError::Api { status, ref message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "upstream exploded");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.category(), "api");
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    // Bind then drop so nothing listens on the port
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let config = AiConfig {
        base_url: format!("http://127.0.0.1:{}", port),
        api_key: Some("test-key".to_string()),
        timeout_seconds: 5,
        ..Default::default()
    };

    let err = ContentClient::new(&config)
        .unwrap()
        .generate_text("Hello")
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::Transport(_)));
    assert_eq!(err.category(), "api");
    assert_eq!(err.code(), "AI_REQUEST_FAILED");
    assert_eq!(
        err.user_message(),
        "Failed to reach the AI service. Please try again."
    );
}

#[tokio::test]
async fn test_unexpected_shape_is_parse_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(ENDPOINT);
            then.status(200).json_body(json!({ "candidates": [] }));
        })
        .await;

    let err = client_for(&server).generate_text("Hello").await.unwrap_err();
    assert_eq!(err.category(), "parse");

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(ENDPOINT);
            then.status(200).body("not json at all");
        })
        .await;

    let err = client_for(&server).generate_text("Hello").await.unwrap_err();
    assert!(matches!(err, AiError::Parse(_)));
}

#[tokio::test]
async fn test_generate_portfolio_parses_fenced_json() {
    let server = MockServer::start_async().await;
    let reply = "```json\n{\"profession\":\"Analyst\",\"bio\":\"New bio\",\
                 \"skillCategories\":{\"technical\":[\"Math\"],\"soft\":[],\"tools\":[]},\
                 \"projects\":[],\"achievements\":[\"First program\"],\"socialLinks\":{}}\n```";
    server
        .mock_async(|when, then| {
            when.method(POST).path(ENDPOINT).body_contains("skillCategories");
            then.status(200).json_body(text_reply(reply));
        })
        .await;

    let generated = client_for(&server)
        .generate_portfolio(&profile())
        .await
        .unwrap();
    assert_eq!(generated.bio, "New bio");
    assert_eq!(generated.skill_categories.technical, vec!["Math".to_string()]);
    assert_eq!(generated.achievements.len(), 1);
}

#[tokio::test]
async fn test_generate_portfolio_rejects_prose() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(ENDPOINT);
            then.status(200)
                .json_body(text_reply("Sure! Here is a great portfolio for you."));
        })
        .await;

    let err = client_for(&server)
        .generate_portfolio(&profile())
        .await
        .unwrap_err();
    assert_eq!(err.category(), "parse");
}

#[tokio::test]
async fn test_refinement_is_proposed_then_applied_on_approval() {
    let server = MockServer::start_async().await;
    let bio_mock = server
        .mock_async(|when, then| {
            when.method(POST).path(ENDPOINT).body_contains("professional bio");
            then.status(200)
                .json_body(text_reply("Bio: \"Curious analyst of engines.\""));
        })
        .await;
    let project_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(ENDPOINT)
                .body_contains("project description");
            then.status(200)
                .json_body(text_reply("Authored the first published algorithm."));
        })
        .await;

    let mut data = profile();
    let proposal = client_for(&server)
        .propose_refinement(&data)
        .await
        .unwrap();

    // Blank descriptions are never sent
    bio_mock.assert_hits_async(1).await;
    project_mock.assert_hits_async(1).await;

    assert_eq!(proposal.len(), 2);
    let bio = proposal.bio.as_ref().unwrap();
    assert_eq!(bio.original, "I like engines.");
    assert_eq!(bio.proposed, "Curious analyst of engines.");
    assert_eq!(proposal.projects[0].index, 0);

    // Nothing changes until approval
    assert_eq!(data.bio, "I like engines.");

    let approval = Approval {
        bio: false,
        projects: vec![0],
    };
    assert_eq!(proposal.apply(&mut data, &approval), 1);
    assert_eq!(data.bio, "I like engines.");
    assert_eq!(
        data.projects[0].description,
        "Authored the first published algorithm."
    );
}

#[tokio::test]
async fn test_refinement_failure_leaves_no_partial_proposal() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(ENDPOINT).body_contains("professional bio");
            then.status(200).json_body(text_reply("Better bio"));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(ENDPOINT)
                .body_contains("project description");
            then.status(429).json_body(json!({
                "error": { "message": "slow down", "status": "RESOURCE_EXHAUSTED" }
            }));
        })
        .await;

    let result = client_for(&server).propose_refinement(&profile()).await;
    assert!(matches!(result, Err(AiError::RateLimited { .. })));
}
