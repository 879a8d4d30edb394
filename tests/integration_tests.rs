use tutor_tui::{ChatSession, Role, TutorClient, TutorError};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn ask_returns_the_answer_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ask"))
        .and(body_json(serde_json::json!({"question": "What is 6*7?"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"answer": "42"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = TutorClient::with_base_url(server.uri());
    let answer = client.ask("What is 6*7?").await.unwrap();
    assert_eq!(answer, "42");
}

#[tokio::test]
async fn non_2xx_surfaces_the_structured_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ask"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({"error": "overloaded"})),
        )
        .mount(&server)
        .await;

    let client = TutorClient::with_base_url(server.uri());
    let err = client.ask("anything").await.unwrap_err();
    assert!(matches!(err, TutorError::Service(_)));
    assert_eq!(err.user_message(), "overloaded");
}

#[tokio::test]
async fn non_2xx_without_json_body_falls_back_to_a_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ask"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = TutorClient::with_base_url(server.uri());
    let err = client.ask("anything").await.unwrap_err();
    assert_eq!(err.user_message(), "The server returned an error.");
}

#[tokio::test]
async fn success_without_answer_field_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&server)
        .await;

    let client = TutorClient::with_base_url(server.uri());
    let err = client.ask("anything").await.unwrap_err();
    assert!(matches!(err, TutorError::MalformedResponse(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    // Port reserved but never served.
    let client = TutorClient::with_base_url("http://127.0.0.1:1");
    let err = client.ask("anything").await.unwrap_err();
    assert!(matches!(err, TutorError::Network(_)));
}

/// The full round trip the app performs for one turn: accept the draft,
/// dispatch the question, fold the outcome back into the session.
async fn run_one_turn(session: &mut ChatSession, client: &TutorClient) {
    let question = session.begin_submission().expect("submission accepted");
    match client.ask(&question).await {
        Ok(answer) => session.complete_submission(answer),
        Err(e) => session.fail_submission(e.user_message()),
    }
}

#[tokio::test]
async fn successful_turn_appends_user_then_model_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"answer": "42"})))
        .mount(&server)
        .await;

    let mut session = ChatSession::new();
    let client = TutorClient::with_base_url(server.uri());

    session.set_draft("What is 6*7?");
    run_one_turn(&mut session, &client).await;

    let transcript = session.transcript();
    let tail = &transcript[transcript.len() - 2..];
    assert_eq!(tail[0].role, Role::User);
    assert_eq!(tail[0].content, "What is 6*7?");
    assert_eq!(tail[1].role, Role::Model);
    assert_eq!(tail[1].content, "42");
    assert!(!session.is_awaiting());
    assert_eq!(session.draft(), "");
}

#[tokio::test]
async fn failed_turn_keeps_the_user_message_and_records_the_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ask"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({"error": "overloaded"})),
        )
        .mount(&server)
        .await;

    let mut session = ChatSession::new();
    let client = TutorClient::with_base_url(server.uri());

    session.set_draft("What is 6*7?");
    run_one_turn(&mut session, &client).await;

    let last = session.transcript().last().unwrap();
    assert_eq!(last.role, Role::User);
    assert_eq!(session.last_error(), Some("overloaded"));
    assert!(!session.is_awaiting());
    assert_eq!(session.draft(), "");
}
