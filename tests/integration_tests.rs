//! End-to-end tests of the chat session against a mock completion endpoint.

use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mockito::{Matcher, Server};
use serde_json::json;

use soonerchat::chat::{ChatConfig, ChatSession, Control, Renderer};
use soonerchat::{
    ClientLogger, CompletionBackend, CompletionRequest, CompletionResponse, Message, Role,
    SoonerAi, TurnError,
};

const PATH: &str = "/api/chat/completions";

fn reply_body(content: &str) -> String {
    json!({
        "id": "chatcmpl-test",
        "model": "gemma3:4b",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
        ]
    })
    .to_string()
}

fn client(server: &Server) -> SoonerAi {
    SoonerAi::with_options("sk-test", &server.url(), Duration::from_secs(5)).unwrap()
}

fn config(max_pairs: i64) -> ChatConfig {
    ChatConfig::new()
        .with_api_key("sk-test")
        .with_system_prompt("You are SpongeBob.")
        .with_model("gemma3:4b")
        .with_temperature(0.5)
        .with_max_pairs(max_pairs)
}

/// Matches a request body exactly, so a longer `messages` array does not match.
fn exact_body(model: &str, messages: serde_json::Value) -> Matcher {
    Matcher::Json(json!({
        "model": model,
        "messages": messages,
        "temperature": 0.5
    }))
}

#[derive(Default)]
struct Recorder {
    replies: Vec<String>,
    turn_errors: Vec<String>,
}

impl Renderer for Recorder {
    fn print_banner(&mut self, _model: &str, _endpoint: &str) {}

    fn print_reply(&mut self, text: &str) {
        self.replies.push(text.to_string());
    }

    fn print_turn_error(&mut self, error: &str) {
        self.turn_errors.push(error.to_string());
    }

    fn print_error(&mut self, _error: &str) {}

    fn print_info(&mut self, _info: &str) {}
}

#[derive(Default)]
struct RecordingLogger {
    requests: Mutex<Vec<CompletionRequest>>,
    responses: Mutex<Vec<CompletionResponse>>,
    errors: Mutex<Vec<String>>,
}

impl ClientLogger for RecordingLogger {
    fn log_request(&self, request: &CompletionRequest) {
        self.requests.lock().unwrap().push(request.clone());
    }

    fn log_response(&self, response: &CompletionResponse) {
        self.responses.lock().unwrap().push(response.clone());
    }

    fn log_error(&self, error: &TurnError) {
        self.errors.lock().unwrap().push(error.to_string());
    }
}

#[tokio::test]
async fn sends_bearer_credential_and_json_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_header("authorization", "Bearer sk-test")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "model": "gemma3:4b",
            "messages": [
                {"role": "system", "content": "You are SpongeBob."},
                {"role": "user", "content": "hi"}
            ],
            "temperature": 0.5
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(reply_body("I'm ready!"))
        .expect(1)
        .create_async()
        .await;

    let request = CompletionRequest::new(
        "gemma3:4b",
        vec![Message::system("You are SpongeBob."), Message::user("hi")],
        0.5,
    );
    let reply = client(&server).complete(&request).await.unwrap();
    assert_eq!(reply, "I'm ready!");
    mock.assert_async().await;
}

#[tokio::test]
async fn server_error_becomes_visible_assistant_entry() {
    let mut server = Server::new_async().await;
    let failing = server
        .mock("POST", PATH)
        .match_body(exact_body(
            "gemma3:4b",
            json!([
                {"role": "system", "content": "You are SpongeBob."},
                {"role": "user", "content": "hi"}
            ]),
        ))
        .with_status(500)
        .with_body("server exploded")
        .expect(1)
        .create_async()
        .await;
    let recovering = server
        .mock("POST", PATH)
        .match_body(exact_body(
            "gemma3:4b",
            json!([
                {"role": "system", "content": "You are SpongeBob."},
                {"role": "user", "content": "hi"},
                {"role": "assistant", "content": "(Error: HTTP 500: server exploded)"},
                {"role": "user", "content": "still there?"}
            ]),
        ))
        .with_status(200)
        .with_body(reply_body("Aye aye!"))
        .expect(1)
        .create_async()
        .await;

    let mut session = ChatSession::new(client(&server), config(8));
    let mut recorder = Recorder::default();

    let control = session.handle_line("hi", &mut recorder).await.unwrap();
    assert_eq!(control, Control::Continue);
    assert_eq!(session.message_count(), 3);
    let placeholder = &session.history().messages()[2];
    assert_eq!(placeholder.role, Role::Assistant);
    assert!(placeholder.content.contains("500"));
    assert!(placeholder.content.contains("server exploded"));
    assert_eq!(recorder.turn_errors, vec!["HTTP 500: server exploded"]);

    session.handle_line("still there?", &mut recorder).await.unwrap();
    assert_eq!(session.message_count(), 5);
    assert_eq!(recorder.replies, vec!["Aye aye!"]);

    failing.assert_async().await;
    recovering.assert_async().await;
}

#[tokio::test]
async fn one_pair_window_over_the_wire() {
    let mut server = Server::new_async().await;
    let first = server
        .mock("POST", PATH)
        .match_body(exact_body(
            "gemma3:4b",
            json!([
                {"role": "system", "content": "You are SpongeBob."},
                {"role": "user", "content": "hi"}
            ]),
        ))
        .with_status(200)
        .with_body(reply_body("reply1"))
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("POST", PATH)
        .match_body(exact_body(
            "gemma3:4b",
            json!([
                {"role": "system", "content": "You are SpongeBob."},
                {"role": "assistant", "content": "reply1"},
                {"role": "user", "content": "bye"}
            ]),
        ))
        .with_status(200)
        .with_body(reply_body("reply2"))
        .expect(1)
        .create_async()
        .await;

    let mut session = ChatSession::new(client(&server), config(1));
    let mut recorder = Recorder::default();
    session.handle_line("hi", &mut recorder).await.unwrap();
    session.handle_line("bye", &mut recorder).await.unwrap();

    assert_eq!(recorder.replies, vec!["reply1", "reply2"]);
    assert!(recorder.turn_errors.is_empty());
    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn zero_pairs_sends_system_prompt_only() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_body(exact_body(
            "gemma3:4b",
            json!([
                {"role": "system", "content": "You are SpongeBob."}
            ]),
        ))
        .with_status(200)
        .with_body(reply_body("Who said that?"))
        .expect(2)
        .create_async()
        .await;

    let mut session = ChatSession::new(client(&server), config(0));
    let mut recorder = Recorder::default();
    session.handle_line("hi", &mut recorder).await.unwrap();
    session.handle_line("hello?", &mut recorder).await.unwrap();

    assert_eq!(session.message_count(), 5);
    assert!(recorder.turn_errors.is_empty(), "{:?}", recorder.turn_errors);
    assert_eq!(recorder.replies.len(), 2);
    mock.assert_async().await;
}

#[tokio::test]
async fn success_without_reply_field_is_unexpected_shape() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(r#"{"result": "no choices here"}"#)
        .create_async()
        .await;

    let request = CompletionRequest::new("gemma3:4b", vec![Message::system("s")], 0.6);
    let err = client(&server).complete(&request).await.unwrap_err();
    assert!(matches!(err, TurnError::UnexpectedShape { .. }));
    let text = err.to_string();
    assert!(text.starts_with("Unexpected response format:"));
    assert!(text.contains("no choices here"));
}

#[tokio::test]
async fn status_error_keeps_raw_body() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(401)
        .with_body(r#"{"detail": "Not authenticated"}"#)
        .create_async()
        .await;

    let request = CompletionRequest::new("gemma3:4b", vec![Message::system("s")], 0.6);
    let err = client(&server).complete(&request).await.unwrap_err();
    assert_eq!(err.status_code(), Some(401));
    assert_eq!(
        err.to_string(),
        r#"HTTP 401: {"detail": "Not authenticated"}"#
    );
}

#[tokio::test]
async fn slow_response_times_out() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(200)
        .with_chunked_body(|w| {
            std::thread::sleep(Duration::from_secs(2));
            w.write_all(reply_body("too late").as_bytes())
        })
        .create_async()
        .await;

    let client =
        SoonerAi::with_options("sk-test", &server.url(), Duration::from_millis(200)).unwrap();
    let request = CompletionRequest::new("gemma3:4b", vec![Message::system("s")], 0.6);
    let err = client.complete(&request).await.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {err}");
}

#[tokio::test]
async fn unreachable_endpoint_is_a_turn_error() {
    let client =
        SoonerAi::with_options("sk-test", "http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
    let mut session = ChatSession::new(client, config(8));
    let mut recorder = Recorder::default();
    let control = session.handle_line("anyone home?", &mut recorder).await.unwrap();
    assert_eq!(control, Control::Continue);
    assert_eq!(session.message_count(), 3);
    assert_eq!(recorder.turn_errors.len(), 1);
    assert!(session.history().messages()[2].content.starts_with("(Error: "));
}

#[tokio::test]
async fn logger_sees_requests_responses_and_errors() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", PATH)
        .match_body(exact_body(
            "m",
            json!([
                {"role": "system", "content": "s"},
                {"role": "user", "content": "ok"}
            ]),
        ))
        .with_status(200)
        .with_body(reply_body("fine"))
        .create_async()
        .await;
    server
        .mock("POST", PATH)
        .match_body(exact_body(
            "m",
            json!([
                {"role": "system", "content": "s"},
                {"role": "user", "content": "break"}
            ]),
        ))
        .with_status(503)
        .with_body("overloaded")
        .create_async()
        .await;

    let logger = Arc::new(RecordingLogger::default());
    let client = client(&server).with_logger(logger.clone());

    let ok = CompletionRequest::new("m", vec![Message::system("s"), Message::user("ok")], 0.5);
    let bad = CompletionRequest::new("m", vec![Message::system("s"), Message::user("break")], 0.5);
    assert_eq!(client.complete(&ok).await.unwrap(), "fine");
    assert!(client.complete(&bad).await.is_err());

    assert_eq!(logger.requests.lock().unwrap().len(), 2);
    assert_eq!(logger.responses.lock().unwrap().len(), 1);
    assert_eq!(
        *logger.errors.lock().unwrap(),
        vec!["HTTP 503: overloaded".to_string()]
    );
}
