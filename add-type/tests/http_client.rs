//! Integration tests for `HttpBindTypeClient`.
//!
//! A wiremock server stands in for the project API so the full HTTP path
//! is exercised: request encoding, status handling, response decoding.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use typebind_add_type::{
    AddTypeController, BindTypeClient, BindTypeError, BindTypeRequest, ClientConfig, ExprHash,
    HttpBindTypeClient, ProjectHash, UserErrorResponse,
};
use typebind_testing::{init_test_tracing, CallRecorder};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpBindTypeClient {
    init_test_tracing();
    HttpBindTypeClient::new(&ClientConfig::new(server.uri())).unwrap()
}

fn request() -> BindTypeRequest {
    BindTypeRequest {
        project_hash: ProjectHash::new("project-1"),
        expression: "type Maybe a = Just a | Nothing".to_string(),
    }
}

fn success_body() -> serde_json::Value {
    json!({
        "btProjectData": {
            "pdHash": "project-2",
            "pdBindings": { "main": "e0" },
            "pdTypeBindings": { "Maybe": "t-maybe" },
            "pdVersions": { "main": ["e0"] }
        },
        "btCodegen": {
            "edBindings": { "Just": "e-just", "Nothing": "e-nothing" },
            "edTypeBindings": { "Maybe": "t-maybe" }
        },
        "btTypeclasses": [
            { "tcName": "Functor", "tcTypes": ["Maybe"], "tcDerived": true }
        ],
        "btPrettyType": "type Maybe a = Just a | Nothing"
    })
}

#[tokio::test]
async fn test_posts_request_and_decodes_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/project/bind-type"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "btProjectHash": "project-1",
            "btExpression": "type Maybe a = Just a | Nothing"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).bind_type(request()).await.unwrap();

    assert_eq!(response.project_data.hash, ProjectHash::new("project-2"));
    assert_eq!(
        response.bound_expression_hashes(),
        vec![ExprHash::new("e-just"), ExprHash::new("e-nothing")]
    );
    assert_eq!(response.typeclasses[0].types, vec!["Maybe".to_string()]);
    assert_eq!(response.pretty_type, "type Maybe a = Just a | Nothing");
}

#[tokio::test]
async fn test_missing_codegen_decodes_as_none() {
    let server = MockServer::start().await;
    let mut body = success_body();
    body.as_object_mut().unwrap().remove("btCodegen");

    Mock::given(method("POST"))
        .and(path("/project/bind-type"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let response = client_for(&server).bind_type(request()).await.unwrap();

    assert!(response.codegen.is_none());
    assert!(response.bound_expression_hashes().is_empty());
}

#[tokio::test]
async fn test_user_error_becomes_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/project/bind-type"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "TYPE_ERROR",
            "message": "Unknown type variable b"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).bind_type(request()).await.unwrap_err();

    assert_eq!(
        err,
        BindTypeError::Rejected(UserErrorResponse {
            code: "TYPE_ERROR".to_string(),
            message: "Unknown type variable b".to_string(),
        })
    );
}

#[tokio::test]
async fn test_server_error_keeps_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/project/bind-type"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = client_for(&server).bind_type(request()).await.unwrap_err();

    assert_eq!(
        err,
        BindTypeError::Status {
            status: 503,
            body: "overloaded".to_string(),
        }
    );
}

#[tokio::test]
async fn test_client_error_without_user_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/project/bind-type"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let err = client_for(&server).bind_type(request()).await.unwrap_err();

    assert!(matches!(err, BindTypeError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/project/bind-type"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let err = client_for(&server).bind_type(request()).await.unwrap_err();

    assert!(matches!(err, BindTypeError::Decode(_)));
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/project/bind-type"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success_body())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = ClientConfig::new(server.uri()).with_request_timeout(Duration::from_millis(50));
    let client = HttpBindTypeClient::new(&config).unwrap();

    let err = client.bind_type(request()).await.unwrap_err();

    assert!(matches!(err, BindTypeError::Transport(_)));
}

/// Serve one connection that answers with `status` and a body cut short of
/// its declared length.
async fn truncated_body_server(status: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        // Consume the whole request so closing does not reset the connection
        let mut received = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            received.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&received);
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if received.len() >= end + 4 + length {
                    break;
                }
            }
            if n == 0 {
                break;
            }
        }

        let head = format!("HTTP/1.1 {status}\r\ncontent-length: 100\r\n\r\npartial");
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn test_unreadable_error_body_is_transport_error() {
    init_test_tracing();
    let base_url = truncated_body_server("500 Internal Server Error").await;
    let client = HttpBindTypeClient::new(&ClientConfig::new(base_url)).unwrap();

    let err = client.bind_type(request()).await.unwrap_err();

    assert!(matches!(err, BindTypeError::Transport(_)), "{err:?}");
}

#[tokio::test]
async fn test_controller_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/project/bind-type"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(2)
        .mount(&server)
        .await;

    let updates = CallRecorder::new();
    let sink = updates.clone();
    let controller = AddTypeController::new(
        ProjectHash::new("project-1"),
        "type Maybe a = Just a | Nothing",
        Arc::new(client_for(&server)),
        move |project, hashes| sink.record((project, hashes)),
    );

    controller.trigger().await;
    controller.trigger().await;

    let state = controller.state().await;
    let added = state.completed().expect("state should be Completed");
    assert_eq!(added.bindings.len(), 2);
    assert_eq!(added.type_bindings.get("Maybe").map(String::as_str), Some("t-maybe"));
    assert_eq!(added.typeclasses[0].extra.get("tcDerived"), Some(&json!(true)));

    let calls = updates.calls();
    assert_eq!(calls.len(), 2);
    for (project, hashes) in calls {
        // The snapshot reaches the callback exactly as the server sent it
        assert_eq!(serde_json::to_value(&project).unwrap(), success_body()["btProjectData"]);
        assert_eq!(hashes, vec![ExprHash::new("e-just"), ExprHash::new("e-nothing")]);
    }
}
