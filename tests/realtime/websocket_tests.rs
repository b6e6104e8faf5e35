//! WebSocket handshake and relay over a real socket

use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{eventually, spawn_server, token_for, TestApp, TestSocket};

async fn upgraded(addr: &str, token: &str) -> TestSocket {
    match TestSocket::connect(addr, Some(token)).await {
        Ok(socket) => socket,
        Err(status) => panic!("handshake rejected with {status}"),
    }
}

fn rejected_status(outcome: Result<TestSocket, u16>) -> u16 {
    match outcome {
        Ok(_) => panic!("handshake was upgraded"),
        Err(status) => status,
    }
}

#[tokio::test]
async fn test_handshake_without_credential_is_401() {
    let app = TestApp::new();
    let addr = spawn_server(&app).await;

    assert_eq!(rejected_status(TestSocket::connect(&addr, None).await), 401);
    assert!(app.state.realtime.registry().is_empty());
}

#[tokio::test]
async fn test_handshake_with_forged_token_is_401() {
    let app = TestApp::new();
    let addr = spawn_server(&app).await;

    let outcome = TestSocket::connect(&addr, Some("forged.token.value")).await;
    assert_eq!(rejected_status(outcome), 401);
}

#[tokio::test]
async fn test_admitted_socket_is_greeted_and_relayed() {
    let app = TestApp::new();
    let addr = spawn_server(&app).await;

    let mut a = upgraded(&addr, &token_for("a@x.com")).await;
    assert_eq!(
        a.recv_json().await,
        json!({"event": "clientOnline", "data": {"clients": 1}})
    );

    let mut b = upgraded(&addr, &token_for("b@x.com")).await;
    assert_eq!(
        b.recv_json().await,
        json!({"event": "clientOnline", "data": {"clients": 2}})
    );

    b.send_json(json!({"event": "sendMessage", "data": "psst"})).await;
    b.send_json(json!({"event": "message", "data": "hello"})).await;

    assert_eq!(
        a.recv_json().await,
        json!({"event": "receiveMessage", "data": {"sender": "b@x.com", "message": "psst"}})
    );
    let broadcast = json!({"event": "newMessage", "data": {"email": "b@x.com", "message": "hello"}});
    assert_eq!(a.recv_json().await, broadcast);
    // B never saw its own directed send
    assert_eq!(b.recv_json().await, broadcast);
}

#[tokio::test]
async fn test_long_message_is_relayed_intact() {
    let app = TestApp::new();
    let addr = spawn_server(&app).await;

    let mut a = upgraded(&addr, &token_for("long.a@x.com")).await;
    a.recv_json().await;
    let mut b = upgraded(&addr, &token_for("long.b@x.com")).await;
    b.recv_json().await;

    let text = "lorem ipsum ".repeat(700);
    a.send_json(json!({"event": "message", "data": text})).await;

    let expected = json!({"event": "newMessage", "data": {"email": "long.a@x.com", "message": text}});
    assert_eq!(a.recv_json().await, expected);
    assert_eq!(b.recv_json().await, expected);
}

#[tokio::test]
async fn test_duplicate_email_handshake_is_409() {
    let app = TestApp::new();
    let addr = spawn_server(&app).await;

    let mut first = upgraded(&addr, &token_for("dup@x.com")).await;
    first.recv_json().await;

    let outcome = TestSocket::connect(&addr, Some(&token_for("dup@x.com"))).await;
    assert_eq!(rejected_status(outcome), 409);
    assert_eq!(app.state.realtime.registry().len(), 1);
}

#[tokio::test]
async fn test_query_token_handshake_is_admitted() {
    let app = TestApp::new();
    let addr = spawn_server(&app).await;

    let mut socket = TestSocket::connect_with_query(&addr, &token_for("query@x.com"))
        .await
        .unwrap_or_else(|status| panic!("handshake rejected with {status}"));
    assert_eq!(
        socket.recv_json().await,
        json!({"event": "clientOnline", "data": {"clients": 1}})
    );
    assert!(app.state.realtime.registry().find_by_email("query@x.com").is_some());
}

#[tokio::test]
async fn test_duplicate_query_token_handshake_is_409() {
    let app = TestApp::new();
    let addr = spawn_server(&app).await;

    let mut first = upgraded(&addr, &token_for("q.dup@x.com")).await;
    first.recv_json().await;

    let outcome = TestSocket::connect_with_query(&addr, &token_for("q.dup@x.com")).await;
    assert_eq!(rejected_status(outcome), 409);
    assert_eq!(app.state.realtime.registry().len(), 1);
}

#[tokio::test]
async fn test_forged_query_token_is_401() {
    let app = TestApp::new();
    let addr = spawn_server(&app).await;

    let outcome = TestSocket::connect_with_query(&addr, "forged.token.value").await;
    assert_eq!(rejected_status(outcome), 401);
    assert!(app.state.realtime.registry().is_empty());
}

#[tokio::test]
async fn test_closing_socket_frees_the_email() {
    let app = TestApp::new();
    let addr = spawn_server(&app).await;
    let registry_hub = app.state.realtime.clone();

    let mut socket = upgraded(&addr, &token_for("leaver@x.com")).await;
    socket.recv_json().await;
    socket.close().await;

    assert!(eventually(|| registry_hub.registry().is_empty()).await);

    let mut again = upgraded(&addr, &token_for("leaver@x.com")).await;
    assert_eq!(
        again.recv_json().await,
        json!({"event": "clientOnline", "data": {"clients": 1}})
    );
}

#[tokio::test]
async fn test_unknown_frames_are_ignored() {
    let app = TestApp::new();
    let addr = spawn_server(&app).await;

    let mut socket = upgraded(&addr, &token_for("solo@x.com")).await;
    socket.recv_json().await;

    socket.send_json(json!({"event": "dance", "data": 1})).await;
    socket.send_json(json!({"event": "clientWriting"})).await;

    assert_eq!(
        socket.recv_json().await,
        json!({"event": "clientWriting", "data": {"email": "solo@x.com"}})
    );
}
