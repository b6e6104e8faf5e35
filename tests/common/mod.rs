//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use fake::{
    faker::name::en::{FirstName, LastName},
    Fake,
};
use futures::{SinkExt, StreamExt};
use parking_lot::RwLock;
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::{
    client::IntoClientRequest,
    handshake::client::Request as ClientRequest,
    http::{header::AUTHORIZATION, HeaderValue},
    Error as WsError, Message,
};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tower::ServiceExt;
use uuid::Uuid;

use presence_chat::config::{
    CorsSettings, DatabaseSettings, JwtSettings, ServerSettings, Settings, WebSocketSettings,
};
use presence_chat::domain::{User, UserRepository};
use presence_chat::infrastructure::auth::JwtCodec;
use presence_chat::shared::error::AppError;
use presence_chat::startup::{build_router, AppState};

pub const TEST_JWT_SECRET: &str = "integration-test-secret-with-enough-bytes";

/// User store kept in memory, with the same uniqueness rules as Postgres
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.read().iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.read().clone())
    }

    async fn create(&self, user: &User) -> Result<User, AppError> {
        let mut users = self.users.write();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("User with this email already exists".into()));
        }
        users.push(user.clone());
        Ok(user.clone())
    }

    async fn update_profile(
        &self,
        email: &str,
        name: Option<String>,
        lastname: Option<String>,
    ) -> Result<Option<User>, AppError> {
        let mut users = self.users.write();
        Ok(users.iter_mut().find(|u| u.email == email).map(|user| {
            if let Some(name) = name {
                user.name = name;
            }
            if let Some(lastname) = lastname {
                user.lastname = lastname;
            }
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn update_password(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>, AppError> {
        let mut users = self.users.write();
        Ok(users.iter_mut().find(|u| u.email == email).map(|user| {
            user.password_hash = password_hash.to_string();
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let mut users = self.users.write();
        let position = users.iter().position(|u| u.id == id);
        Ok(position.map(|i| users.remove(i)))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseSettings {
            url: "postgres://unused".into(),
            max_connections: 1,
            min_connections: 0,
            acquire_timeout: 1,
        },
        jwt: JwtSettings {
            secret: TEST_JWT_SECRET.into(),
            access_token_expiry_minutes: 60,
        },
        cors: CorsSettings {
            allowed_origins: vec![],
        },
        websocket: WebSocketSettings {
            max_message_size: 65536,
            max_frame_size: 16384,
        },
        environment: "test".into(),
    }
}

/// Codec sharing the test secret, for minting realtime tokens directly
pub fn jwt_codec() -> JwtCodec {
    JwtCodec::new(&test_settings().jwt)
}

/// Signed token whose payload carries `email`
pub fn token_for(email: &str) -> String {
    jwt_codec()
        .issue_payload(json!({ "email": email, "name": "tester" }), Utc::now())
        .unwrap()
        .token
}

/// Unique, always-valid email address
pub fn fake_email() -> String {
    format!("user.{}@example.com", Uuid::new_v4().simple())
}

/// Account creation body with generated names and a fresh email
pub fn fake_user_body(password: &str) -> Value {
    json!({
        "name": FirstName().fake::<String>(),
        "lastname": LastName().fake::<String>(),
        "email": fake_email(),
        "password": password,
    })
}

/// Test application driven in-process through `oneshot`
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        let state = AppState::new(test_settings(), Arc::new(InMemoryUserRepository::default()));
        Self {
            router: build_router(state.clone()),
            state,
        }
    }

    /// Send a request and decode the JSON body (Null when empty)
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header("Content-Type", "application/json");
        }
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        let body = body
            .map(|b| Body::from(b.to_string()))
            .unwrap_or_else(Body::empty);

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body), None).await
    }

    /// Create an account, returning the response body
    pub async fn create_user(&self, body: Value) -> Value {
        let (status, json) = self.post_json("/api/v1/users", body).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {json}");
        json
    }

    /// Log in and return the bearer token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, json) = self
            .post_json(
                "/api/v1/users/login",
                json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {json}");
        json["token"].as_str().unwrap().to_string()
    }
}

/// Serve the full router on an ephemeral port
pub async fn spawn_server(app: &TestApp) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app.router.clone();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr.to_string()
}

/// WebSocket client for `/socket`
pub struct TestSocket {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestSocket {
    /// Connect with the credential in the `Authorization` header.
    /// A refused handshake yields its HTTP status.
    pub async fn connect(addr: &str, token: Option<&str>) -> Result<Self, u16> {
        let mut request = format!("ws://{addr}/socket").into_client_request().unwrap();
        if let Some(token) = token {
            request.headers_mut().insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
            );
        }
        Self::open(request).await
    }

    /// Connect with the credential in the `token` query parameter
    pub async fn connect_with_query(addr: &str, token: &str) -> Result<Self, u16> {
        let request = format!("ws://{addr}/socket?token={token}")
            .into_client_request()
            .unwrap();
        Self::open(request).await
    }

    async fn open(request: ClientRequest) -> Result<Self, u16> {
        match connect_async(request).await {
            Ok((stream, _)) => Ok(Self { stream }),
            Err(WsError::Http(response)) => Err(response.status().as_u16()),
            Err(e) => panic!("websocket connect failed: {e}"),
        }
    }

    /// Send one text frame
    pub async fn send_json(&mut self, value: Value) {
        self.stream
            .send(Message::Text(value.to_string().into()))
            .await
            .unwrap();
    }

    /// Next text frame from the server, decoded as JSON
    pub async fn recv_json(&mut self) -> Value {
        tokio::time::timeout(Duration::from_secs(5), self.next_text())
            .await
            .expect("timed out waiting for frame")
    }

    async fn next_text(&mut self) -> Value {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => {
                    return serde_json::from_str(text.as_str()).unwrap()
                }
                Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
                Some(Ok(other)) => panic!("unexpected frame: {other:?}"),
                Some(Err(e)) => panic!("websocket error: {e}"),
                None => panic!("socket closed by server"),
            }
        }
    }

    /// Close handshake, then drop the connection
    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}

/// Poll until `check` holds or a few seconds pass
pub async fn eventually(mut check: impl FnMut() -> bool) -> bool {
    for _ in 0..100 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    check()
}
