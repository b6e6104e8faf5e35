//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;

use crate::application::services::{AuthService, AuthServiceImpl, UserService, UserServiceImpl};
use crate::config::Settings;
use crate::domain::UserRepository;
use crate::infrastructure::auth::JwtCodec;
use crate::infrastructure::database;
use crate::infrastructure::repositories::PgUserRepository;
use crate::presentation::http::{handlers::health, routes};
use crate::presentation::middleware::{create_cors_layer, create_trace_layer};
use crate::presentation::websocket::RealtimeHub;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub user_repo: Arc<dyn UserRepository>,
    pub users: Arc<dyn UserService>,
    pub auth: Arc<dyn AuthService>,
    pub realtime: Arc<RealtimeHub>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wire services around a user store.
    pub fn new(settings: Settings, user_repo: Arc<dyn UserRepository>) -> Self {
        let jwt = JwtCodec::new(&settings.jwt);

        Self {
            users: Arc::new(UserServiceImpl::new(user_repo.clone())),
            auth: Arc::new(AuthServiceImpl::new(user_repo.clone(), jwt.clone())),
            realtime: Arc::new(RealtimeHub::new(Arc::new(jwt))),
            user_repo,
            settings: Arc::new(settings),
        }
    }
}

/// Full router with tracing and CORS layers
pub fn build_router(state: AppState) -> Router {
    let cors = create_cors_layer(&state.settings.cors);
    routes::create_router(state)
        .layer(create_trace_layer())
        .layer(cors)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
    realtime: Arc<RealtimeHub>,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        let db = database::create_pool(&settings.database).await?;
        tracing::info!("Database connection pool created");

        database::run_migrations(&db).await?;
        tracing::info!("Database migrations applied");

        let addr = settings.server_addr();

        let state = AppState::new(settings, Arc::new(PgUserRepository::new(db)));
        let realtime = state.realtime.clone();
        let router = build_router(state);

        health::init_server_start();

        let listener = TcpListener::bind(&addr).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self {
            listener,
            router,
            realtime,
        })
    }

    /// Run the server until ctrl-c, then drop all realtime state
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        self.realtime.shutdown();
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
