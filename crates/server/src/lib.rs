//! HTTP surface for the configuration store
//!
//! Every response body is a [`ConfigResponse`] envelope carrying either the
//! current document under `data` or a message under `error`.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use listarr_config::{Config, ConfigError, ConfigResult, ConfigStore, ErrorKind};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinError;

/// Prefix under which [`api_router`] mounts the configuration routes
pub const API_PREFIX: &str = "/api/v1";

/// Response envelope for every configuration endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Config>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConfigResponse {
    pub fn data(config: Config) -> Self {
        Self {
            data: Some(config),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
        }
    }
}

/// A failed request on its way out as an HTTP response
#[derive(Debug)]
pub enum ApiError {
    /// The store rejected or failed the operation
    Config(ConfigError),

    /// The blocking task running the operation panicked or was cancelled
    Task(JoinError),
}

impl ApiError {
    /// Status code reported for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Config(err) => status_for(err.kind()),
            ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Config(err) => write!(f, "{}", err),
            ApiError::Task(err) => write!(f, "Config task failed: {}", err),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::Config(err)
    }
}

impl From<JoinError> for ApiError {
    fn from(err: JoinError) -> Self {
        ApiError::Task(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Config request failed: {}", self);
        } else {
            log::debug!("Config request rejected: {}", self);
        }

        (status, Json(ConfigResponse::error(self.to_string()))).into_response()
    }
}

/// Maps an error kind to the status code the API reports for it
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::BadInput | ErrorKind::Constraint => StatusCode::BAD_REQUEST,
        ErrorKind::Io
        | ErrorKind::Format
        | ErrorKind::NotInitialized
        | ErrorKind::MissingFile => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Configuration routes, unprefixed
pub fn router(store: Arc<ConfigStore>) -> Router {
    Router::new()
        .route("/config", get(get_config).put(put_config))
        .route("/config/reset", post(reset_config))
        .with_state(store)
}

/// Configuration routes mounted under [`API_PREFIX`]
pub fn api_router(store: Arc<ConfigStore>) -> Router {
    Router::new().nest(API_PREFIX, router(store))
}

/// Binds `addr` and serves [`api_router`] until the listener fails
pub async fn serve(store: Arc<ConfigStore>, addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    log::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, api_router(store)).await
}

/// Runs a store operation on the blocking pool
///
/// Store calls take a lock and may touch the file system.
async fn run_blocking<F>(store: Arc<ConfigStore>, op: F) -> Result<Config, ApiError>
where
    F: FnOnce(&ConfigStore) -> ConfigResult<Config> + Send + 'static,
{
    let config = tokio::task::spawn_blocking(move || op(&store)).await??;
    Ok(config)
}

async fn get_config(
    State(store): State<Arc<ConfigStore>>,
) -> Result<Json<ConfigResponse>, ApiError> {
    let config = run_blocking(store, |store| store.get()).await?;
    Ok(Json(ConfigResponse::data(config)))
}

async fn put_config(
    State(store): State<Arc<ConfigStore>>,
    body: Bytes,
) -> Result<Json<ConfigResponse>, ApiError> {
    let config = run_blocking(store, move |store| store.update_json(&body)).await?;
    Ok(Json(ConfigResponse::data(config)))
}

async fn reset_config(
    State(store): State<Arc<ConfigStore>>,
) -> Result<Json<ConfigResponse>, ApiError> {
    let config = run_blocking(store, |store| store.reset()).await?;
    Ok(Json(ConfigResponse::data(config)))
}
