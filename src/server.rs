//! HTTP shell over the sampling engine.
//!
//! Three POST endpoints mirror the engine's three operations:
//!
//! - `/load`: multipart file upload, split into lines and bulk-inserted;
//!   responds `{"lines_read": N}`.
//! - `/sample?n=N`: atomic uniform draw; responds `{"sampled_lines": [...]}`
//!   or 400 with a `detail` string naming the rejection.
//! - `/reset`: clears the pool; responds `{"status": "pool cleared"}`.
//!
//! The shell owns no pool state of its own: it is handed an explicitly
//! constructed [`SharedPool`] and does nothing but decode requests, call the
//! engine, and encode results. Engine rejections are per-request 400s and
//! never affect other callers.

use std::net::SocketAddr;

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::lines::split_lines;
use crate::pool::{SampleError, SharedPool};

/// Response body for `/load`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadResponse {
    /// Number of lines read from the upload and inserted into the pool.
    pub lines_read: usize,
}

/// Response body for `/sample`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleResponse {
    /// The drawn lines, removed from the pool. Order is arbitrary.
    pub sampled_lines: Vec<String>,
}

/// Response body for `/reset`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Human-readable acknowledgement.
    pub status: String,
}

/// Error body carried by every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason for the rejection.
    pub detail: String,
}

/// Query parameters for `/sample`.
///
/// `n` is signed so that negative requests reach the engine and are rejected
/// there, rather than failing query deserialization with a generic message.
#[derive(Debug, Clone, Deserialize)]
pub struct SampleParams {
    /// Requested sample size.
    pub n: i64,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }
}

impl From<SampleError> for ApiError {
    fn from(err: SampleError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}

/// Build the router for the three pool endpoints over `pool`.
pub fn router(pool: SharedPool) -> Router {
    Router::new()
        .route("/load", post(load))
        .route("/sample", post(sample))
        .route("/reset", post(reset))
        .with_state(pool)
}

/// Bind `addr` and serve [`router`] until the process exits.
pub async fn serve(addr: SocketAddr, pool: SharedPool) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "linepool listening");
    axum::serve(listener, router(pool)).await
}

async fn load(
    State(pool): State<SharedPool>,
    mut multipart: Multipart,
) -> Result<Json<LoadResponse>, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("failed to read upload: {e}")))?;
            upload = Some(bytes);
            break;
        }
    }
    let Some(bytes) = upload else {
        return Err(ApiError::bad_request("missing \"file\" field in upload"));
    };

    // The engine is content-agnostic; invalid UTF-8 is replaced rather than
    // rejected so a load of any byte stream succeeds.
    let text = String::from_utf8_lossy(&bytes);
    let lines = split_lines(&text);
    let lines_read = pool.insert(lines);
    info!(lines_read, pool_size = pool.len(), "loaded upload");
    Ok(Json(LoadResponse { lines_read }))
}

async fn sample(
    State(pool): State<SharedPool>,
    Query(params): Query<SampleParams>,
) -> Result<Json<SampleResponse>, ApiError> {
    let sampled_lines = pool.sample(params.n).inspect_err(|err| {
        warn!(n = params.n, %err, "sample rejected");
    })?;
    debug!(
        n = params.n,
        pool_size = pool.len(),
        "sampled lines from pool"
    );
    Ok(Json(SampleResponse { sampled_lines }))
}

async fn reset(State(pool): State<SharedPool>) -> Json<StatusResponse> {
    pool.reset();
    info!("pool cleared");
    Json(StatusResponse {
        status: "pool cleared".to_string(),
    })
}
