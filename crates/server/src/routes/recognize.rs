//! The recognition endpoint.
//!
//! A request collects its body, runs the collaborator pipeline, and wraps
//! the outcome in the envelope. Each failure keeps its own branch (a broken
//! body stream is distinct from an empty buffer, which is distinct from a
//! collaborator fault) and every path out of here is exactly one envelope.

use axum::body::Body;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use std::sync::Arc;

use crate::envelope::ResponseEnvelope;
use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;

/// `POST /recognize`: buffer the raw audio body, run it through the
/// collaborator (`encode`, then `recognize` only if encode succeeded), and
/// answer with the matches verbatim.
pub async fn recognize_audio(
    State(state): State<Arc<ServerState>>,
    body: Body,
) -> ServerResult<impl IntoResponse> {
    let audio = collect_body(body).await?;

    if audio.is_empty() {
        return Err(ServerError::EmptyAudio);
    }

    tracing::debug!(bytes = audio.len(), "audio buffered, dispatching to recognizer");

    let encoded = state.recognizer.encode(&audio).await?;
    let matches = state.recognizer.recognize(&encoded).await?;

    tracing::info!(matches = matches.len(), "recognition finished");

    Ok(Json(ResponseEnvelope::success(matches)))
}

/// Accumulate request chunks, in arrival order, into one contiguous buffer.
///
/// The body is consumed as an explicit chunk stream so a mid-transfer
/// failure surfaces as its own error branch instead of a silently truncated
/// buffer.
async fn collect_body(body: Body) -> ServerResult<Bytes> {
    let mut stream = body.into_data_stream();
    let mut buffer = BytesMut::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(ServerError::Request)?;
        buffer.extend_from_slice(&chunk);
    }

    Ok(buffer.freeze())
}
