//! Server-sent stream of data changes

use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use tokio_stream::{
    wrappers::{errors::BroadcastStreamRecvError, BroadcastStream},
    Stream, StreamExt,
};

/// Subscribe to change events; clients refetch whatever entity changed
#[utoipa::path(
    get,
    path = "/changes",
    tag = "changes",
    responses(
        (status = 200, description = "Stream of `change` events", body = crate::services::notifications::DataChange, content_type = "text/event-stream")
    )
)]
pub async fn stream_changes(
    State(state): State<crate::AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(state.services.notifier.subscribe()).filter_map(|received| match received {
        Ok(change) => Event::default()
            .event("change")
            .id(change.version.to_string())
            .json_data(&change)
            .ok()
            .map(Ok),
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::debug!(skipped, "Change subscriber lagged");
            None
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
