//! Inbound message loop.

use crate::router::Router;
use chat_client::{InboundMessage, MessageSink};
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_stream::{Stream, StreamExt};
use tracing::{error, info};

/// Route every message from `messages` until the stream ends or `shutdown`
/// resolves.
///
/// Each message is handled in its own task so a slow lookup does not hold up
/// the next message. Handlers still in flight when the loop stops are awaited
/// before returning, so an acknowledged lookup always gets its result.
pub async fn serve<S, F>(
    router: Arc<Router>,
    sink: Arc<dyn MessageSink>,
    mut messages: S,
    shutdown: F,
) where
    S: Stream<Item = InboundMessage> + Unpin,
    F: Future<Output = ()>,
{
    let mut tasks = JoinSet::new();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            message = messages.next() => {
                let Some(message) = message else {
                    info!("Message stream ended");
                    break;
                };
                let router = router.clone();
                let sink = sink.clone();

                tasks.spawn(async move {
                    if let Err(e) = router.route(&message, sink.as_ref()).await {
                        error!("Handler error: {}", e);
                    }
                });
            }
            Some(result) = tasks.join_next(), if !tasks.is_empty() => {
                if let Err(e) = result {
                    error!("Handler task failed: {}", e);
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    if !tasks.is_empty() {
        info!("Waiting for {} in-flight message(s)", tasks.len());
    }
    while let Some(result) = tasks.join_next().await {
        if let Err(e) = result {
            error!("Handler task failed: {}", e);
        }
    }
}
