//! One streamed chat turn.
//!
//! [`run_turn`] is the read-decode-project loop. [`TurnController`] owns the
//! task running it, guarantees at most one live turn, and stamps each turn
//! with a generation number.

use std::future::Future;

use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::TurnMessage;
use crate::error::StreamError;
use crate::progress::{ProgressProjector, ProgressState};
use crate::sse::{EventStream, StreamItem};

/// Open a stream and fold it into progress, reporting to `message_tx`.
///
/// Exactly one of `Completed` or `Failed` is sent, unless the task running
/// this is aborted first, in which case neither is.
pub async fn run_turn<F>(
    generation: u64,
    open: F,
    message_tx: mpsc::UnboundedSender<TurnMessage>,
) -> ProgressState
where
    F: Future<Output = Result<EventStream, StreamError>>,
{
    let mut projector = ProgressProjector::new();

    let mut stream = match open.await {
        Ok(stream) => stream,
        Err(error) => {
            tracing::error!("Turn {} could not open stream: {}", generation, error);
            projector.fail(&error);
            let state = projector.into_state();
            let _ = message_tx.send(TurnMessage::Failed {
                generation,
                error,
                state: state.clone(),
            });
            return state;
        }
    };

    let mut finished = false;
    while let Some(item) = stream.next().await {
        match item {
            StreamItem::Event(event) => {
                if projector.apply(&event) {
                    let _ = message_tx.send(TurnMessage::Progress {
                        generation,
                        state: projector.state().clone(),
                    });
                }
            }
            StreamItem::Complete => {
                finished = true;
                break;
            }
            StreamItem::Error(error) if projector.is_complete() => {
                // The answer already arrived; a broken tail does not undo it
                tracing::warn!("Stream error after turn {} completed: {}", generation, error);
                finished = true;
                break;
            }
            StreamItem::Error(error) => {
                projector.fail(&error);
                let state = projector.into_state();
                let _ = message_tx.send(TurnMessage::Failed {
                    generation,
                    error,
                    state: state.clone(),
                });
                return state;
            }
        }
    }

    if !finished {
        tracing::debug!("Turn {} stream ended without a terminal item", generation);
    }
    projector.complete();
    let state = projector.into_state();
    tracing::info!("Turn {} completed: {}", generation, state.display_status());
    let _ = message_tx.send(TurnMessage::Completed {
        generation,
        state: state.clone(),
    });
    state
}

/// Runs at most one turn at a time.
pub struct TurnController {
    generation: u64,
    active: Option<JoinHandle<ProgressState>>,
    message_tx: mpsc::UnboundedSender<TurnMessage>,
}

impl TurnController {
    /// Create a controller and the receiver its turns report to.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TurnMessage>) {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let controller = Self {
            generation: 0,
            active: None,
            message_tx,
        };
        (controller, message_rx)
    }

    /// Start a turn, cancelling any turn still running.
    ///
    /// Returns the new turn's generation. Must be called within a Tokio
    /// runtime.
    pub fn start<F>(&mut self, open: F) -> u64
    where
        F: Future<Output = Result<EventStream, StreamError>> + Send + 'static,
    {
        self.cancel();
        self.generation += 1;
        let generation = self.generation;
        tracing::debug!("Starting turn {}", generation);
        let handle = tokio::spawn(run_turn(generation, open, self.message_tx.clone()));
        self.active = Some(handle);
        generation
    }

    /// Abort the running turn, if any.
    ///
    /// Reads stop and no completion is reported for it. Returns `true` if a
    /// live turn was cancelled.
    pub fn cancel(&mut self) -> bool {
        match self.active.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                tracing::info!("Cancelled turn {}", self.generation);
                true
            }
            _ => false,
        }
    }

    /// Generation of the most recently started turn (0 before any).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Check if a message belongs to the most recent turn.
    pub fn is_current(&self, message: &TurnMessage) -> bool {
        message.generation() == self.generation
    }

    /// Check if a turn task is still running.
    pub fn is_active(&self) -> bool {
        self.active.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for TurnController {
    fn drop(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sse::event_stream;
    use bytes::Bytes;
    use futures_util::stream;
    use std::time::Duration;

    fn sse_stream(body: &'static str) -> EventStream {
        event_stream(stream::iter(vec![Ok::<_, String>(Bytes::from_static(
            body.as_bytes(),
        ))]))
    }

    fn pending_stream() -> EventStream {
        Box::pin(stream::pending::<StreamItem>())
    }

    async fn drain(rx: &mut mpsc::UnboundedReceiver<TurnMessage>) -> Vec<TurnMessage> {
        let mut messages = Vec::new();
        while let Some(message) = rx.recv().await {
            let done = message.is_final();
            messages.push(message);
            if done {
                break;
            }
        }
        messages
    }

    #[tokio::test]
    async fn test_run_turn_end_to_end() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let body = "data: {\"type\":\"analysis\",\"status\":\"started\"}\n\n\
                    data: {\"type\":\"final_response\",\"message\":\"Hello\"}\n\n\
                    data: [DONE]\n\n";
        let state = run_turn(1, async move { Ok(sse_stream(body)) }, tx).await;

        assert!(state.is_complete);
        assert_eq!(state.current_status, "Hello");
        assert_eq!(state.final_content.as_deref(), Some("Hello"));

        let mut messages = Vec::new();
        while let Ok(message) = rx.try_recv() {
            messages.push(message);
        }
        let completions = messages
            .iter()
            .filter(|m| matches!(m, TurnMessage::Completed { .. }))
            .count();
        assert_eq!(completions, 1);
        assert!(matches!(messages.last(), Some(TurnMessage::Completed { .. })));
    }

    #[tokio::test]
    async fn test_run_turn_open_failure() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let error = StreamError::Server {
            status: 500,
            message: "boom".to_string(),
        };
        let expected = error.clone();
        let state = run_turn(3, async move { Err(error) }, tx).await;

        assert!(state.is_complete);
        match rx.try_recv().unwrap() {
            TurnMessage::Failed {
                generation, error, ..
            } => {
                assert_eq!(generation, 3);
                assert_eq!(error, expected);
            }
            other => panic!("Expected Failed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_run_turn_transport_error_after_answer_completes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let parts = vec![
            Ok(Bytes::from_static(
                b"data: {\"type\":\"final_response\",\"message\":\"Hi\"}\n\n",
            )),
            Err("reset".to_string()),
        ];
        let state = run_turn(1, async move { Ok(event_stream(stream::iter(parts))) }, tx).await;

        assert_eq!(state.final_content.as_deref(), Some("Hi"));
        let messages = drain(&mut rx).await;
        assert!(matches!(messages.last(), Some(TurnMessage::Completed { .. })));
    }

    #[tokio::test]
    async fn test_run_turn_transport_error_fails() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let parts: Vec<Result<Bytes, String>> = vec![Err("reset".to_string())];
        let state = run_turn(1, async move { Ok(event_stream(stream::iter(parts))) }, tx).await;

        assert!(state.current_status.starts_with("Error:"));
        let messages = drain(&mut rx).await;
        assert!(matches!(messages.last(), Some(TurnMessage::Failed { .. })));
    }

    #[tokio::test]
    async fn test_generation_increments() {
        let (mut controller, mut rx) = TurnController::new();
        assert_eq!(controller.generation(), 0);

        let first = controller.start(async { Ok(sse_stream("data: [DONE]\n\n")) });
        let messages = drain(&mut rx).await;
        assert_eq!(first, 1);
        assert!(controller.is_current(messages.last().unwrap()));

        let second = controller.start(async { Ok(sse_stream("data: [DONE]\n\n")) });
        assert_eq!(second, 2);
        assert!(!controller.is_current(messages.last().unwrap()));
    }

    #[tokio::test]
    async fn test_cancel_produces_no_completion() {
        let (mut controller, mut rx) = TurnController::new();
        controller.start(async { Ok(pending_stream()) });
        tokio::task::yield_now().await;
        assert!(controller.is_active());

        assert!(controller.cancel());
        assert!(!controller.is_active());

        let next = tokio::time::timeout(Duration::from_millis(50), rx.recv()).await;
        assert!(next.is_err(), "cancelled turn must stay silent");
    }

    #[tokio::test]
    async fn test_start_replaces_running_turn() {
        let (mut controller, mut rx) = TurnController::new();
        controller.start(async { Ok(pending_stream()) });
        let current = controller.start(async { Ok(sse_stream("data: [DONE]\n\n")) });

        let messages = drain(&mut rx).await;
        assert!(messages.iter().all(|m| m.generation() == current));
        assert!(matches!(messages.last(), Some(TurnMessage::Completed { .. })));
    }

    #[tokio::test]
    async fn test_cancel_without_turn() {
        let (mut controller, _rx) = TurnController::new();
        assert!(!controller.cancel());
    }
}
