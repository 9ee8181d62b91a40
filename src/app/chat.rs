//! Chat session: the streaming chat flow of one conversation.
//!
//! A turn saves the user's prompt, streams the search pipeline for it, and
//! persists the final answer as an AI message.

use uuid::Uuid;

use super::{TurnController, TurnMessage};
use crate::api::KhojClient;
use crate::error::{ApiResult, StreamError};
use crate::models::{title_from_prompt, ConversationDto, Role};
use crate::progress::ProgressState;

/// Outcome of one completed turn.
#[derive(Debug, Clone)]
pub struct TurnResult {
    /// The conversation as the backend last returned it
    pub conversation: ConversationDto,
    /// Final projected progress
    pub progress: ProgressState,
    /// The answer, if the pipeline produced one
    pub answer: Option<String>,
}

/// A user's chat in one conversation.
pub struct ChatSession {
    client: KhojClient,
    user_id: Uuid,
    conversation_id: Option<Uuid>,
    turns: TurnController,
    messages: tokio::sync::mpsc::UnboundedReceiver<TurnMessage>,
}

impl ChatSession {
    /// Start a session that creates its conversation on the first prompt.
    pub fn new(client: KhojClient, user_id: Uuid) -> Self {
        let (turns, messages) = TurnController::new();
        Self {
            client,
            user_id,
            conversation_id: None,
            turns,
            messages,
        }
    }

    /// Continue an existing conversation.
    pub fn with_conversation(mut self, conversation_id: Uuid) -> Self {
        self.conversation_id = Some(conversation_id);
        self
    }

    /// Current conversation, once one exists.
    pub fn conversation_id(&self) -> Option<Uuid> {
        self.conversation_id
    }

    /// Create the conversation if needed, titled after `prompt`.
    pub async fn ensure_conversation(&mut self, prompt: &str) -> ApiResult<Uuid> {
        if let Some(id) = self.conversation_id {
            return Ok(id);
        }
        let title = title_from_prompt(prompt);
        let conversation = self.client.create_conversation(self.user_id, &title).await?;
        tracing::info!("Created conversation '{}' ({})", conversation.title, conversation.id);
        self.conversation_id = Some(conversation.id);
        Ok(conversation.id)
    }

    /// Send a prompt and drive its turn to the end.
    ///
    /// `on_progress` sees every progress update of this turn, including the
    /// final state. A stream failure is returned after the final state has
    /// been reported.
    pub async fn send<F>(&mut self, prompt: &str, mut on_progress: F) -> ApiResult<TurnResult>
    where
        F: FnMut(&ProgressState),
    {
        let conversation_id = self.ensure_conversation(prompt).await?;
        let mut conversation = self
            .client
            .create_message(conversation_id, Role::User, prompt)
            .await?;

        let client = self.client.clone();
        let request = prompt.to_string();
        let generation = self.turns.start(async move {
            client
                .stream_search(&request)
                .await
                .map_err(StreamError::from)
        });

        let (progress, failure) = loop {
            let Some(message) = self.messages.recv().await else {
                return Err(StreamError::Cancelled.into());
            };
            if message.generation() != generation {
                tracing::warn!("Dropping message from stale turn {}", message.generation());
                continue;
            }
            match message {
                TurnMessage::Progress { state, .. } => on_progress(&state),
                TurnMessage::Completed { state, .. } => break (state, None),
                TurnMessage::Failed { state, error, .. } => break (state, Some(error)),
            }
        };

        on_progress(&progress);
        if let Some(error) = failure {
            return Err(error.into());
        }

        let answer = progress
            .final_content
            .clone()
            .filter(|answer| !answer.trim().is_empty());
        if let Some(ref answer) = answer {
            conversation = self
                .client
                .create_message(conversation_id, Role::Ai, answer)
                .await?;
        } else {
            tracing::warn!("Turn {} finished without an answer", generation);
        }

        Ok(TurnResult {
            conversation,
            progress,
            answer,
        })
    }

    /// Abort the running turn, if any.
    pub fn cancel(&mut self) -> bool {
        self.turns.cancel()
    }
}
