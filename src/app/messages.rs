//! TurnMessage enum for communication from a running turn.

use crate::error::StreamError;
use crate::progress::ProgressState;

/// Messages sent by a turn task to its consumer.
///
/// Every message carries the generation of the turn that produced it, so a
/// consumer can drop output from a turn that has since been replaced.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnMessage {
    /// The projected progress changed
    Progress { generation: u64, state: ProgressState },
    /// The stream finished; sent at most once per turn
    Completed { generation: u64, state: ProgressState },
    /// The stream failed; sent at most once per turn
    Failed {
        generation: u64,
        error: StreamError,
        state: ProgressState,
    },
}

impl TurnMessage {
    /// Generation of the turn that sent this message.
    pub fn generation(&self) -> u64 {
        match self {
            TurnMessage::Progress { generation, .. }
            | TurnMessage::Completed { generation, .. }
            | TurnMessage::Failed { generation, .. } => *generation,
        }
    }

    /// Progress state carried by this message.
    pub fn state(&self) -> &ProgressState {
        match self {
            TurnMessage::Progress { state, .. }
            | TurnMessage::Completed { state, .. }
            | TurnMessage::Failed { state, .. } => state,
        }
    }

    /// Check if this is the last message of its turn.
    pub fn is_final(&self) -> bool {
        !matches!(self, TurnMessage::Progress { .. })
    }
}
