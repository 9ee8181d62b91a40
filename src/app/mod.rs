//! Chat turn orchestration.
//!
//! - [`TurnController`] - at most one live streamed turn, with generations
//! - [`TurnMessage`] - messages from a running turn
//! - [`ChatSession`] - the prompt/stream/persist flow of one conversation

mod chat;
mod messages;
mod turn;

pub use chat::{ChatSession, TurnResult};
pub use messages::TurnMessage;
pub use turn::{run_turn, TurnController};
