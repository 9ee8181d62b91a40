//! Authentication module.
//!
//! - Session storage in the user's home directory
//! - Sign-up, guest, and login flows against the backend

pub mod flow;
pub mod session;

pub use session::{Session, SessionStore};
