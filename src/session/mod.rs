//! Session management.

mod client;
mod scope;

pub use client::{Session, SessionClient, SessionState};
pub use scope::with_session;
