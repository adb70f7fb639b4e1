//! Scripted conversation module
//!
//! Per-contact state machine driving the Blossom / Tribe script.

mod clock;
mod handler;
pub mod script;
mod store;
mod types;

pub use clock::{Clock, SystemClock};
pub use handler::ConversationHandler;
pub use store::{InMemoryStateStore, StateStore};
pub use types::{Choice, ContactKey, ContactState, Reply, Step, Turn};
