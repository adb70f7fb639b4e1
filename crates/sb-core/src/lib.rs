//! sb-core: scriptbot core library
//!
//! 会話スクリプトの状態機械、連絡先同期の境界、
//! 設定の読み込みを提供します。

pub mod config;
pub mod conversation;
pub mod error;
pub mod sync;

pub use config::{ApiConfig, Config, ContactsConfig, ConversationConfig};
pub use conversation::{ConversationHandler, InMemoryStateStore, Reply, StateStore};
pub use error::{Error, Result};
pub use sync::{ContactRecord, ContactSync, DisabledContactSync, SyncOutcome};
