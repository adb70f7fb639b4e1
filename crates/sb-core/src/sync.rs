//! Contact sync boundary
//!
//! Defines the trait the conversation handler calls at terminal steps to
//! push a captured contact to an external address book.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A contact captured by the conversation script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Display name as captured (title-cased)
    pub name: String,
    /// Phone number, absent for anonymous callers
    pub phone_number: Option<String>,
    /// Location tag describing which path the contact completed
    pub address_line: String,
}

impl ContactRecord {
    pub fn new(
        name: impl Into<String>,
        phone_number: Option<String>,
        address_line: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone_number,
            address_line: address_line.into(),
        }
    }
}

/// Result of a sync attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The address book accepted the contact
    Synced {
        /// Identifier assigned by the remote service, if reported
        resource_name: Option<String>,
    },
    /// The contact was not stored
    Failed { reason: String },
}

impl SyncOutcome {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Synced { .. })
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Synced { resource_name } => {
                write!(f, "synced as {}", resource_name.as_deref().unwrap_or("-"))
            }
            Self::Failed { reason } => write!(f, "not synced: {}", reason),
        }
    }
}

/// Address-book sync client
///
/// Implementations must not panic and must report every failure as
/// [`SyncOutcome::Failed`].
#[async_trait]
pub trait ContactSync: Send + Sync {
    /// Push a new contact record
    async fn sync(&self, record: &ContactRecord) -> SyncOutcome;
}

/// Sync client used when address-book sync is turned off
#[derive(Debug, Default, Clone)]
pub struct DisabledContactSync;

#[async_trait]
impl ContactSync for DisabledContactSync {
    async fn sync(&self, record: &ContactRecord) -> SyncOutcome {
        debug!("Contact sync disabled, dropping contact: {}", record.name);
        SyncOutcome::failed("contact sync disabled")
    }
}
