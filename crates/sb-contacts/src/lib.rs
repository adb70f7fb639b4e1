//! sb-contacts: Address-book sync for scriptbot
//!
//! Pushes contacts captured by the conversation script to Google Contacts
//! through the People API.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sb_contacts::GoogleContactsClient;
//! use sb_core::{ContactRecord, ContactSync, ContactsConfig};
//!
//! let client = GoogleContactsClient::new(&ContactsConfig::default())?;
//! let record = ContactRecord::new("Thembi", Some("+27810000001".into()), "Tribe Group");
//! let outcome = client.sync(&record).await;
//! ```
//!
//! Credentials must be provisioned out of band; this crate never runs an
//! OAuth flow.

pub mod client;
pub mod error;
pub mod models;

pub use client::GoogleContactsClient;
pub use error::{ContactsError, Result};
pub use models::{Person, PersonPayload, TokenFile};
