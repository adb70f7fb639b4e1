//! Conversation types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::sync::ContactRecord;

/// Position of a contact within the script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Never greeted, or reset after inactivity
    #[default]
    New,
    AwaitingTopic,
    AskName,
    BlossomOptions,
    TribeRules,
    /// Terminal; further messages get the generic fallback
    Complete,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::New => "new",
            Step::AwaitingTopic => "awaiting_topic",
            Step::AskName => "ask_name",
            Step::BlossomOptions => "blossom_options",
            Step::TribeRules => "tribe_rules",
            Step::Complete => "complete",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Topic picked from the welcome menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Blossom,
    Tribe,
}

impl Choice {
    /// Detect a topic keyword in a normalized message
    ///
    /// `blossom` wins when both keywords are present.
    pub fn detect(message: &str) -> Option<Self> {
        if message.contains("blossom") {
            Some(Choice::Blossom)
        } else if message.contains("tribe") {
            Some(Choice::Tribe)
        } else {
            None
        }
    }
}

/// Key a conversation is stored under
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContactKey {
    Phone(String),
    /// Callers that sent no phone; they all share one conversation
    Anonymous,
}

impl ContactKey {
    pub fn from_phone(phone: Option<&str>) -> Self {
        match phone {
            Some(phone) => ContactKey::Phone(phone.to_string()),
            None => ContactKey::Anonymous,
        }
    }

    pub fn phone(&self) -> Option<&str> {
        match self {
            ContactKey::Phone(phone) => Some(phone),
            ContactKey::Anonymous => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, ContactKey::Anonymous)
    }
}

impl fmt::Display for ContactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactKey::Phone(phone) => f.write_str(phone),
            ContactKey::Anonymous => f.write_str("<anonymous>"),
        }
    }
}

/// Per-contact conversation state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactState {
    pub step: Step,
    /// Set once at topic selection
    pub choice: Option<Choice>,
    /// Set once at name capture
    pub name: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
}

impl ContactState {
    /// Whether the previous message is older than `window`
    pub fn is_stale(&self, now: DateTime<Utc>, window: chrono::Duration) -> bool {
        self.last_message_at
            .is_some_and(|last| now.signed_duration_since(last) > window)
    }
}

/// Reply returned to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// Set only when this reply ends the script
    pub complete: bool,
}

impl Reply {
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            complete: false,
        }
    }

    pub fn complete(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            complete: true,
        }
    }
}

/// Outcome of applying one message to a contact's state
#[derive(Debug, Clone)]
pub struct Turn {
    pub reply: Reply,
    /// Step the contact is left in
    pub step: Step,
    /// Contact to push to the address book once the state is committed
    pub sync: Option<ContactRecord>,
}
