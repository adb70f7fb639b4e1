//! Conversation handler
//!
//! Applies one script step per inbound message and triggers the contact
//! sync at terminal steps.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::ConversationConfig;
use crate::conversation::script;
use crate::conversation::{
    Choice, Clock, ContactKey, ContactState, Reply, StateStore, Step, SystemClock, Turn,
};
use crate::sync::{ContactRecord, ContactSync, SyncOutcome};

/// Drives the per-contact conversation script
pub struct ConversationHandler {
    store: Arc<dyn StateStore>,
    sync: Arc<dyn ContactSync>,
    clock: Arc<dyn Clock>,
    inactivity_window: chrono::Duration,
    sync_timeout: Duration,
}

impl ConversationHandler {
    /// Create a handler over the given store and sync client
    pub fn new(
        store: Arc<dyn StateStore>,
        sync: Arc<dyn ContactSync>,
        config: &ConversationConfig,
    ) -> Self {
        Self {
            store,
            sync,
            clock: Arc::new(SystemClock),
            inactivity_window: config.inactivity_window(),
            sync_timeout: config.sync_timeout(),
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &Arc<dyn StateStore> {
        &self.store
    }

    /// Handle one inbound message and produce the reply
    ///
    /// Never fails: unrecognized input is re-prompted and sync failures are
    /// only logged.
    pub async fn handle(&self, phone: Option<&str>, raw_message: &str) -> Reply {
        let key = ContactKey::from_phone(phone);
        if key.is_anonymous() {
            warn!("Message without phone number, using shared anonymous conversation");
        }

        let message = normalize(raw_message);
        let now = self.clock.now();
        let window = self.inactivity_window;

        let turn = self
            .store
            .apply(&key, &mut |state: &mut ContactState| advance(state, &key, &message, now, window));

        debug!(contact = %key, step = %turn.step, complete = turn.reply.complete, "Reply ready");

        if let Some(record) = turn.sync {
            self.push_contact(&record).await;
        }

        turn.reply
    }

    /// Push a contact, bounded by the sync timeout
    async fn push_contact(&self, record: &ContactRecord) -> SyncOutcome {
        let outcome = match tokio::time::timeout(self.sync_timeout, self.sync.sync(record)).await
        {
            Ok(outcome) => outcome,
            Err(_) => SyncOutcome::failed(format!(
                "timed out after {}s",
                self.sync_timeout.as_secs()
            )),
        };

        if outcome.is_success() {
            info!("Contact {} ({}) {}", record.name, record.address_line, outcome);
        } else {
            warn!("Contact {} ({}) {}", record.name, record.address_line, outcome);
        }

        outcome
    }
}

/// Trim and lowercase a raw message
fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Title-case every cased run: the first cased letter takes its titlecase
/// form and the rest of the run is lower-cased
///
/// Uncased characters (digits, punctuation, CJK) pass through and break runs.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_cased = false;
    for c in text.chars() {
        if prev_cased {
            out.extend(c.to_lowercase());
        } else {
            push_titlecase(&mut out, c);
        }
        prev_cased = is_cased(c);
    }
    out
}

fn push_titlecase(out: &mut String, c: char) {
    match c {
        'Ǆ' | 'ǅ' | 'ǆ' => out.push('ǅ'),
        'Ǉ' | 'ǈ' | 'ǉ' => out.push('ǈ'),
        'Ǌ' | 'ǋ' | 'ǌ' => out.push('ǋ'),
        'Ǳ' | 'ǲ' | 'ǳ' => out.push('ǲ'),
        'ŉ' => out.push_str("ʼN"),
        // Greek with ypogegrammeni: titlecase sits 8 code points above
        '\u{1F80}'..='\u{1F87}' | '\u{1F90}'..='\u{1F97}' | '\u{1FA0}'..='\u{1FA7}' => {
            out.push(char::from_u32(c as u32 + 8).unwrap_or(c))
        }
        '\u{1FB3}' => out.push('\u{1FBC}'),
        '\u{1FC3}' => out.push('\u{1FCC}'),
        '\u{1FF3}' => out.push('\u{1FFC}'),
        c if is_titlecase_letter(c) => out.push(c),
        c => {
            // ß -> Ss, ﬁ -> Fi
            let mut upper = c.to_uppercase();
            if let Some(first) = upper.next() {
                out.push(first);
            }
            for rest in upper {
                out.extend(rest.to_lowercase());
            }
        }
    }
}

fn is_titlecase_letter(c: char) -> bool {
    matches!(
        c,
        'ǅ' | 'ǈ'
            | 'ǋ'
            | 'ǲ'
            | '\u{1F88}'..='\u{1F8F}'
            | '\u{1F98}'..='\u{1F9F}'
            | '\u{1FA8}'..='\u{1FAF}'
            | '\u{1FBC}'
            | '\u{1FCC}'
            | '\u{1FFC}'
    )
}

fn is_cased(c: char) -> bool {
    c.is_lowercase() || c.is_uppercase() || is_titlecase_letter(c)
}

/// Apply one message to a contact's state
///
/// Every branch either leaves `state` untouched or moves it fully to the
/// next step.
fn advance(
    state: &mut ContactState,
    key: &ContactKey,
    message: &str,
    now: DateTime<Utc>,
    window: chrono::Duration,
) -> Turn {
    if state.is_stale(now, window) {
        *state = ContactState::default();
        return stay(state, script::REENGAGE);
    }

    state.last_message_at = Some(now);

    match state.step {
        Step::New => {
            state.step = Step::AwaitingTopic;
            stay(state, script::WELCOME)
        }
        Step::AwaitingTopic => match Choice::detect(message) {
            Some(choice) => {
                state.choice = Some(choice);
                state.step = Step::AskName;
                stay(state, script::ASK_NAME)
            }
            None => stay(state, script::TOPIC_REPROMPT),
        },
        Step::AskName => {
            let name = title_case(message);
            let text = match state.choice {
                Some(Choice::Blossom) => {
                    state.step = Step::BlossomOptions;
                    script::blossom_options(&name)
                }
                Some(Choice::Tribe) => {
                    state.step = Step::TribeRules;
                    script::tribe_rules(&name)
                }
                None => return stay(state, script::FALLBACK),
            };
            state.name = Some(name);
            stay(state, text)
        }
        Step::BlossomOptions => match message {
            "1" => finish(state, key, script::BLOSSOM_BUY, Some(script::TAG_BLOSSOM_BUYER)),
            "2" => finish(state, key, script::BLOSSOM_JOIN, Some(script::TAG_BLOSSOM_JOINER)),
            _ => stay(state, script::BLOSSOM_REPROMPT),
        },
        Step::TribeRules => match message {
            "1" => finish(state, key, script::TRIBE_AGREE, Some(script::TAG_TRIBE_GROUP)),
            "2" => finish(state, key, script::TRIBE_DISAGREE, None),
            _ => stay(state, script::TRIBE_REPROMPT),
        },
        Step::Complete => stay(state, script::FALLBACK),
    }
}

fn stay(state: &ContactState, text: impl Into<String>) -> Turn {
    Turn {
        reply: Reply::prompt(text),
        step: state.step,
        sync: None,
    }
}

fn finish(
    state: &mut ContactState,
    key: &ContactKey,
    text: &str,
    location: Option<&str>,
) -> Turn {
    state.step = Step::Complete;
    let sync = location.map(|location| {
        ContactRecord::new(
            state.name.clone().unwrap_or_default(),
            key.phone().map(str::to_string),
            location,
        )
    });

    Turn {
        reply: Reply::complete(text),
        step: state.step,
        sync,
    }
}
