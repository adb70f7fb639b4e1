//! Google People API client implementation

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use sb_core::{ContactRecord, ContactSync, ContactsConfig, SyncOutcome};
use tracing::{debug, error, info};

use crate::error::{ContactsError, Result};
use crate::models::{Person, PersonPayload, TokenFile};

/// People API client for pushing new contacts
pub struct GoogleContactsClient {
    client: Client,
    base_url: String,
    access_token: Option<String>,
    token_path: PathBuf,
}

impl GoogleContactsClient {
    /// Create a new People API client
    pub fn new(config: &ContactsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ContactsError::Configuration(e.to_string()))?;

        let base_url = config.api_base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ContactsError::Configuration(
                "People API base URL is empty".to_string(),
            ));
        }

        info!("Contacts client initialized for: {}", base_url);

        Ok(Self {
            client,
            base_url,
            access_token: config.access_token.clone(),
            token_path: PathBuf::from(&config.token_path),
        })
    }

    /// Resolve the bearer token
    ///
    /// The token file is read on every call so an external refresher can
    /// rotate it without restarting the server.
    async fn bearer_token(&self) -> Result<String> {
        if let Some(token) = &self.access_token {
            return Ok(token.clone());
        }

        let content = tokio::fs::read_to_string(&self.token_path)
            .await
            .map_err(|e| {
                ContactsError::Credentials(format!(
                    "cannot read token file {}: {}",
                    self.token_path.display(),
                    e
                ))
            })?;

        let file: TokenFile = serde_json::from_str(&content).map_err(|e| {
            ContactsError::Credentials(format!(
                "invalid token file {}: {}",
                self.token_path.display(),
                e
            ))
        })?;

        file.bearer().map(str::to_string).ok_or_else(|| {
            ContactsError::Credentials(format!(
                "no access token in {}",
                self.token_path.display()
            ))
        })
    }

    /// Create a contact in the authenticated user's address book
    pub async fn create_contact(&self, record: &ContactRecord) -> Result<Person> {
        let token = self.bearer_token().await?;
        let url = format!("{}/v1/people:createContact", self.base_url);

        debug!("Creating contact: {}", record.name);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&PersonPayload::from(record))
            .send()
            .await
            .map_err(|e| ContactsError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Create contact failed: {} - {}", status, error_text);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    ContactsError::Authentication(format!("{} - {}", status, error_text))
                }
                _ => ContactsError::Api(format!("{} - {}", status, error_text)),
            });
        }

        let person: Person = response
            .json()
            .await
            .map_err(|e| ContactsError::ParseError(e.to_string()))?;

        info!(
            "Created contact: {}",
            person.resource_name.as_deref().unwrap_or("<unnamed>")
        );
        Ok(person)
    }
}

#[async_trait]
impl ContactSync for GoogleContactsClient {
    async fn sync(&self, record: &ContactRecord) -> SyncOutcome {
        match self.create_contact(record).await {
            Ok(person) => SyncOutcome::Synced {
                resource_name: person.resource_name,
            },
            Err(e) => SyncOutcome::failed(e.to_string()),
        }
    }
}
