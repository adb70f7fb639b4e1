//! Data models for the People API

use sb_core::ContactRecord;
use serde::{Deserialize, Serialize};

/// Body of a `people:createContact` request
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PersonPayload {
    pub names: Vec<Name>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub phone_numbers: Vec<PhoneNumber>,
    pub addresses: Vec<Address>,
}

impl From<&ContactRecord> for PersonPayload {
    fn from(record: &ContactRecord) -> Self {
        Self {
            names: vec![Name {
                given_name: record.name.clone(),
            }],
            phone_numbers: record
                .phone_number
                .iter()
                .map(|value| PhoneNumber {
                    value: value.clone(),
                })
                .collect(),
            addresses: vec![Address {
                street_address: record.address_line.clone(),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Name {
    pub given_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PhoneNumber {
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street_address: String,
}

/// Person returned by the People API
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Resource name, e.g. `people/c123`
    #[serde(default)]
    pub resource_name: Option<String>,
}

/// Token file provisioned out of band
///
/// Accepts both the `access_token` field of an OAuth token response and
/// the `token` field written by Google's authorized-user credentials.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TokenFile {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl TokenFile {
    pub fn bearer(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .or(self.token.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}
