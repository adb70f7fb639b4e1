//! Configuration management
//!
//! 設定は以下の優先順位で読み込まれます:
//! 1. 環境変数
//! 2. scriptbot.toml 設定ファイル
//! 3. デフォルト値
//!
//! 設定ファイル内では `${VAR_NAME}` 形式で環境変数を展開できます。

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::Error;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "scriptbot.toml";

/// Main configuration for scriptbot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Conversation script configuration
    #[serde(default)]
    pub conversation: ConversationConfig,

    /// Address-book sync configuration
    #[serde(default)]
    pub contacts: ContactsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Bind address for HTTP API server
    #[serde(default = "default_api_host")]
    pub host: String,

    /// Port for HTTP API server
    #[serde(default = "default_api_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_api_host(),
            port: default_api_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// Minutes of silence after which a contact's conversation is reset
    #[serde(default = "default_inactivity_minutes")]
    pub inactivity_minutes: u64,

    /// Upper bound on how long a reply waits for the contact sync call
    #[serde(default = "default_sync_timeout_secs")]
    pub sync_timeout_secs: u64,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            inactivity_minutes: default_inactivity_minutes(),
            sync_timeout_secs: default_sync_timeout_secs(),
        }
    }
}

impl ConversationConfig {
    /// Inactivity window, or `None` when the minutes overflow a `TimeDelta`
    pub fn checked_inactivity_window(&self) -> Option<chrono::Duration> {
        i64::try_from(self.inactivity_minutes)
            .ok()
            .and_then(chrono::Duration::try_minutes)
    }

    /// Inactivity window; out-of-range values never expire
    pub fn inactivity_window(&self) -> chrono::Duration {
        self.checked_inactivity_window()
            .unwrap_or(chrono::Duration::MAX)
    }

    pub fn sync_timeout(&self) -> Duration {
        Duration::from_secs(self.sync_timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactsConfig {
    /// Whether contacts are pushed to the address book at all
    #[serde(default = "default_contacts_enabled")]
    pub enabled: bool,

    /// People API base URL
    #[serde(default = "default_people_api_base_url")]
    pub api_base_url: String,

    /// Pre-provisioned OAuth access token (takes precedence over `token_path`)
    #[serde(default)]
    pub access_token: Option<String>,

    /// JSON token file written out of band
    #[serde(default = "default_token_path")]
    pub token_path: String,

    /// HTTP timeout for address-book requests
    #[serde(default = "default_contacts_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ContactsConfig {
    fn default() -> Self {
        Self {
            enabled: default_contacts_enabled(),
            api_base_url: default_people_api_base_url(),
            access_token: None,
            token_path: default_token_path(),
            timeout_secs: default_contacts_timeout_secs(),
        }
    }
}

fn default_api_host() -> String {
    "0.0.0.0".to_string()
}

fn default_api_port() -> u16 {
    8000
}

fn default_inactivity_minutes() -> u64 {
    1440
}

fn default_sync_timeout_secs() -> u64 {
    10
}

fn default_contacts_enabled() -> bool {
    true
}

fn default_people_api_base_url() -> String {
    "https://people.googleapis.com".to_string()
}

fn default_token_path() -> String {
    "token.json".to_string()
}

fn default_contacts_timeout_secs() -> u64 {
    10
}

impl Config {
    /// 設定ファイルから環境変数を展開する
    ///
    /// `${VAR_NAME}` 形式の文字列を環境変数の値に置換します。
    /// 環境変数が存在しない場合は空文字列になります。
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next(); // '{' を消費

                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// TOML 文字列から設定を読み込む（環境変数による上書きなし）
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let expanded = Self::expand_env_vars(content);
        let mut config: Config = toml::from_str(&expanded)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;

        // 空文字列のトークンは未設定として扱う
        if config
            .contacts
            .access_token
            .as_deref()
            .is_some_and(|t| t.trim().is_empty())
        {
            config.contacts.access_token = None;
        }

        Ok(config)
    }

    /// TOML 設定ファイルから設定を読み込む
    ///
    /// # 引数
    /// * `path` - TOML ファイルのパス
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut cfg = Self::from_toml_str(&content)?;

        // 既存の環境変数で上書き（環境変数が優先）
        cfg.apply_env_overrides();
        cfg.validate()?;

        Ok(cfg)
    }

    /// Load configuration from environment variables and defaults only
    pub fn from_env() -> crate::Result<Self> {
        let mut cfg = Self::default();
        cfg.apply_env_overrides();
        cfg.validate()?;
        Ok(cfg)
    }

    /// 値の範囲を検証する
    pub fn validate(&self) -> crate::Result<()> {
        if self.conversation.checked_inactivity_window().is_none() {
            return Err(Error::Config(format!(
                "inactivity_minutes out of range: {}",
                self.conversation.inactivity_minutes
            )));
        }
        Ok(())
    }

    /// デフォルトパスから設定を読み込む
    ///
    /// `./scriptbot.toml` があればそれを使い、なければ環境変数のみ。
    pub fn load() -> crate::Result<Self> {
        if Path::new(CONFIG_FILE).exists() {
            return Self::from_toml_file(CONFIG_FILE);
        }

        Self::from_env()
    }

    /// 環境変数で設定を上書きする
    fn apply_env_overrides(&mut self) {
        // API 設定の上書き
        if let Ok(host) = std::env::var("API_HOST") {
            if !host.is_empty() {
                self.api.host = host;
            }
        }
        if let Ok(port) = std::env::var("API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // 会話設定の上書き
        if let Ok(minutes) = std::env::var("INACTIVITY_MINUTES") {
            if let Ok(m) = minutes.parse() {
                self.conversation.inactivity_minutes = m;
            }
        }
        if let Ok(secs) = std::env::var("SYNC_TIMEOUT_SECS") {
            if let Ok(s) = secs.parse() {
                self.conversation.sync_timeout_secs = s;
            }
        }

        // 連絡先設定の上書き
        if let Ok(enabled) = std::env::var("CONTACTS_ENABLED") {
            self.contacts.enabled = enabled.to_lowercase() != "false";
        }
        if let Ok(url) = std::env::var("PEOPLE_API_BASE_URL") {
            if !url.is_empty() {
                self.contacts.api_base_url = url;
            }
        }
        if let Ok(token) = std::env::var("GOOGLE_ACCESS_TOKEN") {
            if !token.is_empty() {
                self.contacts.access_token = Some(token);
            }
        }
        if let Ok(path) = std::env::var("GOOGLE_TOKEN_PATH") {
            if !path.is_empty() {
                self.contacts.token_path = path;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_config_default() {
        let config = ApiConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn test_conversation_config_default() {
        let config = ConversationConfig::default();
        assert_eq!(config.inactivity_minutes, 1440);
        assert_eq!(config.inactivity_window(), chrono::Duration::hours(24));
        assert_eq!(config.sync_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_oversized_inactivity_window_does_not_wrap() {
        let config = ConversationConfig {
            inactivity_minutes: u64::MAX,
            ..Default::default()
        };
        assert!(config.checked_inactivity_window().is_none());
        assert!(config.inactivity_window() > chrono::Duration::zero());

        let config = ConversationConfig {
            inactivity_minutes: i64::MAX as u64,
            ..Default::default()
        };
        assert!(config.checked_inactivity_window().is_none());
        assert_eq!(config.inactivity_window(), chrono::Duration::MAX);
    }

    #[test]
    fn test_validate_rejects_out_of_range_inactivity() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.conversation.inactivity_minutes = u64::MAX;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_toml_out_of_range_inactivity_is_config_error() {
        let err = Config::from_toml_str("[conversation]\ninactivity_minutes = 9223372036854775807\n")
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_contacts_config_default() {
        let config = ContactsConfig::default();
        assert!(config.enabled);
        assert_eq!(config.api_base_url, "https://people.googleapis.com");
        assert!(config.access_token.is_none());
        assert_eq!(config.token_path, "token.json");
    }

    #[test]
    fn test_expand_env_vars() {
        // テスト用環境変数を設定
        unsafe {
            std::env::set_var("SCRIPTBOT_TEST_VAR", "test_value");
        }

        let result = Config::expand_env_vars("prefix_${SCRIPTBOT_TEST_VAR}_suffix");
        assert_eq!(result, "prefix_test_value_suffix");

        // 存在しない環境変数
        let result = Config::expand_env_vars("prefix_${SCRIPTBOT_NONEXISTENT_VAR}_suffix");
        assert_eq!(result, "prefix__suffix");

        unsafe {
            std::env::remove_var("SCRIPTBOT_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_env_vars_no_braces() {
        let result = Config::expand_env_vars("no_vars_here $HOME");
        assert_eq!(result, "no_vars_here $HOME");
    }

    #[test]
    fn test_toml_config_parsing() {
        let toml_content = r#"
[api]
host = "127.0.0.1"
port = 9090

[conversation]
inactivity_minutes = 30
sync_timeout_secs = 3

[contacts]
enabled = false
api_base_url = "http://localhost:1234"
access_token = "abc"
token_path = "/etc/scriptbot/token.json"
timeout_secs = 5
"#;

        let config = Config::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api.host, "127.0.0.1");
        assert_eq!(config.api.port, 9090);
        assert_eq!(config.conversation.inactivity_minutes, 30);
        assert_eq!(config.conversation.sync_timeout_secs, 3);
        assert!(!config.contacts.enabled);
        assert_eq!(config.contacts.api_base_url, "http://localhost:1234");
        assert_eq!(config.contacts.access_token.as_deref(), Some("abc"));
        assert_eq!(config.contacts.token_path, "/etc/scriptbot/token.json");
        assert_eq!(config.contacts.timeout_secs, 5);
    }

    #[test]
    fn test_toml_partial_sections_use_defaults() {
        let config = Config::from_toml_str("[api]\nport = 8081\n").unwrap();
        assert_eq!(config.api.port, 8081);
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.conversation.inactivity_minutes, 1440);
        assert!(config.contacts.enabled);
    }

    #[test]
    fn test_unset_token_variable_is_treated_as_missing() {
        let config = Config::from_toml_str(
            "[contacts]\naccess_token = \"${SCRIPTBOT_UNSET_TOKEN_VAR}\"\n",
        )
        .unwrap();
        assert!(config.contacts.access_token.is_none());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml_str("[api\nport = ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[conversation]\ninactivity_minutes = 5\n").unwrap();

        let config = Config::from_toml_file(&path).unwrap();
        assert_eq!(config.conversation.inactivity_minutes, 5);
    }

    #[test]
    fn test_from_toml_file_missing() {
        let err = Config::from_toml_file("/nonexistent/scriptbot.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
