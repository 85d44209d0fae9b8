//! Dynamic rule sources
//!
//! The reference data store that owns the boilerplate and wipeout patterns
//! sits behind the [`RuleSource`] trait. Two implementations are provided: a
//! TOML file and an HTTP rule service.

use crate::config::SecretString;
use crate::domain::{Result, SafeguardError};
use crate::rules::RuleKind;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Supplier of raw rule patterns
#[async_trait]
pub trait RuleSource: Send + Sync {
    /// Source name for logging
    fn name(&self) -> &str;

    /// Fetch every pattern of one kind, in order
    async fn fetch(&self, kind: RuleKind) -> Result<Vec<String>>;
}

/// Rules file layout
#[derive(Debug, Default, Deserialize)]
struct RuleDocument {
    #[serde(default)]
    boilerplate: Vec<String>,
    #[serde(default)]
    wipeout: Vec<String>,
}

/// Rules read from a TOML file with `boilerplate` and `wipeout` arrays
///
/// The file is re-read on every fetch, so a reload picks up edits.
#[derive(Debug, Clone)]
pub struct FileRuleSource {
    path: PathBuf,
}

impl FileRuleSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RuleSource for FileRuleSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self, kind: RuleKind) -> Result<Vec<String>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            SafeguardError::RuleSource(format!(
                "Failed to read rules file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let document: RuleDocument = toml::from_str(&content).map_err(|e| {
            SafeguardError::RuleSource(format!(
                "Failed to parse rules file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(match kind {
            RuleKind::Boilerplate => document.boilerplate,
            RuleKind::Wipeout => document.wipeout,
        })
    }
}

/// Rules served over HTTP
///
/// `GET {base_url}/boilerplate` and `GET {base_url}/wipeout` each return a
/// JSON array of pattern strings.
pub struct HttpRuleSource {
    base_url: String,
    client: Client,
    token: Option<SecretString>,
}

impl HttpRuleSource {
    /// Build a source with a request timeout and an optional bearer token
    pub fn new(
        base_url: impl Into<String>,
        token: Option<SecretString>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SafeguardError::RuleSource(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            token,
        })
    }

    fn url_for(&self, kind: RuleKind) -> String {
        format!("{}/{}", self.base_url, kind.as_str())
    }
}

#[async_trait]
impl RuleSource for HttpRuleSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, kind: RuleKind) -> Result<Vec<String>> {
        let url = self.url_for(kind);
        tracing::debug!(url = %url, kind = %kind, "Fetching rules");

        let mut request = self.client.get(&url);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let resp = request
            .send()
            .await
            .map_err(|e| SafeguardError::RuleSource(format!("Request to {url} failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(SafeguardError::RuleSource(format!(
                "Rule service returned {status} for {kind} rules: {body}"
            )));
        }

        resp.json::<Vec<String>>().await.map_err(|e| {
            SafeguardError::RuleSource(format!("Invalid {kind} rules response: {e}"))
        })
    }
}
