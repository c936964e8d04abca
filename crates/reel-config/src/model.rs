//! Configuration schema for Reel.

use reel_protocol::{Delta, Record};
use serde::{Deserialize, Serialize};

/// Root config for the Reel editor.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReelConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub publisher: PublisherConfig,
    #[serde(default)]
    pub form: FormConfig,
}

/// Which publisher implementation receives saves.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PublisherKind {
    /// In-process mock API.
    #[default]
    Mock,
    /// JSON POST to `endpoint`.
    Http,
}

/// Persistence collaborator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublisherConfig {
    #[serde(default)]
    pub kind: PublisherKind,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub mock: MockConfig,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            kind: PublisherKind::default(),
            endpoint: None,
            timeout_ms: default_timeout_ms(),
            mock: MockConfig::default(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    10_000
}

/// Behaviour of the in-process mock API.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MockConfig {
    /// Artificial delay before each post resolves.
    #[serde(default)]
    pub latency_ms: u64,
    /// Reject every post.
    #[serde(default)]
    pub fail: bool,
}

/// Form behaviour and initial record overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Save (unpublished) whenever a scalar field loses focus.
    #[serde(default = "default_autosave_on_blur")]
    pub autosave_on_blur: bool,
    /// Fields overriding the default record at start-up.
    #[serde(default)]
    pub initial: Option<Delta>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            autosave_on_blur: default_autosave_on_blur(),
            initial: None,
        }
    }
}

fn default_autosave_on_blur() -> bool {
    true
}

impl FormConfig {
    /// Default record with the configured initial overrides applied.
    pub fn initial_record(&self) -> Record {
        let record = Record::default();
        match &self.initial {
            Some(delta) => record.apply(delta),
            None => record,
        }
    }
}
