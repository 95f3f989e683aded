//! Reader configuration (_config.yml + environment)

use anyhow::Result;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variables holding the store URL, most specific first
const URL_VARS: [&str; 2] = ["SUPABASE_URL", "VITE_SUPABASE_URL"];

/// Environment variables holding the public access key, most specific first
const KEY_VARS: [&str; 2] = ["SUPABASE_ANON_KEY", "VITE_SUPABASE_ANON_KEY"];

/// Main reader configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    // Site
    pub title: String,
    pub tagline: String,

    // Store
    pub supabase_url: String,
    pub supabase_anon_key: String,

    // Display
    pub excerpt_length: usize,
    pub timezone: String,
    pub date_format: String,

    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            title: "blog".to_string(),
            tagline: "thoughts on backend, ai, and building things".to_string(),

            supabase_url: String::new(),
            supabase_anon_key: String::new(),

            excerpt_length: 200,
            timezone: "UTC".to_string(),
            date_format: "MMM D, YYYY".to_string(),

            highlight: HighlightConfig::default(),
        }
    }
}

impl ReaderConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: ReaderConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Override store settings from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_from(|name| std::env::var(name).ok());
    }

    /// Override store settings from an arbitrary variable lookup
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |names: &[&str]| {
            names
                .iter()
                .filter_map(|&name| lookup(name))
                .find(|value| !value.is_empty())
        };

        if let Some(url) = first(&URL_VARS) {
            self.supabase_url = url;
        }
        if let Some(key) = first(&KEY_VARS) {
            self.supabase_anon_key = key;
        }
    }

    /// Timezone used to display post dates
    pub fn tz(&self) -> Tz {
        match self.timezone.parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                tracing::warn!("Unknown timezone {:?}, falling back to UTC", self.timezone);
                Tz::UTC
            }
        }
    }
}

/// Server-side syntax highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: false,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}
