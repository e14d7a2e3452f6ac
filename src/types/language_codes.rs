use std::collections::HashMap;

use anyhow::{Result, bail};
use serde::Deserialize;

pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const SUPPORTED_LANGUAGES: &[&str] = &["en-US", "es-ES"];

/// Supported language codes and the fallback used when a caller passes none.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LanguageCodes {
    supported: Vec<String>,
    default: String,
}

impl Default for LanguageCodes {
    fn default() -> Self {
        Self {
            supported: SUPPORTED_LANGUAGES.iter().map(|code| code.to_string()).collect(),
            default: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl LanguageCodes {
    pub fn default_language(&self) -> &str {
        &self.default
    }

    pub fn supported(&self) -> &[String] {
        &self.supported
    }

    pub fn is_supported(&self, code: &str) -> bool {
        self.supported.iter().any(|supported| supported == code)
    }

    /// `language`, or the default code when none was given.
    pub fn resolve<'a>(&'a self, language: Option<&'a str>) -> &'a str {
        language.unwrap_or(self.default_language())
    }

    /// One empty entry per supported language.
    pub fn init_map<T>(&self) -> HashMap<String, Vec<T>> {
        self.supported
            .iter()
            .map(|code| (code.clone(), Vec::new()))
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.supported.is_empty() {
            bail!("at least one language must be supported");
        }
        if !self.is_supported(&self.default) {
            bail!(
                "default language \"{}\" is not one of {:?}",
                self.default,
                self.supported
            );
        }
        Ok(())
    }
}
