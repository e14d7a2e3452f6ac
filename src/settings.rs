use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use once_cell::sync::OnceCell;
use serde::Deserialize;

use crate::types::language_codes::LanguageCodes;
use crate::types::price_range::PriceRange;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub languages: LanguageCodes,

    /// Price brackets offered as filter facets.
    #[serde(default = "default_price_ranges")]
    pub price_ranges: Vec<PriceRange>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            languages: LanguageCodes::default(),
            price_ranges: default_price_ranges(),
        }
    }
}

fn default_price_ranges() -> Vec<PriceRange> {
    vec![
        PriceRange::new(0.0, 50.0),
        PriceRange::new(50.0, 250.0),
        PriceRange::new(250.0, 5000.0),
    ]
}

static SETTINGS: OnceCell<Settings> = OnceCell::new();

impl Settings {
    pub const FILE_NAME: &'static str = "brewer_store.yml";

    /// Settings from `brewer_store.yml` in the working directory, or the
    /// built-in defaults when that file does not exist. Loaded once.
    pub fn load() -> Result<&'static Settings> {
        SETTINGS.get_or_try_init(|| {
            let path = Path::new(Self::FILE_NAME);
            if !path.exists() {
                tracing::debug!(file = Self::FILE_NAME, "no settings file, using defaults");
                return Ok(Settings::default());
            }

            Self::from_path(path)
        })
    }

    pub fn from_path(path: &Path) -> Result<Settings> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse settings {}", path.display()))?;

        settings
            .validate()
            .with_context(|| format!("settings validation failed for {}", path.display()))?;

        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        self.languages.validate()?;

        for range in &self.price_ranges {
            range
                .validate()
                .with_context(|| format!("invalid price range {range}"))?;
        }

        let mut ranges = self.price_ranges.iter();
        while let Some(range) = ranges.next() {
            if ranges.as_slice().contains(range) {
                bail!("duplicate price range {range}");
            }
        }

        Ok(())
    }
}
