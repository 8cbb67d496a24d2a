//! Wizard settings file handling.
//!
//! The settings decide which country counts as "home" for residency
//! derivation and which countries the registration-country select offers.
//! They are stored as JSON and validated after loading.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Home country used when no settings file is given
pub const DEFAULT_HOME_COUNTRY: &str = "Russian Federation";

/// Countries offered when no settings file is given
pub const DEFAULT_COUNTRIES: &[&str] = &[
    "Russian Federation",
    "USA",
    "Germany",
    "China",
    "Kazakhstan",
];

/// Settings shared by every step of one wizard session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardSettings {
    /// Registration in this country (with a domestic tax id) implies residency
    pub home_country: String,
    /// Options of the registration-country select, in display order
    pub countries: Vec<String>,
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            home_country: DEFAULT_HOME_COUNTRY.to_string(),
            countries: DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl WizardSettings {
    /// Save settings to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize settings to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write settings to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load settings from a JSON file and validate them
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings from {:?}", path.as_ref()))?;

        let settings: Self =
            serde_json::from_str(&content).context("Failed to parse settings JSON")?;
        settings.validate()?;

        tracing::debug!(
            home_country = %settings.home_country,
            countries = settings.countries.len(),
            "Loaded wizard settings"
        );
        Ok(settings)
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.home_country.trim().is_empty() {
            anyhow::bail!("Home country must be specified");
        }
        if self.countries.is_empty() {
            anyhow::bail!("At least one registration country must be offered");
        }

        let mut seen = HashSet::new();
        for country in &self.countries {
            if country.trim().is_empty() {
                anyhow::bail!("Country names cannot be blank");
            }
            if !seen.insert(country.as_str()) {
                anyhow::bail!("Country {:?} is listed more than once", country);
            }
        }

        if !seen.contains(self.home_country.as_str()) {
            anyhow::bail!(
                "Home country {:?} must be one of the offered countries",
                self.home_country
            );
        }

        Ok(())
    }

    /// Whether `country` is one of the offered options
    pub fn offers(&self, country: &str) -> bool {
        self.countries.iter().any(|c| c == country)
    }

    /// The option after (or before) `current`, wrapping around.
    ///
    /// An unknown or missing current value moves onto the first (or last)
    /// option.
    pub fn cycle_country(&self, current: Option<&str>, forward: bool) -> Option<&str> {
        let last = self.countries.len().checked_sub(1)?;
        let index = match current.and_then(|c| self.countries.iter().position(|o| o == c)) {
            None if forward => 0,
            None => last,
            Some(i) if forward => if i == last { 0 } else { i + 1 },
            Some(i) => if i == 0 { last } else { i - 1 },
        };
        self.countries.get(index).map(String::as_str)
    }
}
