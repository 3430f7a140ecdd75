//! Configuration of the Spanish engine.

use serde::{Deserialize, Serialize};

use crate::confusion::{spanish_default_confusion_rules, ConfusionTable};

/// Spanish engine configuration: the core `Config` flattened in, plus the
/// confusable pairs and analyzer switches.
///
/// ```rust
/// use libespanol::SpanishConfig;
///
/// let config = SpanishConfig::from_toml_str(r#"
///     max_suggestions = 3
///     confusions = ["r=rr:high", "b=v:medium"]
/// "#).unwrap();
/// assert_eq!(config.base().max_suggestions, 3);
/// assert_eq!(config.confusion_table().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SpanishConfig {
    /// Base configuration fields (thresholds, weights, limits)
    #[serde(flatten)]
    pub base: libpronuncia_core::Config,

    /// Confusable pairs, e.g. "r=rr:high:consonant"
    pub confusions: Vec<String>,

    /// Flag target letters (h, ll, j) that the transcript dropped
    pub check_silent_letters: bool,

    /// Compare written accents of the raw strings
    pub check_accents: bool,
}

impl Default for SpanishConfig {
    fn default() -> Self {
        Self {
            base: libpronuncia_core::Config::default(),
            confusions: spanish_default_confusion_rules(),
            check_silent_letters: true,
            check_accents: true,
        }
    }
}

impl SpanishConfig {
    /// Load and validate configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("read config {}: {}", path.display(), e))?;
        let config = Self::from_toml_str(&content)?;
        config.base.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Convert this config into the base config.
    pub fn into_base(self) -> libpronuncia_core::Config {
        self.base
    }

    /// Get a reference to the base config
    pub fn base(&self) -> &libpronuncia_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config
    pub fn base_mut(&mut self) -> &mut libpronuncia_core::Config {
        &mut self.base
    }

    /// Parse `confusions` into a lookup table.
    pub fn confusion_table(&self) -> ConfusionTable {
        ConfusionTable::from_rules(&self.confusions)
    }
}
