//! Definition file loading for Sextant.
//!
//! A definition file is TOML with three parts: `[settings]`, whose
//! nested tables are flattened into dotted setting keys, `[[groups]]`
//! of reusable metadata, and `[[mappings]]` holding raw alias mappings.
//! Well-known settings can be overridden from the environment.

use crate::core::builder::SextantConfiguration;
use crate::core::error::{Result, SextantError};
use crate::core::mapping::AliasMapping;
use crate::core::metadata::{Alias, MetaData, MetaDataGroup};
use crate::core::settings::{keys, Settings};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::env;
use std::fs;
use std::path::Path;

/// Environment variables mapped onto setting keys
pub const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("SEXTANT_NULL_VALUE", keys::NULL_VALUE),
    ("SEXTANT_NAMING_STRATEGY", keys::NAMING_STRATEGY),
    ("SEXTANT_PROPERTY_ACCESSOR", keys::PROPERTY_ACCESSOR),
];

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Flattened `key = value` settings
    #[serde(default, deserialize_with = "flatten_settings")]
    pub settings: BTreeMap<String, String>,

    #[serde(default)]
    pub groups: Vec<GroupConfig>,

    #[serde(default)]
    pub mappings: Vec<AliasMapping>,
}

/// Metadata group definition
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GroupConfig {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub aliases: Vec<Alias>,
    #[serde(default)]
    pub meta_data: Vec<MetaData>,
}

impl GroupConfig {
    pub fn into_group(self) -> Result<MetaDataGroup> {
        let mut group = MetaDataGroup::new(self.id);
        group.display_name = self.display_name;
        group.description = self.description;
        for alias in self.aliases {
            group.add_alias(alias)?;
        }
        for meta_data in self.meta_data {
            group.add_meta_data(meta_data)?;
        }
        Ok(group)
    }
}

fn flatten_settings<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let table = toml::Table::deserialize(deserializer)?;
    let mut settings = BTreeMap::new();
    flatten_into("", &table, &mut settings);
    Ok(settings)
}

fn flatten_into(prefix: &str, table: &toml::Table, out: &mut BTreeMap<String, String>) {
    for (key, value) in table {
        let key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::Table(nested) => flatten_into(&key, nested, out),
            other => {
                out.insert(key, scalar_text(other));
            }
        }
    }
}

/// Arrays become comma separated lists
fn scalar_text(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Array(items) => items.iter().map(scalar_text).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            SextantError::Configuration(format!(
                "Failed to read definition file {}: {e}",
                path.display()
            ))
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        xdg.log_paths();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. SEXTANT_CONFIG env var
    /// 2. XDG config file (~/.config/sextant/config.toml)
    /// 3. ./sextant.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("SEXTANT_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("sextant.toml").exists() {
                Self::from_file("sextant.toml")?
            } else {
                Self::default()
            }
        };

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        for (var, key) in ENV_OVERRIDES {
            if let Ok(value) = env::var(var) {
                if !value.is_empty() {
                    self.settings.insert((*key).to_string(), value);
                }
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let mut group_ids = HashSet::new();
        for group in &self.groups {
            if group.id.trim().is_empty() {
                return Err(SextantError::Configuration(
                    "Meta data group id must be non-empty".to_string(),
                ));
            }
            if !group_ids.insert(group.id.as_str()) {
                return Err(SextantError::Configuration(format!(
                    "Meta data group [{}] is defined twice",
                    group.id
                )));
            }
        }

        let mut aliases = HashSet::new();
        for mapping in &self.mappings {
            if mapping.alias.trim().is_empty() {
                return Err(SextantError::Configuration(format!(
                    "A {} mapping must define an alias",
                    mapping.kind.label()
                )));
            }
            if !aliases.insert(mapping.alias.as_str()) {
                return Err(SextantError::Configuration(format!(
                    "Alias [{}] is mapped twice",
                    mapping.alias
                )));
            }
        }

        Ok(())
    }

    pub fn to_settings(&self) -> Settings {
        Settings::from_pairs(self.settings.iter().map(|(k, v)| (k.clone(), v.clone())))
    }

    /// Assemble a configuration ready to build
    pub fn into_configuration(self) -> Result<SextantConfiguration> {
        let mut configuration = SextantConfiguration::new().with_settings(self.to_settings());
        for group in self.groups {
            configuration.add_group(group.into_group()?)?;
        }
        for mapping in self.mappings {
            configuration.add_mapping(mapping)?;
        }
        Ok(configuration)
    }

    /// Log configuration summary
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Settings: {}", self.settings.len());
        for (key, value) in &self.settings {
            tracing::debug!("    {} = {}", key, value);
        }
        tracing::info!("  Meta data groups: {}", self.groups.len());
        tracing::info!("  Mappings: {}", self.mappings.len());
    }
}

impl std::str::FromStr for Config {
    type Err = SextantError;

    fn from_str(contents: &str) -> Result<Self> {
        Self::parse(contents)
    }
}
