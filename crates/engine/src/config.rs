//! YAML overrides for the convention catalogue.
//!
//! ```yaml
//! conventions:
//!   stayman:
//!     priority: 40
//!     thresholds:
//!       min_points: 8
//!   gerber:
//!     enabled: false
//! ```

use crate::catalogue::{ConventionEntry, ConventionId, Thresholds};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use types::HAND_SIZE;

/// Path reported for configuration that did not come from a file.
const INLINE: &str = "<inline>";

/// High-card points in the deck; no threshold can ask for more.
const MAX_POINTS: u8 = 40;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogueConfig {
    #[serde(default)]
    pub conventions: BTreeMap<ConventionId, ConventionOverride>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConventionOverride {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub priority: Option<u16>,
    #[serde(default)]
    pub thresholds: ThresholdOverride,
}

impl Default for ConventionOverride {
    fn default() -> Self {
        Self {
            enabled: true,
            priority: None,
            thresholds: ThresholdOverride::default(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// Fields left out keep the catalogue's value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdOverride {
    pub min_points: Option<u8>,
    pub max_points: Option<u8>,
    pub min_length: Option<u8>,
}

impl ThresholdOverride {
    pub fn merge(&self, base: Thresholds) -> Thresholds {
        Thresholds {
            min_points: self.min_points.unwrap_or(base.min_points),
            max_points: self.max_points.unwrap_or(base.max_points),
            min_length: self.min_length.unwrap_or(base.min_length),
        }
    }
}

impl CatalogueConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let path = PathBuf::from(INLINE);
        let cfg: CatalogueConfig =
            serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse {
                source,
                path: path.clone(),
            })?;
        cfg.validate()
            .map_err(|source| ConfigError::Invalid { path, source })?;
        Ok(cfg)
    }

    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let cfg: CatalogueConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Checks every override merged over the catalogue's own thresholds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let defaults = crate::catalogue::Catalogue::sayc();
        for (&id, over) in &self.conventions {
            let base = defaults
                .get(id)
                .map(|e| e.thresholds)
                .unwrap_or_default();
            validate_thresholds(id, &over.thresholds.merge(base))?;
        }
        Ok(())
    }

    /// Applies the override for `entry`, if any. Returns false when the
    /// convention is disabled.
    pub fn apply(&self, entry: &mut ConventionEntry) -> Result<bool, ConfigError> {
        let Some(over) = self.conventions.get(&entry.id) else {
            return Ok(true);
        };
        if !over.enabled {
            return Ok(false);
        }
        let thresholds = over.thresholds.merge(entry.thresholds);
        validate_thresholds(entry.id, &thresholds).map_err(|source| ConfigError::Invalid {
            path: PathBuf::from(INLINE),
            source,
        })?;
        entry.thresholds = thresholds;
        if let Some(priority) = over.priority {
            entry.priority = priority;
        }
        Ok(true)
    }
}

fn validate_thresholds(id: ConventionId, t: &Thresholds) -> Result<(), ValidationError> {
    if t.max_points > MAX_POINTS {
        return Err(ValidationError::InvalidField {
            field: format!("{} max_points", id),
            message: format!("{} is more than the {} points in the deck", t.max_points, MAX_POINTS),
        });
    }
    if t.min_points > t.max_points {
        return Err(ValidationError::InvalidField {
            field: format!("{} thresholds", id),
            message: format!(
                "min_points {} exceeds max_points {}",
                t.min_points, t.max_points
            ),
        });
    }
    if usize::from(t.min_length) > HAND_SIZE {
        return Err(ValidationError::InvalidField {
            field: format!("{} min_length", id),
            message: format!("a hand cannot hold {} cards in a suit", t.min_length),
        });
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::Catalogue;

    const OVERRIDES: &str = r#"
conventions:
  stayman:
    priority: 39
    thresholds:
      min_points: 9
  gerber:
    enabled: false
"#;

    #[test]
    fn test_parse_and_apply() {
        let config = CatalogueConfig::from_yaml_str(OVERRIDES).unwrap();
        assert_eq!(config.conventions.len(), 2);

        let catalogue = Catalogue::with_config(&config).unwrap();
        assert!(catalogue.get(ConventionId::Gerber).is_none());
        let stayman = catalogue.get(ConventionId::Stayman).unwrap();
        assert_eq!(stayman.priority, 39);
        assert_eq!(stayman.thresholds.min_points, 9);
        // Untouched fields keep the catalogue's values.
        assert_eq!(stayman.thresholds.min_length, 4);
        assert_eq!(
            catalogue.entries().len(),
            Catalogue::sayc().entries().len() - 1
        );
    }

    #[test]
    fn test_empty_config_is_the_default_catalogue() {
        let config = CatalogueConfig::from_yaml_str("conventions: {}").unwrap();
        let catalogue = Catalogue::with_config(&config).unwrap();
        let ids: Vec<_> = catalogue.entries().iter().map(|e| e.id).collect();
        let default_ids: Vec<_> = Catalogue::sayc().entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, default_ids);
    }

    #[test]
    fn test_unknown_convention_is_rejected() {
        let err = CatalogueConfig::from_yaml_str("conventions:\n  roman_key_card: {}\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let yaml = "conventions:\n  stayman:\n    thresholds:\n      min_hcp: 8\n";
        assert!(matches!(
            CatalogueConfig::from_yaml_str(yaml),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_inverted_range_is_invalid() {
        let yaml = "conventions:\n  one_notrump_opening:\n    thresholds:\n      min_points: 18\n";
        let err = CatalogueConfig::from_yaml_str(yaml).unwrap_err();
        match err {
            ConfigError::Invalid { source, .. } => {
                assert!(source.to_string().contains("exceeds max_points"));
            }
            other => panic!("expected invalid config, got {other:?}"),
        }
    }

    #[test]
    fn test_points_beyond_the_deck_are_invalid() {
        let yaml = "conventions:\n  negative_double:\n    thresholds:\n      \
                    min_points: 253\n      max_points: 255\n";
        match CatalogueConfig::from_yaml_str(yaml).unwrap_err() {
            ConfigError::Invalid { source, .. } => {
                assert!(source.to_string().contains("max_points"));
            }
            other => panic!("expected invalid config, got {other:?}"),
        }

        let yaml = "conventions:\n  negative_double:\n    thresholds:\n      max_points: 40\n";
        assert!(CatalogueConfig::from_yaml_str(yaml).is_ok());
    }

    #[test]
    fn test_apply_rejects_impossible_length() {
        let mut config = CatalogueConfig::default();
        config.conventions.insert(
            ConventionId::Preempt,
            ConventionOverride {
                thresholds: ThresholdOverride {
                    min_length: Some(14),
                    ..ThresholdOverride::default()
                },
                ..ConventionOverride::default()
            },
        );
        assert!(matches!(
            Catalogue::with_config(&config),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = CatalogueConfig::from_path("/nonexistent/catalogue.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert_eq!(err.path(), Path::new("/nonexistent/catalogue.yaml"));
    }
}
