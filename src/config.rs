//! Sidebar configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{SidebarError, SidebarResult};
use crate::store::DEFAULT_SCROLL_KEY;

/// Collapsible sections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldConfig {
    /// Render toggle controls and start deeper sections collapsed
    #[serde(default)]
    pub enable: bool,
    /// Chapter items shallower than this depth start expanded
    #[serde(default)]
    pub level: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarConfig {
    /// Session storage key for the panel scroll offset
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Page a directory address resolves to
    #[serde(default = "default_index_page")]
    pub index_page: String,
    /// Prefix chapter labels with their section number
    #[serde(default = "default_numbered")]
    pub numbered: bool,
    #[serde(default)]
    pub fold: FoldConfig,
}

fn default_storage_key() -> String {
    DEFAULT_SCROLL_KEY.to_string()
}

fn default_index_page() -> String {
    "index.html".to_string()
}

fn default_numbered() -> bool {
    true
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            index_page: default_index_page(),
            numbered: default_numbered(),
            fold: FoldConfig::default(),
        }
    }
}

impl SidebarConfig {
    pub fn from_json(json: &str) -> SidebarResult<Self> {
        let config: SidebarConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> SidebarResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Enable folding, expanding chapter items shallower than `level`
    pub fn with_folding(mut self, level: usize) -> Self {
        self.fold = FoldConfig { enable: true, level };
        self
    }

    /// Apply `SIDEBAR_STORAGE_KEY`, `SIDEBAR_FOLD_ENABLE` and `SIDEBAR_FOLD_LEVEL`
    pub fn with_env_overrides(self) -> SidebarResult<Self> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> SidebarResult<Self> {
        if let Some(key) = var("SIDEBAR_STORAGE_KEY") {
            self.storage_key = key;
        }
        if let Some(enable) = var("SIDEBAR_FOLD_ENABLE") {
            self.fold.enable = match enable.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                other => {
                    return Err(SidebarError::InvalidConfig(format!(
                        "SIDEBAR_FOLD_ENABLE must be a boolean, got '{other}'"
                    )))
                }
            };
        }
        if let Some(level) = var("SIDEBAR_FOLD_LEVEL") {
            self.fold.level = level.trim().parse().map_err(|_| {
                SidebarError::InvalidConfig(format!(
                    "SIDEBAR_FOLD_LEVEL must be a non-negative integer, got '{level}'"
                ))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> SidebarResult<()> {
        if self.storage_key.trim().is_empty() {
            return Err(SidebarError::InvalidConfig(
                "storage_key must not be empty".to_string(),
            ));
        }
        if self.index_page.is_empty() || self.index_page.contains('/') {
            return Err(SidebarError::InvalidConfig(format!(
                "index_page must be a file name, got '{}'",
                self.index_page
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SidebarConfig::default();
        assert_eq!(config.storage_key, "sidebar-scroll");
        assert_eq!(config.index_page, "index.html");
        assert!(config.numbered);
        assert!(!config.fold.enable);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = SidebarConfig::from_json(r#"{"fold": {"enable": true, "level": 1}}"#).unwrap();
        assert_eq!(config.fold, FoldConfig { enable: true, level: 1 });
        assert_eq!(config.storage_key, "sidebar-scroll");
        assert_eq!(SidebarConfig::from_json("{}").unwrap(), SidebarConfig::default());
    }

    #[test]
    fn test_invalid_index_page() {
        let err = SidebarConfig::from_json(r#"{"index_page": "docs/index.html"}"#).unwrap_err();
        assert!(matches!(err, SidebarError::InvalidConfig(_)));
    }

    #[test]
    fn test_env_overrides() {
        let config = SidebarConfig::default()
            .with_overrides(vars(&[
                ("SIDEBAR_STORAGE_KEY", "book-scroll"),
                ("SIDEBAR_FOLD_ENABLE", "yes"),
                ("SIDEBAR_FOLD_LEVEL", "2"),
            ]))
            .unwrap();
        assert_eq!(config.storage_key, "book-scroll");
        assert_eq!(config.fold, FoldConfig { enable: true, level: 2 });
    }

    #[test]
    fn test_env_overrides_reject_garbage() {
        let bad_level = SidebarConfig::default().with_overrides(vars(&[("SIDEBAR_FOLD_LEVEL", "-1")]));
        assert!(matches!(bad_level, Err(SidebarError::InvalidConfig(_))));

        let bad_flag = SidebarConfig::default().with_overrides(vars(&[("SIDEBAR_FOLD_ENABLE", "maybe")]));
        assert!(matches!(bad_flag, Err(SidebarError::InvalidConfig(_))));

        let empty_key = SidebarConfig::default().with_overrides(vars(&[("SIDEBAR_STORAGE_KEY", " ")]));
        assert!(matches!(empty_key, Err(SidebarError::InvalidConfig(_))));
    }
}
