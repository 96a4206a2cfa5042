//! Typed configuration loading.

use crate::runtime::error::{CheckError, CheckResult};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Config file picked up from the repository root when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "content-check.toml";

/// Generic TOML-backed config loader.
///
/// `ConfigLoader<T>` handles only filesystem access and TOML deserialization. Semantic
/// validation happens after the typed value is loaded (see [`CheckConfig::validate`]).
#[derive(Clone, Debug)]
pub struct ConfigLoader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> ConfigLoader<T>
where
    T: DeserializeOwned,
{
    /// Create a loader for a path relative to `root`. Absolute paths are kept as-is.
    pub fn new(root: &Path, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        };
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Load and deserialize the configuration file.
    ///
    /// Missing files, unreadable files, and TOML parse failures are all surfaced as
    /// [`CheckErrorCategory::Config`](crate::runtime::error::CheckErrorCategory::Config).
    pub fn load(&self) -> CheckResult<T> {
        let body = fs::read_to_string(&self.path).map_err(|err| {
            CheckError::config(format!("failed to read {}: {err}", self.path.display()))
                .with_operation("load config")
        })?;
        toml::from_str(&body).map_err(|err| {
            CheckError::config(format!("failed to parse {}: {err}", self.path.display()))
                .with_operation("parse config")
        })
    }

    /// Return the config path on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Repository layout the checker validates.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Registry file, relative to the repository root.
    pub registry: String,
    /// Directory holding one subdirectory per locale.
    pub articles_dir: String,
    /// Article source extension, without the leading dot.
    pub extension: String,
    /// Supported locale codes, in reporting order.
    pub locales: Vec<String>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            registry: "config.json".to_string(),
            articles_dir: "articles".to_string(),
            extension: "mdx".to_string(),
            locales: vec!["en".to_string(), "ru".to_string(), "cz".to_string()],
        }
    }
}

impl CheckConfig {
    /// Resolve the effective config for a repository root.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] is used when present
    /// and the built-in defaults otherwise.
    pub fn resolve(root: &Path, explicit: Option<&Path>) -> CheckResult<Self> {
        let loaded = match explicit {
            Some(path) => ConfigLoader::<Self>::new(root, path).load()?,
            None => {
                let loader = ConfigLoader::<Self>::new(root, DEFAULT_CONFIG_FILE);
                if loader.path().is_file() {
                    loader.load()?
                } else {
                    Self::default()
                }
            }
        };
        loaded.validate()
    }

    /// Check semantic constraints and normalize the extension.
    pub fn validate(mut self) -> CheckResult<Self> {
        if self.locales.is_empty() {
            return Err(CheckError::config("`locales` must list at least one locale")
                .with_hint("for example: locales = [\"en\"]"));
        }
        let mut seen = HashSet::new();
        for locale in &self.locales {
            if locale.trim().is_empty()
                || matches!(locale.as_str(), "." | "..")
                || locale.contains(['/', '\\'])
            {
                return Err(CheckError::config(format!(
                    "invalid locale code `{locale}`"
                )));
            }
            if !seen.insert(locale.as_str()) {
                return Err(CheckError::config(format!("duplicate locale `{locale}`")));
            }
        }

        self.extension = self.extension.trim().trim_start_matches('.').to_string();
        if self.extension.is_empty() {
            return Err(CheckError::config("`extension` must not be empty"));
        }
        if self.registry.trim().is_empty() {
            return Err(CheckError::config("`registry` must not be empty"));
        }
        if self.articles_dir.trim().is_empty() {
            return Err(CheckError::config("`articles_dir` must not be empty"));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::error::CheckErrorCategory;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_test_root() -> PathBuf {
        std::env::temp_dir().join(format!(
            "content-check-config-test-{}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("time")
                .as_nanos()
        ))
    }

    #[test]
    fn resolve_falls_back_to_defaults_without_config_file() {
        let root = unique_test_root();
        fs::create_dir_all(&root).expect("create temp root");

        let config = CheckConfig::resolve(&root, None).expect("resolve defaults");
        assert_eq!(config, CheckConfig::default());

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn resolve_reads_root_config_and_keeps_defaults_for_missing_fields() {
        let root = unique_test_root();
        fs::create_dir_all(&root).expect("create temp root");
        fs::write(
            root.join(DEFAULT_CONFIG_FILE),
            "extension = \".md\"\nlocales = [\"en\", \"de\", \"fr\", \"ru\"]\n",
        )
        .expect("write config");

        let config = CheckConfig::resolve(&root, None).expect("resolve config");
        assert_eq!(config.extension, "md");
        assert_eq!(config.locales, ["en", "de", "fr", "ru"]);
        assert_eq!(config.registry, "config.json");
        assert_eq!(config.articles_dir, "articles");

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn resolve_reports_missing_explicit_file_as_config_error() {
        let root = unique_test_root();
        fs::create_dir_all(&root).expect("create temp root");

        let err = CheckConfig::resolve(&root, Some(Path::new("tools/missing.toml")))
            .expect_err("missing explicit config should fail");
        assert_eq!(err.category, CheckErrorCategory::Config);
        assert!(err.to_string().contains("missing.toml"));

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn resolve_reports_invalid_toml_as_config_error() {
        let root = unique_test_root();
        fs::create_dir_all(&root).expect("create temp root");
        fs::write(root.join("broken.toml"), "locales = [").expect("write broken config");

        let err = CheckConfig::resolve(&root, Some(Path::new("broken.toml")))
            .expect_err("invalid config should fail");
        assert_eq!(err.category, CheckErrorCategory::Config);
        assert!(err.to_string().contains("broken.toml"));

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn validate_rejects_empty_and_duplicate_locales() {
        let empty = CheckConfig {
            locales: Vec::new(),
            ..CheckConfig::default()
        };
        assert!(empty.validate().is_err());

        let duplicate = CheckConfig {
            locales: vec!["en".into(), "en".into()],
            ..CheckConfig::default()
        };
        let err = duplicate.validate().expect_err("duplicate locale");
        assert!(err.message.contains("duplicate locale `en`"));
    }

    #[test]
    fn validate_rejects_blank_extension() {
        let config = CheckConfig {
            extension: ".".into(),
            ..CheckConfig::default()
        };
        assert_eq!(
            config.validate().expect_err("blank extension").category,
            CheckErrorCategory::Config
        );
    }

    #[test]
    fn validate_rejects_locales_that_escape_the_articles_dir() {
        for code in [".", "..", "en/us", "en\\us", " "] {
            let config = CheckConfig {
                locales: vec!["en".into(), code.into()],
                ..CheckConfig::default()
            };
            let err = config.validate().expect_err("path-like locale");
            assert_eq!(err.category, CheckErrorCategory::Config);
            assert_eq!(err.message, format!("invalid locale code `{code}`"));
        }
    }
}
