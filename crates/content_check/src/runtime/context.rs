//! Shared context passed into every validation step.

use crate::runtime::config::CheckConfig;
use std::path::{Component, Path, PathBuf};

/// Repository root plus the resolved layout config.
#[derive(Clone, Debug)]
pub struct CheckContext {
    root: PathBuf,
    config: CheckConfig,
}

impl CheckContext {
    /// Create a context for `root` using an already validated config.
    pub fn new(root: impl Into<PathBuf>, config: CheckConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolved layout config.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Configured locale codes, in reporting order.
    pub fn locales(&self) -> &[String] {
        &self.config.locales
    }

    /// Article source extension, without the leading dot.
    pub fn extension(&self) -> &str {
        &self.config.extension
    }

    /// Registry file location.
    pub fn registry_path(&self) -> PathBuf {
        self.root.join(&self.config.registry)
    }

    /// Articles root directory.
    pub fn articles_root(&self) -> PathBuf {
        self.root.join(&self.config.articles_dir)
    }

    /// Directory holding one locale's article sources.
    pub fn locale_dir(&self, locale: &str) -> PathBuf {
        self.articles_root().join(locale)
    }

    /// Expected location of one article translation.
    pub fn article_path(&self, locale: &str, slug: &str) -> PathBuf {
        self.locale_dir(locale)
            .join(format!("{slug}.{}", self.config.extension))
    }

    /// Root-relative, `/`-separated path for transcript lines.
    pub fn display_path(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                Component::CurDir => Some(".".to_string()),
                Component::ParentDir => Some("..".to_string()),
                Component::RootDir | Component::Prefix(_) => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_configured_layout() {
        let ctx = CheckContext::new("/repo", CheckConfig::default());
        assert_eq!(ctx.registry_path(), PathBuf::from("/repo/config.json"));
        assert_eq!(
            ctx.article_path("ru", "faq"),
            PathBuf::from("/repo/articles/ru/faq.mdx")
        );
        assert_eq!(
            ctx.display_path(&ctx.article_path("en", "faq")),
            "articles/en/faq.mdx"
        );
    }
}
