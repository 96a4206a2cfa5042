//! Registry against disk reconciliation.

use crate::check::metadata::DiscoveredFile;
use crate::check::schema::RegistryEntry;
use crate::check::{IssueKind, Report};
use crate::runtime::context::CheckContext;
use std::collections::{BTreeSet, HashSet};

/// Reconcile registered slugs with the slugs found on disk.
///
/// Registered slugs without any file are errors. Files whose slug is not registered are
/// orphans and only warn, since content may be staged before it is registered.
pub fn cross_reference(
    ctx: &CheckContext,
    entries: &[RegistryEntry],
    discovered: &[DiscoveredFile],
    report: &mut Report,
) {
    let on_disk: BTreeSet<&str> = discovered.iter().map(|file| file.slug.as_str()).collect();
    let registered: HashSet<&str> = entries.iter().map(|entry| entry.slug.as_str()).collect();

    for entry in entries {
        if on_disk.contains(entry.slug.as_str()) {
            let locales = locales_with_file(ctx, &entry.slug);
            report.success(format!(
                "\"{}\" exists in: {}",
                entry.slug,
                locales.join(", ")
            ));
        } else {
            report.error(
                IssueKind::Referential,
                format!(
                    "\"{}\" is registered but has no article file in any locale",
                    entry.slug
                ),
            );
        }
    }

    for slug in on_disk.iter().filter(|slug| !registered.contains(*slug)) {
        report.warn(
            IssueKind::Referential,
            format!("orphaned article \"{slug}\" has files but no registry entry"),
        );
    }
}

/// Locales with a file for `slug`, checked directly on disk rather than taken from the
/// inventory, so a file that failed metadata validation still counts.
fn locales_with_file<'a>(ctx: &'a CheckContext, slug: &str) -> Vec<&'a str> {
    ctx.locales()
        .iter()
        .filter(|locale| ctx.article_path(locale, slug).is_file())
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::schema::{LocalizedKeywords, LocalizedText};
    use crate::check::Level;
    use crate::runtime::config::CheckConfig;
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_test_root() -> PathBuf {
        let root = std::env::temp_dir().join(format!(
            "content-check-crossref-test-{}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("time")
                .as_nanos()
        ));
        fs::create_dir_all(&root).expect("create temp root");
        root
    }

    fn entry(slug: &str) -> RegistryEntry {
        RegistryEntry {
            slug: slug.to_string(),
            route: format!("/{slug}"),
            name: LocalizedText::default(),
            description: None,
            keywords: LocalizedKeywords::default(),
            pinned: false,
            order: None,
        }
    }

    fn touch(root: &Path, rel: &str) -> DiscoveredFile {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("create dir");
        fs::write(&path, "").expect("write file");
        let mut parts = rel.trim_start_matches("articles/").split('/');
        let locale = parts.next().expect("locale").to_string();
        let slug = parts
            .next()
            .and_then(|name| name.strip_suffix(".mdx"))
            .expect("slug")
            .to_string();
        DiscoveredFile { locale, slug }
    }

    #[test]
    fn registered_slug_lists_locales_found_on_disk() {
        let root = unique_test_root();
        let discovered = vec![
            touch(&root, "articles/en/faq.mdx"),
            touch(&root, "articles/ru/faq.mdx"),
        ];
        let ctx = CheckContext::new(root.clone(), CheckConfig::default());
        let mut report = Report::default();

        cross_reference(&ctx, &[entry("faq")], &discovered, &mut report);
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.warning_count(), 0);
        assert_eq!(report.entries()[0].message, "\"faq\" exists in: en, ru");

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn locale_list_comes_from_disk_not_inventory() {
        let root = unique_test_root();
        let en = touch(&root, "articles/en/faq.mdx");
        touch(&root, "articles/cz/faq.mdx");
        let ctx = CheckContext::new(root.clone(), CheckConfig::default());
        let mut report = Report::default();

        cross_reference(&ctx, &[entry("faq")], &[en], &mut report);
        assert_eq!(report.entries()[0].message, "\"faq\" exists in: en, cz");

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn unregistered_and_missing_slugs_are_reported() {
        let root = unique_test_root();
        let discovered = vec![
            touch(&root, "articles/en/old-page.mdx"),
            touch(&root, "articles/ru/old-page.mdx"),
        ];
        let ctx = CheckContext::new(root.clone(), CheckConfig::default());
        let mut report = Report::default();

        cross_reference(&ctx, &[entry("guide")], &discovered, &mut report);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        let levels: Vec<Level> = report.entries().iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![Level::Error, Level::Warning]);
        assert!(report.entries()[0].message.contains("\"guide\""));
        assert!(report.entries()[1].message.contains("\"old-page\""));

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn empty_registry_turns_every_slug_into_an_orphan() {
        let root = unique_test_root();
        let discovered = vec![
            touch(&root, "articles/en/a.mdx"),
            touch(&root, "articles/ru/a.mdx"),
            touch(&root, "articles/cz/b.mdx"),
        ];
        let ctx = CheckContext::new(root.clone(), CheckConfig::default());
        let mut report = Report::default();

        cross_reference(&ctx, &[], &discovered, &mut report);
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.warning_count(), 2);

        let _ = fs::remove_dir_all(root);
    }
}
