//! Per-file metadata validation and the on-disk article inventory.

use crate::check::frontmatter::split_frontmatter;
use crate::check::schema::validate_metadata;
use crate::check::{IssueKind, Report};
use crate::runtime::context::CheckContext;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One article source file found on disk.
///
/// `slug` is the file base name. The declared metadata slug never replaces it.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DiscoveredFile {
    pub locale: String,
    pub slug: String,
}

/// Validate every article source in the given locale directories.
///
/// `locales` are the locales whose directory was found by the structure check. Each file is
/// recorded in the returned inventory whatever its validation outcome.
pub fn validate_articles(
    ctx: &CheckContext,
    locales: &[String],
    report: &mut Report,
) -> Vec<DiscoveredFile> {
    let mut discovered = Vec::new();
    let mut valid = 0usize;

    for locale in locales {
        let dir = ctx.locale_dir(locale);
        let rel_dir = ctx.display_path(&dir);
        let files = match list_article_files(&dir, ctx.extension()) {
            Ok(files) => files,
            Err(err) => {
                report.error(
                    IssueKind::Parse,
                    format!("{rel_dir}: failed to read directory: {err}"),
                );
                continue;
            }
        };
        if files.is_empty() {
            report.info(format!("no .{} files in `{rel_dir}`", ctx.extension()));
            continue;
        }

        for path in files {
            let Some(base_name) = path.file_stem().map(|s| s.to_string_lossy().into_owned())
            else {
                continue;
            };
            if validate_article_file(ctx, &path, &base_name, report) {
                valid += 1;
            }
            discovered.push(DiscoveredFile {
                locale: locale.clone(),
                slug: base_name,
            });
        }
    }

    report.info(format!(
        "{valid} of {} article file(s) passed metadata checks",
        discovered.len()
    ));
    discovered
}

/// Validate one file. Returns `true` when it passed every check.
fn validate_article_file(
    ctx: &CheckContext,
    path: &Path,
    base_name: &str,
    report: &mut Report,
) -> bool {
    let rel = ctx.display_path(path);
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            report.error(IssueKind::Parse, format!("{rel}: failed to read: {err}"));
            return false;
        }
    };

    let extracted = match split_frontmatter(&text) {
        Ok(extracted) => extracted,
        Err(err) => {
            report.error(IssueKind::Parse, format!("{rel}: {err}"));
            return false;
        }
    };

    let metadata = match validate_metadata(&extracted.metadata, ctx.locales()) {
        Ok(metadata) => metadata,
        Err(issues) => {
            for issue in issues {
                report.error(IssueKind::Schema, format!("{rel}: {issue}"));
            }
            return false;
        }
    };

    if metadata.slug != base_name {
        report.error(
            IssueKind::Identity,
            format!(
                "{rel}: slug \"{}\" does not match file name \"{base_name}\"",
                metadata.slug
            ),
        );
        return false;
    }

    report.success(rel);
    true
}

/// Files directly inside `dir` with the given extension, sorted by name.
fn list_article_files(dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;

    let mut files: Vec<PathBuf> = entries
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().is_some_and(|ext| ext == extension))
        .collect();
    files.sort();
    Ok(files)
}
