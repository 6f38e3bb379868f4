//! Vault publishing - discovers notes, publishes each one and reports totals.

use crate::{
    config::Config,
    document::publish_document,
    models::{Collection, Outcome, PublishFailure, PublishReport, SkipReason},
};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Vault directory not found: {0:?}")]
    MissingVault(PathBuf),

    #[error("Site directory not found: {0:?}")]
    MissingSite(PathBuf),

    #[error("Failed to clean {path:?}: {source}")]
    Clean {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Publishes every flagged note of a vault into a site
pub struct Publisher {
    config: Config,
    today: NaiveDate,
}

impl Publisher {
    /// `today` is the date used for notes that carry no `date` of their own.
    pub fn new(config: Config, today: NaiveDate) -> Self {
        Self { config, today }
    }

    /// Publish the whole vault
    ///
    /// Fails only when the vault or site directory is missing, or when
    /// cleaning was requested and could not be completed. Individual
    /// documents that fail are logged and counted in the report.
    pub fn publish(&self) -> Result<PublishReport, PublishError> {
        self.check_directories()?;

        if self.config.clean {
            self.clean_collections()?;
        }

        let markdown_files = self.discover_markdown_files();
        tracing::debug!("Found {} markdown files", markdown_files.len());

        let mut report = PublishReport::default();
        let mut written: HashMap<PathBuf, PathBuf> = HashMap::new();

        for file_path in &markdown_files {
            match publish_document(file_path, &self.config, self.today) {
                Ok(Outcome::Published(note)) => {
                    if let Some(previous) = written.insert(note.output.clone(), file_path.clone()) {
                        tracing::warn!(
                            "{:?} overwrote {:?}, published earlier from {:?}",
                            file_path,
                            note.output,
                            previous
                        );
                    }
                    report.published.push(note);
                }
                Ok(Outcome::Skipped(reason)) => {
                    match reason {
                        SkipReason::NoFrontmatter => {
                            tracing::debug!("Skipping {:?}: no frontmatter", file_path)
                        }
                        SkipReason::Unpublished => {
                            tracing::debug!("Skipping {:?}: not marked publish", file_path)
                        }
                    }
                    report.skipped += 1;
                }
                Err(e) => {
                    tracing::error!("Failed to process {:?}: {}", file_path, e);
                    report.failures.push(PublishFailure {
                        source: file_path.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        tracing::info!("Processed {} files", report.processed());

        Ok(report)
    }

    fn check_directories(&self) -> Result<(), PublishError> {
        let vault_missing = !self.config.vault_dir.is_dir();
        let site_missing = !self.config.site_dir.is_dir();

        if vault_missing {
            tracing::error!("Vault directory not found: {:?}", self.config.vault_dir);
        }
        if site_missing {
            tracing::error!("Site directory not found: {:?}", self.config.site_dir);
        }

        if vault_missing {
            Err(PublishError::MissingVault(self.config.vault_dir.clone()))
        } else if site_missing {
            Err(PublishError::MissingSite(self.config.site_dir.clone()))
        } else {
            Ok(())
        }
    }

    /// Remove previously published documents from both collections
    fn clean_collections(&self) -> Result<(), PublishError> {
        for collection in Collection::all() {
            let dir = self.config.collection_dir(collection);
            let removed = remove_markdown_files(&dir).map_err(|source| PublishError::Clean {
                path: dir.clone(),
                source,
            })?;
            if removed > 0 {
                tracing::info!("Removed {} old files from {}", removed, collection.dir_name());
            }
        }
        Ok(())
    }

    /// Discover all markdown files in the vault
    fn discover_markdown_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.config.vault_dir) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable vault entry: {}", e);
                    continue;
                }
            };

            if entry.file_type().is_file() && is_markdown(entry.path()) {
                files.push(entry.into_path());
            }
        }

        files
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}

fn remove_markdown_files(dir: &Path) -> io::Result<usize> {
    if !dir.is_dir() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_markdown(&path) {
            fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn workspace() -> (TempDir, Config) {
        let dir = tempdir().unwrap();
        let config = Config::rooted_at(dir.path());
        fs::create_dir_all(&config.vault_dir).unwrap();
        fs::create_dir_all(&config.site_dir).unwrap();
        (dir, config)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_missing_vault_is_fatal() {
        let dir = tempdir().unwrap();
        let config = Config::rooted_at(dir.path());
        fs::create_dir_all(&config.site_dir).unwrap();

        let err = Publisher::new(config, today()).publish().unwrap_err();
        assert!(matches!(err, PublishError::MissingVault(_)));
    }

    #[test]
    fn test_missing_site_is_fatal() {
        let dir = tempdir().unwrap();
        let config = Config::rooted_at(dir.path());
        fs::create_dir_all(&config.vault_dir).unwrap();
        fs::write(
            config.vault_dir.join("a.md"),
            "---\npublish: true\n---\nBody",
        )
        .unwrap();

        let err = Publisher::new(config.clone(), today()).publish().unwrap_err();
        assert!(matches!(err, PublishError::MissingSite(_)));
        assert!(!config.site_dir.exists());
    }

    #[test]
    fn test_discovers_nested_markdown_only() {
        let (_dir, config) = workspace();
        fs::create_dir_all(config.vault_dir.join("deep/er")).unwrap();
        fs::write(config.vault_dir.join("top.md"), "").unwrap();
        fs::write(config.vault_dir.join("deep/er/nested.md"), "").unwrap();
        fs::write(config.vault_dir.join("deep/notes.txt"), "").unwrap();
        fs::write(config.vault_dir.join("deep/README.MD"), "").unwrap();

        let mut files = Publisher::new(config.clone(), today()).discover_markdown_files();
        files.sort();

        assert_eq!(
            files,
            vec![
                config.vault_dir.join("deep/er/nested.md"),
                config.vault_dir.join("top.md"),
            ]
        );
    }

    #[test]
    fn test_report_counts_published_skipped_and_failed() {
        let (_dir, config) = workspace();
        let vault = &config.vault_dir;
        fs::write(vault.join("one.md"), "---\npublish: true\ntitle: One\n---\nA").unwrap();
        fs::write(
            vault.join("two.md"),
            "---\npublish: true\ntype: note\ntitle: Two\n---\nB",
        )
        .unwrap();
        fs::write(vault.join("draft.md"), "---\npublish: false\n---\nC").unwrap();
        fs::write(vault.join("plain.md"), "No header").unwrap();
        fs::write(vault.join("broken.md"), "---\ntitle: [oops\n---\nD").unwrap();

        let report = Publisher::new(config.clone(), today()).publish().unwrap();

        assert_eq!(report.processed(), 2);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].source, vault.join("broken.md"));
        assert!(config.site_dir.join("_posts/2024-06-01-one.md").is_file());
        assert!(config.site_dir.join("_notes/2024-06-01-two.md").is_file());
    }

    #[test]
    fn test_colliding_outputs_collapse_to_one_file() {
        let (_dir, config) = workspace();
        fs::create_dir_all(config.vault_dir.join("b")).unwrap();
        fs::write(
            config.vault_dir.join("first.md"),
            "---\npublish: true\ntitle: Same Title\n---\nfirst",
        )
        .unwrap();
        fs::write(
            config.vault_dir.join("b/second.md"),
            "---\npublish: true\ntitle: same title\n---\nsecond",
        )
        .unwrap();

        let report = Publisher::new(config.clone(), today()).publish().unwrap();

        assert_eq!(report.processed(), 2);
        let posts: Vec<_> = fs::read_dir(config.site_dir.join("_posts"))
            .unwrap()
            .collect();
        assert_eq!(posts.len(), 1);

        let last = report.published.last().unwrap();
        let expected_body = if last.source.ends_with("first.md") {
            "first"
        } else {
            "second"
        };
        assert!(fs::read_to_string(&last.output)
            .unwrap()
            .ends_with(expected_body));
    }

    #[test]
    fn test_existing_outputs_survive_without_clean() {
        let (_dir, config) = workspace();
        let old = config.site_dir.join("_posts/2020-01-01-old.md");
        fs::create_dir_all(old.parent().unwrap()).unwrap();
        fs::write(&old, "old").unwrap();

        Publisher::new(config, today()).publish().unwrap();

        assert!(old.is_file());
    }

    #[test]
    fn test_clean_removes_previous_outputs() {
        let (_dir, mut config) = workspace();
        let old_post = config.site_dir.join("_posts/2020-01-01-old.md");
        let old_note = config.site_dir.join("_notes/2020-01-01-old.md");
        let keep = config.site_dir.join("_posts/.gitkeep");
        for path in [&old_post, &old_note, &keep] {
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "old").unwrap();
        }
        fs::write(
            config.vault_dir.join("new.md"),
            "---\npublish: true\ntitle: New\n---\nBody",
        )
        .unwrap();
        config.clean = true;

        let report = Publisher::new(config.clone(), today()).publish().unwrap();

        assert_eq!(report.processed(), 1);
        assert!(!old_post.exists());
        assert!(!old_note.exists());
        assert!(keep.exists());
        assert!(config.site_dir.join("_posts/2024-06-01-new.md").is_file());
    }

    #[test]
    fn test_clean_without_collections_is_fine() {
        let (_dir, mut config) = workspace();
        config.clean = true;

        let report = Publisher::new(config, today()).publish().unwrap();
        assert_eq!(report.processed(), 0);
    }
}
