//! Run configuration: where the vault lives and where the site is written.

use crate::models::Collection;
use std::path::{Path, PathBuf};

/// Default name of the source vault directory
pub const DEFAULT_VAULT_DIR: &str = "obsidian-vault";

/// Default name of the destination site directory
pub const DEFAULT_SITE_DIR: &str = "blog";

/// Directory, relative to both roots, that holds image assets
pub const IMAGES_SUBDIR: &str = "assets/images";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Source vault directory
    pub vault_dir: PathBuf,

    /// Destination site directory
    pub site_dir: PathBuf,

    /// Remove previously published documents before publishing
    pub clean: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vault_dir: PathBuf::from(DEFAULT_VAULT_DIR),
            site_dir: PathBuf::from(DEFAULT_SITE_DIR),
            clean: false,
        }
    }
}

impl Config {
    /// Default directory names resolved against `root`
    pub fn rooted_at(root: &Path) -> Self {
        Self::default().resolve_against(root)
    }

    /// Resolve relative directories against `root`; absolute ones are kept.
    pub fn resolve_against(mut self, root: &Path) -> Self {
        self.vault_dir = resolve_path(root, &self.vault_dir);
        self.site_dir = resolve_path(root, &self.site_dir);
        self
    }

    pub fn source_images_dir(&self) -> PathBuf {
        self.vault_dir.join(IMAGES_SUBDIR)
    }

    pub fn target_images_dir(&self) -> PathBuf {
        self.site_dir.join(IMAGES_SUBDIR)
    }

    /// Output directory for a destination collection (`_notes` or `_posts`)
    pub fn collection_dir(&self, collection: Collection) -> PathBuf {
        self.site_dir.join(collection.dir_name())
    }
}

fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
