//! Image embed relocation: `![[file]]` becomes a site-relative image and the
//! backing file is copied from the vault into the site.

use regex::Regex;
use std::fs;
use std::io;
use std::path::{Component, Path};
use std::sync::OnceLock;

/// URL prefix under which relocated images are served
pub const IMAGES_URL_PREFIX: &str = "/assets/images";

static EMBED_REGEX: OnceLock<Regex> = OnceLock::new();

fn embed_regex() -> &'static Regex {
    EMBED_REGEX.get_or_init(|| Regex::new(r"!\[\[([^\]]+)\]\]").unwrap())
}

/// Copies embedded images between the vault and site asset stores
pub struct AssetRelocator<'a> {
    source_dir: &'a Path,
    target_dir: &'a Path,
}

impl<'a> AssetRelocator<'a> {
    /// `source_dir` and `target_dir` are the `assets/images` directories of
    /// the vault and the site.
    pub fn new(source_dir: &'a Path, target_dir: &'a Path) -> Self {
        Self {
            source_dir,
            target_dir,
        }
    }

    /// Rewrite every `![[name]]` whose file exists in the vault into
    /// `![name](/assets/images/name)`, copying the file into the site.
    ///
    /// Embeds with no backing file are left untouched.
    pub fn relocate(&self, body: &str) -> io::Result<String> {
        let mut out = String::with_capacity(body.len());
        let mut last = 0;

        for caps in embed_regex().captures_iter(body) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };

            out.push_str(&body[last..whole.start()]);
            match self.relocate_one(name.as_str())? {
                Some(image) => out.push_str(&image),
                None => out.push_str(whole.as_str()),
            }
            last = whole.end();
        }

        out.push_str(&body[last..]);
        Ok(out)
    }

    fn relocate_one(&self, name: &str) -> io::Result<Option<String>> {
        if !is_contained(Path::new(name)) {
            tracing::debug!("Leaving embed with unsafe path: {}", name);
            return Ok(None);
        }

        let source = self.source_dir.join(name);
        if !source.is_file() {
            tracing::debug!("Image not found in vault: {:?}", source);
            return Ok(None);
        }

        let target = self.target_dir.join(name);
        copy_preserving_mtime(&source, &target)?;

        Ok(Some(format!("![{name}]({IMAGES_URL_PREFIX}/{name})")))
    }
}

/// Relative path made only of normal components
fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

fn copy_preserving_mtime(source: &Path, target: &Path) -> io::Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, target)?;

    let modified = fs::metadata(source)?.modified()?;
    fs::OpenOptions::new()
        .write(true)
        .open(target)?
        .set_modified(modified)?;

    tracing::debug!("Copied {:?} -> {:?}", source, target);
    Ok(())
}
