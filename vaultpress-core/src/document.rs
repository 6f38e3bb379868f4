//! Publishing of a single vault document.

use crate::{
    assets::AssetRelocator,
    config::Config,
    frontmatter::{parse_frontmatter, render_document, split_frontmatter, FrontmatterError},
    markdown::rewrite_wikilinks,
    models::{Outcome, PublishedNote, SkipReason},
    slug::slugify,
};
use chrono::NaiveDate;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] FrontmatterError),

    #[error("Failed to relocate image: {0}")]
    Asset(#[source] io::Error),

    #[error("Output file name {0:?} is not a plain file name")]
    UnsafeFileName(String),
}

impl DocumentError {
    fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Publish one vault document into the site
///
/// Files without frontmatter and files not flagged `publish` are skipped.
/// Otherwise wikilinks and image embeds are rewritten and the document is
/// written to `<site>/<collection>/<date>-<slug>.md`, replacing any file of
/// the same name.
pub fn publish_document(
    path: &Path,
    config: &Config,
    today: NaiveDate,
) -> Result<Outcome, DocumentError> {
    let content = fs::read_to_string(path).map_err(DocumentError::io(path))?;

    let Some((header, body)) = split_frontmatter(&content) else {
        return Ok(Outcome::Skipped(SkipReason::NoFrontmatter));
    };

    let frontmatter = parse_frontmatter(header)?;
    if !frontmatter.publish {
        return Ok(Outcome::Skipped(SkipReason::Unpublished));
    }

    let body = rewrite_wikilinks(body);
    let source_images = config.source_images_dir();
    let target_images = config.target_images_dir();
    let body = AssetRelocator::new(&source_images, &target_images)
        .relocate(&body)
        .map_err(DocumentError::Asset)?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let date = frontmatter.resolved_date(today);
    let file_name = format!("{}-{}.md", date, slugify(&frontmatter.resolved_title(&stem)));
    if !is_plain_file_name(&file_name) {
        return Err(DocumentError::UnsafeFileName(file_name));
    }

    let collection = frontmatter.collection();
    let output_dir = config.collection_dir(collection);
    fs::create_dir_all(&output_dir).map_err(DocumentError::io(&output_dir))?;

    let output = output_dir.join(&file_name);
    let document = render_document(&frontmatter, &body)?;
    fs::write(&output, document).map_err(DocumentError::io(&output))?;

    let source_name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    tracing::info!("Processed: {} -> {}", source_name, file_name);

    Ok(Outcome::Published(PublishedNote {
        source: path.to_path_buf(),
        output,
        collection,
    }))
}

/// A single normal path component, so joining it stays inside the collection
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}
