//! # vaultpress-core
//!
//! Core library for publishing an Obsidian vault into a Jekyll site.
//!
//! Notes flagged `publish: true` in their frontmatter have their wikilinks
//! rewritten into relative Markdown links, their image embeds copied into the
//! site's asset store, and are written into the site's `_notes` or `_posts`
//! collection as `<date>-<slug>.md`.

pub mod assets;
pub mod config;
pub mod document;
pub mod frontmatter;
pub mod markdown;
pub mod models;
pub mod publisher;
pub mod slug;

pub use assets::AssetRelocator;
pub use config::Config;
pub use document::{publish_document, DocumentError};
pub use frontmatter::FrontmatterError;
pub use models::{
    Collection, Frontmatter, Outcome, PublishFailure, PublishReport, PublishedNote, Scalar,
    SkipReason,
};
pub use publisher::{PublishError, Publisher};
pub use slug::slugify;
