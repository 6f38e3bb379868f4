//! Markdown body rewriting.
//!
//! Bodies are rewritten with targeted patterns rather than a full Markdown
//! parse; markers inside code spans are rewritten like any other text.

pub mod wikilinks;

pub use wikilinks::rewrite_wikilinks;
