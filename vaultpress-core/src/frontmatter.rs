//! Frontmatter splitting, decoding and re-serialization.

use crate::models::Frontmatter;
use thiserror::Error;

/// Marker that opens and closes the frontmatter block
pub const DELIMITER: &str = "---";

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Invalid YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Frontmatter block is empty")]
    Empty,
}

/// Split a note into its raw frontmatter block and trimmed body
///
/// Returns `None` when the content does not start with the delimiter or when
/// no closing delimiter follows; such files are not publishing candidates.
///
/// ```
/// use vaultpress_core::frontmatter::split_frontmatter;
///
/// let (header, body) = split_frontmatter("---\npublish: true\n---\n\n# Hi\n").unwrap();
/// assert_eq!(header, "\npublish: true\n");
/// assert_eq!(body, "# Hi");
/// assert!(split_frontmatter("# No header").is_none());
/// ```
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    if !content.starts_with(DELIMITER) {
        return None;
    }

    let mut parts = content.splitn(3, DELIMITER);
    let _leading = parts.next()?;
    let header = parts.next()?;
    let body = parts.next()?;

    Some((header, body.trim()))
}

/// Decode a raw frontmatter block
pub fn parse_frontmatter(header: &str) -> Result<Frontmatter, FrontmatterError> {
    if header.trim().is_empty() {
        return Err(FrontmatterError::Empty);
    }

    Ok(serde_yaml::from_str(header)?)
}

/// Serialize frontmatter and body back into a complete document
pub fn render_document(frontmatter: &Frontmatter, body: &str) -> Result<String, FrontmatterError> {
    let yaml = serde_yaml::to_string(frontmatter)?;
    Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n\n{body}"))
}
