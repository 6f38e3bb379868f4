//! Slug generation for titles and link targets.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

static SEPARATOR_REGEX: OnceLock<Regex> = OnceLock::new();

fn separator_regex() -> &'static Regex {
    SEPARATOR_REGEX.get_or_init(|| Regex::new(r"[-\s]+").unwrap())
}

/// Convert a string to a URL-safe slug
///
/// Rules:
/// - Decompose (NFKD) so accented letters lose their combining marks
/// - Remove everything except letters, digits, underscores, whitespace and hyphens
/// - Trim surrounding whitespace and lowercase
/// - Collapse every run of whitespace and/or hyphens into one hyphen
///
/// # Examples
///
/// ```
/// use vaultpress_core::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("Café Crème"), "cafe-creme");
/// assert_eq!(slugify(""), "");
/// ```
pub fn slugify(input: &str) -> String {
    let kept = input
        .nfkd()
        .filter(|&c| !is_combining_mark(c))
        .filter(|&c| c.is_alphanumeric() || c == '_' || c == '-' || c.is_whitespace())
        .collect::<String>();

    let lowered = kept.trim().to_lowercase();

    separator_regex().replace_all(&lowered, "-").into_owned()
}
