//! Wikilink rewriting for [[target]] and [[target|text]] syntax.

use crate::slug::slugify;
use regex::{Captures, Regex};
use std::sync::OnceLock;

static WIKILINK_REGEX: OnceLock<Regex> = OnceLock::new();

// The optional leading `!` is captured so embeds can be passed through to the
// asset relocator untouched.
fn wikilink_regex() -> &'static Regex {
    WIKILINK_REGEX.get_or_init(|| Regex::new(r"(!?)\[\[([^\]]+)\]\]").unwrap())
}

/// Rewrite every `[[target]]` / `[[target|text]]` in `body` into a relative
/// Markdown link of the form `[text](slug/)`.
///
/// Image embeds (`![[file]]`) and markers with an empty target are left as-is.
///
/// ```
/// use vaultpress_core::markdown::rewrite_wikilinks;
///
/// assert_eq!(
///     rewrite_wikilinks("See [[My Note]] for details."),
///     "See [My Note](my-note/) for details."
/// );
/// ```
pub fn rewrite_wikilinks(body: &str) -> String {
    wikilink_regex()
        .replace_all(body, |caps: &Captures| {
            let whole = &caps[0];
            if !caps[1].is_empty() {
                return whole.to_string();
            }
            create_link(&caps[2]).unwrap_or_else(|| whole.to_string())
        })
        .into_owned()
}

fn create_link(inner: &str) -> Option<String> {
    let (target, display) = match inner.split_once('|') {
        Some((target, display)) => (target.trim(), display.trim()),
        None => (inner.trim(), inner),
    };

    if target.is_empty() {
        return None;
    }

    Some(format!("[{}]({}/)", display, slugify(target)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_wikilink() {
        assert_eq!(
            rewrite_wikilinks("See [[My Note]] for details."),
            "See [My Note](my-note/) for details."
        );
    }

    #[test]
    fn test_wikilink_with_display_text() {
        assert_eq!(
            rewrite_wikilinks("[[Target|Custom Text]]"),
            "[Custom Text](target/)"
        );
    }

    #[test]
    fn test_display_text_is_trimmed() {
        assert_eq!(
            rewrite_wikilinks("[[ Rust Safety | the safety essay ]]"),
            "[the safety essay](rust-safety/)"
        );
    }

    #[test]
    fn test_slug_comes_from_target_not_display() {
        assert_eq!(
            rewrite_wikilinks("[[Ownership Rules|Read This!]]"),
            "[Read This!](ownership-rules/)"
        );
    }

    #[test]
    fn test_multiple_wikilinks() {
        assert_eq!(
            rewrite_wikilinks("[[One]], [[Two|2]] and [[Three Four]]."),
            "[One](one/), [2](two/) and [Three Four](three-four/)."
        );
    }

    #[test]
    fn test_no_markers_is_unchanged() {
        let text = "Plain text with [a link](x/) and [single brackets].";
        assert_eq!(rewrite_wikilinks(text), text);
    }

    #[test]
    fn test_rewriting_twice_is_a_noop() {
        let once = rewrite_wikilinks("See [[My Note]] and [[Other|that]].");
        assert_eq!(rewrite_wikilinks(&once), once);
    }

    #[test]
    fn test_unclosed_marker_is_left_alone() {
        assert_eq!(rewrite_wikilinks("Broken [[link here"), "Broken [[link here");
        assert_eq!(rewrite_wikilinks("Empty [[]] marker"), "Empty [[]] marker");
    }

    #[test]
    fn test_empty_target_is_left_alone() {
        assert_eq!(rewrite_wikilinks("[[ |text]]"), "[[ |text]]");
    }

    #[test]
    fn test_image_embeds_are_skipped() {
        assert_eq!(
            rewrite_wikilinks("![[cat.png]] next to [[Cats]]"),
            "![[cat.png]] next to [Cats](cats/)"
        );
    }

    #[test]
    fn test_markers_inside_code_are_still_rewritten() {
        assert_eq!(rewrite_wikilinks("`[[Code]]`"), "`[Code](code/)`");
    }
}
