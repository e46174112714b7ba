//! Fragment extraction from file contents.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::app::normalize::strip_comments;

/// Matches an opening `<svg ...>` tag through the nearest subsequent closing
/// tag. Non-greedy, so sibling blocks become separate matches.
static SVG_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<svg[^>]*>.*?</svg>").expect("svg block regex"));

/// Extract every raw SVG fragment from `content` in document order.
///
/// Pure SVG files contribute their entire content verbatim, whether or not
/// it superficially resembles an `<svg>` tag; normalization downstream is
/// best-effort, not validation. Host files are scanned for tag spans after
/// comment removal, so a commented-out block yields no fragment. Zero
/// matches is an ordinary outcome, not an error.
pub fn extract_fragments(content: &str, is_pure_svg: bool) -> Vec<String> {
    if is_pure_svg {
        return vec![content.to_owned()];
    }

    let visible = strip_comments(content);
    SVG_BLOCK
        .find_iter(&visible)
        .map(|m| m.as_str().to_owned())
        .collect()
}
