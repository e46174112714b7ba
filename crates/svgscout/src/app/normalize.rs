//! Fragment normalization.
//!
//! A fixed, order-sensitive sequence of textual rewrites turns fragments
//! authored in component-templating syntaxes into standalone renderable
//! markup. Comment stripping runs before expression rewriting so that
//! commented-out expressions are never rewritten; expression rewriting runs
//! before viewBox synthesis so that dimensions written as `{24}` are visible
//! to the numeric-attribute scan.

use once_cell::sync::Lazy;
use regex::Regex;

static HTML_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment regex"));
static NUMERIC_EXPR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(\d+)\}").expect("numeric regex"));
static DOUBLE_QUOTED_EXPR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\{"([^"]*)"\}"#).expect("double-quote regex"));
static SINGLE_QUOTED_EXPR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{'([^']*)'\}").expect("single-quote regex"));
static OPENING_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<svg[^>]*>").expect("tag regex"));
static WIDTH_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"width="([0-9.]+)[^"]*""#).expect("width regex"));
static HEIGHT_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"height="([0-9.]+)[^"]*""#).expect("height regex"));

const PROP_SPREAD: &str = "{...props}";

/// Remove HTML-style comments, including multi-line ones, non-greedily.
pub(crate) fn strip_comments(text: &str) -> String {
    HTML_COMMENT.replace_all(text, "").into_owned()
}

/// Normalize one fragment. Pure, deterministic, and total: unrecognized
/// syntax passes through unchanged, and applying the function twice yields
/// the same result as applying it once.
pub fn normalize(fragment: &str) -> String {
    let mut out = strip_comments(fragment);
    out = out.replace(PROP_SPREAD, "");
    out = NUMERIC_EXPR.replace_all(&out, "\"${1}\"").into_owned();
    out = DOUBLE_QUOTED_EXPR.replace_all(&out, "\"${1}\"").into_owned();
    out = SINGLE_QUOTED_EXPR.replace_all(&out, "\"${1}\"").into_owned();
    synthesize_viewbox(out)
}

/// Insert `viewBox="0 0 {width} {height}"` into the opening tag when it has
/// no viewBox but carries numeric width and height attributes. Unit suffixes
/// are ignored; a missing or non-numeric dimension leaves the tag untouched.
fn synthesize_viewbox(fragment: String) -> String {
    let Some(tag) = OPENING_TAG.find(&fragment) else {
        return fragment;
    };
    let tag_text = tag.as_str();
    if tag_text.contains("viewBox=") {
        return fragment;
    }

    let width = WIDTH_ATTR
        .captures(tag_text)
        .map(|caps| caps[1].to_owned());
    let height = HEIGHT_ATTR
        .captures(tag_text)
        .map(|caps| caps[1].to_owned());

    match (width, height) {
        (Some(width), Some(height)) => fragment.replacen(
            "<svg",
            &format!("<svg viewBox=\"0 0 {width} {height}\""),
            1,
        ),
        _ => fragment,
    }
}
