//! Markup highlighting for the preview pane, built on syntect.

use std::borrow::Cow;
use std::sync::Arc;

use anyhow::Result;
use once_cell::sync::Lazy;
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style as SyntectStyle, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};

const DEFAULT_THEME: &str = "base16-ocean.dark";

static DEFAULT_ASSETS: Lazy<(Arc<SyntaxSet>, Arc<ThemeSet>)> = Lazy::new(|| {
    (
        Arc::new(SyntaxSet::load_defaults_newlines()),
        Arc::new(ThemeSet::load_defaults()),
    )
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighlightStyle {
    pub foreground: Option<RgbColor>,
    pub bold: bool,
    pub italic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
    pub content: String,
    pub style: HighlightStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightLine {
    pub spans: Vec<HighlightSpan>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightMode {
    Highlighted,
    Plain,
}

/// Result of highlighting fragment markup for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightResult {
    pub lines: Vec<HighlightLine>,
    pub theme: String,
    pub mode: HighlightMode,
}

impl HighlightResult {
    pub fn plain(lines: Vec<String>, theme: String) -> Self {
        HighlightResult {
            lines: lines
                .into_iter()
                .map(|line| HighlightLine {
                    spans: vec![HighlightSpan {
                        content: line,
                        style: HighlightStyle::default(),
                    }],
                })
                .collect(),
            theme,
            mode: HighlightMode::Plain,
        }
    }
}

/// Highlights SVG fragment text with the XML grammar. Fragments live in
/// memory, so syntax selection is fixed rather than path-derived.
#[derive(Debug, Clone)]
pub struct Highlighter {
    syntax_set: Arc<SyntaxSet>,
    theme_set: Arc<ThemeSet>,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    pub fn new() -> Self {
        let assets = &*DEFAULT_ASSETS;
        Self {
            syntax_set: Arc::clone(&assets.0),
            theme_set: Arc::clone(&assets.1),
        }
    }

    pub fn available_themes(&self) -> Vec<String> {
        let mut themes: Vec<_> = self.theme_set.themes.keys().cloned().collect();
        themes.sort();
        themes
    }

    /// Highlight markup lines, degrading to plain spans when the grammar is
    /// unavailable or highlighting fails.
    pub fn highlight_markup(&self, lines: &[String], theme: &str) -> HighlightResult {
        let resolved = self.resolve_theme(theme);
        let theme_name = resolved.name.to_string();

        let Some(syntax) = self.syntax_set.find_syntax_by_extension("xml") else {
            return HighlightResult::plain(lines.to_vec(), theme_name);
        };

        match self.highlight_with_syntax(lines, resolved.theme, syntax) {
            Ok(highlighted) => HighlightResult {
                lines: highlighted,
                theme: theme_name,
                mode: HighlightMode::Highlighted,
            },
            Err(err) => {
                tracing::warn!(error = %err, "markup highlight failed");
                HighlightResult::plain(lines.to_vec(), theme_name)
            }
        }
    }

    fn highlight_with_syntax(
        &self,
        lines: &[String],
        theme: &Theme,
        syntax: &SyntaxReference,
    ) -> Result<Vec<HighlightLine>> {
        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut result = Vec::with_capacity(lines.len());
        for line in lines {
            let segments = highlighter.highlight_line(line, &self.syntax_set)?;
            let spans = segments
                .into_iter()
                .map(|(style, text)| HighlightSpan {
                    content: text.to_string(),
                    style: convert_style(style),
                })
                .collect();
            result.push(HighlightLine { spans });
        }
        Ok(result)
    }

    fn resolve_theme<'a>(&'a self, requested: &'a str) -> ResolvedTheme<'a> {
        if let Some(theme) = self.theme_set.themes.get(requested) {
            return ResolvedTheme {
                name: Cow::Borrowed(requested),
                theme,
            };
        }

        let fallback = self
            .theme_set
            .themes
            .get_key_value(DEFAULT_THEME)
            .or_else(|| self.theme_set.themes.iter().next())
            .expect("syntect default themes are never empty");

        tracing::warn!(requested, fallback = %fallback.0, "theme not found");
        ResolvedTheme {
            name: Cow::Borrowed(fallback.0.as_str()),
            theme: fallback.1,
        }
    }
}

struct ResolvedTheme<'a> {
    name: Cow<'a, str>,
    theme: &'a Theme,
}

fn convert_style(style: SyntectStyle) -> HighlightStyle {
    HighlightStyle {
        foreground: convert_color(style.foreground),
        bold: style.font_style.contains(FontStyle::BOLD),
        italic: style.font_style.contains(FontStyle::ITALIC),
    }
}

fn convert_color(color: syntect::highlighting::Color) -> Option<RgbColor> {
    if color.a == 0 {
        None
    } else {
        Some(RgbColor {
            r: color.r,
            g: color.g,
            b: color.b,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_produces_highlighted_spans() {
        let highlighter = Highlighter::new();
        let lines = vec![r#"<svg viewBox="0 0 24 24"><path d="M0 0"/></svg>"#.to_string()];
        let result = highlighter.highlight_markup(&lines, "base16-ocean.dark");

        assert_eq!(result.mode, HighlightMode::Highlighted);
        assert_eq!(result.lines.len(), 1);
        assert!(!result.lines[0].spans.is_empty());
    }

    #[test]
    fn unknown_theme_falls_back() {
        let highlighter = Highlighter::new();
        let lines = vec!["<svg/>".to_string()];
        let result = highlighter.highlight_markup(&lines, "not-a-theme");
        assert_ne!(result.theme, "not-a-theme");
    }

    #[test]
    fn default_theme_is_available() {
        let highlighter = Highlighter::new();
        assert!(
            highlighter
                .available_themes()
                .iter()
                .any(|theme| theme == DEFAULT_THEME)
        );
    }
}
