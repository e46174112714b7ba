//! Catalog export rendering.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::ValueEnum;
use minijinja::Environment;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::domain::model::Catalog;
use crate::infra::config::Config;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// Self-contained HTML gallery with a client-side name filter.
    Html,
    /// Markdown index with fenced fragments.
    Markdown,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Markdown => "markdown",
        }
    }

    fn template(&self) -> &'static str {
        match self {
            ExportFormat::Html => "gallery.html",
            ExportFormat::Markdown => "catalog.md",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportFormatParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "html" | "htm" => Ok(ExportFormat::Html),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            other => Err(ExportFormatParseError::UnknownFormat(other.to_string())),
        }
    }
}

/// Error returned when parsing an [`ExportFormat`] fails.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ExportFormatParseError {
    #[error("unknown export format '{0}'")]
    UnknownFormat(String),
}

/// Runtime options controlling export behavior.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub output_path: Option<PathBuf>,
}

impl ExportOptions {
    /// Build options from configuration defaults.
    pub fn from_config(config: &Config) -> Self {
        let format = config
            .export
            .format()
            .parse()
            .unwrap_or(ExportFormat::Html);
        Self {
            format,
            output_path: None,
        }
    }
}

/// Result of an export operation.
#[derive(Debug, Clone)]
pub struct ExportResult {
    pub rendered: String,
    pub output_path: Option<PathBuf>,
}

/// Renders catalogs through embedded templates and writes artifacts.
pub struct Exporter {
    env: Environment<'static>,
}

impl Exporter {
    /// Create a new exporter with built-in templates loaded.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_template("gallery.html", GALLERY_TEMPLATE)
            .map_err(|err| anyhow!("failed to register gallery template: {err}"))?;
        env.add_template("catalog.md", MARKDOWN_TEMPLATE)
            .map_err(|err| anyhow!("failed to register markdown template: {err}"))?;
        Ok(Self { env })
    }

    /// Render the catalog into a string using the selected format.
    pub fn render(&self, catalog: &Catalog, format: ExportFormat) -> Result<String> {
        let context = build_template_context(catalog)?;
        let template = self
            .env
            .get_template(format.template())
            .map_err(|err| anyhow!("missing template for {}: {err}", format.as_str()))?;
        template
            .render(&context)
            .map_err(|err| anyhow!("failed to render {} export: {err}", format.as_str()))
    }

    /// Render the catalog and persist it when an output path is set.
    pub fn export(&self, catalog: &Catalog, options: &ExportOptions) -> Result<ExportResult> {
        let rendered = self.render(catalog, options.format)?;

        if let Some(path) = &options.output_path {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create export directory: {}", parent.display())
                })?;
            }
            fs::write(path, &rendered)
                .with_context(|| format!("failed to write export output to {}", path.display()))?;
        }

        Ok(ExportResult {
            rendered,
            output_path: options.output_path.clone(),
        })
    }
}

fn build_template_context(catalog: &Catalog) -> Result<TemplateContext> {
    let generated_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .context("failed to format export timestamp")?;

    let records = catalog
        .records
        .iter()
        .map(|record| TemplateRecord {
            name: record.name.clone(),
            fragment: record.fragment.clone(),
            source_path: record.source_path.display().to_string(),
            href: file_href(&record.source_path),
        })
        .collect();

    Ok(TemplateContext {
        generated_at,
        root: catalog.root.display().to_string(),
        count: catalog.records.len(),
        records,
    })
}

fn file_href(path: &Path) -> String {
    format!("file://{}", path.display())
}

#[derive(Serialize)]
struct TemplateContext {
    generated_at: String,
    root: String,
    count: usize,
    records: Vec<TemplateRecord>,
}

#[derive(Serialize)]
struct TemplateRecord {
    name: String,
    fragment: String,
    source_path: String,
    href: String,
}

const GALLERY_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<title>SVG Catalog</title>
<style>
  body { font-family: sans-serif; margin: 0; }
  header { padding: 12px 16px; border-bottom: 1px solid #ccc; }
  input { width: 280px; padding: 4px 8px; }
  .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(120px, 1fr)); gap: 16px; padding: 16px; }
  .tile { border: 1px solid #ccc; padding: 8px; text-align: center; }
  .tile svg { width: 48px; height: 48px; }
  .tile a { display: block; margin-top: 8px; font-size: 12px; overflow: hidden; text-overflow: ellipsis; }
  #empty { display: none; padding: 32px; text-align: center; color: #888; }
</style>
</head>
<body>
<header>
  <input id="filter" type="search" placeholder="Filter by name…">
  <span>{{ count }} fragments · {{ root }} · {{ generated_at }}</span>
</header>
<div class="grid">
{% for record in records %}
  <div class="tile" data-name="{{ record.name|lower }}">
    {{ record.fragment|safe }}
    <a href="{{ record.href }}" title="{{ record.source_path }}">{{ record.name }}</a>
  </div>
{% endfor %}
</div>
<div id="empty">No results</div>
<script>
  const input = document.getElementById('filter');
  const tiles = Array.from(document.querySelectorAll('.tile'));
  const empty = document.getElementById('empty');
  input.addEventListener('input', () => {
    const query = input.value.toLowerCase();
    let visible = 0;
    for (const tile of tiles) {
      const show = tile.dataset.name.includes(query);
      tile.style.display = show ? '' : 'none';
      if (show) visible++;
    }
    empty.style.display = visible === 0 ? 'block' : 'none';
  });
</script>
</body>
</html>
"#;

const MARKDOWN_TEMPLATE: &str = r#"# SVG Catalog

Root: {{ root }}
Generated at: {{ generated_at }}
Fragments: {{ count }}

{% for record in records %}
## {{ loop.index }}. {{ record.name }}

Source: `{{ record.source_path }}`

```svg
{{ record.fragment }}
```

{% endfor %}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use crate::domain::model::CatalogRecord;

    fn sample_catalog() -> Catalog {
        Catalog {
            root: PathBuf::from("/tmp/project"),
            records: vec![CatalogRecord {
                name: "Arrow Left".into(),
                fragment: r#"<svg viewBox="0 0 24 24"><path d="M0 0"/></svg>"#.into(),
                source_path: PathBuf::from("/tmp/project/icons/arrow-left.svg"),
            }],
        }
    }

    #[test]
    fn html_gallery_embeds_fragments_and_links() -> Result<()> {
        let exporter = Exporter::new()?;
        let rendered = exporter.render(&sample_catalog(), ExportFormat::Html)?;

        assert!(rendered.contains(r#"<svg viewBox="0 0 24 24">"#));
        assert!(rendered.contains("Arrow Left"));
        assert!(rendered.contains("file:///tmp/project/icons/arrow-left.svg"));
        assert!(rendered.contains("No results"));
        Ok(())
    }

    #[test]
    fn markdown_index_lists_sources() -> Result<()> {
        let exporter = Exporter::new()?;
        let rendered = exporter.render(&sample_catalog(), ExportFormat::Markdown)?;

        assert!(rendered.contains("# SVG Catalog"));
        assert!(rendered.contains("`/tmp/project/icons/arrow-left.svg`"));
        assert!(rendered.contains("```svg"));
        Ok(())
    }

    #[test]
    fn parses_formats_from_strings() {
        assert_eq!(
            <ExportFormat as FromStr>::from_str("html").unwrap(),
            ExportFormat::Html
        );
        assert_eq!(
            <ExportFormat as FromStr>::from_str("MD").unwrap(),
            ExportFormat::Markdown
        );
        assert!(<ExportFormat as FromStr>::from_str("pdf").is_err());
    }
}
