//! File enumeration splitting a project tree into SVG and host files.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::app::ignore::IgnoreRules;
use crate::domain::errors::ScanError;
use crate::infra::config::Config;

const SVG_EXTENSION: &str = "svg";

/// Markup, template, and script extensions that may carry inline SVG. The
/// effective set is configuration; this is the embedded default.
pub const DEFAULT_HOST_EXTENSIONS: &[&str] = &[
    "jsx", "tsx", "js", "ts", "html", "vue", "erb", "haml", "php", "py", "rb", "scala", "swift",
    "astro", "svelte", "razor", "cshtml", "aspx", "jsp", "twig", "blade", "liquid", "phtml", "hbs",
    "handlebars", "mustache", "ejs", "jade", "pug",
];

/// Two disjoint, deterministically ordered lists of absolute file paths.
#[derive(Debug, Default)]
pub struct EnumeratedFiles {
    pub svg_files: Vec<PathBuf>,
    pub host_files: Vec<PathBuf>,
}

impl EnumeratedFiles {
    /// Total number of files feeding the scan.
    pub fn total(&self) -> usize {
        self.svg_files.len() + self.host_files.len()
    }
}

/// Walks the project tree and classifies files by extension.
#[derive(Debug)]
pub struct Enumerator {
    host_extensions: BTreeSet<String>,
    dependency_dirs: Vec<String>,
    show_hidden: bool,
}

impl Enumerator {
    pub fn from_config(config: &Config) -> Self {
        Self {
            host_extensions: config
                .scan
                .host_extensions()
                .iter()
                .map(|ext| ext.to_ascii_lowercase())
                .collect(),
            dependency_dirs: config.scan.dependency_dirs(),
            show_hidden: config.scan.show_hidden(),
        }
    }

    /// Enumerate `root`, excluding dependency directories and ignore-rule
    /// matches. Directories never appear in the output; paths come back
    /// sorted so downstream processing is deterministic.
    pub fn enumerate(
        &self,
        root: &Path,
        rules: &IgnoreRules,
    ) -> Result<EnumeratedFiles, ScanError> {
        if !root.exists() {
            return Err(ScanError::RootInaccessible(root.to_path_buf()));
        }

        let mut builder = WalkBuilder::new(root);
        builder
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .ignore(false)
            .parents(false)
            .hidden(!self.show_hidden);

        let root_owned = root.to_path_buf();
        let dependency_dirs = self.dependency_dirs.clone();
        let rules = rules.clone();
        builder.filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            if entry
                .file_name()
                .to_str()
                .is_some_and(|name| dependency_dirs.iter().any(|dir| dir == name))
            {
                return false;
            }
            let rel = entry
                .path()
                .strip_prefix(&root_owned)
                .unwrap_or(entry.path());
            !rules.is_ignored(rel)
        });

        let mut paths = Vec::new();
        for result in builder.build() {
            match result {
                Ok(entry) => {
                    if entry.file_type().is_some_and(|ft| ft.is_file()) {
                        paths.push(entry.into_path());
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "walk error");
                }
            }
        }
        paths.sort();

        let mut files = EnumeratedFiles::default();
        for path in paths {
            match extension_of(&path) {
                Some(ext) if ext == SVG_EXTENSION => files.svg_files.push(path),
                Some(ext) if self.host_extensions.contains(&ext) => files.host_files.push(path),
                _ => {}
            }
        }
        Ok(files)
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use anyhow::Result;

    use crate::app::ignore::load_ignore_patterns;

    fn enumerator() -> Enumerator {
        Enumerator::from_config(&Config::default())
    }

    #[test]
    fn classifies_svg_and_host_files_disjointly() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let root = temp.path();
        fs::create_dir_all(root.join("icons"))?;
        fs::create_dir_all(root.join("src"))?;
        fs::write(root.join("icons/logo.svg"), "<svg></svg>")?;
        fs::write(root.join("src/Button.tsx"), "export default null;")?;
        fs::write(root.join("src/notes.txt"), "plain text")?;

        let files = enumerator().enumerate(root, &IgnoreRules::default())?;

        assert_eq!(files.svg_files, vec![root.join("icons/logo.svg")]);
        assert_eq!(files.host_files, vec![root.join("src/Button.tsx")]);
        Ok(())
    }

    #[test]
    fn excludes_dependency_directories_everywhere() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let root = temp.path();
        fs::create_dir_all(root.join("node_modules/pkg"))?;
        fs::create_dir_all(root.join("nested/node_modules"))?;
        fs::write(root.join("node_modules/pkg/icon.tsx"), "<svg></svg>")?;
        fs::write(root.join("nested/node_modules/icon.svg"), "<svg></svg>")?;
        fs::write(root.join("app.tsx"), "")?;

        let files = enumerator().enumerate(root, &IgnoreRules::default())?;

        assert_eq!(files.host_files, vec![root.join("app.tsx")]);
        assert!(files.svg_files.is_empty());
        Ok(())
    }

    #[test]
    fn honors_ignore_rules_but_not_similarly_named_files() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let root = temp.path();
        fs::create_dir_all(root.join("build/js"))?;
        fs::write(root.join(".gitignore"), "build\n")?;
        fs::write(root.join("build/js/icon.tsx"), "<svg></svg>")?;
        fs::write(root.join("build.js"), "const svg = null;")?;

        let patterns = load_ignore_patterns(root);
        let rules = IgnoreRules::build(&patterns, &[])?;
        let files = enumerator().enumerate(root, &rules)?;

        assert_eq!(files.host_files, vec![root.join("build.js")]);
        Ok(())
    }

    #[test]
    fn missing_root_is_an_error() {
        let result = enumerator().enumerate(Path::new("/nonexistent/svgscout-root"), &IgnoreRules::default());
        assert!(matches!(result, Err(ScanError::RootInaccessible(_))));
    }

    #[test]
    fn svg_wins_when_host_set_contains_svg() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let root = temp.path();
        fs::write(root.join("logo.svg"), "<svg></svg>")?;

        let mut config = Config::default();
        config.scan.set_host_extensions(vec!["svg".into(), "tsx".into()]);
        let files = Enumerator::from_config(&config).enumerate(root, &IgnoreRules::default())?;

        assert_eq!(files.svg_files, vec![root.join("logo.svg")]);
        assert!(files.host_files.is_empty());
        Ok(())
    }
}
