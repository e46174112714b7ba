//! Ignore-rule loading and matching.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

const IGNORE_FILE: &str = ".gitignore";

/// Read the project-root ignore file and convert each non-blank, non-comment
/// line into a glob pattern anchored to match at any directory depth.
///
/// A missing or unreadable file is a recovered condition: the result is an
/// empty rule set, never an error.
pub fn load_ignore_patterns(root: &Path) -> Vec<String> {
    let path = root.join(IGNORE_FILE);
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(_) => return Vec::new(),
    };

    let mut patterns = Vec::new();
    for line in BufReader::new(file).lines() {
        let Ok(line) = line else {
            return Vec::new();
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        patterns.push(format!("**/{}", trimmed.trim_matches('/')));
    }
    patterns
}

/// Compiled exclusion set applied to enumeration-relative paths.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    globs: Option<GlobSet>,
}

impl IgnoreRules {
    /// Compile loaded patterns plus any extra configured globs.
    ///
    /// Each pattern is also expanded with a `/**` variant so that a rule like
    /// `**/build` excludes the contents of every `build` directory while a
    /// sibling file `build.js` stays included.
    pub fn build(patterns: &[String], extra: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns.iter().chain(extra) {
            for expanded in expand_dir_pattern(pattern) {
                let glob = Glob::new(&expanded)
                    .with_context(|| format!("invalid ignore pattern '{pattern}'"))?;
                builder.add(glob);
            }
        }
        let globs = builder.build().context("failed to build ignore matcher")?;
        Ok(Self { globs: Some(globs) })
    }

    /// Whether the relative path matches any exclusion rule.
    pub fn is_ignored(&self, rel: &Path) -> bool {
        self.globs.as_ref().is_some_and(|set| set.is_match(rel))
    }
}

fn expand_dir_pattern(raw: &str) -> Vec<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Vec::new();
    }
    vec![trimmed.to_owned(), format!("{trimmed}/**")]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn blank_and_comment_lines_produce_no_patterns() -> Result<()> {
        let temp = tempfile::tempdir()?;
        fs::write(
            temp.path().join(".gitignore"),
            "# build output\n\ndist\n   \nnode_modules/\n# cache\n*.log\n",
        )?;

        let patterns = load_ignore_patterns(temp.path());
        assert_eq!(
            patterns,
            vec!["**/dist", "**/node_modules", "**/*.log"]
        );
        Ok(())
    }

    #[test]
    fn missing_ignore_file_yields_empty_set() -> Result<()> {
        let temp = tempfile::tempdir()?;
        assert!(load_ignore_patterns(temp.path()).is_empty());
        Ok(())
    }

    #[test]
    fn rules_match_directories_at_any_depth() -> Result<()> {
        let rules = IgnoreRules::build(&["**/build".into()], &[])?;

        assert!(rules.is_ignored(&PathBuf::from("build")));
        assert!(rules.is_ignored(&PathBuf::from("src/build/icon.svg")));
        assert!(rules.is_ignored(&PathBuf::from("a/b/build/deep/file.tsx")));
        assert!(!rules.is_ignored(&PathBuf::from("build.js")));
        assert!(!rules.is_ignored(&PathBuf::from("src/builder/file.tsx")));
        Ok(())
    }

    #[test]
    fn extra_globs_are_merged() -> Result<()> {
        let rules = IgnoreRules::build(&[], &["**/*.min.svg".into()])?;
        assert!(rules.is_ignored(&PathBuf::from("icons/logo.min.svg")));
        assert!(!rules.is_ignored(&PathBuf::from("icons/logo.svg")));
        Ok(())
    }
}
