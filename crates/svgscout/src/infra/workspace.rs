//! Workspace resolution.
//!
//! The scan pipeline never decides where the project root is; it asks a
//! resolver. The default implementation prefers an explicit override, then
//! the enclosing git work tree, then the current directory.

use std::path::{Path, PathBuf};

/// Collaborator interface supplying the project root and presentation hints.
pub trait WorkspaceResolver {
    /// Absolute project root, or `None` when no workspace is available (a
    /// recovered condition resolving to an empty catalog).
    fn root(&self) -> Option<PathBuf>;

    /// Preferred preview theme, if the environment expresses one.
    fn theme_hint(&self) -> Option<String>;
}

/// Resolver backed by the local filesystem and git discovery.
#[derive(Debug, Default)]
pub struct LocalWorkspace {
    override_root: Option<PathBuf>,
    theme: Option<String>,
}

impl LocalWorkspace {
    pub fn new(override_root: Option<PathBuf>, theme: Option<String>) -> Self {
        Self {
            override_root,
            theme,
        }
    }
}

impl WorkspaceResolver for LocalWorkspace {
    fn root(&self) -> Option<PathBuf> {
        if let Some(root) = &self.override_root {
            return Some(root.clone());
        }

        let cwd = std::env::current_dir().ok()?;
        Some(discover_git_root(&cwd).unwrap_or(cwd))
    }

    fn theme_hint(&self) -> Option<String> {
        self.theme.clone()
    }
}

fn discover_git_root(start: &Path) -> Option<PathBuf> {
    let repo = gix::discover(start).ok()?;
    repo.work_dir().map(Path::to_path_buf)
}
