//! Configuration management utilities.

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::app::enumerate::DEFAULT_HOST_EXTENSIONS;

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static WORKSPACE_CONFIG_PATH: &str = ".svgscout/config.toml";

/// Layered configuration loaded from defaults, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub scan: Scan,
    #[serde(default)]
    pub ignore: Ignore,
    #[serde(default)]
    pub export: Export,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default = "Defaults::default_theme")]
    theme: String,
    #[serde(default)]
    editor: Option<String>,
    #[serde(default = "Defaults::default_preview_max_lines")]
    preview_max_lines: usize,
}

impl Defaults {
    fn default_theme() -> String {
        "base16-ocean.dark".into()
    }

    fn default_preview_max_lines() -> usize {
        200
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Editor command used by the open-file affordance: configured value,
    /// then `$VISUAL`/`$EDITOR`, then `vi`.
    pub fn editor(&self) -> String {
        if let Some(editor) = &self.editor {
            return editor.clone();
        }
        env::var("VISUAL")
            .or_else(|_| env::var("EDITOR"))
            .unwrap_or_else(|_| "vi".into())
    }

    pub fn preview_max_lines(&self) -> usize {
        self.preview_max_lines
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            theme: Self::default_theme(),
            editor: None,
            preview_max_lines: Self::default_preview_max_lines(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scan {
    #[serde(default = "Scan::default_host_extensions")]
    host_extensions: Vec<String>,
    #[serde(default = "Scan::default_dependency_dirs")]
    dependency_dirs: Vec<String>,
    #[serde(default)]
    show_hidden: bool,
}

impl Scan {
    fn default_host_extensions() -> Vec<String> {
        DEFAULT_HOST_EXTENSIONS
            .iter()
            .map(|ext| (*ext).to_owned())
            .collect()
    }

    fn default_dependency_dirs() -> Vec<String> {
        vec!["node_modules".into()]
    }

    pub fn host_extensions(&self) -> &[String] {
        &self.host_extensions
    }

    pub fn set_host_extensions(&mut self, extensions: Vec<String>) {
        self.host_extensions = extensions;
    }

    pub fn dependency_dirs(&self) -> Vec<String> {
        self.dependency_dirs.clone()
    }

    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }
}

impl Default for Scan {
    fn default() -> Self {
        Self {
            host_extensions: Self::default_host_extensions(),
            dependency_dirs: Self::default_dependency_dirs(),
            show_hidden: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Ignore {
    #[serde(default)]
    pub paths: Vec<String>,
    #[serde(default)]
    pub globs: Vec<String>,
}

impl Ignore {
    /// All configured exclusion globs, path-style entries included.
    pub fn globs(&self) -> Vec<String> {
        self.paths
            .iter()
            .map(|path| format!("**/{}", path.trim_matches('/')))
            .chain(self.globs.iter().cloned())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Export {
    #[serde(default)]
    format: Option<String>,
}

impl Export {
    fn default_format() -> &'static str {
        "html"
    }

    pub fn format(&self) -> String {
        self.format
            .clone()
            .unwrap_or_else(|| Self::default_format().to_owned())
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    theme: Option<String>,
    editor: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            theme: env::var("SVGSCOUT_THEME").ok(),
            editor: env::var("SVGSCOUT_EDITOR").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(theme: &str, editor: &str) -> Self {
        Self {
            theme: Some(theme.to_owned()),
            editor: Some(editor.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration from defaults, user config, workspace config, and
    /// env overrides. `root` scopes the workspace layer; `None` skips it.
    pub fn load(root: Option<&Path>) -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = root.map(|root| root.join(WORKSPACE_CONFIG_PATH));
        Self::load_with_layers(global, workspace, env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            layers.push(Self::from_file(&workspace_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            defaults: merge_defaults(self.defaults, other.defaults),
            scan: merge_scan(self.scan, other.scan),
            ignore: merge_ignore(self.ignore, other.ignore),
            export: merge_export(self.export, other.export),
        }
    }
}

fn merge_defaults(base: Defaults, overlay: Defaults) -> Defaults {
    Defaults {
        theme: if overlay.theme != Defaults::default_theme() {
            overlay.theme
        } else {
            base.theme
        },
        editor: overlay.editor.or(base.editor),
        preview_max_lines: if overlay.preview_max_lines != Defaults::default_preview_max_lines() {
            overlay.preview_max_lines
        } else {
            base.preview_max_lines
        },
    }
}

fn merge_scan(base: Scan, overlay: Scan) -> Scan {
    Scan {
        host_extensions: if overlay.host_extensions != Scan::default_host_extensions() {
            overlay.host_extensions
        } else {
            base.host_extensions
        },
        dependency_dirs: if overlay.dependency_dirs != Scan::default_dependency_dirs() {
            overlay.dependency_dirs
        } else {
            base.dependency_dirs
        },
        show_hidden: overlay.show_hidden || base.show_hidden,
    }
}

fn merge_ignore(base: Ignore, overlay: Ignore) -> Ignore {
    let mut paths: BTreeSet<String> = base.paths.into_iter().collect();
    paths.extend(overlay.paths);

    let mut globs: BTreeSet<String> = base.globs.into_iter().collect();
    globs.extend(overlay.globs);

    Ignore {
        paths: paths.into_iter().collect(),
        globs: globs.into_iter().collect(),
    }
}

fn merge_export(mut base: Export, overlay: Export) -> Export {
    if let Some(format) = overlay.format {
        base.format = Some(format);
    }
    base
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("svgscout/config.toml"))
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(theme) = env.theme {
        config.defaults.theme = theme;
    }
    if let Some(editor) = env.editor {
        config.defaults.editor = Some(editor);
    }
    config
}
