//! Resolution of config path and effective settings.
//!
//! Precedence for every setting: command line, then environment, then the
//! config file, then built-in defaults.

use std::path::{Path, PathBuf};

use diary_core::config::{DEFAULT_KDF_ITERATIONS, DEFAULT_SALT};
use diary_core::DiaryConfig;

use crate::cli::Cli;
use crate::config::{default_config_path, default_diary_dir, expand_tilde, DiaryFileConfig};
use crate::constants::{DEFAULT_TEMPLATE, FALLBACK_EDITOR};
use crate::helpers::EditorSettings;

/// Where the editor buffer for a new entry is seeded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Named by the user; must exist
    Explicit(PathBuf),
    /// Used only if present
    Default(PathBuf),
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub diary: DiaryConfig,
    pub editor: EditorSettings,
    pub template: TemplateSource,
}

/// Resolve the config file path from `--config`/`DIARY_CONFIG` or the XDG default.
pub fn resolve_config_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    match cli.config.as_ref() {
        Some(path) => Ok(path.clone()),
        None => default_config_path(),
    }
}

/// Non-empty value of an environment variable.
pub fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Merge command line, environment (through `env`) and config file.
pub fn resolve_settings(
    cli_dir: Option<&Path>,
    file: &DiaryFileConfig,
    env: &dyn Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let diary_dir = match (cli_dir, file.diary.dir.as_deref()) {
        (Some(dir), _) => expand_path(dir)?,
        (None, Some(dir)) => expand_tilde(dir)?,
        (None, None) => default_diary_dir()?,
    };

    let salt = env("DIARY_SALT")
        .or_else(|| file.security.salt.clone())
        .unwrap_or_else(|| DEFAULT_SALT.to_string());
    let iterations = file
        .security
        .kdf_iterations
        .unwrap_or(DEFAULT_KDF_ITERATIONS);
    let allow_external_paths = file.security.allow_external_paths.unwrap_or(true);

    let diary = DiaryConfig::new(diary_dir)
        .with_salt(salt.into_bytes())
        .with_iterations(iterations)
        .with_external_paths(allow_external_paths);

    let command = env("DIARY_TEXT_EDITOR")
        .or_else(|| file.editor.command.clone())
        .or_else(|| env("VISUAL"))
        .or_else(|| env("EDITOR"))
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string());
    let new_args = env("DIARY_TEXT_EDITOR_NEW_OPTIONS")
        .map(|value| split_options(&value))
        .or_else(|| file.editor.new_args.clone())
        .unwrap_or_default();
    let read_args = env("DIARY_TEXT_EDITOR_READ_OPTIONS")
        .map(|value| split_options(&value))
        .or_else(|| file.editor.read_args.clone())
        .unwrap_or_default();

    let template = match file.editor.template.as_deref() {
        Some(path) => TemplateSource::Explicit(expand_tilde(path)?),
        None => TemplateSource::Default(PathBuf::from(DEFAULT_TEMPLATE)),
    };

    Ok(Settings {
        diary,
        editor: EditorSettings {
            command,
            new_args,
            read_args,
        },
        template,
    })
}

/// Split a comma-separated option list, dropping empty items.
pub fn split_options(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn expand_path(path: &Path) -> anyhow::Result<PathBuf> {
    match path.to_str() {
        Some(text) => expand_tilde(text),
        None => Ok(path.to_path_buf()),
    }
}
