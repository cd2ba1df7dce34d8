//! Application context for the Diary CLI.
//!
//! Combines CLI arguments with lazily-loaded settings.

use std::io::IsTerminal;

use once_cell::unsync::OnceCell;

use diary_core::{derive_key, DerivedKey, EntryStore};

use crate::cli::Cli;
use crate::config::read_config;
use crate::helpers::prompt_password;
use crate::ui::with_spinner;

use super::resolver::{env_var, resolve_config_path, resolve_settings, Settings};

/// Application context that bundles CLI args with resolved settings.
pub struct AppContext<'a> {
    cli: &'a Cli,
    settings: OnceCell<Settings>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            settings: OnceCell::new(),
        }
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the settings, loading the config file on first use.
    pub fn settings(&self) -> anyhow::Result<&Settings> {
        self.settings.get_or_try_init(|| {
            let config_path = resolve_config_path(self.cli)?;
            tracing::debug!(path = %config_path.display(), "loading config");
            let file = read_config(&config_path)?;
            resolve_settings(self.cli.diary_dir.as_deref(), &file, &env_var)
        })
    }

    /// Entry store over the configured diary directory.
    pub fn store(&self) -> anyhow::Result<EntryStore> {
        Ok(EntryStore::new(self.settings()?.diary.clone()))
    }

    /// Obtain the password and derive the diary key from it.
    pub fn unlock(&self, confirm: bool, no_input: bool) -> anyhow::Result<DerivedKey> {
        let interactive = std::io::stdin().is_terminal() && !no_input;
        let password = prompt_password(confirm, interactive)?;
        let params = &self.settings()?.diary.kdf;

        tracing::info!(iterations = params.iterations, "deriving key");
        let key = with_spinner("Deriving key", self.quiet(), || {
            derive_key(password.as_str(), params)
        })?;
        Ok(key)
    }
}
