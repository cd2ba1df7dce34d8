use std::io::{self, IsTerminal, Read};

use dialoguer::Password;
use zeroize::Zeroizing;

use crate::app::TemplateSource;
use crate::constants::PASSWORD_ENV;
use crate::errors::CliError;

use super::editor::{capture_entry, EditorSettings};

/// Prompt for the diary password, or read it from `DIARY_PASSWORD`.
///
/// With `confirm` the password must be typed twice.
pub fn prompt_password(confirm: bool, interactive: bool) -> anyhow::Result<Zeroizing<String>> {
    if let Ok(value) = std::env::var(PASSWORD_ENV) {
        if !value.trim().is_empty() {
            return Ok(Zeroizing::new(value));
        }
    }
    if !interactive {
        return Err(CliError::invalid_input(format!(
            "No password provided and no TTY available. Set {}.",
            PASSWORD_ENV
        ))
        .into());
    }

    let prompt = Password::new().with_prompt("Password");
    let prompt = if confirm {
        prompt.with_confirmation("Confirm password", "Passwords do not match")
    } else {
        prompt
    };
    prompt
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Read the seed bytes for a new entry.
///
/// A missing default template is an empty buffer; a missing explicit one is
/// an error.
pub fn load_template(source: &TemplateSource) -> anyhow::Result<Vec<u8>> {
    match source {
        TemplateSource::Explicit(path) => {
            if !path.is_file() {
                return Err(CliError::not_found(
                    format!("Template not found: {}", path.display()),
                    "Hint: Check the --template flag or `[editor] template` in the config file.",
                )
                .into());
            }
            std::fs::read(path)
                .map_err(|e| anyhow::anyhow!("Failed to read template {}: {}", path.display(), e))
        }
        TemplateSource::Default(path) => match std::fs::read(path) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(anyhow::anyhow!(
                "Failed to read template {}: {}",
                path.display(),
                err
            )),
        },
    }
}

/// Read the entry body from `--body`, piped stdin, or the editor.
///
/// Piped input and editor buffers are stored byte for byte, empty included.
pub fn read_entry_body(
    no_input: bool,
    body: Option<String>,
    editor: &EditorSettings,
    buffer_name: &str,
    template: &TemplateSource,
) -> anyhow::Result<Zeroizing<Vec<u8>>> {
    let stdin = io::stdin();
    let mut piped = if stdin.is_terminal() {
        None
    } else {
        Some(stdin.lock())
    };
    read_body_from(
        no_input,
        body,
        piped.as_mut().map(|lock| lock as &mut dyn Read),
        editor,
        buffer_name,
        template,
    )
}

/// Body selection; `piped` is `None` when stdin is a terminal.
fn read_body_from(
    no_input: bool,
    body: Option<String>,
    piped: Option<&mut dyn Read>,
    editor: &EditorSettings,
    buffer_name: &str,
    template: &TemplateSource,
) -> anyhow::Result<Zeroizing<Vec<u8>>> {
    if let Some(value) = body {
        if value.is_empty() {
            return Err(CliError::invalid_input("--body cannot be empty").into());
        }
        return Ok(Zeroizing::new(value.into_bytes()));
    }

    if let Some(reader) = piped {
        let mut buffer = Zeroizing::new(Vec::new());
        reader
            .read_to_end(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        return Ok(buffer);
    }

    if no_input {
        return Err(CliError::invalid_input("--no-input requires --body or content on stdin").into());
    }

    let seed = Zeroizing::new(load_template(template)?);
    capture_entry(editor, buffer_name, &seed)
}
