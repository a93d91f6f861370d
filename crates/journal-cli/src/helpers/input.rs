//! Input handling helpers for PINs, names and entry content.

use std::io::{self, IsTerminal, Read};

use dialoguer::{Confirm, Editor, Input, Password};

use crate::constants::PIN_ENV;

/// Read a non-empty value from an environment variable.
pub fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// PIN from `JOURNAL_PIN`, without prompting.
pub fn env_pin() -> Option<String> {
    env_value(PIN_ENV)
}

/// Prompt for the PIN.
pub fn prompt_pin() -> anyhow::Result<String> {
    Password::new()
        .with_prompt("PIN")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read PIN: {}", e))
}

/// A new PIN and its confirmation.
///
/// Taken from `env_var` when set (the value doubles as its own confirmation),
/// otherwise prompted for twice.
pub fn prompt_new_pin(env_var: &str, interactive: bool) -> anyhow::Result<(String, String)> {
    if let Some(value) = env_value(env_var) {
        return Ok((value.clone(), value));
    }
    if !interactive {
        return Err(anyhow::anyhow!(
            "No PIN provided and no TTY available. Set {}.",
            env_var
        ));
    }
    let pin = Password::new()
        .with_prompt("Enter PIN")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read PIN: {}", e))?;
    let confirm = Password::new()
        .with_prompt("Confirm PIN")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read PIN: {}", e))?;
    Ok((pin, confirm))
}

/// Prompt for the owner's name.
pub fn prompt_name() -> anyhow::Result<String> {
    Input::<String>::new()
        .with_prompt("Name")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| anyhow::anyhow!("Failed to read name: {}", e))
}

/// Ask a yes/no question.
pub fn confirm(prompt: &str, default: bool) -> anyhow::Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))
}

/// Read entry content from `--content`, stdin, or the editor.
///
/// Empty content is allowed. An editor closed without saving keeps
/// `initial`.
pub fn read_content(content: Option<String>, initial: &str) -> anyhow::Result<String> {
    if let Some(value) = content {
        return Ok(value);
    }

    if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        return Ok(buffer.trim_end().to_string());
    }

    let edited = Editor::new()
        .extension(".md")
        .edit(initial)
        .map_err(|e| anyhow::anyhow!("Failed to launch editor: {}", e))?;
    Ok(edited
        .map(|text| text.trim_end().to_string())
        .unwrap_or_else(|| initial.to_string()))
}
