//! `herald onboard` — create `~/.herald/config.json` with defaults.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use herald_core::config::{get_config_path, load_config, save_config};

/// Run the onboard command.
pub fn run() -> Result<()> {
    println!();
    println!("{}", "📣 Herald — Setup".cyan().bold());
    println!();

    let config_path = get_config_path();
    let created = ensure_config(&config_path)?;
    if created {
        println!("  {} created config at {}", "✓".green(), config_path.display());
    } else {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            config_path.display()
        );
    }

    println!();
    println!(
        "{}",
        "  Next: set telegram.token and telegram.chatId, then run `herald status`.".green()
    );
    println!();

    Ok(())
}

/// Write a default config to `path` unless one is already there.
///
/// Env overrides are folded into the written file, so a token exported as
/// `HERALD_TELEGRAM__TOKEN` ends up persisted. Returns whether a file was written.
fn ensure_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    let config = load_config(Some(path));
    save_config(&config, Some(path))
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_config_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        assert!(ensure_config(&path).unwrap());

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"telegram\""));
        assert!(written.contains("\"parseMode\": \"markdown\""));
    }

    #[test]
    fn ensure_config_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{\"telegram\":{\"chatId\":\"7\"}}").unwrap();

        assert!(!ensure_config(&path).unwrap());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{\"telegram\":{\"chatId\":\"7\"}}"
        );
    }
}
