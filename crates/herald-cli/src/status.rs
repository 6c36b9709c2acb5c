//! `herald status` — show configuration and provider status.
//!
//! - Shows the config path and whether it exists
//! - Shows the Telegram token (masked), default chat and parse mode
//! - Shows API key status for each speech provider

use anyhow::Result;
use colored::Colorize;

use herald_core::config::{get_config_path, load_config};
use herald_core::utils::mask_secret;
use herald_providers::registry::SPEECH_PROVIDERS;

use crate::helpers::configured_marker;

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "📣 Herald Status".cyan().bold());
    println!();

    // Config
    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_path.exists() {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );

    // Telegram
    println!();
    println!("  {}", "Telegram:".bold());
    let token = if config.telegram.is_configured() {
        format!("{} {}", "✓".green(), mask_secret(&config.telegram.token).dimmed())
    } else {
        format!("{}", "· not configured".dimmed())
    };
    println!("    {:<20} {}", "Token", token);
    let chat = if config.telegram.chat_id.is_empty() {
        "(none)".dimmed().to_string()
    } else {
        config.telegram.chat_id.clone()
    };
    println!("    {:<20} {}", "Default chat", chat);
    println!("    {:<20} {}", "Parse mode", config.telegram.parse_mode);
    if !cfg!(feature = "telegram") {
        println!(
            "    {}",
            "(built without the `telegram` feature; send/speak are disabled)".yellow()
        );
    }

    // Speech providers
    println!();
    println!("  {}", "Speech providers:".bold());
    for spec in SPEECH_PROVIDERS {
        let configured = config
            .speech
            .get_by_name(spec.name)
            .is_some_and(|p| p.is_configured())
            || std::env::var(spec.env_key).is_ok_and(|v| !v.is_empty());
        let active = if spec.name.eq_ignore_ascii_case(config.speech.provider.trim()) {
            " (active)".cyan().to_string()
        } else {
            String::new()
        };
        println!(
            "    {:<20} {}{}",
            spec.display_name,
            configured_marker(configured),
            active
        );
    }

    println!();

    Ok(())
}
