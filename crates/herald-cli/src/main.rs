//! Herald CLI — entry point.
//!
//! # Commands
//!
//! - `herald preview TEXT [--mode M] [--caption]` — show the prepared text, no network
//! - `herald send TEXT [--mode M] [--chat ID]` — send a Telegram message
//! - `herald speak TEXT [--caption C] [--mode M] [--chat ID]` — send TEXT as a voice note
//! - `herald onboard` — write a default config file
//! - `herald status` — show configuration and provider status
//!
//! A `TEXT` of `-` is read from stdin.

mod deliver;
mod helpers;
mod onboard;
mod preview;
mod status;

use anyhow::Result;
use clap::{Parser, Subcommand};

use herald_core::config::load_config;
use herald_core::types::{FormatMode, TextKind};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// 📣 Herald — safe Telegram message formatting and delivery
#[derive(Parser)]
#[command(name = "herald", version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true, default_value_t = false)]
    logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how a text would be sent, without sending it
    Preview {
        /// Text to prepare ("-" reads stdin)
        text: String,

        /// Input format: plain, markdown or html (default: config parseMode)
        #[arg(short, long)]
        mode: Option<FormatMode>,

        /// Check against the caption limit instead of the message limit
        #[arg(long, default_value_t = false)]
        caption: bool,
    },

    /// Send a text message to a Telegram chat
    Send {
        /// Message text ("-" reads stdin)
        text: String,

        /// Input format: plain, markdown or html (default: config parseMode)
        #[arg(short, long)]
        mode: Option<FormatMode>,

        /// Target chat ID or @channel (default: config chatId)
        #[arg(short, long)]
        chat: Option<String>,
    },

    /// Synthesize a text and send it as a voice note
    Speak {
        /// Text to speak ("-" reads stdin)
        text: String,

        /// Caption shown under the voice note
        #[arg(long)]
        caption: Option<String>,

        /// Format of TEXT and the caption (default: config parseMode)
        #[arg(short, long)]
        mode: Option<FormatMode>,

        /// Target chat ID or @channel (default: config chatId)
        #[arg(short, long)]
        chat: Option<String>,
    },

    /// Write a default configuration file
    Onboard,

    /// Show configuration and provider status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logs);

    match cli.command {
        Commands::Preview {
            text,
            mode,
            caption,
        } => {
            let config = load_config(None);
            let text = helpers::read_text(&text)?;
            let kind = if caption {
                TextKind::Caption
            } else {
                TextKind::Message
            };
            preview::run(&text, mode.unwrap_or(config.telegram.parse_mode), kind)
        }
        Commands::Send { text, mode, chat } => {
            let config = load_config(None);
            let text = helpers::read_text(&text)?;
            let mode = mode.unwrap_or(config.telegram.parse_mode);
            deliver::send(&config, &text, mode, chat.as_deref()).await
        }
        Commands::Speak {
            text,
            caption,
            mode,
            chat,
        } => {
            let config = load_config(None);
            let text = helpers::read_text(&text)?;
            let mode = mode.unwrap_or(config.telegram.parse_mode);
            deliver::speak(&config, &text, caption.as_deref(), mode, chat.as_deref()).await
        }
        Commands::Onboard => onboard::run(),
        Commands::Status => status::run(),
    }
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("herald=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
