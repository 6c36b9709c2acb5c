//! `herald preview` — show exactly what would be sent, without sending it.

use anyhow::Result;
use colored::Colorize;

use herald_channels::formatting::{prepare, ParseMode, PreparedText};
use herald_core::types::{FormatMode, TextKind};

/// Length figures for one prepared text.
#[derive(Debug, PartialEq, Eq)]
struct LimitSummary {
    visible: usize,
    max: usize,
}

impl LimitSummary {
    fn of(prepared: &PreparedText, kind: TextKind) -> Self {
        Self {
            visible: prepared.visible_len(),
            max: kind.max_len(),
        }
    }

    fn within(&self) -> bool {
        self.visible <= self.max
    }
}

/// Run the preview command.
///
/// Rejected input (empty, unsafe markup) and over-long text are errors, so
/// the exit status can gate scripts.
pub fn run(text: &str, mode: FormatMode, kind: TextKind) -> Result<()> {
    let prepared = prepare(text, mode)?;
    let summary = LimitSummary::of(&prepared, kind);

    println!();
    println!("{}", "📣 Herald Preview".cyan().bold());
    println!();
    println!("  {:<14} {}", "Mode:".bold(), mode);
    println!(
        "  {:<14} {}",
        "Parse mode:".bold(),
        match prepared.parse_mode() {
            Some(ParseMode::Html) => "HTML".to_string(),
            None => "none".dimmed().to_string(),
        }
    );
    println!(
        "  {:<14} {} / {} ({}) {}",
        "Visible:".bold(),
        summary.visible,
        summary.max,
        kind,
        if summary.within() {
            "✓".green().to_string()
        } else {
            "✗ too long".red().to_string()
        }
    );

    println!();
    println!("  {}", "Sent as:".bold());
    println!("{}", prepared.text());
    println!();
    println!("  {}", "Reader sees:".bold());
    println!("{}", prepared.visible_text());
    println!();

    prepared.check_limit(kind)?;
    Ok(())
}
