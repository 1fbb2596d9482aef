//! Interactive confirmation and limit prompts.
//!
//! Only used when stdin is attended; unattended runs must opt in with
//! `--yes` before anything destructive happens.

use anyhow::Result;
use console::Term;
use tracing::warn;

pub fn confirm(question: &str) -> Result<bool> {
    if !console::user_attended() {
        warn!("No terminal attached; pass --yes to confirm destructive operations");
        return Ok(false);
    }

    let term = Term::stderr();
    term.write_str(&format!("{question} (y/N): "))?;
    let answer = term.read_line()?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Ask for a record limit. Empty input means "all of them"; anything
/// that is not a number is treated the same, with a warning.
pub fn read_limit() -> Result<Option<u64>> {
    if !console::user_attended() {
        return Ok(None);
    }

    let term = Term::stderr();
    term.write_str("Import limit (press Enter for all data, or a number): ")?;
    let answer = term.read_line()?;
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<u64>() {
        Ok(limit) => Ok(Some(limit)),
        Err(_) => {
            warn!("Not a number, importing all data");
            Ok(None)
        }
    }
}
