//! History command

use clap::Args;

use crate::audit::AuditLogger;
use crate::display::format_history;
use crate::error::BunkerResult;

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Number of entries to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// Print the most recent audit entries
pub fn handle_history_command(audit: &AuditLogger, args: HistoryArgs) -> BunkerResult<()> {
    let entries = audit.read_recent(args.limit)?;
    print!("{}", format_history(&entries));
    if entries.is_empty() {
        println!();
    }
    Ok(())
}
