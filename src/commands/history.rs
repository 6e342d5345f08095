// ABOUTME: History command implementation.
// ABOUTME: Lists the most recent deploy records from the application's log.

use gitship::error::Result;
use gitship::history::HistoryLog;
use gitship::output::{Output, OutputMode};

/// Print the newest `count` deploys, oldest first.
pub fn history(log: &HistoryLog, count: usize, output: &Output) -> Result<()> {
    let records = log.recent(count)?;

    if output.mode() == OutputMode::Json {
        for record in &records {
            output.json(record);
        }
        return Ok(());
    }

    if records.is_empty() {
        println!("No deploys recorded in {}", log.path().display());
        return Ok(());
    }

    for record in &records {
        println!(
            "{}  {:<24} {}  {}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            record.branch,
            record.commit.short(),
            record.operator
        );
    }
    Ok(())
}
