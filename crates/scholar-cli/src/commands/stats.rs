//! Stats command implementation.

use crate::cli::StatsArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::stats::Stats;

/// Execute the stats command.
pub fn execute_stats(args: StatsArgs, formatter: &Formatter) -> Result<()> {
    let path = Stats::path()?;

    if args.reset {
        Stats::reset(&path)?;
        println!("{}", formatter.success("Papers analyzed counter reset"));
        return Ok(());
    }

    let stats = Stats::load_from(&path)?;
    println!("{}", formatter.format_stats(stats.papers_analyzed)?);
    Ok(())
}
