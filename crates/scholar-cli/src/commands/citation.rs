//! Citation command implementation.

use crate::error::Result;
use crate::export::citation;
use chrono::Local;

/// Execute the citation command.
pub fn execute_citation() -> Result<()> {
    println!("{}", citation(Local::now().date_naive()));
    Ok(())
}
