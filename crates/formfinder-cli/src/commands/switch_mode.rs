//! Switch-mode feasibility command
//!
//! Only reports. The corpus is not loaded.

use crate::app::OutputFormat;
use crate::output::format_switch;
use anyhow::Result;
use formfinder_core::mode::{select_mode, switch_report};
use formfinder_core::Config;

pub async fn run(config: &Config, format: OutputFormat) -> Result<()> {
    let selection = select_mode(&config.corpus);
    let report = switch_report(selection.mode, &config.corpus);
    print!("{}", format_switch(&report, format));
    Ok(())
}
