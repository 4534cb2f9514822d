//! Status command

use super::load_finder;
use crate::app::OutputFormat;
use crate::output::format_status;
use anyhow::Result;
use formfinder_core::Config;

pub async fn run(config: &Config, format: OutputFormat) -> Result<()> {
    let finder = load_finder(config).await?;
    print!("{}", format_status(&finder.status(), format));
    Ok(())
}
