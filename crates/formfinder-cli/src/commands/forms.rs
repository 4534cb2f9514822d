//! List forms command

use super::load_finder;
use crate::app::OutputFormat;
use crate::output::format_forms;
use anyhow::Result;
use formfinder_core::Config;

pub async fn run(config: &Config, format: OutputFormat) -> Result<()> {
    let finder = load_finder(config).await?;
    print!("{}", format_forms(&finder.list_forms(), format));
    Ok(())
}
