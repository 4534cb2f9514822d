//! Ask command

use super::load_finder;
use crate::app::{AskArgs, OutputFormat};
use crate::output::format_query;
use anyhow::Result;
use formfinder_core::Config;

pub async fn run(args: AskArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let query = args.query.join(" ");
    let finder = load_finder(config).await?;

    let response = finder.query(&query, !args.no_generate, args.top_k).await?;

    print!("{}", format_query(&response, format));
    Ok(())
}
