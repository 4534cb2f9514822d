//! Single form command

use super::load_finder;
use crate::app::{FormArgs, OutputFormat};
use crate::output::format_form;
use anyhow::Result;
use formfinder_core::Config;

pub async fn run(args: FormArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let finder = load_finder(config).await?;
    let details = finder.form_details(&args.number)?;
    print!("{}", format_form(&details, format));
    Ok(())
}
