//! CLI command handlers

pub mod ask;
pub mod form;
pub mod forms;
pub mod status;
pub mod switch_mode;

use anyhow::Result;
use formfinder_core::{embedder_from_config, generator_from_config, Config, FormFinder};

/// Load and embed the corpus named by the config.
pub async fn load_finder(config: &Config) -> Result<FormFinder> {
    let embedder = embedder_from_config(config)?;
    let generator = generator_from_config(config)?;
    Ok(FormFinder::start(config, embedder, generator).await?)
}
