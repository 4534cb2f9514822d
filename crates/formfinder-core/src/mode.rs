//! Operating mode selection
//!
//! The mode is picked once at startup from the config toggle and whether the
//! enhanced corpus file exists. It never changes for the life of a process;
//! a switch request only reports whether a restart could switch.

use crate::config::CorpusConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Corpus granularity and answer strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Whole-form metadata only
    Simple,
    /// Metadata plus extracted PDF chunks
    Enhanced,
}

impl Mode {
    /// Results returned when the caller gives no top-k.
    pub fn default_top_k(&self) -> usize {
        match self {
            Mode::Simple => 3,
            Mode::Enhanced => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Simple => "simple",
            Mode::Enhanced => "enhanced",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of startup mode selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeSelection {
    pub mode: Mode,
    pub source: PathBuf,
    /// Set when enhanced mode was requested but unavailable
    pub fallback_reason: Option<String>,
}

/// Choose the mode and the corpus file to load.
pub fn select_mode(config: &CorpusConfig) -> ModeSelection {
    let enhanced_available = config.enhanced_path.exists();

    if config.enhanced_mode && enhanced_available {
        return ModeSelection {
            mode: Mode::Enhanced,
            source: config.enhanced_path.clone(),
            fallback_reason: None,
        };
    }

    let fallback_reason = if config.enhanced_mode {
        let reason = format!(
            "enhanced data not found at {}, falling back to simple mode",
            config.enhanced_path.display()
        );
        tracing::warn!("{}", reason);
        Some(reason)
    } else {
        None
    };

    ModeSelection {
        mode: Mode::Simple,
        source: config.simple_path.clone(),
        fallback_reason,
    }
}

/// Feasibility of switching modes on the next restart.
#[derive(Debug, Clone, Serialize)]
pub struct SwitchReport {
    pub current_mode: Mode,
    pub can_switch_to_enhanced: bool,
    pub message: String,
}

/// Report whether a restart could switch modes. Never mutates live state.
pub fn switch_report(current: Mode, config: &CorpusConfig) -> SwitchReport {
    let enhanced_available = config.enhanced_path.exists();
    let message = match (current, enhanced_available) {
        (Mode::Enhanced, _) => {
            "Already in enhanced mode. Unset FORMFINDER_ENHANCED_MODE and restart to use simple mode"
                .to_string()
        }
        (Mode::Simple, true) => {
            "Set FORMFINDER_ENHANCED_MODE=true and restart to switch modes".to_string()
        }
        (Mode::Simple, false) => format!(
            "Enhanced data not available at {}. Run the chunk extractor first",
            config.enhanced_path.display()
        ),
    };

    SwitchReport {
        current_mode: current,
        can_switch_to_enhanced: enhanced_available,
        message,
    }
}
