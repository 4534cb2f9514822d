//! Output formatters

pub mod json;
pub mod markdown;
pub mod terminal;

use crate::app::OutputFormat;
use formfinder_core::{FormDetails, FormsListing, QueryResponse, StatusReport, SwitchReport};

pub fn format_query(response: &QueryResponse, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_value(response),
        OutputFormat::Md => markdown::format_query(response),
        OutputFormat::Cli => terminal::format_query(response),
    }
}

pub fn format_status(status: &StatusReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_value(status),
        OutputFormat::Md => markdown::format_status(status),
        OutputFormat::Cli => terminal::format_status(status),
    }
}

pub fn format_forms(listing: &FormsListing, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_value(listing),
        OutputFormat::Md => markdown::format_forms(listing),
        OutputFormat::Cli => terminal::format_forms(listing),
    }
}

pub fn format_form(details: &FormDetails, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_value(details),
        OutputFormat::Md => markdown::format_form(details),
        OutputFormat::Cli => terminal::format_form(details),
    }
}

pub fn format_switch(report: &SwitchReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_value(report),
        OutputFormat::Md | OutputFormat::Cli => format!(
            "Current mode: {}\nEnhanced available: {}\n{}\n",
            report.current_mode,
            if report.can_switch_to_enhanced { "yes" } else { "no" },
            report.message
        ),
    }
}
