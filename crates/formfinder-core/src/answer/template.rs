//! Rule-based answer templates

use super::intent::Intent;
use super::{truncate_chars, AnswerComposer, NO_DOCUMENTS_MESSAGE, NO_FORMS_MESSAGE};
use crate::corpus::{FormInfo, RecordKind};
use crate::error::Result;
use crate::search::QueryResult;
use async_trait::async_trait;

/// Top scores strictly above this earn the "also check out" closing.
pub const HIGH_CONFIDENCE: f64 = 0.75;

const USE_CASE_MAX_CHARS: usize = 50;
const INSTRUCTION_EXCERPT_CHARS: usize = 300;
const MAX_RELATED: usize = 2;

/// Deterministic composer, no model call.
#[derive(Debug, Clone)]
pub struct TemplateComposer {
    group_related: bool,
    empty_message: &'static str,
}

impl TemplateComposer {
    /// Whole-form corpus: no related-section grouping.
    pub fn simple() -> Self {
        Self {
            group_related: false,
            empty_message: NO_DOCUMENTS_MESSAGE,
        }
    }

    /// Chunk corpus: lists other sections of the top result's form.
    pub fn enhanced() -> Self {
        Self {
            group_related: true,
            empty_message: NO_FORMS_MESSAGE,
        }
    }

    pub fn compose_text(&self, query: &str, results: &[QueryResult]) -> String {
        let Some(top) = results.first() else {
            return self.empty_message.to_string();
        };

        let info = top.record.form_info();
        let mut answer = Intent::classify(query).opener(&info);
        answer.push_str(&explanation(top, &info));
        if self.group_related {
            answer.push_str(&related_sections(top, results));
        }
        answer.push_str(&closing(top, results));
        answer
    }
}

#[async_trait]
impl AnswerComposer for TemplateComposer {
    async fn compose(&self, query: &str, results: &[QueryResult]) -> Result<String> {
        Ok(self.compose_text(query, results))
    }

    fn name(&self) -> &'static str {
        "templated"
    }
}

fn explanation(top: &QueryResult, info: &FormInfo) -> String {
    let page = top.record.page();
    match &top.record.kind {
        RecordKind::Metadata(_) => {
            let mut text = format!(" {}", info.description);
            if let Some(use_case) = info.use_cases.first() {
                if use_case.chars().count() < USE_CASE_MAX_CHARS {
                    text.push_str(&format!(" This form is commonly used for {}.", use_case));
                }
            }
            text
        }
        RecordKind::LineItem { line_number, .. } => {
            let mut text = format!("\n\n**Line {}**: {}", line_number, top.content());
            if let Some(p) = page {
                text.push_str(&format!(" (Page {})", p));
            }
            text
        }
        RecordKind::SectionHeader { .. } => {
            let mut text = format!("\n\nThis relates to the **{}** section", top.content());
            if let Some(p) = page {
                text.push_str(&format!(" on page {}", p));
            }
            text.push('.');
            text
        }
        RecordKind::Instruction { .. } => {
            let (excerpt, cut) = truncate_chars(top.content(), INSTRUCTION_EXCERPT_CHARS);
            let mut text = format!("\n\n{}", excerpt);
            if cut {
                text.push_str("...");
            }
            if let Some(p) = page {
                text.push_str(&format!("\n\n(From page {})", p));
            }
            text
        }
        RecordKind::Other { .. } => format!(" {}", info.description),
    }
}

/// Bullet for a same-form result, if it has a line number or page to show.
fn describe(result: &QueryResult) -> Option<String> {
    if let Some(line) = result.record.line_number() {
        return Some(format!("Line {}", line));
    }
    result
        .record
        .page()
        .map(|p| format!("{} on page {}", result.record.kind_name(), p))
}

fn related_sections(top: &QueryResult, results: &[QueryResult]) -> String {
    let bullets: Vec<String> = results
        .iter()
        .filter(|r| r.index != top.index && r.form_number() == top.form_number())
        .filter_map(describe)
        .take(MAX_RELATED)
        .collect();

    if bullets.is_empty() {
        return String::new();
    }

    let mut text = String::from("\n\n**Related sections:**");
    for bullet in bullets {
        text.push_str("\n- ");
        text.push_str(&bullet);
    }
    text
}

fn closing(top: &QueryResult, results: &[QueryResult]) -> String {
    if top.similarity > HIGH_CONFIDENCE {
        results[1..]
            .iter()
            .find(|r| r.record.is_metadata())
            .map(|other| {
                format!(
                    "\n\nYou might also want to check out **Form {}** if needed.",
                    other.form_number()
                )
            })
            .unwrap_or_default()
    } else {
        "\n\nIf this isn't quite what you're looking for, feel free to ask in a different way!"
            .to_string()
    }
}
