//! Corpus file loading
//!
//! Reads the JSON form list and turns it into the ordered record sequence
//! for the active mode. The file is produced by the external chunk
//! extractor and consumed read-only.

use super::record::{ChunkRef, DocumentRecord, FormMetadata, RecordKind};
use crate::error::LoadError;
use crate::mode::Mode;
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::path::Path;

/// One form as it appears in the corpus file.
#[derive(Debug, Clone, Deserialize)]
pub struct FormEntry {
    pub form_number: String,
    pub title: String,
    pub description: String,
    pub use_cases: Vec<String>,
    pub file_url: String,
    #[serde(default)]
    pub chunks: Vec<ChunkEntry>,
}

/// One extracted PDF fragment.
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkEntry {
    #[serde(rename = "type")]
    pub chunk_type: String,
    pub text: String,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "line_number_from_any")]
    pub line_number: Option<String>,
    pub chunk_id: String,
}

/// Extractors write line numbers either as strings ("1a") or integers (7).
fn line_number_from_any<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LineNumber {
        Text(String),
        Number(u64),
    }

    Ok(Option::<LineNumber>::deserialize(deserializer)?.map(|n| match n {
        LineNumber::Text(s) => s,
        LineNumber::Number(n) => n.to_string(),
    }))
}

/// Read and parse the corpus file without converting it.
pub fn read_forms(path: &Path) -> Result<Vec<FormEntry>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::Missing(path.to_path_buf())
        } else {
            LoadError::Unreadable {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    serde_json::from_str(&content).map_err(|e| LoadError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Load the corpus file at `path` as records for `mode`.
pub fn load(path: &Path, mode: Mode) -> Result<Vec<DocumentRecord>, LoadError> {
    let forms = read_forms(path)?;
    let records = build_records(&forms, mode)?;

    let chunk_count = records.iter().filter(|r| !r.is_metadata()).count();
    tracing::info!(
        "Loaded {} forms ({} chunks) from {} in {} mode",
        forms.len(),
        chunk_count,
        path.display(),
        mode
    );
    if records.is_empty() {
        tracing::warn!("Corpus at {} contains no forms", path.display());
    }

    Ok(records)
}

/// Convert parsed form entries into records, preserving file order.
///
/// Simple mode emits one metadata record per form and ignores chunks.
/// Enhanced mode emits the metadata record followed by the form's chunks.
pub fn build_records(forms: &[FormEntry], mode: Mode) -> Result<Vec<DocumentRecord>, LoadError> {
    let mut records = Vec::with_capacity(forms.len());

    for (index, form) in forms.iter().enumerate() {
        if form.form_number.trim().is_empty() {
            return Err(LoadError::InvalidEntry {
                index,
                reason: "empty form_number".to_string(),
            });
        }

        match mode {
            Mode::Simple => records.push(simple_record(form)),
            Mode::Enhanced => {
                records.push(enhanced_metadata_record(form));
                let mut seen = HashSet::with_capacity(form.chunks.len());
                for chunk in &form.chunks {
                    if !seen.insert(chunk.chunk_id.as_str()) {
                        return Err(LoadError::DuplicateChunk {
                            form_number: form.form_number.clone(),
                            chunk_id: chunk.chunk_id.clone(),
                        });
                    }
                    records.push(chunk_record(form, chunk));
                }
            }
        }
    }

    Ok(records)
}

fn form_label(form: &FormEntry) -> String {
    format!("Form {} - {}", form.form_number, form.title)
}

fn metadata(form: &FormEntry) -> FormMetadata {
    FormMetadata {
        form_number: form.form_number.clone(),
        title: form.title.clone(),
        description: form.description.clone(),
        use_cases: form.use_cases.clone(),
        file_url: Some(form.file_url.clone()),
    }
}

fn simple_record(form: &FormEntry) -> DocumentRecord {
    DocumentRecord {
        filename: form_label(form),
        content: format!(
            "{} Use cases: {}. URL: {}",
            form.description,
            form.use_cases.join(", "),
            form.file_url
        ),
        kind: RecordKind::Metadata(metadata(form)),
    }
}

fn enhanced_metadata_record(form: &FormEntry) -> DocumentRecord {
    DocumentRecord {
        filename: form_label(form),
        content: format!(
            "{} Use cases: {}.",
            form.description,
            form.use_cases.join(", ")
        ),
        kind: RecordKind::Metadata(metadata(form)),
    }
}

fn chunk_record(form: &FormEntry, chunk: &ChunkEntry) -> DocumentRecord {
    let chunk_ref = ChunkRef {
        form_number: form.form_number.clone(),
        form_title: form.title.clone(),
        page: chunk.page,
        chunk_id: chunk.chunk_id.clone(),
    };

    let (label, kind) = match (chunk.chunk_type.as_str(), &chunk.line_number) {
        ("line_item", Some(line)) => (
            format!("Line {}", line),
            RecordKind::LineItem {
                chunk: chunk_ref,
                line_number: line.clone(),
            },
        ),
        ("section_header", _) => (
            "Section".to_string(),
            RecordKind::SectionHeader { chunk: chunk_ref },
        ),
        ("instruction", _) => (
            match chunk.page {
                Some(page) => format!("Instructions (Page {})", page),
                None => "Instructions".to_string(),
            },
            RecordKind::Instruction { chunk: chunk_ref },
        ),
        (other, _) => {
            if other == "line_item" {
                tracing::warn!(
                    "Line item chunk {} in form {} has no line number",
                    chunk.chunk_id,
                    form.form_number
                );
            }
            (
                other.to_string(),
                RecordKind::Other {
                    chunk: chunk_ref,
                    chunk_type: other.to_string(),
                },
            )
        }
    };

    DocumentRecord {
        filename: format!("Form {} - {}", form.form_number, label),
        content: chunk.text.clone(),
        kind,
    }
}
