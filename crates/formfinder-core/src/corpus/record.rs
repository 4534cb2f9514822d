//! Retrievable records and the form view derived from them

use serde::{Deserialize, Serialize};
use std::fmt;

/// One unit of retrievable text: a whole form or one chunk of its PDF.
///
/// `filename` is a display label and need not be unique. Records are kept in
/// insertion order; the embedding matrix is aligned to them by index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentRecord {
    pub filename: String,
    pub content: String,
    #[serde(flatten)]
    pub kind: RecordKind,
}

/// Kind-specific fields. Each variant carries only what it needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordKind {
    Metadata(FormMetadata),
    LineItem {
        #[serde(flatten)]
        chunk: ChunkRef,
        line_number: String,
    },
    SectionHeader {
        #[serde(flatten)]
        chunk: ChunkRef,
    },
    Instruction {
        #[serde(flatten)]
        chunk: ChunkRef,
    },
    /// Chunk kind the extractor emitted that we have no template for
    Other {
        #[serde(flatten)]
        chunk: ChunkRef,
        chunk_type: String,
    },
}

/// Whole-form fields, kept structured instead of re-parsed from display text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormMetadata {
    pub form_number: String,
    pub title: String,
    pub description: String,
    pub use_cases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

/// Provenance shared by every chunk kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChunkRef {
    pub form_number: String,
    pub form_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    pub chunk_id: String,
}

/// Coarse record kind, as exposed on query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindLabel {
    Metadata,
    LineItem,
    SectionHeader,
    Instruction,
    Other,
}

impl KindLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metadata => "metadata",
            Self::LineItem => "line_item",
            Self::SectionHeader => "section_header",
            Self::Instruction => "instruction",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for KindLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DocumentRecord {
    pub fn form_number(&self) -> &str {
        match &self.kind {
            RecordKind::Metadata(meta) => &meta.form_number,
            RecordKind::LineItem { chunk, .. }
            | RecordKind::SectionHeader { chunk }
            | RecordKind::Instruction { chunk }
            | RecordKind::Other { chunk, .. } => &chunk.form_number,
        }
    }

    pub fn label(&self) -> KindLabel {
        match &self.kind {
            RecordKind::Metadata(_) => KindLabel::Metadata,
            RecordKind::LineItem { .. } => KindLabel::LineItem,
            RecordKind::SectionHeader { .. } => KindLabel::SectionHeader,
            RecordKind::Instruction { .. } => KindLabel::Instruction,
            RecordKind::Other { .. } => KindLabel::Other,
        }
    }

    /// Raw kind string: the extractor's own name for unknown chunk kinds.
    pub fn kind_name(&self) -> &str {
        match &self.kind {
            RecordKind::Other { chunk_type, .. } => chunk_type,
            _ => self.label().as_str(),
        }
    }

    pub fn chunk(&self) -> Option<&ChunkRef> {
        match &self.kind {
            RecordKind::Metadata(_) => None,
            RecordKind::LineItem { chunk, .. }
            | RecordKind::SectionHeader { chunk }
            | RecordKind::Instruction { chunk }
            | RecordKind::Other { chunk, .. } => Some(chunk),
        }
    }

    pub fn page(&self) -> Option<u32> {
        self.chunk().and_then(|c| c.page)
    }

    pub fn line_number(&self) -> Option<&str> {
        match &self.kind {
            RecordKind::LineItem { line_number, .. } => Some(line_number),
            _ => None,
        }
    }

    pub fn chunk_id(&self) -> Option<&str> {
        self.chunk().map(|c| c.chunk_id.as_str())
    }

    pub fn is_metadata(&self) -> bool {
        matches!(self.kind, RecordKind::Metadata(_))
    }

    /// Text handed to the embedding provider.
    pub fn embedding_text(&self) -> String {
        format!("{} {}", self.filename, self.content)
    }

    pub fn form_info(&self) -> FormInfo {
        FormInfo::from_record(self)
    }
}

/// Form-level view of a record used by the answer templates.
#[derive(Debug, Clone, PartialEq)]
pub struct FormInfo {
    pub number: String,
    pub title: String,
    pub description: String,
    pub use_cases: Vec<String>,
}

impl FormInfo {
    /// Chunks report their parent form; their own text stands in as the
    /// description and they have no use cases.
    pub fn from_record(record: &DocumentRecord) -> Self {
        match &record.kind {
            RecordKind::Metadata(meta) => Self {
                number: meta.form_number.clone(),
                title: meta.title.clone(),
                description: meta.description.clone(),
                use_cases: meta.use_cases.clone(),
            },
            _ => {
                let (number, title) = record
                    .chunk()
                    .map(|c| (c.form_number.clone(), c.form_title.clone()))
                    .unwrap_or_default();
                Self {
                    number,
                    title,
                    description: record.content.clone(),
                    use_cases: Vec::new(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_item() -> DocumentRecord {
        DocumentRecord {
            filename: "Form 1040 - Line 1a".to_string(),
            content: "Total amount from Form(s) W-2, box 1".to_string(),
            kind: RecordKind::LineItem {
                chunk: ChunkRef {
                    form_number: "1040".to_string(),
                    form_title: "U.S. Individual Income Tax Return".to_string(),
                    page: Some(1),
                    chunk_id: "1040-p1-3".to_string(),
                },
                line_number: "1a".to_string(),
            },
        }
    }

    #[test]
    fn test_chunk_accessors() {
        let record = line_item();
        assert_eq!(record.form_number(), "1040");
        assert_eq!(record.label(), KindLabel::LineItem);
        assert_eq!(record.page(), Some(1));
        assert_eq!(record.line_number(), Some("1a"));
        assert_eq!(record.chunk_id(), Some("1040-p1-3"));
        assert!(!record.is_metadata());
    }

    #[test]
    fn test_form_info_for_chunk_uses_parent_form() {
        let info = line_item().form_info();
        assert_eq!(info.number, "1040");
        assert_eq!(info.title, "U.S. Individual Income Tax Return");
        assert_eq!(info.description, "Total amount from Form(s) W-2, box 1");
        assert!(info.use_cases.is_empty());
    }

    #[test]
    fn test_other_kind_keeps_raw_name() {
        let record = DocumentRecord {
            filename: "Form 941 - table".to_string(),
            content: "Rates".to_string(),
            kind: RecordKind::Other {
                chunk: ChunkRef {
                    form_number: "941".to_string(),
                    form_title: "Employer's Quarterly Federal Tax Return".to_string(),
                    page: None,
                    chunk_id: "941-0".to_string(),
                },
                chunk_type: "table".to_string(),
            },
        };
        assert_eq!(record.kind_name(), "table");
        assert_eq!(record.label(), KindLabel::Other);
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let json = serde_json::to_value(line_item()).unwrap();
        assert_eq!(json["type"], "line_item");
        assert_eq!(json["form_number"], "1040");
        assert_eq!(json["line_number"], "1a");
    }
}
