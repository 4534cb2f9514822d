//! Corpus model and loading

mod loader;
mod record;

pub use loader::{build_records, load, read_forms, ChunkEntry, FormEntry};
pub use record::{ChunkRef, DocumentRecord, FormInfo, FormMetadata, KindLabel, RecordKind};
