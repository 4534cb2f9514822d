//! Terminal output formatter

use formfinder_core::{DocumentRecord, FormDetails, FormsListing, QueryResponse, StatusReport};

/// "p. 2", "line 1a, p. 1" or empty.
fn provenance(record: &DocumentRecord) -> String {
    match (record.line_number(), record.page()) {
        (Some(line), Some(page)) => format!(" (line {}, p. {})", line, page),
        (Some(line), None) => format!(" (line {})", line),
        (None, Some(page)) => format!(" (p. {})", page),
        (None, None) => String::new(),
    }
}

pub fn format_query(response: &QueryResponse) -> String {
    let mut output = format!("{}\n", response.answer);

    if !response.results.is_empty() {
        output.push('\n');
    }
    for result in &response.results {
        output.push_str(&format!(
            "{:>6.3} {}{}\n",
            result.similarity,
            result.filename(),
            provenance(&result.record)
        ));
    }

    output
}

pub fn format_status(status: &StatusReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("Mode:            {}\n", status.mode));
    output.push_str(&format!("Documents:       {}\n", status.total_documents));
    output.push_str(&format!("  Forms:         {}\n", status.total_forms));
    output.push_str(&format!("  Chunks:        {}\n", status.total_chunks));
    output.push_str(&format!("Answers:         {}\n", status.composer));
    output.push_str(&format!(
        "Embeddings:      {} ({} dims)\n",
        status.embedding_model, status.dimensions
    ));
    output.push_str(&format!(
        "Enhanced data:   {}\n",
        if status.enhanced_available {
            "available"
        } else {
            "not found"
        }
    ));
    output.push_str(&format!(
        "Loaded at:       {}\n",
        status.loaded_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output
}

pub fn format_forms(listing: &FormsListing) -> String {
    let mut output = String::new();
    for form in &listing.forms {
        output.push_str(&format!("{:<10} {}\n", form.form_number, form.filename));
    }
    output.push_str(&format!(
        "\n{} forms, {} documents ({} mode)\n",
        listing.unique_forms, listing.total, listing.mode
    ));
    output
}

pub fn format_form(details: &FormDetails) -> String {
    let mut output = String::new();

    match details.form_metadata() {
        Some(meta) => {
            output.push_str(&format!("Form {}: {}\n", meta.form_number, meta.title));
            output.push_str(&format!("{}\n", meta.description));
            if !meta.use_cases.is_empty() {
                output.push_str(&format!("Use cases: {}\n", meta.use_cases.join(", ")));
            }
            if let Some(ref url) = meta.file_url {
                output.push_str(&format!("PDF: {}\n", url));
            }
        }
        None => output.push_str(&format!("Form {}\n", details.form_number)),
    }

    if details.has_chunks {
        let counts = &details.chunks.by_type;
        output.push_str(&format!(
            "\nSections: {} ({} line items, {} section headers, {} instructions)\n",
            details.chunks.total, counts.line_items, counts.sections, counts.instructions
        ));
        for chunk in &details.chunks.preview {
            output.push_str(&format!("  {}{}\n", chunk.filename, provenance(chunk)));
        }
        if details.chunks.total > details.chunks.preview.len() {
            output.push_str("  ...\n");
        }
    }

    output
}
