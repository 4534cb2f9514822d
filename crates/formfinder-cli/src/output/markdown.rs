//! Markdown output formatter

use formfinder_core::{FormDetails, FormsListing, QueryResponse, StatusReport};

pub fn format_query(response: &QueryResponse) -> String {
    let mut output = format!("# {}\n\n{}\n\n## Results\n\n", response.query, response.answer);

    for (i, r) in response.results.iter().enumerate() {
        output.push_str(&format!(
            "{}. **{}** (Score: {:.3})\n",
            i + 1,
            r.filename(),
            r.similarity
        ));
    }

    if response.results.is_empty() {
        output.push_str("*No results found*\n");
    }

    output
}

pub fn format_status(status: &StatusReport) -> String {
    format!(
        "# Status\n\n\
         - **Mode**: {}\n\
         - **Documents**: {} ({} forms, {} chunks)\n\
         - **Answers**: {}\n\
         - **Embeddings**: `{}` ({} dims)\n\
         - **Enhanced data**: {}\n",
        status.mode,
        status.total_documents,
        status.total_forms,
        status.total_chunks,
        status.composer,
        status.embedding_model,
        status.dimensions,
        if status.enhanced_available {
            "available"
        } else {
            "not found"
        }
    )
}

pub fn format_forms(listing: &FormsListing) -> String {
    let mut output = String::from("# Forms\n\n| Form | Label |\n|---|---|\n");
    for form in &listing.forms {
        output.push_str(&format!("| {} | {} |\n", form.form_number, form.filename));
    }
    output
}

pub fn format_form(details: &FormDetails) -> String {
    let mut output = match details.form_metadata() {
        Some(meta) => format!(
            "# Form {} - {}\n\n{}\n",
            meta.form_number, meta.title, meta.description
        ),
        None => format!("# Form {}\n", details.form_number),
    };

    if details.has_chunks {
        output.push_str("\n## Sections\n\n");
        for chunk in &details.chunks.preview {
            output.push_str(&format!("- **{}**: {}\n", chunk.filename, chunk.content));
        }
    }

    output
}
