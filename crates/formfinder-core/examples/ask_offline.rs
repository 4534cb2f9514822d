// Ask a question against an in-memory corpus using FormFinder as a library

use formfinder_core::corpus::{build_records, FormEntry};
use formfinder_core::{FormFinder, HashedEmbedder, Mode, TemplateComposer};
use std::sync::Arc;

const FORMS: &str = r#"[
  {
    "form_number": "1040",
    "title": "U.S. Individual Income Tax Return",
    "description": "Form 1040 is used by U.S. taxpayers to file an annual income tax return.",
    "use_cases": ["individual tax return", "income reporting"],
    "file_url": "https://www.irs.gov/pub/irs-pdf/f1040.pdf"
  },
  {
    "form_number": "W-4",
    "title": "Employee's Withholding Certificate",
    "description": "Give Form W-4 to your employer so they withhold the right amount of tax.",
    "use_cases": ["new job"],
    "file_url": "https://www.irs.gov/pub/irs-pdf/fw4.pdf"
  }
]"#;

#[tokio::main]
async fn main() -> formfinder_core::Result<()> {
    println!("FormFinder Offline Example\n");

    let forms: Vec<FormEntry> = serde_json::from_str(FORMS)?;
    let records = build_records(&forms, Mode::Simple)?;

    let finder = FormFinder::from_records(
        records,
        Mode::Simple,
        Arc::new(HashedEmbedder::new(256)),
        Arc::new(TemplateComposer::simple()),
    )
    .await?;

    let question = "I just started a new job, what do I give my employer?";
    println!("Q: {}\n", question);

    let response = finder.query(question, true, None).await?;
    println!("A: {}\n", response.answer);
    for result in &response.results {
        println!("  {:.3}  {}", result.similarity, result.filename());
    }

    Ok(())
}
