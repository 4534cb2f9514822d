//! Integration tests for the formfinder binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FORMS: &str = r#"[
  {
    "form_number": "1040",
    "title": "U.S. Individual Income Tax Return",
    "description": "Form 1040 is used by U.S. taxpayers to file an annual income tax return.",
    "use_cases": ["individual tax return"],
    "file_url": "https://www.irs.gov/pub/irs-pdf/f1040.pdf",
    "chunks": [
      {"type": "line_item", "text": "Wages, salaries, tips", "page": 1, "line_number": "1a", "chunk_id": "1040-1"},
      {"type": "section_header", "text": "Income", "page": 1, "chunk_id": "1040-2"}
    ]
  },
  {
    "form_number": "W-2",
    "title": "Wage and Tax Statement",
    "description": "Employers report wages paid and taxes withheld for each employee.",
    "use_cases": ["employee wages"],
    "file_url": "https://www.irs.gov/pub/irs-pdf/fw2.pdf"
  },
  {
    "form_number": "1099-NEC",
    "title": "Nonemployee Compensation",
    "description": "Report payments of 600 dollars or more to independent contractors.",
    "use_cases": ["contractor payments"],
    "file_url": "https://www.irs.gov/pub/irs-pdf/f1099nec.pdf"
  }
]"#;

fn formfinder_cmd() -> Command {
    Command::cargo_bin("formfinder").unwrap()
}

/// Writes the corpus and a config using offline embeddings and templates.
fn setup(enhanced_mode: bool, with_enhanced_file: bool) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let simple = dir.path().join("simple.json");
    let enhanced = dir.path().join("enhanced.json");
    fs::write(&simple, FORMS).unwrap();
    if with_enhanced_file {
        fs::write(&enhanced, FORMS).unwrap();
    }

    let config = dir.path().join("config.yml");
    fs::write(&config, config_yaml(&simple, &enhanced, enhanced_mode)).unwrap();
    (dir, config)
}

fn config_yaml(simple: &Path, enhanced: &Path, enhanced_mode: bool) -> String {
    format!(
        "corpus:\n  simple_path: \"{}\"\n  enhanced_path: \"{}\"\n  enhanced_mode: {}\n\
         answer:\n  strategy: templated\n\
         embedding:\n  provider: hashed\n  dimensions: 128\n",
        simple.display(),
        enhanced.display(),
        enhanced_mode
    )
}

#[test]
fn test_ask_templated_answer() {
    let (_dir, config) = setup(false, false);

    formfinder_cmd()
        .arg("--config")
        .arg(&config)
        .args(["ask", "I", "need", "to", "file", "my", "personal", "income", "taxes"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("You'll need **Form "));
}

#[test]
fn test_ask_without_generation_lists_files() {
    let (_dir, config) = setup(false, false);

    formfinder_cmd()
        .arg("--config")
        .arg(&config)
        .args(["ask", "--no-generate", "wages"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Found 3 relevant files: "));
}

#[test]
fn test_ask_json_respects_top_k() {
    let (_dir, config) = setup(false, false);

    let output = formfinder_cmd()
        .arg("--config")
        .arg(&config)
        .args(["--format", "json", "ask", "-n", "1", "contractor", "payments"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let response: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(response["results"].as_array().unwrap().len(), 1);
    assert_eq!(response["mode"], "simple");
    assert_eq!(response["total_documents"], 3);
}

#[test]
fn test_enhanced_mode_status() {
    let (_dir, config) = setup(true, true);

    formfinder_cmd()
        .arg("--config")
        .arg(&config)
        .args(["--format", "json", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mode\": \"enhanced\""))
        .stdout(predicate::str::contains("\"total_chunks\": 2"));
}

#[test]
fn test_enhanced_request_without_file_falls_back() {
    let (_dir, config) = setup(true, false);

    formfinder_cmd()
        .arg("--config")
        .arg(&config)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mode:            simple"));
}

#[test]
fn test_forms_and_form() {
    let (_dir, config) = setup(true, true);

    formfinder_cmd()
        .arg("--config")
        .arg(&config)
        .arg("forms")
        .assert()
        .success()
        .stdout(predicate::str::contains("1099-NEC"))
        .stdout(predicate::str::contains("3 forms, 5 documents"));

    formfinder_cmd()
        .arg("--config")
        .arg(&config)
        .args(["form", "1040"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Form 1040: U.S. Individual Income Tax Return"))
        .stdout(predicate::str::contains("Form 1040 - Line 1a (line 1a, p. 1)"));
}

#[test]
fn test_unknown_form_exits_not_found() {
    let (_dir, config) = setup(false, false);

    formfinder_cmd()
        .arg("--config")
        .arg(&config)
        .args(["form", "8962"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Form not found: 8962"));
}

#[test]
fn test_missing_corpus_exits_not_found() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.yml");
    fs::write(
        &config,
        config_yaml(
            &dir.path().join("absent.json"),
            &dir.path().join("absent-too.json"),
            false,
        ),
    )
    .unwrap();

    formfinder_cmd()
        .arg("--config")
        .arg(&config)
        .args(["ask", "wages"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("corpus file not found"));
}

#[test]
fn test_switch_mode_only_reports() {
    let (_dir, config) = setup(false, true);

    formfinder_cmd()
        .arg("--config")
        .arg(&config)
        .arg("switch-mode")
        .assert()
        .success()
        .stdout(predicate::str::contains("Current mode: simple"))
        .stdout(predicate::str::contains("Enhanced available: yes"));
}

#[test]
fn test_blank_query_is_invalid_input() {
    let (_dir, config) = setup(false, false);

    formfinder_cmd()
        .arg("--config")
        .arg(&config)
        .args(["ask", "  "])
        .assert()
        .code(3);
}
