//! Integration tests for the `pdfbench` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("pdfbench").unwrap()
}

/// Create a multi-page PDF with one line of text per page using lopdf.
fn pdf_with_pages(texts: &[&str]) -> Vec<u8> {
    use lopdf::{Object, Stream, dictionary};

    let mut doc = lopdf::Document::with_version("1.5");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(612),
        Object::Integer(792),
    ];

    let mut page_ids = Vec::new();
    for text in texts {
        let content_str = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
        let stream = Stream::new(dictionary! {}, content_str.into_bytes());
        let content_id = doc.add_object(stream);

        let resources = dictionary! {
            "Font" => dictionary! { "F1" => Object::Reference(font_id) },
        };

        let page_dict = dictionary! {
            "Type" => "Page",
            "MediaBox" => media_box.clone(),
            "Contents" => Object::Reference(content_id),
            "Resources" => resources,
        };
        page_ids.push(doc.add_object(page_dict));
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(texts.len() as i64),
    };
    let pages_id = doc.add_object(pages_dict);

    for &pid in &page_ids {
        if let Ok(page_obj) = doc.get_object_mut(pid) {
            if let Ok(dict) = page_obj.as_dict_mut() {
                dict.set("Parent", Object::Reference(pages_id));
            }
        }
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn write_pdf(dir: &Path, name: &str, texts: &[&str]) {
    fs::write(dir.join(name), pdf_with_pages(texts)).unwrap();
}

fn read_results(dir: &Path) -> serde_json::Value {
    let raw = fs::read_to_string(dir.join("out/results.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

// --- Error handling tests ---

#[test]
fn missing_input_fails() {
    let temp = TempDir::new().unwrap();

    cmd()
        .current_dir(temp.path())
        .arg("nonexistent.pdf")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn no_input_and_no_defaults_fails() {
    let temp = TempDir::new().unwrap();

    cmd()
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no input"));
}

#[test]
fn zero_timeout_is_rejected() {
    let temp = TempDir::new().unwrap();
    write_pdf(temp.path(), "doc.pdf", &["Hello"]);

    cmd()
        .current_dir(temp.path())
        .args(["doc.pdf", "--timeout", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Timeout"));
}

// --- Single file tests ---

#[test]
fn single_pdf_produces_summary_and_json() {
    let temp = TempDir::new().unwrap();
    write_pdf(temp.path(), "doc.pdf", &["Hello World", "Second page"]);

    cmd()
        .current_dir(temp.path())
        .args(["doc.pdf", "-o", "out", "--no-plot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BENCHMARK RESULTS"))
        .stdout(predicate::str::contains("| Library"))
        .stdout(predicate::str::contains("Time (s/page)"))
        .stdout(predicate::str::contains("mupdf"));

    let results = read_results(temp.path());
    let summary = results["summary"].as_object().unwrap();
    // The three library-backed adapters always run. A row exists even if
    // one of them failed on the fixture.
    assert!(summary.contains_key("mupdf"));
    assert!(summary.contains_key("pdf-extract"));
    assert!(summary.contains_key("lopdf"));
    // No MCP server is available in the test environment.
    assert!(!summary.contains_key("pdf-mcp"));
    assert!(summary["mupdf"]["avg_time"].is_number());
    assert!(summary["mupdf"].as_object().unwrap().contains_key("avg_alignment"));
    assert!(summary["mupdf"]["avg_garbled_ratio"].is_number());

    let details = results["details"].as_array().unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0]["file"], "doc.pdf");
    assert!(details[0]["times"].as_object().unwrap().contains_key("mupdf"));
}

#[test]
fn default_run_writes_plot_page() {
    let temp = TempDir::new().unwrap();
    write_pdf(temp.path(), "doc.pdf", &["Hello World"]);

    cmd()
        .current_dir(temp.path())
        .args(["doc.pdf", "-o", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved visualization to"));

    let html = fs::read_to_string(temp.path().join("out/benchmark_plot.html")).unwrap();
    assert!(html.contains("<canvas"));
}

#[test]
fn no_plot_skips_plot_page() {
    let temp = TempDir::new().unwrap();
    write_pdf(temp.path(), "doc.pdf", &["Hello World"]);

    cmd()
        .current_dir(temp.path())
        .args(["doc.pdf", "-o", "out", "--no-plot"])
        .assert()
        .success();

    assert!(temp.path().join("out/results.json").exists());
    assert!(!temp.path().join("out/benchmark_plot.html").exists());
}

// --- Directory tests ---

#[test]
fn directory_run_respects_max_files() {
    let temp = TempDir::new().unwrap();
    let pdf_dir = temp.path().join("docs");
    fs::create_dir(&pdf_dir).unwrap();
    write_pdf(&pdf_dir, "c.pdf", &["Gamma"]);
    write_pdf(&pdf_dir, "a.pdf", &["Alpha"]);
    write_pdf(&pdf_dir, "b.pdf", &["Beta"]);
    fs::write(pdf_dir.join("notes.txt"), "not a pdf").unwrap();

    cmd()
        .current_dir(temp.path())
        .args(["docs", "-o", "out", "--max-files", "2", "--no-plot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Benchmarking directory"));

    let results = read_results(temp.path());
    let files: Vec<&str> = results["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["file"].as_str().unwrap())
        .collect();
    assert_eq!(files, vec!["a.pdf", "b.pdf"]);
}

#[test]
fn empty_directory_reports_nothing_to_do() {
    let temp = TempDir::new().unwrap();
    let pdf_dir = temp.path().join("docs");
    fs::create_dir(&pdf_dir).unwrap();

    cmd()
        .current_dir(temp.path())
        .args(["docs", "-o", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No PDF files found"));
}

// --- MCP server tests ---

#[cfg(unix)]
#[test]
fn explicit_mcp_server_joins_the_benchmark() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    write_pdf(temp.path(), "doc.pdf", &["Hello World"]);

    // Minimal scripted MCP server: drain stdin, answer initialize and
    // tools/call with canned JSON-RPC responses.
    let script = r#"#!/bin/sh
cat >/dev/null
printf '%s\n' '{"jsonrpc":"2.0","id":1,"result":{"protocolVersion":"2024-11-05"}}'
printf '%s\n' '{"jsonrpc":"2.0","id":2,"result":{"content":[{"type":"text","text":"--- Page 1 ---\nHello from MCP\n--- Page 2 ---\nSecond page"}]}}'
"#;
    let server = temp.path().join("fake-mcp-server.sh");
    fs::write(&server, script).unwrap();
    fs::set_permissions(&server, fs::Permissions::from_mode(0o755)).unwrap();

    cmd()
        .current_dir(temp.path())
        .args([
            "doc.pdf",
            "-o",
            "out",
            "--no-plot",
            "--mcp-server",
            "./fake-mcp-server.sh",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("pdf-mcp"));

    let results = read_results(temp.path());
    let summary = results["summary"].as_object().unwrap();
    assert!(summary.contains_key("pdf-mcp"));
    assert!(summary["pdf-mcp"]["avg_time"].as_f64().unwrap() >= 0.0);
}
