use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("bookwire"))
}

fn fixtures() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn sample_message() -> std::path::PathBuf {
    fixtures().join("book_update.hex")
}

fn sample_dictionary() -> std::path::PathBuf {
    fixtures().join("fields.json")
}

#[test]
fn help_covers_decode() {
    cmd()
        .arg("msg")
        .arg("decode")
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.bin");
    let report = temp.path().join("report.json");

    cmd()
        .arg("msg")
        .arg("decode")
        .arg(missing)
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn unsupported_extension_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("message.txt");
    std::fs::write(&input, "00").expect("write input");

    cmd()
        .arg("msg")
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("unsupported input format"));
}

#[test]
fn stdout_outputs_decoded_report() {
    let assert = cmd()
        .arg("msg")
        .arg("decode")
        .arg(sample_message())
        .arg("-d")
        .arg(sample_dictionary())
        .arg("--stdout")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let report: Value = serde_json::from_str(&stdout).expect("valid json");

    assert_eq!(report["report_version"], 1);
    assert_eq!(report["summary"]["fields"][0]["display"], "NDAQ");
    assert_eq!(report["entries"].as_array().expect("entries").len(), 3);
    assert_eq!(report["entries"][0]["action"], "ADD");
    assert_eq!(report["entries"][0]["fields"][0]["display"], "100.50");
    assert_eq!(report["entries"][2]["action"], "DELETE");
}

#[test]
fn report_file_is_written() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("msg")
        .arg("decode")
        .arg(sample_message())
        .arg("-d")
        .arg(sample_dictionary())
        .arg("-o")
        .arg(&report)
        .assert()
        .success()
        .stderr(contains("OK: report written"));

    let text = std::fs::read_to_string(&report).expect("report file");
    let _: Value = serde_json::from_str(&text).expect("valid json");
}

#[test]
fn stdout_and_report_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("msg")
        .arg("decode")
        .arg(sample_message())
        .arg("--stdout")
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn pretty_and_compact_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("msg")
        .arg("decode")
        .arg(sample_message())
        .arg("-o")
        .arg(report)
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("msg")
        .arg("decode")
        .arg(sample_message())
        .arg("-d")
        .arg(sample_dictionary())
        .arg("-o")
        .arg(report)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(predicates::str::contains("OK:").not());
}

#[test]
fn strict_passes_with_full_dictionary() {
    cmd()
        .arg("msg")
        .arg("decode")
        .arg(sample_message())
        .arg("-d")
        .arg(sample_dictionary())
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .success();
}

#[test]
fn strict_fails_without_dictionary() {
    cmd()
        .arg("msg")
        .arg("decode")
        .arg(sample_message())
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(contains("unresolved fields detected"));
}

#[test]
fn list_unresolved_names_the_fields() {
    cmd()
        .arg("msg")
        .arg("decode")
        .arg(sample_message())
        .arg("--stdout")
        .arg("--list-unresolved")
        .assert()
        .success()
        .stderr(contains("Unresolved:").and(contains("field 22 UNKNOWN")));
}

#[test]
fn trace_reports_decode_events() {
    cmd()
        .arg("msg")
        .arg("decode")
        .arg(sample_message())
        .arg("-d")
        .arg(sample_dictionary())
        .arg("--stdout")
        .arg("--trace")
        .assert()
        .success()
        .stderr(
            contains("trace: set definitions")
                .and(contains("trace: summary"))
                .and(contains("trace: entry ADD")),
        );
}

#[test]
fn truncated_message_fails_with_decode_error() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("short.hex");
    std::fs::write(&input, "0301").expect("write input");

    cmd()
        .arg("msg")
        .arg("decode")
        .arg(input)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("decode failed").and(contains("truncated")));
}
