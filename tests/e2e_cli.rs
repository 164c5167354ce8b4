use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::NamedTempFile;

const KNOWLEDGE_BASE: &str = "\
\"question\",\"answer\"
\"چگونه رمز عبور را تغییر دهم\",\"از بخش تنظیمات. ویدیو: https://www.aparat.com/v/xyz\"
\"چگونه حساب کاربری بسازم\",\"روی دکمه ثبت نام بزنید\"
\"رمز کارت بانکی\",\"به بانک مراجعه کنید\"
\"رمز ورود سامانه\",\"از گزینه فراموشی رمز استفاده کنید\"
\"رمز پیامکی\",\"از اپلیکیشن بانک دریافت کنید\"
این خط نادیده گرفته می‌شود
";

fn bin() -> Command {
    let path = assert_cmd::cargo::cargo_bin!("faq-match");
    Command::new(path)
}

fn knowledge_base() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(KNOWLEDGE_BASE.as_bytes()).unwrap();
    file
}

fn kb_arg(file: &NamedTempFile) -> String {
    file.path().to_string_lossy().into_owned()
}

#[test]
fn query_returns_ranked_json() {
    let kb = knowledge_base();
    let assert = bin()
        .args(["--kb", kb_arg(&kb).as_str(), "--output", "json", "query"])
        .arg("رمز عبور چگونه تغییر میکند")
        .assert()
        .success();

    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["total"], 4);
    assert_eq!(json["matches"][0]["question"], "چگونه رمز عبور را تغییر دهم");
    assert_eq!(json["matches"][0]["has_video"], true);
    assert_eq!(json["matches"][0]["relevance"], 3);
    assert!(
        json["matches"]
            .as_array()
            .unwrap()
            .iter()
            .all(|m| m["question"] != "چگونه حساب کاربری بسازم")
    );
}

#[test]
fn query_pages_through_text_output() {
    let kb = knowledge_base();
    bin()
        .args(["--kb", kb_arg(&kb).as_str(), "query", "رمز", "--page", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 4 possible answers:"))
        .stdout(predicate::str::contains("  4. "))
        .stdout(predicate::str::contains("Page 2 of 2"));
}

#[test]
fn huge_page_number_is_rejected_cleanly() {
    let kb = knowledge_base();
    bin()
        .args(["--kb", kb_arg(&kb).as_str(), "query", "رمز", "--page"])
        .arg(usize::MAX.to_string())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("out of range"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn stop_word_query_reports_no_match() {
    let kb = knowledge_base();
    bin()
        .args(["--kb", kb_arg(&kb).as_str(), "query", "و را که"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No answer found"));
}

#[test]
fn missing_knowledge_base_fails_with_reason() {
    bin()
        .args(["--kb", "/nonexistent/knowledge-base.csv", "query", "رمز"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Failed to load knowledge base from /nonexistent/knowledge-base.csv",
        ));
}

#[test]
fn unknown_output_format_is_rejected() {
    let kb = knowledge_base();
    bin()
        .args(["--kb", kb_arg(&kb).as_str(), "--output", "yaml", "query", "رمز"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown output format: yaml"));
}

#[test]
fn chat_feedback_reorders_results() {
    let kb = knowledge_base();
    let assert = bin()
        .args(["--kb", kb_arg(&kb).as_str(), "--page-size", "10", "chat"])
        .write_stdin("رمز\n:like 3\nرمز\n:quit\n")
        .assert()
        .success();

    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(output.contains("Liked entry 3."));
    let second = output.rsplit("Found 4 possible answers:").next().unwrap();
    assert!(second.trim_start().starts_with("1. رمز ورود سامانه"));
}

#[test]
fn relevance_only_ignores_feedback() {
    let kb = knowledge_base();
    let assert = bin()
        .args(["--kb", kb_arg(&kb).as_str(), "--relevance-only", "chat"])
        .write_stdin("رمز\n:like 3\nرمز\n")
        .assert()
        .success();

    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let second = output.rsplit("Found 4 possible answers:").next().unwrap();
    assert!(second.trim_start().starts_with("1. چگونه رمز عبور را تغییر دهم"));
}

#[test]
fn config_file_sets_page_size() {
    let kb = knowledge_base();
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "page_size = 1").unwrap();

    bin()
        .args(["--kb", kb_arg(&kb).as_str(), "--config"])
        .arg(config.path())
        .args(["query", "رمز"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 1 of 4"));
}
