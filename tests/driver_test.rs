// Integration tests for file translation

use std::fs;

use cpptopy::{translate_file, TranslateError, TranslatorConfig};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn test_writes_translation() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = dir.path().join("prog.cpp");
    let output = dir.path().join("prog.py");
    fs::write(&input, "int main() {\n    cout << \"hi\" << endl;\n    return 0;\n}\n")
        .expect("Failed to write input");

    translate_file(&input, &output, &TranslatorConfig::default()).expect("Translation failed");

    let written = fs::read_to_string(&output).expect("Output missing");
    assert_eq!(written, "# Translated from C++ (subset) to Python\nprint(\"hi\")\n");
    assert!(!dir.path().join(".prog.py.tmp").exists());
}

#[test]
fn test_overwrites_existing_output() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = dir.path().join("prog.cpp");
    let output = dir.path().join("prog.py");
    fs::write(&input, "int main() { int a = 5; }").expect("Failed to write input");
    fs::write(&output, "stale contents").expect("Failed to write output");

    translate_file(&input, &output, &TranslatorConfig::default()).expect("Translation failed");

    let written = fs::read_to_string(&output).expect("Output missing");
    assert!(written.ends_with("a = 5\n"));
}

#[test]
fn test_nothing_written_on_failure() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = dir.path().join("bad.cpp");
    let output = dir.path().join("bad.py");
    fs::write(&input, "int main() { int *p; }").expect("Failed to write input");

    let err = translate_file(&input, &output, &TranslatorConfig::default()).unwrap_err();

    assert!(matches!(err, TranslateError::Parse(_)));
    assert!(!output.exists());
    let entries = fs::read_dir(dir.path()).expect("Failed to list dir").count();
    assert_eq!(entries, 1);
}

#[test]
fn test_missing_input() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input = dir.path().join("missing.cpp");
    let output = dir.path().join("missing.py");

    let err = translate_file(&input, &output, &TranslatorConfig::default()).unwrap_err();

    match err {
        TranslateError::Io { path, .. } => assert_eq!(path, input),
        other => panic!("Expected I/O error, got {:?}", other),
    }
    assert!(!output.exists());
}
