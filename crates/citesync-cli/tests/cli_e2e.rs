use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::tempdir;

fn citesync_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_citesync"))
}

/// Run the binary with a clean environment plus `vars`.
fn run(vars: &[(&str, &PathBuf)], extra: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(citesync_bin());
    cmd.env_clear().env("NO_COLOR", "1");
    for (k, v) in vars {
        cmd.env(k, v);
    }
    for (k, v) in extra {
        cmd.env(k, v);
    }
    cmd.output().expect("run citesync")
}

#[test]
fn env_driven_sync_writes_file_and_step_outputs() {
    let dir = tempdir().unwrap();
    let pyproject = dir.path().join("pyproject.toml");
    let citation = dir.path().join("out/CITATION.cff");
    let outputs = dir.path().join("github_output");
    let env_file = dir.path().join("github_env");
    fs::write(
        &pyproject,
        "[project]\nname = \"demo\"\nversion = \"0.1.0\"\nauthors = [{ name = \"Jane Smith\" }]\n",
    )
    .unwrap();

    let out = run(
        &[
            ("PYPROJECT_PATH", &pyproject),
            ("CITATION_PATH", &citation),
            ("GITHUB_OUTPUT", &outputs),
            ("GITHUB_ENV", &env_file),
        ],
        &[("CUSTOM_FIELDS", r#"{"doi": "10.5281/zenodo.1"}"#)],
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Sync completed:"));
    assert!(stdout.contains("Updated: true"));
    assert!(stdout.contains("Validation status: valid"));

    let cff = fs::read_to_string(&citation).unwrap();
    assert!(cff.contains("title: demo"));
    assert!(cff.contains("given-names: Jane"));
    assert!(cff.contains("doi: 10.5281/zenodo.1"));

    assert_eq!(
        fs::read_to_string(&outputs).unwrap(),
        "updated=true\nchanges-detected=true\nvalidation-status=valid\n"
    );
    assert_eq!(fs::read_to_string(&env_file).unwrap(), "CITATION_UPDATED=true\n");
}

#[test]
fn validate_only_env_flag_skips_write() {
    let dir = tempdir().unwrap();
    let pyproject = dir.path().join("pyproject.toml");
    let citation = dir.path().join("CITATION.cff");
    fs::write(&pyproject, "[project]\nname = \"demo\"\n").unwrap();

    let out = run(
        &[("PYPROJECT_PATH", &pyproject), ("CITATION_PATH", &citation)],
        &[("VALIDATE_ONLY", "true")],
    );
    assert!(out.status.success());
    assert!(!citation.exists());
}

#[test]
fn non_true_flag_values_read_as_off() {
    for raw in ["yes", "1", "maybe"] {
        let dir = tempdir().unwrap();
        let pyproject = dir.path().join("pyproject.toml");
        let citation = dir.path().join("CITATION.cff");
        fs::write(&pyproject, "[project]\nname = \"demo\"\n").unwrap();

        let out = run(
            &[("PYPROJECT_PATH", &pyproject), ("CITATION_PATH", &citation)],
            &[("VALIDATE_ONLY", raw)],
        );
        assert!(out.status.success(), "VALIDATE_ONLY={raw}");
        assert!(String::from_utf8_lossy(&out.stdout).contains("Updated: true"));
        assert!(citation.exists(), "VALIDATE_ONLY={raw} should still write");
    }
}

#[test]
fn validate_only_is_case_insensitive() {
    let dir = tempdir().unwrap();
    let pyproject = dir.path().join("pyproject.toml");
    let citation = dir.path().join("CITATION.cff");
    fs::write(&pyproject, "[project]\nname = \"demo\"\n").unwrap();

    let out = run(
        &[("PYPROJECT_PATH", &pyproject), ("CITATION_PATH", &citation)],
        &[("VALIDATE_ONLY", "TRUE")],
    );
    assert!(out.status.success());
    assert!(!citation.exists());
}

#[test]
fn unknown_exclude_field_fails_before_touching_files() {
    let dir = tempdir().unwrap();
    let pyproject = dir.path().join("pyproject.toml");
    let citation = dir.path().join("CITATION.cff");
    fs::write(&pyproject, "[project]\nname = \"demo\"\n").unwrap();

    let out = run(
        &[("PYPROJECT_PATH", &pyproject), ("CITATION_PATH", &citation)],
        &[("EXCLUDE_FIELDS", "doi")],
    );
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid exclude fields: doi"));
    assert!(!citation.exists());
}

#[test]
fn bad_custom_fields_json_fails() {
    let dir = tempdir().unwrap();
    let pyproject = dir.path().join("pyproject.toml");
    let citation = dir.path().join("CITATION.cff");
    fs::write(&pyproject, "[project]\nname = \"demo\"\n").unwrap();

    let out = run(
        &[("PYPROJECT_PATH", &pyproject), ("CITATION_PATH", &citation)],
        &[("CUSTOM_FIELDS", "{oops")],
    );
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid JSON in CUSTOM_FIELDS"));
    assert!(!citation.exists());
}

#[test]
fn load_error_reports_error_status() {
    let dir = tempdir().unwrap();
    let pyproject = dir.path().join("missing.toml");
    let citation = dir.path().join("CITATION.cff");
    let outputs = dir.path().join("github_output");

    let out = run(
        &[
            ("PYPROJECT_PATH", &pyproject),
            ("CITATION_PATH", &citation),
            ("GITHUB_OUTPUT", &outputs),
        ],
        &[],
    );
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("missing.toml"));
    assert!(fs::read_to_string(&outputs)
        .unwrap()
        .contains("validation-status=error"));
}

#[test]
fn print_mapping_emits_json() {
    let out = Command::new(citesync_bin())
        .arg("--print-mapping")
        .env_clear()
        .output()
        .expect("run citesync");
    assert!(out.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert!(parsed["rules"].is_array());
}
