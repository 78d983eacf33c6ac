use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const LIST_JSON: &str = r#"{"type":"doc","version":1,"content":[
  {"type":"bulletList","content":[
    {"type":"listItem","content":[{"type":"paragraph","content":[{"type":"text","text":"one"}]}]},
    {"type":"listItem","content":[{"type":"paragraph","content":[{"type":"text","text":"two"}]}]}
  ]},
  {"type":"mediaSingle","content":[{"type":"media","attrs":{"id":"uuid-1","type":"file"}}]}
]}"#;

#[test]
fn bullet_marker_comes_from_config_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("issue.json");
    fs::write(&input, LIST_JSON).unwrap();
    let config_path = dir.path().join("adf.toml");
    fs::write(&config_path, "[markdown]\nbullet_marker = \"*\"\n").unwrap();

    let mut cmd = cargo_bin_cmd!("adf");
    cmd.arg(input.as_os_str())
        .arg("--to")
        .arg("markdown")
        .arg("--config")
        .arg(config_path.as_os_str());

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("* one\n* two"));
}

#[test]
fn render_settings_come_from_config_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("issue.json");
    fs::write(&input, LIST_JSON).unwrap();
    let config_path = dir.path().join("adf.toml");
    fs::write(
        &config_path,
        r#"[render]
base_url = "https://tracker.example.com/"
attachment_scheme = "att"
"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("adf");
    cmd.arg(input.as_os_str())
        .arg("--to")
        .arg("html")
        .arg("--config")
        .arg(config_path.as_os_str());

    cmd.assert().success().stdout(
        predicate::str::contains("src=\"att://uuid-1\"")
            .and(predicate::str::contains("width=\"400\""))
            .and(predicate::str::contains(
                "data-fallback=\"https://tracker.example.com\"",
            )),
    );
}

#[test]
fn extra_params_override_config_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("issue.json");
    fs::write(&input, LIST_JSON).unwrap();
    let config_path = dir.path().join("adf.toml");
    fs::write(&config_path, "[markdown]\nbullet_marker = \"*\"\n").unwrap();

    let mut cmd = cargo_bin_cmd!("adf");
    cmd.arg(input.as_os_str())
        .arg("--to")
        .arg("markdown")
        .arg("--config")
        .arg(config_path.as_os_str())
        .arg("--extra-bullet-marker")
        .arg("+");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("+ one\n+ two"));
}

#[test]
fn missing_explicit_config_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("issue.json");
    fs::write(&input, LIST_JSON).unwrap();

    let mut cmd = cargo_bin_cmd!("adf");
    cmd.arg(input.as_os_str())
        .arg("--to")
        .arg("markdown")
        .arg("--config")
        .arg(dir.path().join("missing.toml").as_os_str());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error: failed to load configuration"));
}
