//! Integration tests for the `tune fetch` command.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use tune_core::auth::AUTHENTICATION_REQUIRED_BANNER;

const GIST_ID: &str = "aa5a315d61ae9438b18d";

/// Runs `tune` with an isolated home pointed at `api_url`.
fn tune(home: &TempDir, api_url: &str) -> Command {
    let mut cmd = Command::cargo_bin("tune").unwrap();
    cmd.current_dir(home.path())
        .env("TUNE_HOME", home.path())
        .env("COMPOSER_HOME", home.path())
        .env("TUNE_API_URL", api_url)
        .env_remove("TUNE_USERNAME")
        .env_remove("TUNE_PASSWORD")
        .env_remove("TUNE_TOKEN_FILE")
        .env_remove("TUNE_AUTH_FILE")
        .env_remove("HTTPS_PROXY")
        .env_remove("https_proxy");
    cmd
}

fn gist_body(content: &str) -> String {
    serde_json::json!({
        "id": GIST_ID,
        "html_url": format!("https://gist.github.com/{}", GIST_ID),
        "owner": { "login": "octocat" },
        "created_at": "2015-01-01T10:00:00Z",
        "updated_at": "2015-01-02T10:00:00Z",
        "history": [{ "version": "1" }],
        "files": { "script.php": { "content": content } },
    })
    .to_string()
}

#[test]
fn test_fetch_public_gist() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    server
        .mock("GET", format!("/gists/{}", GIST_ID).as_str())
        .with_status(200)
        .with_body(gist_body("<?php echo 42;\n"))
        .create();

    tune(&home, &server.url())
        .arg("fetch")
        .arg(GIST_ID)
        .assert()
        .success()
        .stdout("<?php echo 42;\n")
        .stderr(predicate::str::contains("octocat"));
}

#[test]
fn test_fetch_json() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    server
        .mock("GET", format!("/gists/{}", GIST_ID).as_str())
        .with_status(200)
        .with_body(gist_body("echo"))
        .create();

    let assert = tune(&home, &server.url())
        .arg("fetch")
        .arg("--json")
        .arg(format!("https://gist.github.com/octocat/{}", GIST_ID))
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(json["kind"], "gist");
    assert_eq!(json["content"], "echo");
    assert_eq!(json["metadata"]["owner"], "octocat");
    assert_eq!(json["metadata"]["revision"], 1);
}

#[test]
fn test_fetch_private_gist_with_environment_credentials() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    server
        .mock("GET", format!("/gists/{}", GIST_ID).as_str())
        .match_header("authorization", mockito::Matcher::Missing)
        .with_status(401)
        .with_body(r#"{"message":"Requires authentication"}"#)
        .create();
    server
        .mock("POST", "/authorizations")
        .with_status(201)
        .with_body(r#"{"token":"secret-token"}"#)
        .create();
    server
        .mock("GET", format!("/gists/{}", GIST_ID).as_str())
        .match_header("authorization", "token secret-token")
        .with_status(200)
        .with_body(gist_body("private"))
        .create();

    tune(&home, &server.url())
        .env("TUNE_USERNAME", "octocat")
        .env("TUNE_PASSWORD", "hunter2")
        .arg("fetch")
        .arg(GIST_ID)
        .assert()
        .success()
        .stdout(predicate::str::contains("private"));

    let tokens = std::fs::read_to_string(home.path().join("tokens.json")).unwrap();
    assert!(tokens.contains("secret-token"));
}

#[test]
fn test_fetch_private_gist_with_closed_input() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    server
        .mock("GET", format!("/gists/{}", GIST_ID).as_str())
        .with_status(401)
        .with_body(r#"{"message":"Requires authentication"}"#)
        .create();

    tune(&home, &server.url())
        .arg("fetch")
        .arg(GIST_ID)
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains(AUTHENTICATION_REQUIRED_BANNER))
        .stderr(predicate::str::contains("Input stream closed"));
}

#[test]
fn test_fetch_multi_file_gist() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let body = serde_json::json!({
        "id": GIST_ID,
        "html_url": "https://gist.github.com/x",
        "created_at": "2015-01-01T10:00:00Z",
        "updated_at": "2015-01-02T10:00:00Z",
        "files": { "a.php": { "content": "a" }, "b.php": { "content": "b" } },
    });
    server
        .mock("GET", format!("/gists/{}", GIST_ID).as_str())
        .with_status(200)
        .with_body(body.to_string())
        .create();

    tune(&home, &server.url())
        .arg("fetch")
        .arg(GIST_ID)
        .assert()
        .failure()
        .stderr(predicate::str::contains("The gist should contain a single file"));
}

#[test]
fn test_fetch_unsupported_uri() {
    let home = TempDir::new().unwrap();

    tune(&home, "http://127.0.0.1:1")
        .arg("fetch")
        .arg("https://example.com/script.php")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported resource URI"));
}
