use assert_cmd::Command;
use assert_cmd::cargo;
use mockito::{Mock, Server, ServerGuard};
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

/// A command isolated from the user's real config and download directories.
fn hub_peeker(home: &Path) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("hub-peeker"));
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("HUB_PEEKER_DOWNLOAD_DIR")
        .env_remove("RUST_LOG");
    cmd
}

/// Both lookups `validate` performs, answered with success.
fn mock_repo(server: &mut ServerGuard, owner: &str, repo: &str) -> [Mock; 2] {
    [
        server
            .mock("GET", format!("/users/{}", owner).as_str())
            .with_status(200)
            .with_body(format!(r#"{{"login": "{}"}}"#, owner))
            .create(),
        server
            .mock("GET", format!("/repos/{}/{}", owner, repo).as_str())
            .with_status(200)
            .with_body(format!(r#"{{"name": "{}"}}"#, repo))
            .create(),
    ]
}

#[test]
fn test_end_to_end_download() {
    let mut server = Server::new();
    let url = server.url();
    let _repo = mock_repo(&mut server, "acme", "widget");

    let _latest = server
        .mock("GET", "/repos/acme/widget/releases/latest")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{
                "tag_name": "v1.4.0",
                "assets": [
                    {{"name": "widget-windows-amd64.zip", "browser_download_url": "{url}/dl/win.zip", "size": 1000, "content_type": "application/zip"}},
                    {{"name": "widget-linux-arm64.tar.gz", "browser_download_url": "{url}/dl/widget-linux-arm64.tar.gz", "size": 3000, "content_type": "application/gzip"}}
                ]
            }}"#
        ))
        .create();
    let download = server
        .mock("GET", "/dl/widget-linux-arm64.tar.gz")
        .with_status(200)
        .with_body(vec![b'x'; 3000])
        .create();

    let home = tempdir().unwrap();
    let target = tempdir().unwrap();

    hub_peeker(home.path())
        .args(["acme/widget", "--api-url", &url, "--dir"])
        .arg(target.path())
        .write_stdin("3\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("v1.4.0"))
        .stdout(predicate::str::contains("2. widget-linux-arm64.tar.gz"))
        .stdout(predicate::str::contains("'3' is not a valid choice"))
        .stdout(predicate::str::contains("Downloaded 2.93 KiB"));

    download.assert();
    let file = target.path().join("widget-linux-arm64.tar.gz");
    assert_eq!(std::fs::metadata(&file).unwrap().len(), 3000);
    assert!(!target.path().join("widget-windows-amd64.zip").exists());
}

#[test]
fn test_unknown_user_exits_with_2() {
    let mut server = Server::new();
    let url = server.url();
    let _user = server.mock("GET", "/users/ghost").with_status(404).create();
    let repo = server.mock("GET", "/repos/ghost/widget").expect(0).create();

    let home = tempdir().unwrap();

    hub_peeker(home.path())
        .args(["-u", "ghost", "-r", "widget", "--api-url", &url])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("User not found"));

    repo.assert();
}

#[test]
fn test_rate_limit_exits_with_3() {
    let mut server = Server::new();
    let url = server.url();
    let _user = server.mock("GET", "/users/acme").with_status(403).create();

    let home = tempdir().unwrap();

    hub_peeker(home.path())
        .args(["acme/widget", "--api-url", &url])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("rate limit"));
}

#[test]
fn test_release_without_assets_exits_with_5() {
    let mut server = Server::new();
    let url = server.url();
    let _repo = mock_repo(&mut server, "acme", "widget");
    let _latest = server
        .mock("GET", "/repos/acme/widget/releases/latest")
        .with_status(200)
        .with_body(r#"{"tag_name": "v0.1.0", "assets": []}"#)
        .create();

    let home = tempdir().unwrap();

    hub_peeker(home.path())
        .args(["acme/widget", "--api-url", &url])
        .write_stdin("1\n")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("no downloadable assets"));
}

#[test]
fn test_closed_stdin_cancels_selection() {
    let mut server = Server::new();
    let url = server.url();
    let _repo = mock_repo(&mut server, "acme", "widget");
    let _latest = server
        .mock("GET", "/repos/acme/widget/releases/latest")
        .with_status(200)
        .with_body(format!(
            r#"{{"tag_name": "v1", "assets": [{{"name": "a.zip", "browser_download_url": "{url}/a.zip", "size": 1}}]}}"#
        ))
        .create();
    let download = server.mock("GET", "/a.zip").expect(0).create();

    let home = tempdir().unwrap();

    hub_peeker(home.path())
        .args(["acme/widget", "--api-url", &url])
        .write_stdin("")
        .assert()
        .code(130);

    download.assert();
}

#[test]
fn test_missing_repository_is_usage_error() {
    let home = tempdir().unwrap();

    hub_peeker(home.path())
        .args(["-u", "acme"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("<USERNAME> and <REPO>"));
}

// `XDG_CONFIG_HOME` only steers the config directory on Linux.
#[cfg(target_os = "linux")]
#[test]
fn test_save_dir_persists_setting() {
    let mut server = Server::new();
    let url = server.url();
    let _user = server.mock("GET", "/users/acme").with_status(404).create();

    let home = tempdir().unwrap();
    let target = home.path().join("assets");

    hub_peeker(home.path())
        .args(["acme/widget", "--save-dir", "--api-url", &url, "--dir"])
        .arg(&target)
        .assert()
        .code(2);

    let config = home.path().join(".config/hub-peeker/config.json");
    let saved = std::fs::read_to_string(config).unwrap();
    assert!(saved.contains("download_path"));
    assert!(saved.contains("assets"));
}

#[test]
fn test_version_flag() {
    let home = tempdir().unwrap();

    hub_peeker(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("hub-peeker "));
}
