//! Tests for CLI argument parsing and the session commands, run against the
//! built binary.

mod common;

use std::path::Path;
use std::process::Command;

fn social_sync_cmd(config: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_social-sync"));
    cmd.arg("--config").arg(config);
    cmd.env_remove("SOCIAL_SYNC_LOG");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    let (_dir, config) = common::temp_config("http://127.0.0.1:9", "last_request");
    let output = social_sync_cmd(&config)
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    for sub in ["like", "save", "unsave", "follow", "remove-follower", "feed", "session"] {
        assert!(stdout.contains(sub), "help is missing '{}'", sub);
    }
}

#[test]
fn test_invalid_kind_exits_with_error() {
    let (_dir, config) = common::temp_config("http://127.0.0.1:9", "last_request");
    let output = social_sync_cmd(&config)
        .args(["like", "post_1", "--kind", "user"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid value"));
}

#[test]
fn test_save_requires_a_collection() {
    let (_dir, config) = common::temp_config("http://127.0.0.1:9", "last_request");
    let output = social_sync_cmd(&config)
        .args(["save", "post_1"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}

#[test]
fn test_invalid_account_type_rejected() {
    let (_dir, config) = common::temp_config("http://127.0.0.1:9", "last_request");
    let output = social_sync_cmd(&config)
        .args(["session", "login", "--user", "u1", "--token", "t", "--account-type", "vip"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown account type"));
}

#[test]
fn test_session_login_show_logout() {
    let (dir, config) = common::temp_config("http://127.0.0.1:9", "last_request");

    let login = social_sync_cmd(&config)
        .args(["session", "login", "--user", "u1", "--token", "secret-token"])
        .output()
        .expect("Failed to execute command");
    assert!(login.status.success());
    assert!(dir.path().join("session.json").exists());

    let show = social_sync_cmd(&config)
        .args(["session", "show"])
        .output()
        .expect("Failed to execute command");
    let stdout = String::from_utf8_lossy(&show.stdout);
    assert!(stdout.contains("user: u1"));
    assert!(stdout.contains("account_type: personal"));
    assert!(!stdout.contains("secret-token"));

    let logout = social_sync_cmd(&config)
        .args(["session", "logout"])
        .output()
        .expect("Failed to execute command");
    assert!(logout.status.success());
    assert!(!dir.path().join("session.json").exists());
}

#[test]
fn test_guest_like_is_refused() {
    let (_dir, config) = common::temp_config("http://127.0.0.1:9", "last_request");
    let output = social_sync_cmd(&config)
        .args(["like", "post_1"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Login required to like"));
}

#[test]
fn test_feed_seeds_and_caches() {
    let (dir, config) = common::temp_config("http://127.0.0.1:9", "last_request");
    let feed = dir.path().join("feed.json");
    std::fs::write(
        &feed,
        r#"{"status": 200, "data": [{"_id": "post_1", "isLiked": true, "likes": 4}]}"#,
    )
    .unwrap();

    let output = social_sync_cmd(&config)
        .arg("feed")
        .arg(&feed)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("seeded 2 values"));
    let session = std::fs::read_to_string(dir.path().join("session.json")).unwrap();
    assert!(session.contains("initialData"));
}
