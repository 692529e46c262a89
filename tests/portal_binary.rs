//! Process-level behavior of the `portal` binary: exit codes and streams.

mod support;

use std::ffi::OsString;
use std::process::{Command, Output};
use support::{MockSlingServer, Scratch};

fn portal(args: Vec<OsString>) -> Output {
    Command::new(env!("CARGO_BIN_EXE_portal"))
        .args(args)
        .env_remove("PORTAL_SERVER_URL")
        .env_remove("PORTAL_ADMIN_USER")
        .env_remove("PORTAL_ADMIN_PASSWORD")
        .env_remove("PORTAL_TIMEOUT_SECS")
        .env_remove("PORTAL_HISTORY_FILE")
        .env_remove("PORTAL_LOG")
        .output()
        .expect("run portal binary")
}

#[test]
fn exit_stops_the_script_with_status_zero_and_clean_stderr() {
    let server = MockSlingServer::start();
    let scratch = Scratch::new("exit-zero");
    let config = scratch.config(server.url());
    let script = scratch.write(
        "setup.portal",
        "$um.create_group 'staff'\nputs $s.current_user.name\nexit\nputs 'after exit'\n$um.create_group 'late'\n",
    );

    let out = portal(vec![
        "--no-color".into(),
        "--config".into(),
        config.into(),
        script.into(),
    ]);

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(out.status.code(), Some(0), "stderr: {stderr}");
    assert!(stderr.is_empty(), "stderr: {stderr}");
    assert_eq!(String::from_utf8_lossy(&out.stdout), "admin\n");
    assert_eq!(
        server.request_lines(),
        vec!["POST /system/userManager/group.create.html"]
    );
}

#[test]
fn unusable_server_url_exits_one_with_a_diagnostic() {
    let scratch = Scratch::new("bad-url");
    let config = scratch.config("ftp://sling.invalid/");
    let script = scratch.write("noop.portal", "puts 'never'\n");

    let out = portal(vec![
        "--no-color".into(),
        "--config".into(),
        config.into(),
        script.into(),
    ]);

    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty(), "stdout: {}", String::from_utf8_lossy(&out.stdout));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("error:"), "stderr: {stderr}");
    assert!(stderr.contains("unsupported scheme"), "stderr: {stderr}");
}

#[test]
fn invalid_config_exits_one() {
    let scratch = Scratch::new("bad-config");
    let config = scratch.write("portal.toml", "[console]\nhistory_size = 0\n");
    let out = portal(vec!["--config".into(), config.into()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("history_size"));
}

#[test]
fn usage_errors_exit_two() {
    let out = portal(vec!["--prompt".into(), "fancy".into()]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn version_reports_build_metadata() {
    let out = portal(vec!["--version".into()]);
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("portal "), "stdout: {stdout}");
}
