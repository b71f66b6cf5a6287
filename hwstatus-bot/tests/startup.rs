//! Startup behaviour of the bot binary

use std::process::{Command, Output};

fn run_bot(vars: &[(&str, &str)]) -> Output {
    // A fresh directory keeps a developer's `.env` out of the picture
    let dir = tempfile::tempdir().unwrap();

    Command::new(env!("CARGO_BIN_EXE_hwstatus-bot"))
        .env_clear()
        .envs(vars.iter().copied())
        .current_dir(dir.path())
        .output()
        .unwrap()
}

#[test]
fn test_exits_without_configuration() {
    let output = run_bot(&[]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("PRACTICUM_TOKEN"));
}

#[test]
fn test_exits_before_polling_when_variable_missing() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create();
    let endpoint = format!("{}/statuses", server.url());

    let output = run_bot(&[
        ("PRACTICUM_TOKEN", "practicum"),
        ("TELEGRAM_TOKEN", "123:abc"),
        ("ENDPOINT", endpoint.as_str()),
    ]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("TELEGRAM_CHAT_ID"));
    mock.assert();
}

#[test]
fn test_exits_on_invalid_endpoint() {
    let output = run_bot(&[
        ("PRACTICUM_TOKEN", "practicum"),
        ("TELEGRAM_TOKEN", "123:abc"),
        ("TELEGRAM_CHAT_ID", "42"),
        ("ENDPOINT", "ftp://example.com/statuses"),
    ]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ENDPOINT"));
}
