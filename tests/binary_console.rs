// Runs the built binary with a stdout that rejects every write.

#![cfg(target_os = "linux")]

use std::fs::OpenOptions;
use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::TempDir;

#[test]
fn unwritable_console_is_reported_once_and_exits_cleanly() {
    let dir = TempDir::new().unwrap();
    let full = OpenOptions::new().write(true).open("/dev/full").unwrap();

    let mut child = Command::new(env!("CARGO_BIN_EXE_user_intake"))
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::from(full))
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // The child may fail and exit before reading, so a broken pipe here is fine.
    let _ = child
        .stdin
        .take()
        .unwrap()
        .write_all(b"Alice\n\nalice@example.com\n\n");

    let output = child.wait_with_output().unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success());
    assert_eq!(stderr.matches("console is no longer writable").count(), 1);
}
