use std::io::Write;
use std::process::{Command, Output, Stdio};

fn run_with_input(args: &[&str], input: &str) -> Output {
    let exe = env!("CARGO_BIN_EXE_coreseeker");
    let mut child = Command::new(exe)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn cli");
    child
        .stdin
        .take()
        .expect("stdin handle")
        .write_all(input.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for cli")
}

#[test]
fn cli_help_lists_flags() {
    let exe = env!("CARGO_BIN_EXE_coreseeker");
    let output = Command::new(exe).arg("--help").output().expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--seed"));
    assert!(stdout.contains("--no-color"));
}

#[test]
fn cli_plays_until_input_closes() {
    let script = "Ash\ny\n2\ny\n1\ny\n2\ny\n6\n3\n";
    let output = run_with_input(&["--seed", "42", "--no-color"], script);
    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Welcome to Coreseeker!"));
    assert!(stdout.contains("\"Ash, you have been chosen"));
    assert!(stdout.contains("You are carrying a Rifle with 12 ammo."));
    assert!(stdout.contains("- (1) Food Pack"));
    assert!(stdout.contains("- (2) Ammo Box"));
    assert!(stdout.contains("<=-- Viewing Maps --=>"));
    assert!(stdout.contains("Input closed. Goodbye!"));
    assert!(!stdout.contains('\u{1b}'), "no escape codes when piped");
}

#[test]
fn cli_same_seed_same_story() {
    // Move right twice; the second step lands on the river and its fight.
    let script = "Ash\ny\n1\ny\n1\ny\n1\ny\n2\nd\n2\nd\n1\n1\n1\n1\n1\n1\n1\n1\n";
    let first = run_with_input(&["--seed", "9", "--no-color"], script);
    let second = run_with_input(&["--seed", "9", "--no-color"], script);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}
