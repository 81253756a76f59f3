// tests/cli_test.rs
use std::process::{Command, Output};

fn fermi(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fermi"))
        .args(args)
        .output()
        .expect("failed to spawn fermi")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

#[test]
fn test_default_output_has_all_fields() {
    let output = fermi(&["2^10", "-n", "100"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "1024.00 0.00 1024.00,1024.00");
}

#[test]
fn test_selected_fields() {
    let output = fermi(&["2^10", "-n", "100", "-m"]);
    assert_eq!(stdout(&output), "1024.00");

    let output = fermi(&["2^10", "-n", "100", "--ci", "--std"]);
    assert_eq!(stdout(&output), "0.00 1024.00,1024.00");
}

#[test]
fn test_small_sample_run_prints_mean() {
    let output = fermi(&["10,100 * 2", "-n", "5", "-m", "--seed", "1"]);
    assert!(output.status.success());

    let mean: f64 = stdout(&output).parse().expect("a number");
    assert!(mean > 0.0);
    assert_eq!(stdout(&output).split('.').nth(1).map(str::len), Some(2));
}

#[test]
fn test_seed_makes_runs_reproducible() {
    let args = ["1,10 * 3,30", "-n", "1000", "--seed", "12345"];
    assert_eq!(stdout(&fermi(&args)), stdout(&fermi(&args)));
}

#[test]
fn test_errors_go_to_stdout_with_exit_code_one() {
    let output = fermi(&["5,1"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "fermi: error: lower bound 5.0 is greater than upper bound 1.0 in range '5,1'"
    );

    let output = fermi(&["2 * 3,4,5"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).starts_with("fermi: error: invalid character ','"));

    let output = fermi(&["2 * foo"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).starts_with("fermi: error: Error evaluating expression:"));
}

#[test]
fn test_zero_samples_is_an_error() {
    let output = fermi(&["1,10", "-n", "0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).starts_with("fermi: error:"));
}

#[test]
fn test_deep_nesting_fails_cleanly() {
    let expression = format!("{}1,10{}", "(".repeat(20_000), ")".repeat(20_000));
    let output = fermi(&[&expression]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "fermi: error: Error evaluating expression: expression is nested more than 200 levels deep"
    );
}

#[test]
fn test_negative_samples_is_an_error() {
    let output = fermi(&["1,10", "-n", "-5"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).starts_with("fermi: error: Invalid configuration for 'samples'"));
}
