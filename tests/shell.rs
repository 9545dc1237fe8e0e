//! End-to-end tests: lines go through the interactive loop and the output of
//! both the shell and its children is captured in files.
#![cfg(unix)]

use myshell::{BufferedInput, Config, Interpreter};
use std::fs::{self, File};
use std::io::Cursor;
use std::path::Path;
use tempfile::TempDir;

struct Session {
    stdout: String,
    stderr: String,
    lines: usize,
}

fn run_script(dir: &Path, script: &str) -> Session {
    run_bytes(dir, script.as_bytes())
}

fn run_bytes(dir: &Path, script: &[u8]) -> Session {
    let stdout_path = dir.join("stdout");
    let stderr_path = dir.join("stderr");
    let stdout = File::create(&stdout_path).expect("create stdout file");
    let stderr = File::create(&stderr_path).expect("create stderr file");

    let mut shell = Interpreter::with_terminals(Config::default(), Box::new(stdout), Box::new(stderr));
    let mut input = BufferedInput::new(Cursor::new(script.to_vec()));
    shell.repl(&mut input).expect("repl");

    Session {
        stdout: fs::read_to_string(&stdout_path).expect("read stdout"),
        stderr: fs::read_to_string(&stderr_path).expect("read stderr"),
        lines: shell.counter(),
    }
}

/// Shell stdout with the prompts taken out.
fn output(session: &Session) -> String {
    let mut out = session.stdout.clone();
    for n in (0..=session.lines).rev() {
        out = out.replace(&format!("./myshell[{:02}]> ", n), "");
    }
    out
}

fn tempdir() -> TempDir {
    tempfile::tempdir().expect("tempdir")
}

#[test]
fn and_runs_second_after_success() {
    let dir = tempdir();
    let session = run_script(dir.path(), "echo hi && echo there\n");
    assert_eq!(session.stdout, "./myshell[00]> hi\nthere\n./myshell[01]> ");
    assert_eq!(session.stderr, "");
}

#[test]
fn and_skips_second_after_failure() {
    let dir = tempdir();
    let session = run_script(dir.path(), "false && echo nope\n");
    assert_eq!(output(&session), "");
    assert_eq!(session.stderr, "");
}

#[test]
fn or_runs_second_only_after_failure() {
    let dir = tempdir();
    let session = run_script(dir.path(), "false || echo fallback\ntrue || echo nope\n");
    assert_eq!(output(&session), "fallback\n");
}

#[test]
fn pipe_connects_two_commands() {
    let dir = tempdir();
    let session = run_script(dir.path(), "echo a | wc -l\n");
    assert_eq!(output(&session).trim(), "1");
    assert_eq!(session.stderr, "");
}

#[test]
fn output_redirection_writes_file_and_nothing_else() {
    let dir = tempdir();
    let target = dir.path().join("t.txt");
    let session = run_script(dir.path(), &format!("echo x > {}\n", target.display()));
    assert_eq!(fs::read_to_string(&target).expect("read target"), "x\n");
    assert_eq!(output(&session), "");
}

#[test]
fn input_and_output_redirection_together() {
    let dir = tempdir();
    let input = dir.path().join("in.txt");
    let target = dir.path().join("out.txt");
    fs::write(&input, "b\na\nc\n").expect("seed input");
    run_script(
        dir.path(),
        &format!("sort < {} > {}\n", input.display(), target.display()),
    );
    assert_eq!(fs::read_to_string(&target).expect("read target"), "a\nb\nc\n");
}

#[test]
fn each_side_of_a_chain_has_its_own_redirection() {
    let dir = tempdir();
    let first = dir.path().join("first.txt");
    let second = dir.path().join("second.txt");
    let session = run_script(
        dir.path(),
        &format!(
            "echo one > {} && echo two > {}\n",
            first.display(),
            second.display()
        ),
    );
    assert_eq!(fs::read_to_string(&first).expect("read first"), "one\n");
    assert_eq!(fs::read_to_string(&second).expect("read second"), "two\n");
    assert_eq!(output(&session), "");
}

#[test]
fn exit_keyword_stops_the_loop() {
    let dir = tempdir();
    let session = run_script(dir.path(), "echo one\nadios\necho two\n");
    assert_eq!(output(&session), "one\n");
    assert_eq!(session.lines, 1);
    assert!(session.stdout.ends_with("./myshell[01]> "));
}

#[test]
fn blank_lines_do_not_advance_the_counter() {
    let dir = tempdir();
    let session = run_script(dir.path(), "\n   \necho a\n");
    assert_eq!(
        session.stdout,
        "./myshell[00]> ./myshell[00]> ./myshell[00]> a\n./myshell[01]> "
    );
}

#[test]
fn unknown_command_is_reported_and_loop_continues() {
    let dir = tempdir();
    let session = run_script(dir.path(), "no-such-program-for-myshell\necho after\n");
    assert!(
        session
            .stderr
            .starts_with("no-such-program-for-myshell: execution error: failed to start"),
        "stderr was {:?}",
        session.stderr
    );
    assert_eq!(output(&session), "after\n");
    assert_eq!(session.lines, 2);
}

#[test]
fn spawn_failure_counts_as_failure_for_the_gate() {
    let dir = tempdir();
    let session = run_script(
        dir.path(),
        "no-such-program-for-myshell && echo nope\nno-such-program-for-myshell || echo recovered\n",
    );
    assert_eq!(output(&session), "recovered\n");
}

#[test]
fn missing_input_file_is_reported() {
    let dir = tempdir();
    let missing = dir.path().join("missing.txt");
    let session = run_script(
        dir.path(),
        &format!("cat < {} || echo fallback\n", missing.display()),
    );
    assert!(
        session.stderr.contains("cat: execution error: cannot open input file"),
        "stderr was {:?}",
        session.stderr
    );
    assert_eq!(output(&session), "fallback\n");
}

#[test]
fn non_zero_exit_is_silent_outside_pipes() {
    let dir = tempdir();
    let session = run_script(dir.path(), "sh -c false\nfalse\n");
    assert_eq!(session.stderr, "");
}

#[test]
fn pipe_failures_name_the_side() {
    let dir = tempdir();
    let session = run_script(dir.path(), "echo a | no-such-program-for-myshell\n");
    assert!(
        session
            .stderr
            .starts_with("pipe error: command 2 (no-such-program-for-myshell) failed to start"),
        "stderr was {:?}",
        session.stderr
    );

    let session = run_script(dir.path(), "true | false\n");
    assert_eq!(
        session.stderr,
        "pipe error: command 2 (false) exited with status 1\n"
    );
}

#[test]
fn pipe_with_empty_side_is_invalid() {
    let dir = tempdir();
    let session = run_script(dir.path(), "| wc -l\necho next\n");
    assert_eq!(session.stderr, "pipe error: invalid pipe command\n");
    assert_eq!(output(&session), "next\n");
}

#[test]
fn no_chaining_after_a_pipe() {
    let dir = tempdir();
    let session = run_script(dir.path(), "echo a | cat && echo b\n");
    // `&& echo b` becomes file arguments of `cat`, which fails on them.
    assert_eq!(output(&session), "");
    assert!(session.stderr.contains("pipe error: "));
}

#[test]
fn empty_second_segment_is_skipped() {
    let dir = tempdir();
    let target = dir.path().join("out.txt");
    let session = run_script(dir.path(), &format!("true && > {}\n", target.display()));
    assert!(!target.exists());
    assert_eq!(output(&session), "");
    assert_eq!(session.stderr, "");
}

#[test]
fn invalid_utf8_line_does_not_end_the_shell() {
    let dir = tempdir();
    let session = run_bytes(dir.path(), b"echo \xff\necho after\n");
    assert_eq!(output(&session), "\u{fffd}\nafter\n");
    assert_eq!(session.lines, 2);
}
