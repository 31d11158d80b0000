use std::io::Write;
use std::process::{Command, Output, Stdio};

fn lsh(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_lsh"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start lsh");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("failed to write input");

    child.wait_with_output().expect("failed to wait for lsh")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn exit_echoes_and_succeeds() {
    let output = lsh(&[], "exit\necho unreachable\n");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "# exit\n");
}

#[test]
fn exit_code_argument_is_ignored() {
    let output = lsh(&[], "exit 2\n");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "# exit\n");
}

#[test]
fn end_of_input_halts() {
    let output = lsh(&[], "");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "# ");
    assert!(stderr(&output).is_empty());
}

#[test]
fn external_command_runs_with_arguments() {
    let output = lsh(&[], "echo  hello\t world\n");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "# hello world\n# ");
}

#[test]
fn unknown_command_reports_and_continues() {
    let output = lsh(&[], "doesnotexist123 --flag\necho still here\n");
    assert!(output.status.success());
    assert!(stderr(&output).starts_with("lsh: doesnotexist123: "));
    assert!(stdout(&output).contains("still here"));
}

#[test]
fn failing_command_does_not_halt() {
    let output = lsh(&["repl", "--no-prompt"], "false\necho after\n");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "after\n");
}

#[test]
fn cd_changes_directory_for_later_commands() {
    let dir = std::env::temp_dir().canonicalize().unwrap();
    let input = format!("cd {}\npwd\n", dir.display());
    let output = lsh(&["repl", "--no-prompt"], &input);
    assert_eq!(stdout(&output), format!("{}\n", dir.display()));
}

#[test]
fn cd_without_argument_goes_home() {
    let home = std::env::temp_dir().canonicalize().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_lsh"))
        .args(["repl", "--no-prompt"])
        .env("HOME", &home)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start lsh");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(b"cd\npwd\n")
        .expect("failed to write input");
    let output = child.wait_with_output().expect("failed to wait for lsh");

    assert_eq!(stdout(&output), format!("{}\n", home.display()));
}

#[test]
fn cd_to_missing_directory_reports_and_stays() {
    let output = lsh(
        &["repl", "--no-prompt"],
        "pwd\ncd /nonexistent-path\npwd\n",
    );
    assert!(output.status.success());
    assert!(stderr(&output).starts_with("lsh: cd: /nonexistent-path: "));
    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], lines[1]);
}

#[test]
fn run_file_executes_each_line() {
    let path = std::env::temp_dir().join(format!("lsh_run_{}.txt", std::process::id()));
    std::fs::write(&path, "echo one\n\n   \necho two\nexit\necho three\n").unwrap();

    let output = lsh(&["run", path.to_str().unwrap()], "");
    let _ = std::fs::remove_file(&path);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "one\ntwo\nexit\n");
}

#[test]
#[cfg(target_os = "linux")]
fn launched_programs_get_default_sigpipe() {
    let output = lsh(&["repl", "--no-prompt"], "grep SigIgn /proc/self/status\n");
    let out = stdout(&output);
    let mask = out
        .trim()
        .strip_prefix("SigIgn:")
        .map(str::trim)
        .and_then(|hex| u64::from_str_radix(hex, 16).ok())
        .unwrap_or_else(|| panic!("unexpected grep output {:?}", out));

    // SIGPIPE is signal 13.
    assert_eq!(mask & (1 << 12), 0, "SIGPIPE ignored in child: {:#x}", mask);
}

#[test]
fn unexecutable_command_message_matches_cd_format() {
    let output = lsh(
        &["repl", "--no-prompt"],
        "doesnotexist123\ncd /nonexistent-path\n",
    );
    assert_eq!(
        stderr(&output),
        "lsh: doesnotexist123: No such file or directory\n\
         lsh: cd: /nonexistent-path: No such file or directory\n"
    );
}
