use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn get_egg_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_egg"))
}

fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = get_egg_binary()
        .args(args)
        .arg("--color")
        .arg("never")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn egg");

    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(input.as_bytes())
        .expect("Failed to write to stdin");

    child.wait_with_output().expect("Failed to wait for egg")
}

fn temp_program(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("egg-cli-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).expect("Failed to write program file");
    path
}

#[test]
fn test_version_flag() {
    let output = get_egg_binary().arg("--version").output().expect("Failed to execute egg");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("egg"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_eval_prints_output_and_result() {
    let output = get_egg_binary()
        .args(["-e", "do(print(\"hello\"), +(1, 2))"])
        .output()
        .expect("Failed to execute egg");

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "hello\n3\n");
}

#[test]
fn test_quiet_suppresses_result() {
    let output = get_egg_binary()
        .args(["-q", "-e", "print(7)"])
        .output()
        .expect("Failed to execute egg");

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "7\n");
}

#[test]
fn test_files_are_joined_with_newlines() {
    let first = temp_program("first.egg", "do(define(x, 20),");
    let second = temp_program("second.egg", "print(+(x, 22)))");

    let output = get_egg_binary()
        .arg("-q")
        .arg(&first)
        .arg(&second)
        .output()
        .expect("Failed to execute egg");

    let _ = std::fs::remove_file(&first);
    let _ = std::fs::remove_file(&second);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "42\n");
}

#[test]
fn test_missing_file() {
    let output = get_egg_binary()
        .args(["--color", "never", "/definitely/not/here.egg"])
        .output()
        .expect("Failed to execute egg");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Failed to read /definitely/not/here.egg"));
}

#[test]
fn test_error_is_rendered_as_diagnostic() {
    let output = get_egg_binary()
        .args(["--color", "never", "-e", "+(1, y)"])
        .output()
        .expect("Failed to execute egg");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("error[E0201]: undefined variable `y`"));
    assert!(stderr.contains("--> <eval>:1:6"));
    assert!(stderr.contains("error: aborting due to 1 error"));
}

#[test]
fn test_max_depth_flag() {
    let output = get_egg_binary()
        .args(["--color", "never", "--max-depth", "5", "-e", "do(define(f, fun(f())), f())"])
        .output()
        .expect("Failed to execute egg");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("error[E0204]: maximum call depth of 5 exceeded"));
}

#[test]
fn test_repl_keeps_definitions() {
    let output = run_with_stdin(&[], "define(x, 2)\n\n*(x, 21)\nexit\nprint(\"unreachable\")\n");

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "2\n42\n");
}

#[test]
fn test_repl_continues_after_error() {
    let output = run_with_stdin(&[], "nope\n+(1, 1)\n");

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "2\n");
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("--> <repl>:1:1"));
}

#[test]
fn test_completions() {
    let output = get_egg_binary()
        .args(["complete", "bash"])
        .output()
        .expect("Failed to execute egg");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("egg"));
    assert!(stdout.contains("--max-depth"));
}

#[test]
fn test_deeply_nested_program_file() {
    let depth = 50_000;
    let program = temp_program(
        "deep.egg",
        &format!("{}1{}", "array(".repeat(depth), ")".repeat(depth)),
    );

    let output = get_egg_binary()
        .arg("-q")
        .arg(&program)
        .output()
        .expect("Failed to execute egg");

    let _ = std::fs::remove_file(&program);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}
