//! Integration Tests

#[macro_use]
extern crate lazy_static;

use std::collections::HashMap;
use std::fs::{self, DirEntry};
use std::io;
use std::path::PathBuf;

use assert_cli::Assert;
use tempdir::TempDir;

trait AssertExt {
    fn exit_status_is(self, exit_status: i32) -> Self;
}

impl AssertExt for Assert {
    fn exit_status_is(self, exit_status: i32) -> Self {
        if exit_status == 0 {
            self.succeeds()
        } else {
            self.fails_with(exit_status)
        }
    }
}

struct ScriptData<'a> {
    pub stdout: &'a str,
    pub exit_status: i32,
}

lazy_static! {
    static ref SIMSH_SCRIPTS_MAP: HashMap<&'static str, ScriptData<'static>> = {
        let mut map = HashMap::new();
        map.insert("simple_echo.simsh", ScriptData { stdout: "test\n", exit_status: 0 });
        map.insert("simple_quoting.simsh", ScriptData {
            stdout: "a  b c  d e f\nx  y it\"s\ndone\n",
            exit_status: 0
        });
        map.insert("simple_redirects.simsh", ScriptData {
            stdout: "first\nsecond\noops\n",
            exit_status: 0
        });
        map.insert("simple_variables.simsh", ScriptData {
            stdout: "hello hello! $GREETING #kept\n[]\n",
            exit_status: 0
        });
        map.insert("simple_cd.simsh", ScriptData { stdout: "/\n", exit_status: 0 });
        map.insert("simple_exit_error.simsh", ScriptData { stdout: "", exit_status: 85 });
        map.insert("simple_exit_large.simsh", ScriptData { stdout: "", exit_status: 244 });
        map.insert("simple_exit_negative.simsh", ScriptData { stdout: "", exit_status: 12 });
        map.insert("simple_command_not_found.simsh", ScriptData {
            stdout: "before\n",
            exit_status: 127
        });
        map.insert("simple_syntax_error.simsh", ScriptData { stdout: "", exit_status: 2 });
        map.insert("simple_output_order.simsh", ScriptData { stdout: "ab\n", exit_status: 0 });
        map.insert("simple_unsupported_operators.simsh", ScriptData {
            stdout: "before\n",
            exit_status: 2
        });
        map
    };
}

#[test]
fn test_all_simple_simsh_scripts() {
    let simple_scripts = get_path_to_test_scripts()
        .read_dir()
        .expect("read_dir failed")
        .map(|entry| entry.expect("directory entry should be readable"))
        .filter(|entry| is_simple_simsh_script(entry));

    let mut count = 0;
    for entry in simple_scripts {
        let temp_dir = generate_temp_directory().expect("unable to generate temp dir");
        let file_path = entry.path();
        let unicode_file_path = file_path.to_str().expect("file path should be valid Unicode");

        let filename = entry.file_name();
        let expected_data = SIMSH_SCRIPTS_MAP
            .get(filename.to_str().expect("filename should be valid Unicode"))
            .expect("simple script should have matching data in SIMSH_SCRIPTS_MAP");

        Assert::cargo_binary("simsh")
            .current_dir(temp_dir.path())
            .with_args(&[log_arg(&temp_dir).as_str(), unicode_file_path])
            .stdout()
            .is(expected_data.stdout)
            .exit_status_is(expected_data.exit_status)
            .unwrap();
        count += 1;
    }

    assert_eq!(count, SIMSH_SCRIPTS_MAP.len());
}

#[test]
fn test_background_job_is_reported_once() {
    let temp_dir = generate_temp_directory().expect("unable to generate temp dir");
    let script = get_path_to_test_scripts().join("background.simsh");

    Assert::cargo_binary("simsh")
        .current_dir(temp_dir.path())
        .with_args(&[log_arg(&temp_dir).as_str(), script.to_str().unwrap()])
        .stdout()
        .contains("[1]  Done    sleep 0.2\nNo background jobs\n")
        .succeeds()
        .unwrap();
}

#[test]
fn test_command_string() {
    let temp_dir = generate_temp_directory().expect("unable to generate temp dir");
    Assert::cargo_binary("simsh")
        .with_args(&[log_arg(&temp_dir).as_str(), "-c", "echo \"hello  world\""])
        .stdout()
        .is("hello  world\n")
        .succeeds()
        .unwrap();
}

#[test]
fn test_command_string_exit_statuses() {
    let temp_dir = generate_temp_directory().expect("unable to generate temp dir");
    let log = log_arg(&temp_dir);

    Assert::cargo_binary("simsh")
        .with_args(&[log.as_str(), "-c", "false"])
        .fails_with(1)
        .stderr()
        .contains("simsh: false: command failed (exit status: 1)")
        .unwrap();

    Assert::cargo_binary("simsh")
        .with_args(&[log.as_str(), "-c", "sh -c 'exit 7'"])
        .fails_with(7)
        .unwrap();

    Assert::cargo_binary("simsh")
        .with_args(&[log.as_str(), "-c", "simsh-no-such-command --flag"])
        .fails_with(127)
        .stderr()
        .contains("simsh: simsh-no-such-command: command not found")
        .unwrap();

    Assert::cargo_binary("simsh")
        .with_args(&[log.as_str(), "-c", "cat <"])
        .fails_with(2)
        .stderr()
        .contains("syntax error")
        .unwrap();

    Assert::cargo_binary("simsh")
        .with_args(&[log.as_str(), "-c", "echo hi | wc -c"])
        .stdout()
        .is("")
        .fails_with(2)
        .stderr()
        .contains("simsh: syntax error: unsupported operator `|'")
        .unwrap();
}

#[test]
fn test_missing_input_file() {
    let temp_dir = generate_temp_directory().expect("unable to generate temp dir");
    Assert::cargo_binary("simsh")
        .current_dir(temp_dir.path())
        .with_args(&[log_arg(&temp_dir).as_str(), "-c", "cat < missing.txt"])
        .fails_with(1)
        .stderr()
        .contains("cannot open input file `missing.txt'")
        .unwrap();
}

#[test]
fn test_output_redirect_creates_file() {
    let temp_dir = generate_temp_directory().expect("unable to generate temp dir");
    Assert::cargo_binary("simsh")
        .current_dir(temp_dir.path())
        .with_args(&[log_arg(&temp_dir).as_str(), "-c", "/bin/echo redirected > out.txt"])
        .stdout()
        .is("")
        .succeeds()
        .unwrap();

    let contents = fs::read_to_string(temp_dir.path().join("out.txt")).unwrap();
    assert_eq!(contents, "redirected\n");
}

#[test]
fn test_version() {
    Assert::cargo_binary("simsh")
        .with_args(&["--version"])
        .stdout()
        .contains(concat!("simsh version ", env!("CARGO_PKG_VERSION")))
        .unwrap();
}

fn get_path_to_test_scripts() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("scripts")
}

/// Does filename start with 'simple' and end with '.simsh'?
fn is_simple_simsh_script(entry: &DirEntry) -> bool {
    let filename = entry.file_name();
    let unicode_filename = filename.to_str().expect("filename should be valid Unicode");
    unicode_filename.starts_with("simple") && unicode_filename.ends_with(".simsh")
}

/// Keeps test runs out of the user's log file.
fn log_arg(temp_dir: &TempDir) -> String {
    format!("--log={}", temp_dir.path().join("simsh.log").display())
}

fn generate_temp_directory() -> io::Result<TempDir> {
    // Because of limitation in `assert_cli`, temporary directory must be
    // subdirectory of directory containing Cargo.toml
    let temp_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests");
    TempDir::new_in(temp_root, "temp")
}
