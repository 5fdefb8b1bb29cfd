//! End-to-end tests of the `move-ide` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const BANK: &str = "module bank::bank {
    fun deposit(amount: u64): u64 { amount }
    fun run() {
        deposit(1);
        transfer(2);
    }
}
";

fn move_ide(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_move-ide"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run move-ide")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn bank_package() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("sources")).unwrap();
    fs::write(
        dir.path().join("Move.toml"),
        "[package]\nname = \"bank\"\n\n[addresses]\nbank = \"0x0\"\n",
    )
    .unwrap();
    fs::write(dir.path().join("sources").join("bank.move"), BANK).unwrap();
    dir
}

#[test]
fn test_check_reports_unresolved_function() {
    let package = bank_package();
    let output = move_ide(package.path(), &["check", "--no-color"]);

    assert!(!output.status.success());
    assert!(stdout(&output).contains("Unresolved function 'transfer'"));
    assert!(stderr(&output).contains("Checked 1 file(s): 1 error(s), 0 warning(s)"));
}

#[test]
fn test_check_uses_discovered_config() {
    let package = bank_package();
    fs::write(
        package.path().join("move-ide.toml"),
        "[analyzer]\nknown_functions = [\"transfer\"]\n",
    )
    .unwrap();

    let output = move_ide(package.path(), &["check"]);
    assert!(
        output.status.success(),
        "check failed: {}",
        stderr(&output)
    );
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_check_with_explicit_config() {
    let package = bank_package();
    let config = package.path().join("strict.toml");
    fs::write(&config, "[analyzer]\nunresolved_function_errors = false\n").unwrap();

    let output = move_ide(
        package.path(),
        &["check", "--config", config.to_str().unwrap()],
    );
    assert!(output.status.success(), "check failed: {}", stderr(&output));
}

#[test]
fn test_invalid_config_is_reported() {
    let package = bank_package();
    fs::write(package.path().join("move-ide.toml"), "[analyzer\n").unwrap();

    let output = move_ide(package.path(), &["check"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid TOML"));
}

#[test]
fn test_usages() {
    let package = bank_package();
    let output = move_ide(
        package.path(),
        &["usages", "sources/bank.move", "--at", "2:9"],
    );

    assert!(output.status.success(), "usages failed: {}", stderr(&output));
    assert_eq!(
        stdout(&output).lines().collect::<Vec<_>>(),
        [
            "sources/bank.move:4:9: deposit(1);",
            "1 usage(s) of 'deposit'"
        ]
    );
}

#[test]
fn test_tokens() {
    let package = bank_package();
    let output = move_ide(package.path(), &["tokens", "sources/bank.move"]);

    assert!(output.status.success());
    let out = stdout(&output);
    let first: Vec<_> = out.lines().take(2).collect();
    assert_eq!(first, ["0..6 Keyword \"module\"", "7..11 Identifier \"bank\""]);
}

#[test]
fn test_build_with_missing_compiler() {
    let package = bank_package();
    fs::write(
        package.path().join("move-ide.toml"),
        "[compiler]\ncommand = \"move-ide-no-such-compiler\"\n",
    )
    .unwrap();

    let output = move_ide(package.path(), &["build"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("'move-ide-no-such-compiler' was not found"));
}

#[cfg(unix)]
#[test]
fn test_build_reports_compiler_diagnostics() {
    let package = bank_package();
    fs::write(
        package.path().join("move-ide.toml"),
        r#"
[compiler]
command = "sh"
args = ["-c", "echo 'error[E03003]: unbound module'; echo '  ┌─ ./sources/bank.move:5:9'; exit 1"]
"#,
    )
    .unwrap();

    let output = move_ide(package.path(), &["build"]);
    assert!(!output.status.success());
    let out = stdout(&output);
    assert!(out.contains("./sources/bank.move:5:9: error[E03003]: unbound module"));
    assert!(out.contains("failed with exit code 1 (1 error(s) reported)"));
}
