//! CLI test runner with fluent assertions.
//!
//! Provides infrastructure for executing the `stash` binary against an
//! isolated inventory file and settings file, and verifying output, exit
//! codes and JSON responses in robot mode.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde_json::Value;
use tempfile::TempDir;

/// Main test runner for the `stash` CLI binary.
///
/// Every runner owns a temporary directory holding its inventory file and
/// settings file, so tests never touch the user's real data.
///
/// # Example
///
/// ```ignore
/// let cli = CliRunner::new();
/// cli.run_robot(&["add", "Kitchen", "Drawer", "Fork"])
///    .assert_success()
///    .assert_stdout_contains("Fork");
/// ```
pub struct CliRunner {
    binary_path: PathBuf,
    temp: TempDir,
    env_vars: HashMap<String, String>,
    stdin: Option<Vec<u8>>,
}

impl Default for CliRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CliRunner {
    /// Create a new CLI runner pointing to the compiled `stash` binary.
    #[must_use]
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let mut env_vars = HashMap::new();
        env_vars.insert(
            "STASH_DATA_FILE".to_string(),
            temp.path().join("storage_data.json").display().to_string(),
        );
        env_vars.insert(
            "STASH_CONFIG".to_string(),
            temp.path().join("config/config.toml").display().to_string(),
        );
        env_vars.insert("RUST_LOG".to_string(), "off".to_string());

        Self {
            binary_path: PathBuf::from(env!("CARGO_BIN_EXE_stash")),
            temp,
            env_vars,
            stdin: None,
        }
    }

    /// Add an environment variable for command execution.
    #[must_use]
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env_vars.insert(key.to_string(), value.to_string());
        self
    }

    /// Run without the `STASH_DATA_FILE` override, so the settings file decides.
    #[must_use]
    pub fn without_data_file_override(mut self) -> Self {
        self.env_vars.remove("STASH_DATA_FILE");
        self
    }

    /// Set standard input for the command.
    #[must_use]
    pub fn with_stdin(self, stdin: &str) -> Self {
        self.with_stdin_bytes(stdin.as_bytes())
    }

    /// Set raw standard input bytes for the command.
    #[must_use]
    pub fn with_stdin_bytes(mut self, stdin: &[u8]) -> Self {
        self.stdin = Some(stdin.to_vec());
        self
    }

    /// Settings file used by default.
    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.temp.path().join("config/config.toml")
    }

    /// Temporary directory owned by this runner.
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.temp.path()
    }

    /// Inventory file used by default.
    #[must_use]
    pub fn data_file(&self) -> PathBuf {
        self.temp.path().join("storage_data.json")
    }

    /// Write raw contents to the inventory file.
    pub fn write_data(&self, contents: &str) {
        fs::write(self.data_file(), contents).expect("Failed to write inventory file");
    }

    /// Read the inventory file as JSON.
    #[must_use]
    pub fn read_data(&self) -> Value {
        let text = fs::read_to_string(self.data_file()).expect("Failed to read inventory file");
        serde_json::from_str(&text)
            .unwrap_or_else(|_| panic!("Inventory file is not JSON:\n{text}"))
    }

    /// Execute the command with the given arguments.
    ///
    /// # Panics
    ///
    /// Panics if the command fails to execute.
    #[must_use]
    pub fn run(&self, args: &[&str]) -> CliResult {
        let mut cmd = Command::new(&self.binary_path);
        cmd.args(args)
            .current_dir(self.temp.path())
            .env_remove("STASH_FORMAT")
            .env_remove("NO_COLOR")
            .stdin(if self.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        let mut child = cmd.spawn().expect("Failed to execute command");
        if let Some(input) = &self.stdin {
            child
                .stdin
                .take()
                .expect("stdin was not piped")
                .write_all(input)
                .expect("Failed to write stdin");
        }
        let output = child.wait_with_output().expect("Failed to wait for command");

        CliResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            args: args.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Execute with `--robot` flag for JSON output.
    #[must_use]
    pub fn run_robot(&self, args: &[&str]) -> CliResult {
        let mut full_args = vec!["--robot"];
        full_args.extend(args);
        self.run(&full_args)
    }
}

/// Captured output from CLI execution with fluent assertions.
#[derive(Debug, Clone)]
pub struct CliResult {
    /// Standard output captured from the command.
    pub stdout: String,
    /// Standard error captured from the command.
    pub stderr: String,
    /// Exit code from the command.
    pub exit_code: i32,
    /// Arguments passed to the command.
    pub args: Vec<String>,
}

impl CliResult {
    /// Check if the command succeeded (exit code 0).
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Assert the command succeeded.
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.success(),
            "Command {:?} failed with exit code {}: {}",
            self.args,
            self.exit_code,
            self.stderr
        );
        self
    }

    /// Assert the command failed.
    pub fn assert_failure(&self) -> &Self {
        assert!(
            !self.success(),
            "Command {:?} unexpectedly succeeded",
            self.args
        );
        self
    }

    /// Assert stdout contains the given text.
    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "stdout does not contain \"{text}\"\nActual stdout:\n{}",
            self.stdout
        );
        self
    }

    /// Assert stdout matches a regex pattern.
    pub fn assert_stdout_matches(&self, pattern: &str) -> &Self {
        let re = regex::Regex::new(pattern).expect("Invalid regex pattern");
        assert!(
            re.is_match(&self.stdout),
            "stdout does not match pattern \"{pattern}\"\nActual stdout:\n{}",
            self.stdout
        );
        self
    }

    /// Assert stderr contains the given text.
    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "stderr does not contain \"{text}\"\nActual stderr:\n{}",
            self.stderr
        );
        self
    }

    // === JSON Assertions (for robot mode) ===

    /// Parse stdout as JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|_| panic!("Failed to parse JSON from stdout:\n{}", self.stdout))
    }

    /// Parse stderr as JSON (robot-mode errors).
    #[must_use]
    pub fn stderr_json(&self) -> Value {
        serde_json::from_str(self.stderr.trim())
            .unwrap_or_else(|_| panic!("Failed to parse JSON from stderr:\n{}", self.stderr))
    }

    /// Assert a JSON field matches an expected value using JSON pointer syntax.
    pub fn assert_json_field(&self, json_pointer: &str, expected: &Value) -> &Self {
        let json = self.json();
        let actual = json.pointer(json_pointer).unwrap_or_else(|| {
            panic!(
                "JSON path {json_pointer} not found in:\n{}",
                serde_json::to_string_pretty(&json).unwrap_or_default()
            )
        });
        assert_eq!(actual, expected, "JSON field {json_pointer} mismatch");
        self
    }
}
