//! Test harness for running the `specsteg` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::OnceLock;

use tempfile::TempDir;

/// Result of running the specsteg CLI.
#[derive(Debug)]
pub struct CliResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Create a CliResult from a Command Output.
    pub fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Assert that the command succeeded.
    pub fn assert_success(&self) {
        assert!(
            self.success,
            "Command failed with exit code {}.\nstdout: {}\nstderr: {}",
            self.exit_code, self.stdout, self.stderr
        );
    }

    /// Assert that the command failed.
    pub fn assert_failure(&self) {
        assert!(
            !self.success,
            "Expected command to fail, but it succeeded.\nstdout: {}",
            self.stdout
        );
    }

    /// Parse stdout as JSON (for `--json` runs).
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({}):\n{}", e, self.stdout))
    }
}

/// A scratch directory plus helpers for driving the CLI inside it.
pub struct TestHarness {
    /// Working directory for test inputs and outputs.
    pub work_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness.
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().expect("Failed to create work dir"),
        }
    }

    /// Get the working directory path.
    pub fn path(&self) -> &Path {
        self.work_dir.path()
    }

    /// Path of a file inside the working directory.
    pub fn file(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    /// Write a file into the working directory.
    pub fn write(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.file(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Run the specsteg CLI with the given arguments from the working
    /// directory.
    pub fn run_cli(&self, args: &[&str]) -> CliResult {
        let output = Command::new("cargo")
            .args(["run", "--quiet", "--manifest-path"])
            .arg(workspace_manifest_path())
            .args(["-p", "specsteg-cli", "--"])
            .args(args)
            .current_dir(self.path())
            .output();

        match output {
            Ok(out) => CliResult::from_output(out),
            Err(e) => CliResult {
                success: false,
                exit_code: -1,
                stdout: String::new(),
                stderr: format!("Failed to run CLI: {}", e),
            },
        }
    }

    /// Encode `input` into `output` with extra flags.
    pub fn encode(&self, input: &Path, output: &Path, extra: &[&str]) -> CliResult {
        let mut args = vec![
            "encode",
            input.to_str().expect("utf-8 path"),
            "--output",
            output.to_str().expect("utf-8 path"),
        ];
        args.extend_from_slice(extra);
        self.run_cli(&args)
    }

    /// Decode `input` into `output` with extra flags.
    pub fn decode(&self, input: &Path, output: &Path, extra: &[&str]) -> CliResult {
        let mut args = vec![
            "decode",
            input.to_str().expect("utf-8 path"),
            "--output",
            output.to_str().expect("utf-8 path"),
        ];
        args.extend_from_slice(extra);
        self.run_cli(&args)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

fn workspace_manifest_path() -> PathBuf {
    static PATH: OnceLock<PathBuf> = OnceLock::new();
    PATH.get_or_init(|| {
        let manifest_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("Cargo.toml");
        manifest_path.canonicalize().unwrap_or(manifest_path)
    })
    .clone()
}

/// Reads the mono samples of a WAV file as f64, whatever its encoding.
pub fn read_wav_samples(path: &Path) -> (hound::WavSpec, Vec<f64>) {
    let reader = hound::WavReader::open(path).expect("Failed to open WAV");
    let spec = reader.spec();
    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.expect("bad sample") as f64)
            .collect(),
        hound::SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .into_samples::<i32>()
                .map(|s| s.expect("bad sample") as f64 / max_val)
                .collect()
        }
    };
    (spec, samples)
}
