//! k6 runner
//!
//! Spawns the k6 binary against a generated script and scrapes the summary
//! metrics out of its console output.

use super::{RunMetrics, RunResult, Runner};
use crate::error::{Result, StampedeError};
use regex::Regex;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::NamedTempFile;

/// Runner for k6 test scripts
#[derive(Debug, Clone, Default)]
pub struct K6Runner {
    /// Path to the k6 binary (defaults to "k6" in PATH)
    k6_path: String,
    /// Additional arguments passed through to `k6 run`
    extra_args: Vec<String>,
}

impl K6Runner {
    pub fn new() -> Self {
        Self {
            k6_path: "k6".to_string(),
            extra_args: Vec::new(),
        }
    }

    /// Use a k6 binary outside of PATH.
    pub fn with_path<S: Into<String>>(path: S) -> Self {
        Self {
            k6_path: path.into(),
            extra_args: Vec::new(),
        }
    }

    /// Pass extra arguments to `k6 run`.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args = args.into_iter().map(|s| s.into()).collect();
        self
    }

    fn scrape_count(stdout: &str, metric: &str) -> Option<u64> {
        let re = Regex::new(&format!(r"{}[.\s]+:\s+(\d+)", metric)).ok()?;
        re.captures(stdout)?.get(1)?.as_str().parse().ok()
    }

    /// Scrape the summary block of k6's console output. Returns None when
    /// nothing recognizable is present (e.g. the run aborted early).
    fn parse_output(stdout: &str) -> Option<RunMetrics> {
        let mut metrics = RunMetrics::default();
        let mut matched = false;

        if let Some(reqs) = Self::scrape_count(stdout, "http_reqs") {
            metrics.http_reqs = reqs;
            matched = true;
        }
        if let Some(iterations) = Self::scrape_count(stdout, "iterations") {
            metrics.iterations = iterations;
            matched = true;
        }
        if let Some(vus) = Self::scrape_count(stdout, "vus") {
            metrics.vus = vus as u32;
            matched = true;
        }

        let duration_re = Regex::new(r"http_req_duration[.\s]+:.*avg=(\d+\.?\d*)(\w+)").ok()?;
        if let Some(caps) = duration_re.captures(stdout) {
            let value: f64 = caps[1].parse().unwrap_or(0.0);
            metrics.avg_response_time_ms = match &caps[2] {
                "s" => value * 1000.0,
                "ms" => value,
                "µs" | "us" => value / 1000.0,
                _ => value,
            };
            matched = true;
        }

        let checks_re = Regex::new(r"checks[.\s]+:\s+[\d.]+%\s+✓\s+(\d+)\s+✗\s+(\d+)").ok()?;
        if let Some(caps) = checks_re.captures(stdout) {
            metrics.checks_passed = caps[1].parse().unwrap_or(0);
            metrics.checks_failed = caps[2].parse().unwrap_or(0);
            matched = true;
        }

        matched.then_some(metrics)
    }
}

impl Runner for K6Runner {
    fn is_available(&self) -> bool {
        Command::new(&self.k6_path)
            .arg("version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    fn version(&self) -> Result<String> {
        let output = Command::new(&self.k6_path)
            .arg("version")
            .output()
            .map_err(StampedeError::IoError)?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(StampedeError::ValidationError(
                "Failed to get k6 version".to_string(),
            ))
        }
    }

    fn run_script<P: AsRef<Path>>(&self, script_path: P) -> Result<RunResult> {
        let script_path = script_path.as_ref();

        if !script_path.exists() {
            return Err(StampedeError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Script not found: {}", script_path.display()),
            )));
        }

        let mut cmd = Command::new(&self.k6_path);
        cmd.arg("run");
        for arg in &self.extra_args {
            cmd.arg(arg);
        }
        cmd.arg(script_path);

        let output = cmd.output().map_err(StampedeError::IoError)?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        Ok(RunResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            metrics: Self::parse_output(&stdout),
            stdout,
            stderr,
        })
    }

    fn run_script_content(&self, content: &str) -> Result<RunResult> {
        let mut temp_file = NamedTempFile::with_suffix(".js").map_err(StampedeError::IoError)?;
        temp_file
            .write_all(content.as_bytes())
            .map_err(StampedeError::IoError)?;
        temp_file.flush().map_err(StampedeError::IoError)?;

        self.run_script(temp_file.path())
    }
}
