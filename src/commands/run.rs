//! Run command implementation
//!
//! Generates the script, writes it to the configured output directory and
//! hands it to the k6 binary.

use crate::commands::generate::{GenerateParams, prepare_script};
use crate::error::{Result, StampedeError};
use crate::runner::{K6Runner, Runner};
use crate::writer::write_script;
use colored::Colorize;
use std::path::Path;

/// Execute the run command (generate and run)
pub fn execute_run(params: &GenerateParams, k6_args: &[String]) -> Result<()> {
    println!("{} Generating test script...", "→".blue());

    let prepared = prepare_script(params)?;
    let script_path = write_script(
        Path::new(&prepared.config.output_dir),
        prepared.config.language,
        &prepared.script,
    )?;
    println!(
        "{} Generated k6 script: {}",
        "✓".green(),
        script_path.display()
    );

    let runner = K6Runner::new().with_args(k6_args.to_vec());

    if !runner.is_available() {
        return Err(StampedeError::ValidationError(
            "k6 is not installed or not in PATH. Please install k6 first: https://k6.io/docs/get-started/installation/"
                .to_string(),
        ));
    }
    println!("{} k6 version: {}", "✓".green(), runner.version()?);

    println!("{} Running tests with k6...\n", "→".blue());
    let result = runner.run_script(&script_path)?;

    if !result.stdout.is_empty() {
        println!("{}", result.stdout);
    }
    if !result.stderr.is_empty() {
        eprintln!("{}", result.stderr);
    }

    if result.success {
        println!("\n{} Test run completed successfully!", "✓".green());
    } else {
        println!(
            "\n{} Test run failed with exit code: {}",
            "✗".red(),
            result.exit_code
        );
    }

    if let Some(metrics) = &result.metrics {
        println!("\n{}", "Metrics Summary:".bold());
        println!("  HTTP Requests: {}", metrics.http_reqs);
        println!("  Iterations: {}", metrics.iterations);
        println!("  Avg Response Time: {:.2}ms", metrics.avg_response_time_ms);
        println!(
            "  Checks: {} passed, {} failed",
            metrics.checks_passed, metrics.checks_failed
        );
    }

    if !result.success {
        return Err(StampedeError::ValidationError(format!(
            "Test run failed with exit code: {}",
            result.exit_code
        )));
    }

    Ok(())
}
