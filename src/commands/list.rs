//! List command implementation

use crate::config::{Overrides, ProjectConfig};
use crate::error::Result;
use crate::loader::load_features;
use crate::metadata::extract_metadata;
use colored::Colorize;
use std::path::Path;

/// Print every scenario reachable from the features path, with its tags and
/// the load directives that would apply.
pub fn execute_list(features: Option<&str>, config_file: Option<&Path>) -> Result<()> {
    let cli = Overrides {
        features_dir: features.map(str::to_string),
        ..Default::default()
    };
    let config = ProjectConfig::from_sources(cli, config_file)?;

    println!("{}", "Loading feature files...".bright_blue());
    println!("  Path: {}", config.features_dir);

    let documents = load_features(&config.features_dir)?;
    println!(
        "\n{} {} feature file(s) loaded",
        "✓".green(),
        documents.len()
    );

    for document in &documents {
        println!();
        println!("{} {}", "Feature file:".bright_cyan(), document.path.bold());

        let metadata = extract_metadata(&document.scenarios);

        for (scenario, meta) in document.scenarios.iter().zip(metadata.iter()) {
            println!();
            println!("  {} {}", "Scenario:".bright_cyan(), scenario.name.bold());
            println!("    Steps: {}", scenario.steps.len());

            if !scenario.tags.is_empty() {
                println!("    Tags: {}", scenario.tags.join(", "));
            }

            let mut directives = Vec::new();
            if let Some(vus) = meta.vus {
                directives.push(format!("vus={}", vus));
            }
            if let Some(duration) = &meta.duration {
                directives.push(format!("duration={}", duration));
            }
            if let Some(stages) = &meta.stages {
                directives.push(format!("stages={}", stages));
            }
            if let Some(iterations) = meta.iterations {
                directives.push(format!("iterations={}", iterations));
            }
            if let Some(group) = &meta.group {
                directives.push(format!("group={}", group));
            }
            for (metric, expr) in &meta.thresholds {
                directives.push(format!("threshold {}={}", metric, expr));
            }

            if !directives.is_empty() {
                println!("    Load: {}", directives.join(", ").bright_yellow());
            }
            if meta.is_browser() {
                println!("    Mode: {}", "browser".bright_magenta());
            }
        }
    }

    Ok(())
}
