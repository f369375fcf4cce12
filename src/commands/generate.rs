//! Generate command implementation
//!
//! Orchestrates the full pipeline: config resolution, ingestion, tag
//! filtering, metadata extraction, generation and output writing.

use crate::config::{Overrides, ProjectConfig, ScriptLanguage};
use crate::error::{Result, StampedeError};
use crate::generator::{K6Generator, ScriptGenerator};
use crate::loader::load_features;
use crate::metadata::extract_metadata;
use crate::models::Scenario;
use crate::writer::write_script;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Inputs of the generate (and run) command, straight from the CLI.
#[derive(Debug, Clone, Default)]
pub struct GenerateParams {
    pub features: Option<String>,
    pub output: Option<String>,
    pub language: Option<ScriptLanguage>,
    pub tags: Option<String>,
    pub exclude_tags: Option<String>,
    pub base_url: Option<String>,
    pub config_file: Option<PathBuf>,
}

/// A generated script, plus what was needed to produce it.
pub(crate) struct PreparedScript {
    pub config: ProjectConfig,
    pub scenario_count: usize,
    pub script: String,
}

/// Execute the generate command
pub fn execute_generate(params: &GenerateParams) -> Result<()> {
    let prepared = prepare_script(params)?;

    let output_path = write_script(
        Path::new(&prepared.config.output_dir),
        prepared.config.language,
        &prepared.script,
    )?;

    println!(
        "{} Generated k6 script: {}",
        "✓".green(),
        output_path.display()
    );
    println!("  Scenarios processed: {}", prepared.scenario_count);

    Ok(())
}

/// Run the pipeline up to (and including) script generation.
pub(crate) fn prepare_script(params: &GenerateParams) -> Result<PreparedScript> {
    let config = resolve_config(params)?;

    let documents = load_features(&config.features_dir)?;
    println!(
        "{} Loaded {} feature file(s) from {}",
        "✓".green(),
        documents.len(),
        config.features_dir
    );

    let mut scenarios: Vec<Scenario> = documents
        .into_iter()
        .flat_map(|document| document.scenarios)
        .collect();

    if let Some(tags) = &params.tags {
        let include = split_tag_list(tags);
        scenarios.retain(|s| include.iter().any(|tag| s.has_tag(tag)));
    }
    if let Some(tags) = &params.exclude_tags {
        let exclude = split_tag_list(tags);
        scenarios.retain(|s| !exclude.iter().any(|tag| s.has_tag(tag)));
    }

    if scenarios.is_empty() {
        return Err(StampedeError::ValidationError(format!(
            "No scenarios left after tag filtering in: {}",
            config.features_dir
        )));
    }

    let metadata = extract_metadata(&scenarios);
    let script = K6Generator::new().generate(&scenarios, &metadata, &config)?;

    Ok(PreparedScript {
        scenario_count: scenarios.len(),
        config,
        script,
    })
}

fn resolve_config(params: &GenerateParams) -> Result<ProjectConfig> {
    let cli = Overrides {
        language: params.language,
        features_dir: params.features.clone(),
        output_dir: params.output.clone(),
        base_url: params.base_url.clone(),
        include_reporter: None,
    };

    ProjectConfig::from_sources(cli, params.config_file.as_deref())
}

fn split_tag_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| t.trim_start_matches('@').to_string())
        .collect()
}
