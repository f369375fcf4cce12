//! Gherkin document flattening
//!
//! Parses one feature file and normalizes it into a flat scenario list:
//! feature-level tags are inherited by every scenario, Background steps are
//! cloned onto the front of every scenario, and Scenario Outlines are
//! expanded into one concrete scenario per Examples row.

use crate::error::{Result, StampedeError};
use crate::models::{FeatureDocument, Scenario, Step, StepArgument};
use gherkin::{Feature, GherkinEnv};
use indexmap::IndexMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read and parse a single feature file.
pub fn parse_feature_file<P: AsRef<Path>>(path: P) -> Result<FeatureDocument> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| StampedeError::FeatureParse {
        path: path.display().to_string(),
        message: format!("Failed to read file: {}", e),
    })?;

    parse_feature(&content, &path.display().to_string())
}

/// Parse feature file content into a flattened document.
pub fn parse_feature(content: &str, path: &str) -> Result<FeatureDocument> {
    // the gherkin parser expects newline-terminated input
    let mut source = content.to_string();
    if !source.ends_with('\n') {
        source.push('\n');
    }

    let feature =
        Feature::parse(&source, GherkinEnv::default()).map_err(|e| StampedeError::FeatureParse {
            path: path.to_string(),
            message: e.to_string(),
        })?;

    let feature_tags: Vec<String> = feature.tags.iter().map(|t| strip_tag(t)).collect();

    let background_steps: Vec<Step> = feature
        .background
        .as_ref()
        .map(|bg| bg.steps.iter().map(|s| map_step(s, None)).collect())
        .unwrap_or_default();

    let mut scenarios = Vec::new();

    for scenario in &feature.scenarios {
        let mut tags = feature_tags.clone();
        tags.extend(scenario.tags.iter().map(|t| strip_tag(t)));

        let description = scenario
            .description
            .as_ref()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        if scenario.examples.is_empty() {
            // Plain scenario: map steps 1:1 behind the cloned background
            let mut steps = background_steps.clone();
            steps.extend(scenario.steps.iter().map(|s| map_step(s, None)));

            scenarios.push(Scenario {
                name: scenario.name.clone(),
                steps,
                tags,
                description,
            });
            continue;
        }

        // Scenario Outline: expand per Examples row, independently for
        // every Examples block attached to the outline
        for examples in &scenario.examples {
            let Some(table) = examples.table.as_ref() else {
                continue;
            };
            let Some((header, rows)) = table.rows.split_first() else {
                continue;
            };

            for (row_index, row) in rows.iter().enumerate() {
                let mut steps = background_steps.clone();
                steps.extend(scenario.steps.iter().map(|s| {
                    let text = substitute_placeholders(&s.value, header, row);
                    map_step(s, Some(text))
                }));

                scenarios.push(Scenario {
                    name: format!("{} (Row {})", scenario.name, row_index + 1),
                    steps,
                    tags: tags.clone(),
                    description: description.clone(),
                });
            }
        }
    }

    debug!(path, scenarios = scenarios.len(), "parsed feature file");

    Ok(FeatureDocument {
        path: path.to_string(),
        content: content.to_string(),
        scenarios,
    })
}

fn strip_tag(tag: &str) -> String {
    tag.trim_start_matches('@').to_string()
}

/// Replace every `<columnName>` occurrence with that row's value. Global and
/// case-sensitive, matching column names verbatim.
fn substitute_placeholders(text: &str, header: &[String], row: &[String]) -> String {
    let mut result = text.to_string();
    for (column, value) in header.iter().zip(row.iter()) {
        result = result.replace(&format!("<{}>", column), value);
    }
    result
}

/// Map a Gherkin AST step into the internal step shape, converting an
/// attached data table into row-objects keyed by the header row, or an
/// attached doc-string into a raw string.
fn map_step(step: &gherkin::Step, override_text: Option<String>) -> Step {
    let argument = if let Some(table) = step.table.as_ref() {
        table.rows.split_first().map(|(header, rows)| {
            let row_objects: Vec<IndexMap<String, String>> = rows
                .iter()
                .map(|row| {
                    header
                        .iter()
                        .zip(row.iter())
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect()
                })
                .collect();
            StepArgument::Table(row_objects)
        })
    } else {
        step.docstring
            .as_ref()
            .map(|doc| StepArgument::DocString(doc.clone()))
    };

    Step {
        keyword: step.keyword.trim().to_string(),
        text: override_text.unwrap_or_else(|| step.value.clone()),
        argument,
    }
}
