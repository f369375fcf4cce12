//! Load-test policy extraction from scenario tags
//!
//! Tag grammar: `vus:<int>`, `duration:<str>`, `stages:<dur-target,...>`,
//! `iterations:<int>`, `threshold:<metric>=<expr>`, `group:<label>`.
//! Unrecognized tags are ignored so feature files can carry tags for other
//! tools. Unparseable numeric values are treated as absent rather than
//! failing the run.

use crate::models::{Scenario, ScenarioMetadata};
use tracing::warn;

/// Extract one metadata record per scenario, in order. Pure and infallible.
pub fn extract_metadata(scenarios: &[Scenario]) -> Vec<ScenarioMetadata> {
    scenarios.iter().map(extract_scenario_metadata).collect()
}

fn extract_scenario_metadata(scenario: &Scenario) -> ScenarioMetadata {
    let mut metadata = ScenarioMetadata {
        scenario_name: scenario.name.clone(),
        tags: scenario.tags.clone(),
        ..Default::default()
    };

    for tag in &scenario.tags {
        if let Some(value) = tag.strip_prefix("vus:") {
            metadata.vus = parse_number(scenario, "vus", value);
        } else if let Some(value) = tag.strip_prefix("duration:") {
            metadata.duration = Some(value.to_string());
        } else if let Some(value) = tag.strip_prefix("stages:") {
            metadata.stages = Some(value.to_string());
        } else if let Some(value) = tag.strip_prefix("iterations:") {
            metadata.iterations = parse_number(scenario, "iterations", value);
        } else if let Some(value) = tag.strip_prefix("threshold:") {
            if let Some((metric, expr)) = value.split_once('=') {
                metadata
                    .thresholds
                    .insert(metric.to_string(), expr.to_string());
            } else {
                warn!(
                    scenario = %scenario.name,
                    tag = %tag,
                    "threshold tag is not of the form metric=expr, ignoring"
                );
            }
        } else if let Some(value) = tag.strip_prefix("group:") {
            metadata.group = Some(value.to_string());
        }
    }

    metadata
}

fn parse_number<N: std::str::FromStr>(scenario: &Scenario, key: &str, value: &str) -> Option<N> {
    match value.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!(
                scenario = %scenario.name,
                value,
                "unparseable {key} tag value, falling back to default"
            );
            None
        }
    }
}
