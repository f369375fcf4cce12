use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One parsed feature file, flattened into executable scenarios.
///
/// Created once per source file during ingestion and handed by value to the
/// downstream stages; nothing mutates it after parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureDocument {
    /// Source path of the feature file
    pub path: String,

    /// Raw file content as read from disk
    pub content: String,

    /// Scenarios in source order, with outlines already expanded
    pub scenarios: Vec<Scenario>,
}

/// One concrete executable unit: a literal Scenario or one expanded row of a
/// Scenario Outline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name; outline rows carry a "(Row N)" suffix
    pub name: String,

    /// Background steps (cloned per scenario) followed by the scenario's own
    /// steps, in source order
    pub steps: Vec<Step>,

    /// Feature-level and scenario-level tags combined, without the `@` prefix
    pub tags: Vec<String>,

    /// Free-text description block, if the scenario has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Scenario {
    /// Check for a plain (non `key:value`) tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// One Gherkin step line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    /// Given/When/Then/And/But, trimmed
    pub keyword: String,

    /// The step sentence, with outline placeholders already substituted
    pub text: String,

    /// Attached data table or doc-string block, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<StepArgument>,
}

/// A step's block argument. At most one of the two forms can be attached to
/// a given step, which the enum encodes directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepArgument {
    /// Data table rows keyed by the header row, in column order
    Table(Vec<IndexMap<String, String>>),

    /// Raw doc-string content, uninterpreted
    DocString(String),
}

/// Load-test policy directives extracted from a scenario's tags.
///
/// Derived data: recomputed from the current tags on every generation run,
/// never cached across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioMetadata {
    /// Name of the scenario the directives were read from
    #[serde(rename = "scenarioName")]
    pub scenario_name: String,

    /// The full tag set, for downstream flag checks (e.g. `browser`)
    pub tags: Vec<String>,

    /// `vus:<n>` — virtual users requested by this scenario
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vus: Option<u32>,

    /// `duration:<d>` — flat test duration, e.g. "1m"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    /// `stages:<d-target,...>` — raw ramp-profile encoding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stages: Option<String>,

    /// `iterations:<n>` — fixed iteration count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u64>,

    /// `threshold:<metric>=<expr>` entries, in declaration order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub thresholds: IndexMap<String, String>,

    /// `group:<label>` — grouping label for reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl ScenarioMetadata {
    /// Whether this scenario requires the browser runtime profile.
    pub fn is_browser(&self) -> bool {
        self.tags.iter().any(|t| t == "browser")
    }
}
