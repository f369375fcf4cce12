//! Script intermediate representation
//!
//! Generation is split into two halves: lowering scenarios + metadata into
//! this IR, and rendering the IR per target language. The IR owns the policy
//! decisions (option merging, argument encoding, page-handle classification)
//! so the renderers only deal with text.

use crate::generator::steps;
use crate::models::{Scenario, ScenarioMetadata};
use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::warn;

/// Well-known k6 metric names accepted in threshold tags. Anything else must
/// at least look like a custom metric (`lowercase_snake_case`) to be kept.
const KNOWN_METRICS: &[&str] = &[
    "http_req_duration",
    "http_req_failed",
    "http_req_connecting",
    "http_req_tls_handshaking",
    "http_req_waiting",
    "http_req_receiving",
    "data_sent",
    "data_received",
    "iteration_duration",
    "iterations",
    "vus",
    "vus_max",
    "browser_web_vital_lcp",
    "browser_web_vital_fid",
    "browser_web_vital_cls",
];

/// One ramp step of a staged profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stage {
    pub duration: String,
    pub target: u32,
}

/// The merged, script-wide execution options.
///
/// All scenarios share one generated script, so conflicting declarations are
/// resolved "most demanding wins" for VUs and last-wins for the rest.
#[derive(Debug, Clone)]
pub struct ExecutionProfile {
    pub vus: u32,
    pub duration: String,
    pub stages: Vec<Stage>,
    pub iterations: Option<u64>,
    pub thresholds: IndexMap<String, String>,
    pub browser: bool,
}

impl Default for ExecutionProfile {
    fn default() -> Self {
        Self {
            vus: 1,
            duration: "30s".to_string(),
            stages: Vec::new(),
            iterations: None,
            thresholds: IndexMap::new(),
            browser: false,
        }
    }
}

impl ExecutionProfile {
    /// Merge all scenarios' metadata into one profile.
    pub fn merge(metadata: &[ScenarioMetadata]) -> Self {
        let mut profile = Self::default();

        for meta in metadata {
            if let Some(vus) = meta.vus {
                profile.vus = profile.vus.max(vus);
            }
            if let Some(duration) = &meta.duration {
                profile.duration = duration.clone();
            }
            if let Some(raw) = &meta.stages {
                profile.stages = parse_stages(raw);
            }
            if let Some(iterations) = meta.iterations {
                profile.iterations = Some(iterations);
            }
            for (metric, expr) in &meta.thresholds {
                if is_valid_metric(metric) {
                    profile.thresholds.insert(metric.clone(), expr.clone());
                } else {
                    warn!(
                        scenario = %meta.scenario_name,
                        metric,
                        "dropping threshold for unrecognized metric name"
                    );
                }
            }
            if meta.is_browser() {
                profile.browser = true;
            }
        }

        profile
    }

    /// Render the profile as the k6 options object.
    ///
    /// Staged and flat-duration profiles are mutually exclusive at the
    /// whole-script level; a fixed iteration count overrides both. Browser
    /// runs always use a dedicated executor scenario carrying the chromium
    /// hint, protocol runs only when the iteration executor is needed.
    pub fn to_options_value(&self) -> Value {
        let mut options = Map::new();

        if !self.thresholds.is_empty() {
            let mut thresholds = Map::new();
            for (metric, expr) in &self.thresholds {
                thresholds.insert(metric.clone(), json!([expr]));
            }
            options.insert("thresholds".to_string(), Value::Object(thresholds));
        }

        if self.browser {
            let mut scenario = Map::new();

            if let Some(iterations) = self.iterations {
                scenario.insert("executor".to_string(), json!("shared-iterations"));
                scenario.insert("vus".to_string(), json!(self.vus));
                scenario.insert("iterations".to_string(), json!(iterations));
            } else if !self.stages.is_empty() {
                scenario.insert("executor".to_string(), json!("ramping-vus"));
                scenario.insert("stages".to_string(), json!(self.stages));
                scenario.insert("startVUs".to_string(), json!(self.vus));
            } else {
                scenario.insert("executor".to_string(), json!("constant-vus"));
                scenario.insert("vus".to_string(), json!(self.vus));
                scenario.insert("duration".to_string(), json!(self.duration));
            }

            scenario.insert(
                "options".to_string(),
                json!({ "browser": { "type": "chromium" } }),
            );
            options.insert(
                "scenarios".to_string(),
                json!({ "default": Value::Object(scenario) }),
            );
        } else if let Some(iterations) = self.iterations {
            options.insert(
                "scenarios".to_string(),
                json!({
                    "default": {
                        "executor": "shared-iterations",
                        "vus": self.vus,
                        "iterations": iterations,
                    }
                }),
            );
        } else if !self.stages.is_empty() {
            options.insert("stages".to_string(), json!(self.stages));
        } else {
            options.insert("vus".to_string(), json!(self.vus));
            options.insert("duration".to_string(), json!(self.duration));
        }

        Value::Object(options)
    }
}

/// Parse a `stages:` tag value like `"30s-10,1m-20,30s-0"`. Malformed
/// entries are skipped so one typo does not lose the whole ramp.
fn parse_stages(raw: &str) -> Vec<Stage> {
    raw.split(',')
        .filter_map(|entry| {
            let entry = entry.trim();
            let parsed = entry.rsplit_once('-').and_then(|(duration, target)| {
                let target = target.trim().parse().ok()?;
                Some(Stage {
                    duration: duration.trim().to_string(),
                    target,
                })
            });

            if parsed.is_none() && !entry.is_empty() {
                warn!(entry, "skipping malformed stage entry (expected duration-target)");
            }
            parsed
        })
        .collect()
}

fn is_valid_metric(name: &str) -> bool {
    KNOWN_METRICS.contains(&name)
        || Regex::new(r"^[a-z][a-z0-9_]*$").unwrap().is_match(name)
}

/// A call argument: either a string literal escaped by the renderer, or
/// pre-encoded JSON emitted verbatim (tables, doc-strings).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArg {
    Str(String),
    Raw(String),
}

/// One call into the step-definition namespace.
#[derive(Debug, Clone)]
pub struct StepCall {
    /// Derived step-definition function name
    pub identifier: String,
    /// Positional arguments in sentence order; an attached table or
    /// doc-string comes last
    pub args: Vec<CallArg>,
    /// Receives the shared page handle as its first argument and is awaited
    pub needs_page: bool,
}

/// One scenario's worth of generated calls.
#[derive(Debug, Clone)]
pub struct ScenarioBlock {
    pub name: String,
    pub browser: bool,
    pub calls: Vec<StepCall>,
}

/// The complete script, ready for rendering.
#[derive(Debug, Clone)]
pub struct ScriptIr {
    pub profile: ExecutionProfile,
    pub scenarios: Vec<ScenarioBlock>,
}

impl ScriptIr {
    /// Lower flattened scenarios and their metadata into the IR.
    pub fn build(scenarios: &[Scenario], metadata: &[ScenarioMetadata]) -> Self {
        let profile = ExecutionProfile::merge(metadata);
        let blocks = scenarios
            .iter()
            .map(|scenario| ScenarioBlock::from_scenario(scenario))
            .collect();

        Self {
            profile,
            scenarios: blocks,
        }
    }
}

impl ScenarioBlock {
    fn from_scenario(scenario: &Scenario) -> Self {
        let browser = scenario.has_tag("browser");

        let calls = scenario
            .steps
            .iter()
            .map(|step| {
                let mut identifier = steps::derive_identifier(&step.text);
                if identifier.is_empty() {
                    warn!(
                        scenario = %scenario.name,
                        text = %step.text,
                        "step text yields no identifier, using placeholder"
                    );
                    identifier = "unnamedStep".to_string();
                }

                let mut args: Vec<CallArg> = steps::extract_arguments(&step.text)
                    .into_iter()
                    .map(CallArg::Str)
                    .collect();

                if let Some(argument) = &step.argument {
                    // to_string of a plain serde structure cannot fail
                    let encoded = serde_json::to_string(argument).unwrap_or_default();
                    args.push(CallArg::Raw(encoded));
                }

                let needs_page = browser && steps::needs_page_handle(&identifier);

                StepCall {
                    identifier,
                    args,
                    needs_page,
                }
            })
            .collect();

        Self {
            name: scenario.name.clone(),
            browser,
            calls,
        }
    }
}
