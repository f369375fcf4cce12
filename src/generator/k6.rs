//! k6 script renderer
//!
//! Renders the script IR as a runnable k6 test in JavaScript or TypeScript.
//! The emitted file always has the same shape: header state, imports, the
//! options object, then the setup / default / teardown / handleSummary hooks.

use crate::config::{ProjectConfig, ScriptLanguage};
use crate::error::Result;
use crate::generator::ScriptGenerator;
use crate::generator::ir::{CallArg, ScenarioBlock, ScriptIr, StepCall};
use crate::models::{Scenario, ScenarioMetadata};

/// Generator for k6 test scripts.
#[derive(Debug, Clone, Default)]
pub struct K6Generator;

impl K6Generator {
    /// Create a new K6Generator
    pub fn new() -> Self {
        Self
    }

    fn render(&self, ir: &ScriptIr, config: &ProjectConfig) -> Result<String> {
        let mut lines: Vec<String> = Vec::new();

        // Header and module state, before the imports: exportedTokens is the
        // teardown capture read back in handleSummary. Module scope is
        // instantiated per VU, so nothing here is shared across VUs.
        lines.push("/**".to_string());
        lines.push(" * Generated k6 load test".to_string());
        lines.push(format!(
            " * Source: {} ({} scenarios)",
            config.features_dir,
            ir.scenarios.len()
        ));
        lines.push(format!(" * Generator: stampede {}", config.version));
        if !config.author.is_empty() {
            lines.push(format!(" * Author: {}", config.author));
        }
        lines.push(" */".to_string());
        lines.push(match config.language {
            ScriptLanguage::Js => "let exportedTokens = {};".to_string(),
            ScriptLanguage::Ts => "let exportedTokens: Record<string, any> = {};".to_string(),
        });
        lines.push(String::new());

        self.render_imports(&mut lines, ir, config);
        lines.push(String::new());

        let options_json = serde_json::to_string_pretty(&ir.profile.to_options_value())?;
        lines.push(format!("export const options = {};", options_json));
        lines.push(String::new());

        lines.push("export function setup() {".to_string());
        lines.push("  // initialize the run-scoped data channel".to_string());
        lines.push("  return { v: Date.now() };".to_string());
        lines.push("}".to_string());
        lines.push(String::new());

        self.render_default_function(&mut lines, ir, config);
        lines.push(String::new());

        self.render_teardown(&mut lines, config);
        lines.push(String::new());

        self.render_summary(&mut lines, config);
        lines.push(String::new());

        Ok(lines.join("\n"))
    }

    fn render_imports(&self, lines: &mut Vec<String>, ir: &ScriptIr, config: &ProjectConfig) {
        lines.push("import http from \"k6/http\";".to_string());
        lines.push("import { check, sleep, group } from \"k6\";".to_string());
        if config.include_reporter {
            lines.push(
                "import { htmlReport } from \"https://raw.githubusercontent.com/benc-uk/k6-reporter/main/dist/bundle.js\";"
                    .to_string(),
            );
        }
        lines.push(
            "import { textSummary } from \"https://jslib.k6.io/k6-summary/0.1.0/index.js\";"
                .to_string(),
        );
        if ir.profile.browser {
            lines.push("import { browser } from \"k6/browser\";".to_string());
        }
        lines.push(format!(
            "import * as steps from \"../steps/sample.steps.{}\";",
            config.language.ext()
        ));
    }

    fn render_default_function(
        &self,
        lines: &mut Vec<String>,
        ir: &ScriptIr,
        config: &ProjectConfig,
    ) {
        let uses_browser = ir.profile.browser;

        lines.push("export default async function () {".to_string());

        // The page handle is opened once and shared sequentially by every
        // browser scenario; the finally block releases it on any failure.
        if uses_browser {
            lines.push("  let page;".to_string());
            lines.push("  try {".to_string());
            lines.push("    page = await browser.newPage();".to_string());
            lines.push("    console.log(\"Browser page opened once for all scenarios\");".to_string());
            if let Some(base_url) = &config.base_url {
                lines.push(format!("    steps.theBaseUrlIs({});", js_string(base_url)));
            }
            lines.push(String::new());
        }

        let indent = if uses_browser { "    " } else { "  " };
        for block in &ir.scenarios {
            for line in render_scenario_block(block) {
                if line.is_empty() {
                    lines.push(String::new());
                } else {
                    lines.push(format!("{}{}", indent, line));
                }
            }
        }

        if uses_browser {
            lines.push("  } finally {".to_string());
            lines.push("    if (page) {".to_string());
            lines.push(
                "      try { await page.close(); sleep(0.5); } catch (e) { console.warn(\"Final page close failed:\", e); }"
                    .to_string(),
            );
            lines.push("    }".to_string());
            lines.push("  }".to_string());
        }

        lines.push("  return steps.collectedTokens();".to_string());
        lines.push("}".to_string());
    }

    fn render_teardown(&self, lines: &mut Vec<String>, config: &ProjectConfig) {
        match config.language {
            ScriptLanguage::Js => {
                lines.push("export function teardown(data) {".to_string());
            }
            ScriptLanguage::Ts => {
                lines.push("export function teardown(data: Record<string, any>) {".to_string());
            }
        }
        lines.push("  // capture the iteration accumulator for handleSummary".to_string());
        lines.push("  exportedTokens = data;".to_string());
        lines.push("}".to_string());
    }

    fn render_summary(&self, lines: &mut Vec<String>, config: &ProjectConfig) {
        match config.language {
            ScriptLanguage::Js => {
                lines.push("export function handleSummary(data) {".to_string());
                lines.push("  const reports = {".to_string());
            }
            ScriptLanguage::Ts => {
                lines.push(
                    "export function handleSummary(data: any): Record<string, any> {".to_string(),
                );
                lines.push("  const reports: Record<string, any> = {".to_string());
            }
        }
        if config.include_reporter {
            lines.push("    './reports/summary.html': htmlReport(data),".to_string());
        }
        lines.push("    './reports/results.json': JSON.stringify(data),".to_string());
        lines.push(
            "    stdout: textSummary(data, { indent: ' ', enableColors: true }),".to_string(),
        );
        lines.push("  };".to_string());
        lines.push(String::new());

        // Every stashed key that looks like a JSON file path becomes its own
        // artifact; bare string values are wrapped so consumers always see
        // an object.
        lines.push("  const tokens = exportedTokens || {};".to_string());
        lines.push("  for (const [name, value] of Object.entries(tokens)) {".to_string());
        lines.push("    if (!name.endsWith('.json')) continue;".to_string());
        lines.push("    const target = name.startsWith('./') ? name : `./${name}`;".to_string());
        lines.push(
            "    reports[target] = JSON.stringify(typeof value === 'string' ? { access_token: value } : value, null, 2);"
                .to_string(),
        );
        lines.push("  }".to_string());
        lines.push(String::new());
        lines.push("  return reports;".to_string());
        lines.push("}".to_string());
    }
}

/// Render one scenario's lines, unindented; the caller applies the base
/// indent of the surrounding function (and browser try block).
fn render_scenario_block(block: &ScenarioBlock) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!(
        "group({}, () => {{",
        js_string(&format!("{} - init", block.name))
    ));
    lines.push(format!(
        "  console.log({});",
        js_string(&format!("Initiating scenario: {}", block.name))
    ));
    lines.push("});".to_string());

    if block.browser {
        // one scenario's failure must not abort the whole iteration
        lines.push("try {".to_string());
        for call in &block.calls {
            lines.push(format!("  {}", render_call(call)));
        }
        lines.push("} catch (err) {".to_string());
        lines.push(format!(
            "  console.error({}, err);",
            js_string(&format!("Error in {}:", block.name))
        ));
        lines.push(
            "  console.error(\"Stack:\", err && err.stack ? err.stack : \"No stack\");".to_string(),
        );
        lines.push("}".to_string());
    } else {
        for call in &block.calls {
            lines.push(render_call(call));
        }
    }

    lines.push(format!(
        "group({}, () => {{",
        js_string(&format!("{} - cleanup", block.name))
    ));
    lines.push(format!(
        "  console.log({});",
        js_string(&format!("Finished: {}", block.name))
    ));
    lines.push("});".to_string());
    lines.push("sleep(1);".to_string());
    lines.push(String::new());

    lines
}

fn render_call(call: &StepCall) -> String {
    let mut params: Vec<String> = Vec::new();

    if call.needs_page {
        params.push("page".to_string());
    }
    for arg in &call.args {
        match arg {
            CallArg::Str(value) => params.push(js_string(value)),
            CallArg::Raw(encoded) => params.push(encoded.clone()),
        }
    }

    let prefix = if call.needs_page { "await " } else { "" };
    format!("{}steps.{}({});", prefix, call.identifier, params.join(", "))
}

/// Escape a string as a double-quoted JS literal.
fn js_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

impl ScriptGenerator for K6Generator {
    type Output = String;

    fn generate(
        &self,
        scenarios: &[Scenario],
        metadata: &[ScenarioMetadata],
        config: &ProjectConfig,
    ) -> Result<Self::Output> {
        let ir = ScriptIr::build(scenarios, metadata);
        self.render(&ir, config)
    }
}
