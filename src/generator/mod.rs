//! Script generators
//!
//! The compiler core: merges per-scenario load metadata into one execution
//! profile, lowers scenarios into a script IR, and renders the IR as source
//! text for a target language.

pub mod ir;
pub mod k6;
pub mod steps;

pub use k6::K6Generator;

use crate::config::ProjectConfig;
use crate::error::Result;
use crate::models::{Scenario, ScenarioMetadata};

/// Trait for generating load-test scripts from flattened scenarios.
pub trait ScriptGenerator {
    /// The output type of the generation (usually String for script content)
    type Output;

    /// Generate a complete script for the given scenarios. Must not fail for
    /// well-formed input; malformed step text degrades to best-effort output.
    fn generate(
        &self,
        scenarios: &[Scenario],
        metadata: &[ScenarioMetadata],
        config: &ProjectConfig,
    ) -> Result<Self::Output>;
}
