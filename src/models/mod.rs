pub mod feature;

pub use feature::{FeatureDocument, Scenario, ScenarioMetadata, Step, StepArgument};
