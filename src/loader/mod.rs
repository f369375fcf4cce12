pub mod document;
pub mod features;

pub use document::{parse_feature, parse_feature_file};
pub use features::load_features;
