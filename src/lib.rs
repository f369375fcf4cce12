pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod generator;
pub mod loader;
pub mod metadata;
pub mod models;
pub mod runner;
pub mod writer;

pub use error::{Result, StampedeError};
