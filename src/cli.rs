use crate::config::ScriptLanguage;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stampede")]
#[command(version)]
#[command(about = "Compile Gherkin feature files into k6 load-test scripts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a k6 script from feature files
    Generate {
        /// Feature file or directory; several paths may be comma-separated
        #[arg(short, long)]
        features: Option<String>,

        /// Output directory for the generated script
        #[arg(short, long)]
        output: Option<String>,

        /// Target script language (js or ts)
        #[arg(short, long)]
        lang: Option<ScriptLanguage>,

        /// Only keep scenarios carrying one of these tags (comma-separated)
        #[arg(long)]
        tags: Option<String>,

        /// Drop scenarios carrying one of these tags (comma-separated)
        #[arg(long)]
        exclude_tags: Option<String>,

        /// Fallback base URL injected into browser scripts
        #[arg(long)]
        base_url: Option<String>,

        /// Path to a stampede.yaml config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate a k6 script and immediately run it with k6
    Run {
        /// Feature file or directory; several paths may be comma-separated
        #[arg(short, long)]
        features: Option<String>,

        /// Output directory for the generated script
        #[arg(short, long)]
        output: Option<String>,

        /// Target script language (js or ts)
        #[arg(short, long)]
        lang: Option<ScriptLanguage>,

        /// Only keep scenarios carrying one of these tags (comma-separated)
        #[arg(long)]
        tags: Option<String>,

        /// Drop scenarios carrying one of these tags (comma-separated)
        #[arg(long)]
        exclude_tags: Option<String>,

        /// Fallback base URL injected into browser scripts
        #[arg(long)]
        base_url: Option<String>,

        /// Path to a stampede.yaml config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Extra argument passed through to `k6 run` (repeatable)
        #[arg(long = "k6-arg")]
        k6_args: Vec<String>,
    },

    /// List scenarios and the load directives derived from their tags
    List {
        /// Feature file or directory; several paths may be comma-separated
        #[arg(short, long)]
        features: Option<String>,

        /// Path to a stampede.yaml config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
