use clap::Parser;
use stampede::{
    Result,
    cli::{Cli, Commands},
    commands::{self, GenerateParams},
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            features,
            output,
            lang,
            tags,
            exclude_tags,
            base_url,
            config,
        } => {
            commands::execute_generate(&GenerateParams {
                features,
                output,
                language: lang,
                tags,
                exclude_tags,
                base_url,
                config_file: config,
            })?;
        }
        Commands::Run {
            features,
            output,
            lang,
            tags,
            exclude_tags,
            base_url,
            config,
            k6_args,
        } => {
            commands::execute_run(
                &GenerateParams {
                    features,
                    output,
                    language: lang,
                    tags,
                    exclude_tags,
                    base_url,
                    config_file: config,
                },
                &k6_args,
            )?;
        }
        Commands::List { features, config } => {
            commands::execute_list(features.as_deref(), config.as_deref())?;
        }
    }

    Ok(())
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stampede=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}
