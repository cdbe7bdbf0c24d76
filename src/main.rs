//! survey-digest - Thematic reports and testimonials from reader surveys
//!
//! Entry point for the survey-digest CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use survey_digest::cli::{Cli, Commands};
use survey_digest::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for the report itself
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Completions { shell } => {
            survey_digest::cli::completions::print(shell);
        }
        command => {
            // Bad input paths fail before any file is read.
            if let Commands::Analyze { csv, .. } | Commands::Testimonials { csv, .. } = &command {
                survey_digest::cli::commands::validate_csv_path(csv)?;
            }

            // Load configuration only for runtime commands.
            let settings = Settings::load()?;

            match command {
                Commands::Analyze { csv, model } => {
                    survey_digest::cli::commands::analyze(&settings, &csv, model).await?;
                }
                Commands::Testimonials {
                    csv,
                    role,
                    rank,
                    model,
                    show_prompt,
                } => {
                    survey_digest::cli::commands::testimonials(
                        &settings,
                        &csv,
                        role,
                        rank,
                        model,
                        show_prompt,
                    )
                    .await?;
                }
                Commands::Config(config_cmd) => {
                    survey_digest::cli::commands::config_command(&settings, config_cmd)?;
                }
                Commands::Completions { .. } => unreachable!(),
            }
        }
    }

    Ok(())
}
