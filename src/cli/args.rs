//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::analysis::{RankingStrategy, RespondentRole};

/// survey-digest - Thematic reports and testimonials from reader surveys
#[derive(Parser, Debug)]
#[command(name = "survey-digest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize every open question into themes, then write an overall report
    Analyze {
        /// Survey export (.csv)
        csv: PathBuf,

        /// Model to use instead of llm.summary_model
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Turn the most enthusiastic respondent's answers into a testimonial
    Testimonials {
        /// Survey export (.csv)
        csv: PathBuf,

        /// How to describe the respondent (defaults to testimonial.role)
        #[arg(short, long, value_enum)]
        role: Option<RespondentRole>,

        /// Which top-score respondent to quote (defaults to testimonial.ranking)
        #[arg(long, value_enum)]
        rank: Option<RankingStrategy>,

        /// Model to use instead of llm.testimonial_model
        #[arg(short, long)]
        model: Option<String>,

        /// Print the prompt sent to the model
        #[arg(long)]
        show_prompt: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn testimonials_accepts_role_and_rank() {
        let cli = Cli::try_parse_from([
            "survey-digest",
            "testimonials",
            "answers.csv",
            "--role",
            "subscriber",
            "--rank",
            "recent",
        ])
        .unwrap();

        match cli.command {
            Commands::Testimonials {
                csv, role, rank, ..
            } => {
                assert_eq!(csv, PathBuf::from("answers.csv"));
                assert_eq!(role, Some(RespondentRole::Subscriber));
                assert_eq!(rank, Some(RankingStrategy::MostRecent));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn unknown_task_is_rejected() {
        assert!(Cli::try_parse_from(["survey-digest", "summarize", "answers.csv"]).is_err());
    }

    #[test]
    fn task_requires_a_path() {
        assert!(Cli::try_parse_from(["survey-digest", "analyze"]).is_err());
    }
}
