//! CLI command implementations

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use crate::analysis::{
    RankingStrategy, RespondentRole, SummaryProgress, SurveyAnalyzer, TestimonialWriter,
};
use crate::cli::args::ConfigCommand;
use crate::config::Settings;
use crate::llm::{build_generator, write_stream};
use crate::survey::{ResponseSet, QUESTIONS};
use crate::SurveyError;

/// Summarize each question, then stream the overall report
pub async fn analyze(settings: &Settings, csv: &Path, model: Option<String>) -> Result<()> {
    validate_csv_path(csv)?;
    let started = Instant::now();

    let responses = load_survey(csv)?;
    let generator = build_generator(settings)?;
    let model = model.unwrap_or_else(|| settings.llm.summary_model.clone());
    let analyzer = SurveyAnalyzer::new(generator.as_ref(), &model, &settings.llm.system_prompt);

    let report = analyzer
        .report(&responses, &QUESTIONS, |progress| match progress {
            SummaryProgress::Started { index, total, spec } => {
                println!("[{}/{}] Summarizing \"{}\"", index, total, spec.question);
            }
            SummaryProgress::Summarized { spec, summary } => {
                println!();
                println!("## {}", spec.question);
                println!();
                println!("{}", summary);
                println!();
            }
        })
        .await
        .context("Failed to summarize survey answers")?;

    println!("# Report");
    println!();
    write_stream(report, &mut io::stdout())
        .await
        .context("Failed to stream report")?;
    println!();
    println!();
    print_elapsed(started);

    Ok(())
}

/// Pick a top-score respondent and stream their testimonial
pub async fn testimonials(
    settings: &Settings,
    csv: &Path,
    role: Option<RespondentRole>,
    rank: Option<RankingStrategy>,
    model: Option<String>,
    show_prompt: bool,
) -> Result<()> {
    validate_csv_path(csv)?;
    let started = Instant::now();

    let responses = load_survey(csv)?;
    let generator = build_generator(settings)?;
    let model = model.unwrap_or_else(|| settings.llm.testimonial_model.clone());
    let role = role.unwrap_or(settings.testimonial.role);
    let rank = rank.unwrap_or(settings.testimonial.ranking);

    let writer = TestimonialWriter::new(generator.as_ref(), &model, &settings.llm.system_prompt);
    let testimonial = writer
        .write(&responses, &QUESTIONS, role, rank)
        .await
        .context("Failed to write testimonial")?;

    if show_prompt {
        println!("{}", testimonial.prompt);
        println!();
    }

    println!("# Testimonial (response {})", testimonial.row);
    println!();
    write_stream(testimonial.stream, &mut io::stdout())
        .await
        .context("Failed to stream testimonial")?;
    println!();
    println!();
    print_elapsed(started);

    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => show_config(settings, &mut io::stdout())?,
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            init_config(&path, force)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

/// Write the effective settings, after `OLLAMA_HOST` is applied, as TOML.
pub fn show_config<W: Write>(settings: &Settings, out: &mut W) -> Result<()> {
    let toml = toml::to_string_pretty(settings).context("Failed to render settings")?;
    writeln!(out, "{}", toml.trim_end())?;
    Ok(())
}

/// Write the default settings to `path`; an existing file needs `force`.
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    Settings::write_default(path)
        .with_context(|| format!("Failed to write config file {}", path.display()))
}

/// Reject anything that is not a `.csv` path before touching the filesystem.
pub fn validate_csv_path(path: &Path) -> crate::Result<()> {
    if path.to_string_lossy().ends_with(".csv") {
        Ok(())
    } else {
        Err(SurveyError::Argument(format!(
            "expected a .csv file, got {}",
            path.display()
        )))
    }
}

// Helper functions

fn load_survey(csv: &Path) -> Result<ResponseSet> {
    ResponseSet::load(csv).with_context(|| format!("Failed to load survey {}", csv.display()))
}

fn print_elapsed(started: Instant) {
    println!("Done in {:.2}s", started.elapsed().as_secs_f64());
}
