//! Resume ATS analyzer: parse, score, and match resumes against job descriptions

mod cli;
mod config;
mod error;
mod input;
mod output;
mod processing;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction};
use config::Config;
use error::{Result, ResumeAtsError};
use input::manager::InputManager;
use log::{error, info};
use output::formatter::ReportGenerator;
use processing::analyzer::AnalysisEngine;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            detailed,
            output,
            save,
        } => {
            info!("Starting resume analysis");

            cli::validate_file_extension(&resume, &["pdf", "txt", "md"])
                .map_err(|e| ResumeAtsError::InvalidInput(format!("Resume file: {}", e)))?;

            if let Some(job_path) = &job {
                cli::validate_file_extension(job_path, &["txt", "md"]).map_err(|e| {
                    ResumeAtsError::InvalidInput(format!("Job description file: {}", e))
                })?;
            }

            let output_format =
                cli::parse_output_format(&output).map_err(ResumeAtsError::InvalidInput)?;

            println!("🚀 ATS resume analysis");
            println!("📄 Resume: {}", resume.display());
            if let Some(job_path) = &job {
                println!("💼 Job Description: {}", job_path.display());
            }

            let mut input_manager = InputManager::new()
                .with_cache(config.processing.enable_caching)
                .with_max_input_bytes(config.processing.max_input_bytes);

            println!("\n📂 Extracting text...");
            let resume_text = input_manager.extract_text(&resume).await?;
            println!("Resume text length: {} characters", resume_text.len());

            let engine = AnalysisEngine::new();
            let report = match &job {
                Some(job_path) => {
                    let job_text = input_manager.extract_text(job_path).await?;
                    engine.analyze_with_job(
                        &resume_text,
                        &job_text,
                        &resume.to_string_lossy(),
                    )
                }
                None => engine.analyze(&resume_text, &resume.to_string_lossy()),
            };

            println!(
                "\n📊 Overall score: {}/100 | Readiness: {}/100",
                report.analysis.overall_score, report.enhanced.readiness_score
            );

            let generator =
                ReportGenerator::new(config.output.color_output, detailed || config.output.detailed);
            let rendered = generator.generate(&report, &output_format)?;

            emit(&rendered, save.as_deref())?;
            Ok(())
        }

        Commands::Match {
            resume,
            job,
            output,
            save,
        } => {
            info!("Starting job match analysis");

            cli::validate_file_extension(&resume, &["pdf", "txt", "md"])
                .map_err(|e| ResumeAtsError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, &["txt", "md"])
                .map_err(|e| ResumeAtsError::InvalidInput(format!("Job description file: {}", e)))?;

            let output_format =
                cli::parse_output_format(&output).map_err(ResumeAtsError::InvalidInput)?;

            println!("🚀 Resume / job description match");
            println!("📄 Resume: {}", resume.display());
            println!("💼 Job Description: {}", job.display());

            let mut input_manager = InputManager::new()
                .with_cache(config.processing.enable_caching)
                .with_max_input_bytes(config.processing.max_input_bytes);

            println!("\n📂 Extracting text...");
            let resume_text = input_manager.extract_text(&resume).await?;
            let job_text = input_manager.extract_text(&job).await?;

            let engine = AnalysisEngine::new();
            let report =
                engine.analyze_with_job(&resume_text, &job_text, &resume.to_string_lossy());

            if let Some(job_match) = &report.job_match {
                println!(
                    "\n🎯 Match score: {}/100 (keywords {}%, +{} potential)",
                    job_match.match_score,
                    job_match.keyword_match.percentage,
                    job_match.improvement_potential
                );
            }

            let generator = ReportGenerator::new(config.output.color_output, config.output.detailed);
            let rendered = generator.generate(&report, &output_format)?;

            emit(&rendered, save.as_deref())?;
            Ok(())
        }

        Commands::Config { action } => {
            match action.unwrap_or(ConfigAction::Show) {
                ConfigAction::Show => {
                    let content = toml::to_string_pretty(&config).map_err(|e| {
                        ResumeAtsError::Configuration(format!("Failed to serialize config: {}", e))
                    })?;
                    println!("# {}", Config::config_path().display());
                    println!("{}", content);
                }
                ConfigAction::Reset => {
                    Config::reset()?;
                    println!("✅ Configuration reset to defaults");
                }
                ConfigAction::Path => {
                    println!("{}", Config::config_path().display());
                }
            }
            Ok(())
        }
    }
}

fn emit(rendered: &str, save: Option<&Path>) -> Result<()> {
    match save {
        Some(path) => {
            std::fs::write(path, rendered)?;
            println!("💾 Report saved to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
