//! Resume screener: rank resumes against a job description

use clap::Parser;
use log::{error, info, warn};
use resume_screener::cli::{self, Cli, Commands, ConfigAction, RankingArgs};
use resume_screener::config::{Config, OutputFormat, ZeroScorePolicy};
use resume_screener::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use resume_screener::output::report::RankingReport;
use resume_screener::processing::engine::{rank_each_job, ScreeningEngine};
use resume_screener::{Result, ScreenerError};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Rank {
            job,
            resumes,
            options,
            save,
        } => {
            apply_ranking_args(&mut config, &options)?;

            cli::validate_file_extension(&job, &["txt"])
                .map_err(|e| ScreenerError::InvalidInput(format!("Job description file: {}", e)))?;

            let engine = ScreeningEngine::new(&config)?;
            info!("Ranking resumes against {}", job.display());

            let report = if resumes.is_empty() {
                engine.rank_directory(&job)
            } else {
                engine.rank_resumes(&job, &resumes)
            };

            let output = render(&config, &report)?;
            println!("{}", output);

            if let Some(path) = save {
                save_report_to_file(&output, &path)?;
                info!("Report saved to {}", path.display());
            }

            if let Some(reason) = report.error {
                return Err(ScreenerError::Processing(reason));
            }
        }

        Commands::Batch { options, save_dir } => {
            apply_ranking_args(&mut config, &options)?;

            let engine = Arc::new(ScreeningEngine::new(&config)?);
            let jobs: Vec<PathBuf> = engine
                .input()
                .list_job_descriptions()?
                .into_iter()
                .map(|name| engine.input().jobs_dir().join(name))
                .collect();

            if jobs.is_empty() {
                warn!("No job descriptions found in {}", engine.input().jobs_dir().display());
                return Ok(());
            }

            let resumes = engine.input().collect_resumes()?;
            info!("Ranking {} resumes against {} job descriptions", resumes.len(), jobs.len());

            let reports = rank_each_job(Arc::clone(&engine), jobs, resumes).await?;
            let format = config.output.format;

            for report in &reports {
                if let Some(top) = report.top() {
                    info!("Best match for {}: {} ({:.2}%)", report.job_description, top.filename, top.score);
                }
                let output = render(&config, report)?;
                println!("{}", output);

                if let Some(dir) = &save_dir {
                    let path = dir.join(suggest_filename(&format, &report.job_description, false));
                    save_report_to_file(&output, &path)?;
                    info!("Report saved to {}", path.display());
                }
            }

            let failed = reports.iter().filter(|r| !r.is_success()).count();
            if failed > 0 {
                warn!("{} of {} job descriptions could not be ranked", failed, reports.len());
            }
        }

        Commands::Jobs { jobs_dir } => {
            if let Some(dir) = jobs_dir {
                config.paths.jobs_dir = dir;
            }

            let engine = ScreeningEngine::new(&config)?;
            let jobs = engine.input().list_job_descriptions()?;

            if jobs.is_empty() {
                println!("No job descriptions found in {}", config.paths.jobs_dir.display());
            } else {
                println!("Job descriptions in {}:", config.paths.jobs_dir.display());
                for job in jobs {
                    println!("  • {}", job);
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    ScreenerError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("{}", content);
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset: {}", config_path.display());
            }
        },
    }

    Ok(())
}

/// Fold per-invocation flags over the loaded configuration
fn apply_ranking_args(config: &mut Config, args: &RankingArgs) -> Result<()> {
    if let Some(dir) = &args.resumes_dir {
        config.paths.resumes_dir = dir.clone();
    }
    if let Some(dir) = &args.jobs_dir {
        config.paths.jobs_dir = dir.clone();
    }
    if let Some(strategy) = &args.strategy {
        config.ranking.strategy = cli::parse_strategy(strategy).map_err(ScreenerError::InvalidInput)?;
    }
    if args.summarize.is_some() {
        config.ranking.summary_sentences = args.summarize;
    }
    if args.drop_zero {
        config.ranking.zero_score_policy = ZeroScorePolicy::Drop;
    }
    if let Some(format) = &args.output {
        config.output.format = cli::parse_output_format(format).map_err(ScreenerError::InvalidInput)?;
    }
    if args.no_color {
        config.output.color_output = false;
    }
    config.validate()
}

fn render(config: &Config, report: &RankingReport) -> Result<String> {
    let use_colors = config.output.color_output && matches!(config.output.format, OutputFormat::Console);
    let generator = ReportGenerator::with_options(use_colors, config.output.show_failures, true);
    generator.generate_report(report, &config.output.format)
}
