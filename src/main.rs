use clap::{Parser, Subcommand};
use std::path::PathBuf;

use scoresheet::evaluation::{load_evaluation, EvaluationData};
use scoresheet::scoring::{compute_summary, validate_evaluation, weight_warnings, ScoreSummary};
use scoresheet::submit::{SheetClient, SubmitError, SubmitMethod};

const EXIT_SUCCESS: i32 = 0;
const EXIT_VALIDATION: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score an evaluation file and print the summary
    Score {
        /// Path to the evaluation YAML file
        file: PathBuf,
    },
    /// Score an evaluation file and append it to the remote store
    Submit {
        /// Path to the evaluation YAML file
        file: PathBuf,

        /// Use the direct POST contract instead of the script callback
        #[arg(long)]
        post: bool,
    },
    /// Create the config file and a template evaluation file
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "scoresheet")]
#[command(about = "Staff performance evaluation scoring and submission CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/scoresheet/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Load an evaluation file, enforce hard validation, and surface weight
/// warnings. Exits the process on failure.
fn load_and_check(file: &PathBuf, verbose: bool) -> (EvaluationData, ScoreSummary) {
    let data = match load_evaluation(file) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Evaluation error: {}", e);
            std::process::exit(EXIT_VALIDATION);
        }
    };

    if let Err(errors) = validate_evaluation(&data) {
        eprintln!("Evaluation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_VALIDATION);
    }

    for warning in weight_warnings(&data) {
        eprintln!("Warning: {}", warning);
    }

    if verbose {
        eprintln!(
            "Loaded {} KPI items and {} competency sections from {}",
            data.part1.len(),
            data.part2.len(),
            file.display()
        );
    }

    let score = compute_summary(&data.part1, &data.part2);
    (data, score)
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    let use_colors = scoresheet::output::should_use_colors();

    match cli.command {
        Commands::Init => {
            let config_path = cli.config.map(PathBuf::from);
            if let Err(e) = scoresheet::config::run_init_wizard(config_path) {
                eprintln!("Init error: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
        Commands::Score { file } => {
            let (data, score) = load_and_check(&file, cli.verbose);

            println!("{}", scoresheet::output::format_breakdown(&data, use_colors));
            println!();
            println!("{}", scoresheet::output::format_summary(&score, use_colors));
        }
        Commands::Submit { file, post } => {
            let config_path = cli.config.map(PathBuf::from);
            let config = match scoresheet::config::load_config(config_path) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Config error: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };

            let timeout = match config.endpoint.submit_timeout() {
                Ok(t) => t,
                Err(e) => {
                    eprintln!("Config error: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };

            let (data, score) = load_and_check(&file, cli.verbose);
            println!("{}", scoresheet::output::format_summary(&score, use_colors));
            println!();

            // --post overrides the configured contract for this one call.
            let method = if post {
                SubmitMethod::Post
            } else {
                config.endpoint.method
            };

            if cli.verbose {
                eprintln!(
                    "Submitting to {} ({:?} contract, {:?} timeout)",
                    config.endpoint.url, method, timeout
                );
            }

            let client = SheetClient::with_timeout(&config.endpoint.url, timeout);
            match client.submit_with(method, &data, &score).await {
                Ok(()) => {
                    println!("Saved to the remote store.");
                }
                Err(e) => {
                    match &e {
                        SubmitError::Network(_) => eprintln!("Submission failed: {}", e),
                        SubmitError::Remote(_) => eprintln!("Submission rejected: {}", e),
                        SubmitError::Timeout(_) => {
                            eprintln!("Submission failed: {}. Check your connection and try again.", e)
                        }
                    }
                    std::process::exit(EXIT_NETWORK);
                }
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
