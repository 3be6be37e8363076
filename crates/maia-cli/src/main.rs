use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use maia_core::{classify, MaiaConfig, RawBiometricSample, SleepStage};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "maia-cli", about = "Classify biometric samples into consciousness states")]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify one raw sample given as a JSON file or inline JSON
    Classify {
        #[arg(long, conflicts_with = "json")]
        file: Option<PathBuf>,
        #[arg(long)]
        json: Option<String>,
    },
    /// Run the built-in reference samples and print their states
    Scenarios {},
    /// Inspect configuration
    Config {
        /// Print the built-in defaults as TOML
        #[arg(long)]
        print_default: bool,
        /// Load and validate a TOML file (env overrides applied)
        #[arg(long)]
        check: Option<PathBuf>,
    },
}

fn reference_samples() -> Vec<(&'static str, RawBiometricSample)> {
    let ts = 1_700_000_000_000;
    vec![
        (
            "calm wearable",
            RawBiometricSample::new(72.0, 65.0, ts)
                .with_respiratory_rate(7.0)
                .with_oxygen_saturation(98.0)
                .with_stress_level(5.0)
                .with_source("apple_watch"),
        ),
        (
            "stressed manual entry",
            RawBiometricSample::new(110.0, 15.0, ts)
                .with_stress_level(85.0)
                .with_source("manual"),
        ),
        (
            "deep sleep",
            RawBiometricSample::new(54.0, 85.0, ts)
                .with_respiratory_rate(10.0)
                .with_recovery_score(90.0)
                .with_sleep_stage(SleepStage::Deep)
                .with_source("oura"),
        ),
    ]
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.cmd {
        Commands::Classify { file, json } => {
            let text = match (file, json) {
                (Some(path), _) => fs::read_to_string(path)?,
                (None, Some(json)) => json,
                (None, None) => return Err("pass --file <path> or --json <sample>".into()),
            };
            let raw: RawBiometricSample = serde_json::from_str(&text)?;
            let state = classify(&raw)?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        Commands::Scenarios {} => {
            for (name, raw) in reference_samples() {
                let state = classify(&raw)?;
                println!(
                    "{:<22} dominant={:<6} coherence={:.3} balance={:+.2} mode={}",
                    name,
                    state.dominant_element,
                    state.coherence_level,
                    state.autonomic_balance.balance,
                    state.presence_mode
                );
                for line in state.insights.iter().chain(&state.recommendations) {
                    println!("    {}", line);
                }
            }
        }
        Commands::Config {
            print_default,
            check,
        } => {
            if let Some(path) = check {
                let config = MaiaConfig::from_file_with_env(&path)?;
                println!("{} is valid", path.display());
                log::debug!("loaded config: {:?}", config);
            } else if print_default {
                print!("{}", MaiaConfig::default().to_toml_string()?);
            } else {
                return Err("pass --print-default or --check <path>".into());
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
