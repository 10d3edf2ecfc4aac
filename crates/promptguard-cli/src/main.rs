//! Prompt Defense CLI - demonstration host for the validation core.
//!
//! Not part of the validation core's own guarantees; maps
//! `SecurityDecision::action` onto an exit-code convention for embedding
//! scripts: 0 PASS, 2 FLAG, 3 BLOCK, 1 validator error.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use promptguard_core::{PromptDefenseConfig, SecurityAction, Validator};

#[derive(Parser)]
#[command(name = "promptguard")]
#[command(about = "Prompt Defense - validator for business-automation feasibility prompts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Validate a single prompt read from the command line.
    Check {
        /// The prompt text to validate.
        text: String,
        /// Configuration file path.
        #[arg(short, long, default_value = "config/promptguard.json")]
        config: PathBuf,
    },
    /// Validate configuration without running any prompt through it.
    Validate {
        #[arg(short, long, default_value = "config/promptguard.json")]
        config: PathBuf,
    },
    /// Show a one-line status summary.
    Status,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Check { text, config }) => run_check(&text, &config),
        Some(Commands::Validate { config }) => run_validate(&config),
        Some(Commands::Status) => {
            println!("promptguard status: ready");
            ExitCode::from(0)
        }
        None => {
            println!("promptguard v0.1.0 - use --help for commands");
            ExitCode::from(0)
        }
    }
}

fn run_check(text: &str, config_path: &PathBuf) -> ExitCode {
    let config = PromptDefenseConfig::load(config_path);
    let validator = match Validator::new(config) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("failed to start validator: {}", e);
            return ExitCode::from(1);
        }
    };

    let decision = validator.validate_blocking(text, None);
    let output = serde_json::json!({
        "action": decision.action,
        "confidence": decision.confidence,
        "detected_attacks": decision.detected_attacks,
        "user_message": decision.user_message,
    });
    println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());

    match decision.action {
        SecurityAction::Pass => ExitCode::from(0),
        SecurityAction::Flag => ExitCode::from(2),
        SecurityAction::Block => ExitCode::from(3),
    }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let config = PromptDefenseConfig::load(config_path);
    let issues = config.validate();
    if issues.is_empty() {
        println!("configuration is valid");
        ExitCode::from(0)
    } else {
        for issue in &issues {
            eprintln!("config issue: {}", issue);
        }
        ExitCode::from(1)
    }
}
