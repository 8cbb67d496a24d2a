use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// onboardtui - Legal-entity client onboarding wizard
#[derive(Parser, Debug)]
#[command(name = "onboardtui")]
#[command(about = "Collect a legal-entity client record through a four-step terminal wizard")]
#[command(version)]
pub struct Cli {
    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive wizard (default)
    Run {
        /// Settings file (home country and country list)
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Write the submitted record here instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replay a recorded event script without a terminal UI
    Replay {
        /// JSON script of edit/next/back/submit events
        script: PathBuf,

        /// Settings file (home country and country list)
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Write the submitted record here instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a settings file
    CheckSettings {
        /// Path to the settings file to validate
        settings: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_no_args() {
        // Running with no args should succeed (defaults to the wizard)
        let cli = Cli::try_parse_from(["onboardtui"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn test_cli_run_with_settings() {
        let cli = Cli::try_parse_from([
            "onboardtui",
            "run",
            "--settings",
            "/etc/onboard.json",
            "-o",
            "record.json",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Run { settings, output }) => {
                assert_eq!(settings.unwrap().to_str().unwrap(), "/etc/onboard.json");
                assert_eq!(output.unwrap().to_str().unwrap(), "record.json");
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_replay_with_global_log_file() {
        let cli = Cli::try_parse_from(["onboardtui", "replay", "script.json", "--log-file", "run.log"])
            .unwrap();
        assert_eq!(cli.log_file.unwrap().to_str().unwrap(), "run.log");
        match cli.command {
            Some(Commands::Replay { script, settings, .. }) => {
                assert_eq!(script.to_str().unwrap(), "script.json");
                assert!(settings.is_none());
            }
            _ => panic!("Expected Replay command"),
        }
    }

    #[test]
    fn test_cli_check_settings_requires_path() {
        assert!(Cli::try_parse_from(["onboardtui", "check-settings"]).is_err());
        assert!(Cli::try_parse_from(["onboardtui", "check-settings", "s.json"]).is_ok());
    }
}
