//! onboardtui - Main entry point
//!
//! Interactive wizard, headless replay and settings validation.

use anyhow::{Context, Result};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::File;
use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use onboardtui::app::App;
use onboardtui::cli::{Cli, Commands};
use onboardtui::record::CompositeRecord;
use onboardtui::session::{OnboardingSession, ReplayScript};
use onboardtui::settings::WizardSettings;

/// Initialize the logger.
///
/// `RUST_LOG` overrides the default level. The interactive wizard owns the
/// terminal, so it only logs errors to stderr unless a log file is given.
fn init_logger(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let default_level = if interactive && log_file.is_none() { "error" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

/// Main application entry point
fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let interactive = matches!(cli.command, None | Some(Commands::Run { .. }));
    init_logger(cli.log_file.as_deref(), interactive)?;
    info!("onboardtui starting up");

    match cli.command {
        Some(Commands::CheckSettings { settings }) => {
            info!("Validating settings file: {:?}", settings);
            match WizardSettings::load_from_file(&settings) {
                Ok(loaded) => {
                    println!(
                        "✓ Settings file is valid: home country {:?}, {} countries offered",
                        loaded.home_country,
                        loaded.countries.len()
                    );
                }
                Err(e) => {
                    error!("Settings validation failed: {:#}", e);
                    eprintln!("✗ Settings validation failed: {:#}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Replay { script, settings, output }) => {
            let settings = load_settings(settings.as_deref())?;
            let script = ReplayScript::load_from_file(&script)?;
            info!(events = script.events.len(), "Replaying onboarding script");

            let record = OnboardingSession::new(settings).run_script(script)?;
            emit_record(&record, output.as_deref())?;
        }
        Some(Commands::Run { settings, output }) => {
            run_wizard(settings.as_deref(), output.as_deref())?;
        }
        None => {
            info!("No command specified, launching the wizard");
            run_wizard(None, None)?;
        }
    }

    Ok(())
}

fn load_settings(path: Option<&Path>) -> Result<WizardSettings> {
    match path {
        Some(path) => WizardSettings::load_from_file(path),
        None => {
            debug!("Using built-in settings");
            Ok(WizardSettings::default())
        }
    }
}

/// Print the submitted record, or write it to `output`
fn emit_record(record: &CompositeRecord, output: Option<&Path>) -> Result<()> {
    let json = record.to_json_pretty().context("Failed to serialize record")?;
    match output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("Failed to write record to {:?}", path))?;
            info!("Record written to {:?}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Run the interactive wizard
fn run_wizard(settings: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let settings = load_settings(settings)?;
    debug!("Initializing terminal for TUI mode");

    enable_raw_mode().context("Failed to enable raw mode")?;
    crossterm::execute!(stdout(), EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let result = Terminal::new(CrosstermBackend::new(stdout()))
        .context("Failed to create terminal")
        .and_then(|mut terminal| {
            App::new(OnboardingSession::new(settings))
                .run(&mut terminal)
                .map_err(anyhow::Error::from)
        });

    // Cleanup terminal (always attempt cleanup, even if app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), LeaveAlternateScreen);

    match result? {
        Some(record) => emit_record(&record, output),
        None => {
            println!("Onboarding cancelled, nothing submitted");
            Ok(())
        }
    }
}
