use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use showcase::config::NavigationArgs;
use showcase::constants::DEFAULT_SECTION_IDS;
use showcase::replay;
use showcase::SlideSequence;

#[derive(Parser, Debug)]
#[command(name = "showcase", about = "Slide-deck presentation navigator")]
struct Cli {
    #[command(flatten)]
    navigation: NavigationArgs,

    /// Default log filter when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a timestamped input script headlessly and print every slide change
    Replay {
        script: PathBuf,
    },
    /// Open the presentation window
    #[cfg(feature = "viewer")]
    View,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = cli.navigation.to_config()?;
    let slides = if cli.navigation.slides.is_empty() {
        SlideSequence::new(DEFAULT_SECTION_IDS)?
    } else {
        SlideSequence::new(cli.navigation.slides.iter().map(String::as_str))?
    };

    match cli.command {
        Command::Replay { script } => {
            let text = fs::read_to_string(&script)
                .with_context(|| format!("failed to read script {}", script.display()))?;
            let events = replay::parse_script(&text)
                .with_context(|| format!("failed to parse script {}", script.display()))?;
            let report = replay::run(&events, slides, config)?;

            for transition in &report.transitions {
                println!(
                    "{:>6} ms  -> {:02} {}",
                    transition.at_ms,
                    transition.index + 1,
                    transition.slide
                );
            }
            println!(
                "final: {:02} ({} handled, {} ignored)",
                report.final_index + 1,
                report.handled,
                report.ignored
            );
        }
        #[cfg(feature = "viewer")]
        Command::View => {
            let bus = showcase::EventBus::new();
            let controller = showcase::NavigationController::new(
                slides,
                config,
                showcase::SystemClock::new(),
            )?;
            let session = showcase::PresentationSession::mount(&bus, controller);
            showcase::viewer::run(&session, &bus);
            session.unmount();
        }
    }

    Ok(())
}
