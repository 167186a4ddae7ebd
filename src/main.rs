use std::io::{self, IsTerminal, stdin};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use hostdoctor::config::{self, load_config, load_config_from_path};
use hostdoctor::report::style::Style;
use hostdoctor::system::collector::HostCollector;
use hostdoctor::system::json::JsonSource;
use hostdoctor::system::source::SourceKind;
use hostdoctor::{diagnose, logging};

#[derive(Parser)]
#[command(
    name = "hostdoctor",
    about = "One-shot host health check with remediation advice"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Metrics source: auto, stdin, host
    #[arg(long)]
    source: Option<String>,

    /// Read the JSON metrics document from this file instead of stdin
    #[arg(long)]
    input: Option<PathBuf>,

    /// Drop emoji decorations from the report
    #[arg(long, default_value_t = false)]
    plain: bool,

    /// CPU sampling window for host mode, in milliseconds
    #[arg(long)]
    sample_interval: Option<u64>,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init_tracing(cli.verbose)?;
    let config = load_config_for_cli(&cli)?;

    let style = Style::from_plain_flag(config.report.plain);
    let requested = config.general.source;
    let kind = requested.resolve(stdin().is_terminal(), cli.input.is_some());
    tracing::debug!(?kind, ?style, "metrics source selected");

    let output = match kind {
        SourceKind::Stdin => match &cli.input {
            Some(path) => diagnose(&mut JsonSource::open(path)?, style)?,
            None => {
                let document =
                    io::read_to_string(stdin()).wrap_err("failed to read standard input")?;
                if requested.falls_back_to_host(&document) {
                    tracing::info!("standard input is empty, checking the live host");
                    run_host(&config, style)?
                } else {
                    let mut source =
                        JsonSource::from_reader(document.as_bytes(), "standard input");
                    diagnose(&mut source, style)?
                }
            }
        },
        SourceKind::Host | SourceKind::Auto => {
            if let Some(path) = &cli.input {
                tracing::warn!(path = %path.display(), "--input is ignored in host mode");
            }
            run_host(&config, style)?
        }
    };

    print!("{output}");
    Ok(())
}

fn run_host(config: &config::Config, style: Style) -> Result<String> {
    let interval = Duration::from_millis(config.general.sample_interval_ms);
    diagnose(&mut HostCollector::new(interval), style)
}

fn load_config_for_cli(cli: &Cli) -> Result<config::Config> {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(ref source) = cli.source {
        config.general.source = source.parse::<SourceKind>()?;
    }
    if let Some(interval) = cli.sample_interval {
        config.general.sample_interval_ms = interval;
    }
    if cli.plain {
        config.report.plain = true;
    }

    Ok(config)
}
