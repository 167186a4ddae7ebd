use color_eyre::Result;
use color_eyre::eyre::eyre;
use tracing::Level;

/// Map `-v` repetitions to a level. Quiet by default so piped output stays clean.
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install a plain-text subscriber on stderr; stdout carries only the report.
pub fn init_tracing(verbosity: u8) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_target(false)
        .with_max_level(level_for_verbosity(verbosity))
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;
    Ok(())
}
