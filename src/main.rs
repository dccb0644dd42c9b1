use clap::Parser;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

use famtree::cli::commands::execute_command;
use famtree::cli::output;
use famtree::cli::Cli;

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    if let Err(e) = execute_command(&cli) {
        tracing::debug!("command failed: {:?}", e);
        output::error(&e.report());
        std::process::exit(e.exit_code());
    }
}

/// `-d` flags pick famtree's level, `RUST_LOG` overrides them.
/// Logs go to stderr: stdout carries command results only.
fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    if verbosity > 3 {
        output::warning("max verbosity is -ddd");
    }
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},famtree={level},rayon=off,rayon_core=off")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1)
        .with_span_events(if verbosity > 2 { FmtSpan::CLOSE } else { FmtSpan::NONE })
        .init();

    tracing::debug!("log level: {}", level);
}
