use clap::Parser;
use regpass_cli::{commands, Cli};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();

    match commands::run(&cli, stdin.lock(), &mut stdout) {
        Ok(code) => code,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

/// Print the user-facing message for a failed run
fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<regpass_core::Error>() {
        Some(regpass_core::Error::InvalidInput(_)) => {
            eprintln!("Invalid input. Please provide numeric values where applicable.");
        }
        Some(regpass_core::Error::Policy(msg)) => {
            eprintln!("Policy rejected: {}", msg);
        }
        _ => eprintln!("An unexpected error occurred: {}", err),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "regpass=debug,regpass_cli=debug,regpass_policy=debug,regpass_filter=debug"
    } else {
        "regpass=info,regpass_cli=info,regpass_policy=warn,regpass_filter=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
