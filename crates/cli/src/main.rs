//! acctest CLI Application

// The CLI writes generated documents to stdout
#![allow(clippy::print_stdout, clippy::print_stderr)]

use acctest_cli::cli::{self, EXIT_OK, exit_code_for, render_error};
use acctest_cli::commands;
use acctest_cli::tracing::{TracingConfig, correlation_id, init_tracing};
use std::io::Write;

fn main() {
    // Tracing may be unusable during a panic, so report directly.
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    let cli = cli::parse();

    if let Err(e) = init_tracing(TracingConfig {
        format: cli.log_format,
        level: cli.level.into(),
        filter: None,
    }) {
        eprintln!("{e:?}");
    }

    let _span = tracing::info_span!(
        "acctest",
        correlation_id = %correlation_id(),
        environment = %cli.environment,
    )
    .entered();

    let exit_code = match commands::execute(&cli) {
        Ok(output) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = stdout.write_all(output.as_bytes()).and_then(|()| stdout.flush()) {
                eprintln!("Failed to write output: {e}");
                cli::EXIT_OTHER
            } else {
                EXIT_OK
            }
        }
        Err(err) => {
            tracing::debug!(error = %err, "Command failed");
            render_error(&err);
            exit_code_for(&err)
        }
    };

    std::process::exit(exit_code);
}
