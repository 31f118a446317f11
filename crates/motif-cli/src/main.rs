use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use motif_cli::{Args, ErrorAdapter};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Motif");
    debug!(args:?; "Parsed arguments");

    match motif_cli::run(&args).await {
        Ok(report) => {
            info!(emitted = report.emitted(), elapsed:? = report.elapsed(); "Completed successfully");
        }
        Err(err) => {
            let adapted_error = ErrorAdapter(&err);

            let reporter = miette::GraphicalReportHandler::new();
            let mut writer = String::new();
            if reporter.render_report(&mut writer, &adapted_error).is_err() {
                writer = err.to_string();
            }

            error!("Failed\n{writer}");
            process::exit(1);
        }
    }
}
