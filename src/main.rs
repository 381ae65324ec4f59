use std::process::ExitCode;

use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

mod error;
mod model;
mod parsers;
mod services;

use model::config::GeneratorConfig;
use services::pipeline;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .try_init();

    let locale = std::env::args().nth(1).unwrap_or_default();
    let cfg = GeneratorConfig::for_locale(&locale).with_env_overrides();

    println!("Generating data for '{}'...", cfg.locale);

    match pipeline::run(&cfg) {
        Ok(report) => {
            info!(
                locale = %report.locale,
                categories = report.categories,
                parsed = report.parsed,
                emitted = report.emitted,
                diagnostics = report.diagnostics.len(),
                digest = %report.digest,
                "dataset generated"
            );
            if let Ok(json) = serde_json::to_string(&report) {
                debug!(report = %json);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
