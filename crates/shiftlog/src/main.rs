mod bootstrap;

use anyhow::Result;
use clap::Parser;
use shift_core::models::Report;
use shift_core::settings::Settings;
use shift_data::reader::load_raw_log;
use shift_data::report::parse_report;
use shift_runtime::orchestrator::ReportOrchestrator;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::parse();
    settings.validate()?;

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("shiftlog v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Input: {}, watch: {}, refresh: {}s",
        settings.input.display(),
        settings.watch,
        settings.refresh_rate
    );

    if settings.watch {
        run_watch(&settings).await
    } else {
        run_once(&settings)
    }
}

/// One-shot mode: read, parse, export, exit.
fn run_once(settings: &Settings) -> Result<()> {
    let raw = load_raw_log(&settings.input)?;
    let outcome = parse_report(&raw);

    tracing::info!(
        "Decoded {} of {} lines into {} items",
        outcome.metadata.records_decoded,
        outcome.metadata.lines_total,
        outcome.metadata.items
    );

    let json = render(&outcome.report, settings.pretty)?;
    match &settings.output {
        Some(path) => {
            std::fs::write(path, json)?;
            tracing::info!("Report written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Watch mode: keep polling the input and rewriting the output until Ctrl+C.
async fn run_watch(settings: &Settings) -> Result<()> {
    // validate() guarantees an output path in watch mode.
    let Some(output) = settings.output.clone() else {
        anyhow::bail!("--watch requires --output");
    };

    let orchestrator = ReportOrchestrator::new(settings.refresh_rate, settings.input.clone());
    let (mut rx, handle) = orchestrator.start();
    let pretty = settings.pretty;

    let writer = async {
        while let Some(snapshot) = rx.recv().await {
            let json = render(&snapshot.outcome.report, pretty)?;
            std::fs::write(&output, json)?;
            tracing::info!(
                "Report refreshed: {} items, written to {}",
                snapshot.outcome.metadata.items,
                output.display()
            );
        }
        Ok::<(), anyhow::Error>(())
    };

    tokio::select! {
        result = writer => {
            handle.abort();
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl+C received; shutting down polling task");
            handle.abort();
        }
    }

    Ok(())
}

/// Serialise the report in the §6 contract shape.
fn render(report: &Report, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(json)
}
