use clap::Parser;
use odata_csv::utils::{logger, validation::Validate};
use odata_csv::{CliConfig, EtlEngine, ExportPipeline, LocalStorage, RunOutcome};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::debug!("Configuration validation failed: {:?}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let pipeline = ExportPipeline::new(LocalStorage::new(), config);
    let engine = EtlEngine::new(pipeline);

    // Every runtime failure is reported and the process still exits normally.
    match engine.run().await {
        Ok(RunOutcome::Saved { path, rows }) => {
            tracing::info!("Saved {} rows to {}", rows, path);
        }
        Ok(RunOutcome::NoData) => {
            tracing::info!("Nothing to write");
        }
        Err(e) => {
            tracing::debug!("Export failed: {:?} (Category: {:?})", e, e.category());
            println!("{}", e);
        }
    }

    Ok(())
}
