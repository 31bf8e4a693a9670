use anyhow::Context;
use clap::Parser;
use climate_etl::utils::{logger, validation::Validate};
use climate_etl::{AnalysisEngine, CliConfig, ClimatePipeline, Era5Client, LocalStorage, ServiceConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting climate-etl CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let mut settings = config.era5_settings();
    if let Some(path) = &config.config {
        let service_config = ServiceConfig::from_file(path)
            .with_context(|| format!("loading service config {}", path))?;
        if let Err(e) = service_config.validate() {
            tracing::error!("❌ Service configuration invalid: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
        settings = service_config.apply(settings);
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let era5 = Era5Client::new(settings).context("building HTTP client")?;
    let pipeline = ClimatePipeline::new(storage, config, era5);
    let engine = AnalysisEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Climate analysis completed successfully!");
            println!("✅ Climate analysis completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Climate analysis failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // A no-data outcome is a warning, not a failure.
            let exit_code = match e.severity() {
                climate_etl::utils::error::ErrorSeverity::Low => 0,
                climate_etl::utils::error::ErrorSeverity::Medium => 2,
                climate_etl::utils::error::ErrorSeverity::High => 1,
                climate_etl::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
