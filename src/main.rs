use clap::Parser;
use dip_variant_stats::core::ConfigProvider;
use dip_variant_stats::utils::error::ErrorSeverity;
use dip_variant_stats::utils::{logger, validation::Validate};
use dip_variant_stats::{
    builtin_registry, CliConfig, HttpListingSource, LocalStorage, ScrapeEngine, ScrapeError,
    VariantRegistry, VariantsFile,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting dip-variant-stats");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        fail(e);
    }

    let registry = match load_registry(&config) {
        Ok(registry) => registry,
        Err(e) => fail(e),
    };

    let source = HttpListingSource::new(config.base_url());
    let storage = LocalStorage::new(config.output_path.clone());
    let engine = ScrapeEngine::new(source, storage, registry);

    match engine.run().await {
        Ok(reports) => {
            for report in &reports {
                println!(
                    "{}: {} games, {} rows -> {}",
                    report.variant,
                    report.games,
                    report.rows,
                    report.path.display()
                );
                if report.unparseable > 0 {
                    println!(
                        "  {} members had no readable supply-center count and were written as 0",
                        report.unparseable
                    );
                }
            }
        }
        Err(e) => fail(e),
    }

    Ok(())
}

fn load_registry(config: &CliConfig) -> Result<VariantRegistry, ScrapeError> {
    let mut registry = match config.variants_file() {
        Some(path) => {
            tracing::info!("Loading variant tables from {}", path);
            VariantsFile::from_file(path)?.into_registry()?
        }
        None => builtin_registry()?,
    };
    registry.retain_named(config.only_variants())?;
    Ok(registry)
}

fn fail(e: ScrapeError) -> ! {
    tracing::error!(
        "Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("{}", e.user_friendly_message());
    eprintln!("Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
