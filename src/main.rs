use clap::Parser;
use csv_chain::core::ConfigProvider;
use csv_chain::utils::error::ErrorSeverity;
use csv_chain::utils::{logger, validation::Validate};
use csv_chain::{CliConfig, CsvPipeline, EtlEngine, EtlError, JobConfig, LocalStorage};

async fn run<C: ConfigProvider + Validate>(config: C) -> csv_chain::Result<String> {
    config.validate()?;

    let storage = LocalStorage::new(".");
    let pipeline = CsvPipeline::new(storage, config);
    EtlEngine::new(pipeline).run().await
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting csv-chain");
    tracing::debug!("CLI config: {:?}", cli);

    let result = match cli.config.clone() {
        Some(path) => match JobConfig::from_file(&path) {
            Ok(job) => {
                tracing::info!("Running job '{}' from {}", job.job.name, path);
                run(job).await
            }
            Err(e) => Err(e),
        },
        None => run(cli).await,
    };

    match result {
        Ok(output_path) => {
            println!("✅ Done. Output saved to: {}", output_path);
        }
        Err(e) => {
            report(&e);
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}

fn report(e: &EtlError) {
    tracing::error!("❌ Processing failed: {} (Severity: {:?})", e, e.severity());
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e);
    eprintln!("💡 {}", e.recovery_suggestion());
}
