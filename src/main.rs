use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use mmcif_dict_builder::app::ports::HttpClientPort;
use mmcif_dict_builder::app::{BuildDictionaryUseCase, FetchAssetsUseCase};
use mmcif_dict_builder::config::Config;
use mmcif_dict_builder::infra::{GemmiCliParser, JsonDocumentParser, JsonFileOutput, ReqwestHttp};
use mmcif_dict_builder::logging;
use mmcif_dict_builder::observability;
use mmcif_dict_builder::pipeline::processing::KeyFilter;
use mmcif_dict_builder::pipeline::Pipeline;

#[derive(Parser)]
#[command(name = "mmcif_dict_builder")]
#[command(about = "Builds compact hover assets from mmCIF dictionaries")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $MMCIF_DICT_CONFIG, then dictionaries.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download, parse, clean and filter every configured dictionary
    Build {
        /// Only build these dictionaries (comma-separated)
        #[arg(long)]
        only: Option<String>,
    },
    /// Download prebuilt assets instead of building them
    Fetch {
        /// Directory to save assets into (overrides config)
        #[arg(long)]
        assets_dir: Option<PathBuf>,
    },
    /// Clean (and filter) a dictionary that is already JSON
    Clean {
        input: PathBuf,
        output: PathBuf,
        /// Keep every key; only normalize strings
        #[arg(long)]
        no_filter: bool,
    },
}

fn build_use_case(config: &Config, http: Arc<dyn HttpClientPort>, filter: bool) -> BuildDictionaryUseCase {
    let key_filter = filter.then(|| KeyFilter::from_config(&config.filter));
    BuildDictionaryUseCase::new(
        http,
        Box::new(GemmiCliParser::new(
            config.parser.gemmi_bin.clone(),
            config.parser.gemmi_args.clone(),
        )),
        Box::new(JsonDocumentParser),
        key_filter,
        Box::new(JsonFileOutput),
    )
}

async fn run(cli: Cli, mut config: Config) -> anyhow::Result<bool> {
    let http: Arc<dyn HttpClientPort> = Arc::new(
        ReqwestHttp::new(config.fetch.max_redirects, config.fetch.timeout_seconds)
            .context("failed to create HTTP client")?,
    );

    match cli.command {
        Commands::Build { only } => {
            if let Some(list) = only {
                let names: Vec<String> = list.split(',').map(|s| s.trim().to_string()).collect();
                config.select(&names)?;
            }
            let use_case = build_use_case(&config, http, true);
            let result = Pipeline::run(&use_case, &config.dictionaries).await;

            for report in &result.reports {
                println!(
                    "{}: {} ({:.2} MB, sha256 {}, built {})",
                    report.name,
                    report.output_path.display(),
                    report.size_mib(),
                    report.sha256,
                    report.built_at.to_rfc3339()
                );
            }
            for (name, err) in &result.errors {
                println!("{}: FAILED: {}", name, err);
            }
            println!("Completed: {}/{} dictionaries processed", result.succeeded(), result.total);
            Ok(result.is_success())
        }
        Commands::Fetch { assets_dir } => {
            let assets_dir = assets_dir.unwrap_or_else(|| config.fetch.assets_dir.clone());
            let use_case = FetchAssetsUseCase::new(http, &config.fetch.base_url, assets_dir);
            let report = use_case.fetch_all(&config.fetch.files).await;

            for path in &report.downloaded {
                println!("Saved {}", path.display());
            }
            for (file, err) in &report.failed {
                println!("Error downloading {}: {}", file, err);
            }
            Ok(report.is_success())
        }
        Commands::Clean { input, output, no_filter } => {
            let use_case = build_use_case(&config, http, !no_filter);
            let report = use_case
                .clean_file(&input, &output)
                .await
                .with_context(|| format!("failed to clean {}", input.display()))?;
            println!(
                "{}: {} strings cleaned, {} keys removed, {:.2} MB",
                report.output_path.display(),
                report.strings_cleaned,
                report.keys_removed,
                report.size_mib()
            );
            Ok(true)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let log_guard = logging::init_logging(config.log_dir.as_deref());

    let metrics_handle = match &config.metrics_file {
        Some(_) => Some(observability::init()?),
        None => None,
    };
    let metrics_file = config.metrics_file.clone();

    let success = run(cli, config).await?;

    if let (Some(handle), Some(path)) = (metrics_handle, metrics_file) {
        if let Err(e) = observability::write_snapshot(&handle, &path) {
            error!("Failed to write metrics snapshot: {}", e);
        }
    }

    if !success {
        info!("Finished with failures");
        drop(log_guard);
        std::process::exit(1);
    }
    Ok(())
}
