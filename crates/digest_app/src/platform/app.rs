use std::path::PathBuf;

use anyhow::Context;
use digest_engine::{ArticleTextExtractor, FileOutputSink, HfInferenceClient, ReqwestFetcher, Router};
use digest_logging::{digest_debug, digest_info};

use super::config::{AppConfig, CONFIG_FILENAME};
use super::logging;

/// Entry point: processes every command-line argument in order, then exits.
pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::load(&PathBuf::from(CONFIG_FILENAME))?
        .with_env_overrides(|key| std::env::var(key).ok());
    logging::initialize(
        config.log_destination,
        digest_logging::parse_level(&config.log_level),
    );
    digest_debug!("Loaded configuration: {:?}", redacted(&config));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let working_dir = std::env::current_dir().context("resolving working directory")?;

    let inference = HfInferenceClient::new(config.inference_settings())?;
    let router = Router::new(
        Box::new(ReqwestFetcher::new(config.fetch_settings())),
        Box::new(ArticleTextExtractor),
        Box::new(inference.clone()),
        Box::new(inference),
    );
    let sink = FileOutputSink::new(working_dir);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    let emitted = runtime.block_on(router.run(&args, &sink))?;

    digest_info!("Done: {} output(s) written", emitted);
    Ok(())
}

fn redacted(config: &AppConfig) -> AppConfig {
    AppConfig {
        api_token: config.api_token.as_ref().map(|_| "***".to_string()),
        ..config.clone()
    }
}
