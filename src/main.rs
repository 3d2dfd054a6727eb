use clap::Parser;
use tunet_login::core::webdriver;
use tunet_login::utils::{logger, validation::Validate};
use tunet_login::{CliConfig, LoginError, LoginOutcome, PortalSession};

#[tokio::main]
async fn main() {
    // Load a local .env file when present; ignore when absent.
    dotenvy::dotenv().ok();

    let config = CliConfig::parse();
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting Tsinghua University Network Auto Login");
    if config.verbose {
        // Credentials are deliberately left out of the log.
        tracing::debug!(
            "CLI config: webdriver_url={}, timeout={}s, headless={}",
            config.webdriver_url,
            config.timeout,
            !config.no_headless
        );
    }

    // Configuration errors short-circuit before any browser activity.
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    match run(&config).await {
        Ok(LoginOutcome::Success) => {
            tracing::info!("✅ Login successful!");
            println!("✅ Login successful!");
        }
        Ok(LoginOutcome::Failed) => {
            tracing::error!("❌ Login failed!");
            eprintln!("❌ Login failed!");
            std::process::exit(1);
        }
        Ok(LoginOutcome::Indeterminate) => {
            tracing::warn!("⚠️ Login status unclear");
            eprintln!("⚠️ Login status unclear - may need manual verification");
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("❌ Script failed with error: {}", e);
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }
}

async fn run(config: &CliConfig) -> Result<LoginOutcome, LoginError> {
    let credentials = config.credentials()?;

    webdriver::ensure_reachable(&config.webdriver_url).await?;

    let session = PortalSession::connect(
        &config.webdriver_url,
        &config.browser_config(),
        config.element_timeout(),
    )
    .await?;

    session.run(&credentials).await
}
