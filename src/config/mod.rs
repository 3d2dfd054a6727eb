pub mod browser;

use crate::utils::error::{LoginError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

pub use browser::BrowserConfig;

/// Fixed portal login URL for the campus network.
pub const PORTAL_URL: &str = "http://auth6.tsinghua.edu.cn/srun_portal_pc?ac_id=163&theme=pro";

pub const USERNAME_ENV: &str = "TUNET_USERNAME";
pub const PASSWORD_ENV: &str = "TUNET_PASSWORD";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "tunet-login")]
#[command(about = "Tsinghua University campus network auto login")]
pub struct CliConfig {
    /// Campus network username
    #[arg(short, long)]
    pub username: Option<String>,

    /// Campus network password
    #[arg(short, long)]
    pub password: Option<String>,

    /// Run with a visible browser window
    #[arg(long)]
    pub no_headless: bool,

    /// Maximum wait time for page elements, in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// WebDriver endpoint to connect to
    #[arg(long, default_value = "http://localhost:9515")]
    pub webdriver_url: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Resolved credential pair, never empty once constructed.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Resolve credentials from explicit values falling back to the
    /// environment. Both must resolve to non-blank strings.
    pub fn resolve(
        username: Option<String>,
        password: Option<String>,
        env_username: Option<String>,
        env_password: Option<String>,
    ) -> Result<Self> {
        let username = username.or(env_username).unwrap_or_default();
        let password = password.or(env_password).unwrap_or_default();

        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(LoginError::MissingConfigError {
                field: "credentials".to_string(),
            });
        }

        Ok(Self { username, password })
    }
}

impl CliConfig {
    /// Resolve credentials from CLI arguments, falling back to
    /// TUNET_USERNAME / TUNET_PASSWORD.
    pub fn credentials(&self) -> Result<Credentials> {
        Credentials::resolve(
            self.username.clone(),
            self.password.clone(),
            std::env::var(USERNAME_ENV).ok(),
            std::env::var(PASSWORD_ENV).ok(),
        )
    }

    pub fn browser_config(&self) -> BrowserConfig {
        BrowserConfig::new(!self.no_headless)
    }

    pub fn element_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("webdriver_url", &self.webdriver_url)?;
        validate_range("timeout", self.timeout, 1, 600)?;

        if let Some(username) = &self.username {
            validate_non_empty_string("username", username)?;
        }
        if let Some(password) = &self.password {
            validate_non_empty_string("password", password)?;
        }

        // Reject missing credentials before any browser activity.
        self.credentials()?;

        Ok(())
    }
}
