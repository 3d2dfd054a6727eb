//! Pre-flight reachability check for the WebDriver endpoint.

use tracing::debug;

use crate::utils::error::{LoginError, Result};

/// Probe the WebDriver `/status` endpoint.
pub async fn status_ok(webdriver_url: &str) -> bool {
    let status_url = format!("{}/status", webdriver_url.trim_end_matches('/'));
    debug!("Probing WebDriver status at {}", status_url);

    match reqwest::get(&status_url).await {
        Ok(response) => response.status().is_success(),
        Err(_) => false,
    }
}

/// Fail with a descriptive error when the WebDriver endpoint is unreachable.
pub async fn ensure_reachable(webdriver_url: &str) -> Result<()> {
    if status_ok(webdriver_url).await {
        Ok(())
    } else {
        Err(LoginError::WebDriverUnreachable {
            url: webdriver_url.to_string(),
        })
    }
}
