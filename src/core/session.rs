//! WebDriver-backed login sequence against the portal page.

use std::time::Duration;

use fantoccini::error::CmdError;
use fantoccini::wd::TimeoutConfiguration;
use fantoccini::{Client, ClientBuilder, Locator};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::{BrowserConfig, Credentials, PORTAL_URL};
use crate::core::classifier::{classify_page, LoginStatus};
use crate::utils::error::{LoginError, Result};

/// Pause after navigation before reading the page, the portal renders its
/// form client-side.
const PAGE_SETTLE_DELAY: Duration = Duration::from_secs(2);

/// Pause after submitting the form before checking for a redirect.
const POST_SUBMIT_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    Failed,
    Indeterminate,
}

/// One browser session against the portal. Holds the WebDriver client for
/// the duration of a single login attempt.
pub struct PortalSession {
    client: Client,
    element_timeout: Duration,
}

impl PortalSession {
    /// Open a new browser session through the given WebDriver endpoint.
    pub async fn connect(
        webdriver_url: &str,
        browser: &BrowserConfig,
        element_timeout: Duration,
    ) -> Result<Self> {
        debug!("Connecting to WebDriver at {}", webdriver_url);

        let client = ClientBuilder::rustls()
            .capabilities(browser.capabilities())
            .connect(webdriver_url)
            .await?;

        let timeouts = TimeoutConfiguration::new(None, Some(browser.page_load_timeout), None);
        if let Err(e) = client.update_timeouts(timeouts).await {
            // Not fatal, element waits still bound the run.
            debug!("Could not set page load timeout: {}", e);
        }

        info!("Browser session started");
        Ok(Self {
            client,
            element_timeout,
        })
    }

    /// Run one login attempt and close the browser on every exit path.
    pub async fn run(self, credentials: &Credentials) -> Result<LoginOutcome> {
        let outcome = self.login(credentials).await;

        if let Err(e) = self.client.close().await {
            warn!("Error closing browser session: {}", e);
        } else {
            info!("Browser closed");
        }

        outcome
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome> {
        info!("Navigating to login page: {}", PORTAL_URL);
        self.client.goto(PORTAL_URL).await?;

        info!("Page loaded, checking current URL and title...");
        let current_url = self.client.current_url().await?;
        info!("Current URL: {}", current_url);
        if let Ok(title) = self.client.execute("return document.title;", vec![]).await {
            info!("Page title: {}", title.as_str().unwrap_or_default());
        }

        self.log_page_source_stats().await;

        // Let client-side rendering settle before classifying.
        tokio::time::sleep(PAGE_SETTLE_DELAY).await;

        let page_source = self.client.source().await?;
        match classify_page(&page_source) {
            LoginStatus::AlreadyLoggedIn => {
                info!("Already logged in! No login required.");
                return Ok(LoginOutcome::Success);
            }
            LoginStatus::Unknown => {
                warn!("Cannot determine login status, proceeding with login attempt...");
            }
            LoginStatus::NeedsLogin => {}
        }

        self.fill_and_submit(credentials).await?;

        tokio::time::sleep(POST_SUBMIT_DELAY).await;
        self.check_submit_result().await
    }

    async fn fill_and_submit(&self, credentials: &Credentials) -> Result<()> {
        info!("Waiting for login form to load...");
        let username_field = match self
            .client
            .wait()
            .at_most(self.element_timeout)
            .for_element(Locator::Id("username"))
            .await
        {
            Ok(element) => {
                info!("Username field found successfully");
                element
            }
            Err(CmdError::WaitTimeout) => {
                error!("Username field not found within timeout");
                self.log_input_inventory().await;
                return Err(LoginError::ElementTimeout {
                    selector: "#username".to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        info!("Entering username...");
        username_field.clear().await?;
        username_field.send_keys(&credentials.username).await?;

        // Password field is assumed present once the username field exists.
        info!("Entering password...");
        let password_field = self.client.find(Locator::Id("password")).await?;
        password_field.clear().await?;
        password_field.send_keys(&credentials.password).await?;

        let domain_checkbox = self.client.find(Locator::Id("domain")).await?;
        if !domain_checkbox.is_selected().await? {
            info!("Checking domain checkbox for external network access...");
            domain_checkbox.click().await?;
        }

        info!("Clicking login button...");
        let login_button = match self
            .client
            .wait()
            .at_most(self.element_timeout)
            .for_element(Locator::Id("login-account"))
            .await
        {
            Ok(element) => element,
            Err(CmdError::WaitTimeout) => {
                error!("Login button not found within timeout");
                return Err(LoginError::ElementTimeout {
                    selector: "#login-account".to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        login_button.click().await?;

        Ok(())
    }

    /// Decide the outcome after the form was submitted: a redirect away from
    /// the portal URL means success, a visible error element means failure,
    /// anything else is indeterminate.
    async fn check_submit_result(&self) -> Result<LoginOutcome> {
        let current_url = self.client.current_url().await?;
        let portal_url = Url::parse(PORTAL_URL).map_err(|e| LoginError::InvalidConfigValueError {
            field: "portal_url".to_string(),
            value: PORTAL_URL.to_string(),
            reason: e.to_string(),
        })?;

        if current_url != portal_url {
            info!("Login appears successful! Redirected to: {}", current_url);
            return Ok(LoginOutcome::Success);
        }

        warn!("Still on login page, checking for errors...");
        match self.client.find_all(Locator::Css(".error")).await {
            Ok(error_elements) => {
                if let Some(element) = error_elements.first() {
                    let error_text = element.text().await.unwrap_or_default();
                    error!("Login error: {}", error_text);
                    return Ok(LoginOutcome::Failed);
                }
            }
            Err(e) => {
                warn!("Error checking for login errors: {}", e);
            }
        }

        warn!("Login status unclear - may need manual verification");
        Ok(LoginOutcome::Indeterminate)
    }

    async fn log_page_source_stats(&self) {
        match self.client.source().await {
            Ok(source) => {
                info!("Page source length: {} characters", source.len());
                if source.len() < 1000 {
                    warn!("Page source seems too short, might be a loading issue");
                    let preview: String = source.chars().take(500).collect();
                    debug!("Page source preview: {}", preview);
                }
            }
            Err(e) => {
                warn!("Could not get page source: {}", e);
            }
        }
    }

    /// Timeout diagnostics: list the first few inputs actually on the page.
    async fn log_input_inventory(&self) {
        info!("Attempting to find alternative selectors...");
        match self.client.find_all(Locator::Css("input")).await {
            Ok(inputs) => {
                info!("Found {} input elements", inputs.len());
                for (i, input) in inputs.iter().take(5).enumerate() {
                    let id = input.attr("id").await.ok().flatten().unwrap_or_default();
                    let input_type = input.attr("type").await.ok().flatten().unwrap_or_default();
                    let name = input.attr("name").await.ok().flatten().unwrap_or_default();
                    info!("Input {}: id='{}', type='{}', name='{}'", i, id, input_type, name);
                }
            }
            Err(e) => {
                error!("Error searching for input elements: {}", e);
            }
        }
    }
}
