use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoginError {
    #[error("WebDriver command failed: {0}")]
    WebDriverError(#[from] fantoccini::error::CmdError),

    #[error("Failed to start browser session: {0}")]
    SessionError(#[from] fantoccini::error::NewSessionError),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Timed out waiting for element: {selector}")]
    ElementTimeout { selector: String },

    #[error("WebDriver endpoint unreachable: {url}")]
    WebDriverUnreachable { url: String },
}

impl LoginError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            LoginError::MissingConfigError { field } => {
                format!("Missing required configuration: {}", field)
            }
            LoginError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid value for {}: {}", field, reason)
            }
            LoginError::ElementTimeout { selector } => format!(
                "The login page did not show the expected element ({}) in time",
                selector
            ),
            LoginError::WebDriverUnreachable { url } => {
                format!("Cannot reach the WebDriver endpoint at {}", url)
            }
            LoginError::SessionError(_) => {
                "Could not start a browser session via WebDriver".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            LoginError::MissingConfigError { field } if field == "credentials" => {
                "Pass -u/-p on the command line or set TUNET_USERNAME and TUNET_PASSWORD \
                 (a .env file is also read)"
                    .to_string()
            }
            LoginError::MissingConfigError { .. } | LoginError::InvalidConfigValueError { .. } => {
                "Run with --help to see the expected arguments".to_string()
            }
            LoginError::WebDriverUnreachable { .. } | LoginError::SessionError(_) => {
                "Start chromedriver (e.g. `chromedriver --port=9515`) and make sure a \
                 compatible Chrome/Chromium is installed, or point --webdriver-url at a \
                 running endpoint"
                    .to_string()
            }
            LoginError::ElementTimeout { .. } => {
                "The portal markup may have changed, or the page is slow; try a larger \
                 --timeout or --no-headless to inspect the page"
                    .to_string()
            }
            _ => "Re-run with -v for detailed logs".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LoginError>;
