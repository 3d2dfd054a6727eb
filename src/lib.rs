pub mod config;
pub mod core;
pub mod utils;

pub use config::{BrowserConfig, CliConfig, Credentials, PORTAL_URL};
pub use core::classifier::{classify_page, LoginStatus};
pub use core::session::{LoginOutcome, PortalSession};
pub use utils::error::{LoginError, Result};
