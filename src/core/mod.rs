pub mod classifier;
pub mod session;
pub mod webdriver;

pub use classifier::{classify_page, LoginStatus};
pub use session::{LoginOutcome, PortalSession};
