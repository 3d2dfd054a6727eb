use serde_json::json;
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Browser launch settings, immutable for the lifetime of one run.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
    pub page_load_timeout: Duration,
}

impl BrowserConfig {
    pub fn new(headless: bool) -> Self {
        Self {
            headless,
            window_width: 1920,
            window_height: 1080,
            page_load_timeout: Duration::from_secs(60),
        }
    }

    /// Chrome launch arguments. The portal serves plain HTTP and some mixed
    /// content, so web security and insecure-content blocking are relaxed.
    pub fn chrome_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if self.headless {
            args.push("--headless".to_string());
        }

        args.push("--no-sandbox".to_string());
        args.push("--disable-dev-shm-usage".to_string());
        args.push("--disable-gpu".to_string());
        args.push(format!(
            "--window-size={},{}",
            self.window_width, self.window_height
        ));
        args.push("--disable-web-security".to_string());
        args.push("--allow-running-insecure-content".to_string());
        args.push("--disable-extensions".to_string());
        args.push(format!("--user-agent={}", USER_AGENT));

        args
    }

    /// WebDriver capabilities for a Chrome/Chromium session.
    pub fn capabilities(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut caps = serde_json::Map::new();
        caps.insert(
            "goog:chromeOptions".to_string(),
            json!({ "args": self.chrome_args() }),
        );
        caps
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_headless() {
        let config = BrowserConfig::default();
        assert!(config.headless);
        assert!(config.chrome_args().contains(&"--headless".to_string()));
    }

    #[test]
    fn test_no_headless_omits_flag() {
        let config = BrowserConfig::new(false);
        let args = config.chrome_args();
        assert!(!args.iter().any(|a| a.starts_with("--headless")));
        // The remaining launch flags stay in place either way.
        assert!(args.contains(&"--no-sandbox".to_string()));
        assert!(args.contains(&"--disable-gpu".to_string()));
    }

    #[test]
    fn test_window_size_argument() {
        let config = BrowserConfig::default();
        assert!(config
            .chrome_args()
            .contains(&"--window-size=1920,1080".to_string()));
    }

    #[test]
    fn test_capabilities_carry_chrome_args() {
        let config = BrowserConfig::default();
        let caps = config.capabilities();
        let args = caps["goog:chromeOptions"]["args"].as_array().unwrap();
        assert!(args.iter().any(|a| a == "--headless"));
        assert!(args
            .iter()
            .any(|a| a.as_str().unwrap().starts_with("--user-agent=")));
    }
}
