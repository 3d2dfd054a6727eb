//! Heuristic login-state detection from raw portal markup.
//!
//! The portal does not expose a stable API, so the state is guessed by
//! counting known substrings (Chinese UI labels and element ids) in the page
//! source. Thresholds were chosen empirically against this portal's markup
//! and will not survive a redesign of the page.

use tracing::{info, warn};

/// Literal markers of the post-login success page.
const SUCCESS_PAGE_MARKERS: [&str; 2] = ["page   : 'success'", "page:\"success\""];

/// Indicators of an established session: connection duration, traffic usage,
/// logout button, disconnect text, username display.
const SUCCESS_INDICATORS: [&str; 5] = ["已连接", "已用流量", "btn-logout", "断开连接", "user_name"];

/// Indicators of the login form: field ids, submit button id, and the
/// username/password labels.
const LOGIN_INDICATORS: [&str; 5] = [
    "id=\"username\"",
    "id=\"password\"",
    "id=\"login-account\"",
    "用户名",
    "密码",
];

/// Minimum number of matching indicators before a state is assumed.
const INDICATOR_THRESHOLD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStatus {
    AlreadyLoggedIn,
    NeedsLogin,
    Unknown,
}

fn count_indicators(page_source: &str, indicators: &[&str]) -> usize {
    indicators
        .iter()
        .filter(|indicator| page_source.contains(*indicator))
        .count()
}

/// Classify the login state from raw page markup.
///
/// Success markers are checked before login-form markers, so a success page
/// that still mentions the username/password labels classifies as logged in.
pub fn classify_page(page_source: &str) -> LoginStatus {
    if SUCCESS_PAGE_MARKERS
        .iter()
        .any(|marker| page_source.contains(marker))
    {
        info!("Detected success page - already logged in");
        return LoginStatus::AlreadyLoggedIn;
    }

    let success_count = count_indicators(page_source, &SUCCESS_INDICATORS);
    if success_count >= INDICATOR_THRESHOLD {
        info!(
            "Detected {} success indicators - likely already logged in",
            success_count
        );
        return LoginStatus::AlreadyLoggedIn;
    }

    let login_count = count_indicators(page_source, &LOGIN_INDICATORS);
    if login_count >= INDICATOR_THRESHOLD {
        info!(
            "Detected {} login indicators - login form present",
            login_count
        );
        return LoginStatus::NeedsLogin;
    }

    warn!("Could not determine login status from page content");
    LoginStatus::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_form_markup_needs_login() {
        let page = r#"
            <form>
              <label>用户名</label>
              <input id="username" type="text">
              <label>密码</label>
              <input id="password" type="password">
              <button id="login-account">登录</button>
            </form>
        "#;
        assert_eq!(classify_page(page), LoginStatus::NeedsLogin);
    }

    #[test]
    fn test_success_page_marker_wins_regardless_of_other_content() {
        // Even with a full login form in the markup, the literal success-page
        // marker decides the state.
        let page = r#"
            <script>var state = { page   : 'success' };</script>
            <input id="username"><input id="password">
            <button id="login-account"></button> 用户名 密码
        "#;
        assert_eq!(classify_page(page), LoginStatus::AlreadyLoggedIn);

        let compact = r#"<script>x={page:"success"}</script>"#;
        assert_eq!(classify_page(compact), LoginStatus::AlreadyLoggedIn);
    }

    #[test]
    fn test_post_login_indicators_mean_already_logged_in() {
        let page = r#"
            <div>已连接 03:12:45</div>
            <div>已用流量 1.2 GB</div>
            <button class="btn-logout">断开连接</button>
        "#;
        assert_eq!(classify_page(page), LoginStatus::AlreadyLoggedIn);
    }

    #[test]
    fn test_two_indicators_are_not_enough() {
        let needs_more_login = r#"<input id="username"><label>密码</label>"#;
        assert_eq!(classify_page(needs_more_login), LoginStatus::Unknown);

        let needs_more_success = "已连接 user_name";
        assert_eq!(classify_page(needs_more_success), LoginStatus::Unknown);
    }

    #[test]
    fn test_unrelated_markup_is_unknown() {
        assert_eq!(
            classify_page("<html><body>404 Not Found</body></html>"),
            LoginStatus::Unknown
        );
        assert_eq!(classify_page(""), LoginStatus::Unknown);
    }

    #[test]
    fn test_success_indicators_checked_before_login_indicators() {
        // A status page can mention both; three of each resolves to logged in.
        let page = r#"
            <div>已连接</div><div>已用流量</div><span class="user_name"></span>
            <input id="username"><input id="password"><label>用户名</label>
        "#;
        assert_eq!(classify_page(page), LoginStatus::AlreadyLoggedIn);
    }
}
