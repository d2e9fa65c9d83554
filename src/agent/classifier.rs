//! Browser classification.
//!
//! A pure, ordered substring match over the lowercased user-agent string.
//! Non-browser signatures run first: nearly every tool and bot embeds a
//! browser token somewhere ("Mozilla/5.0 ... Googlebot"), so checking
//! browser tokens first would misclassify them. The result selects the
//! response encoding and nothing else.

/// Signature fragments identifying non-browser clients. Checked first.
const NON_BROWSER_SIGNATURES: &[&str] = &[
    "curl",
    "wget",
    "python",
    "java",
    "go-http-client",
    "okhttp",
    "httpie",
    "postman",
    "bot",
    "crawler",
    "spider",
];

/// Signature fragments identifying browsers. Checked second.
const BROWSER_SIGNATURES: &[&str] = &["mozilla", "chrome", "safari", "firefox", "edge", "opera"];

/// How a client was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentClass {
    /// Interactive browser; gets the human-readable shape
    Browser,
    /// Everything else; gets JSON
    NonBrowser,
}

impl AgentClass {
    /// True for [`AgentClass::Browser`].
    pub fn is_browser(&self) -> bool {
        matches!(self, AgentClass::Browser)
    }
}

/// Classifies a user-agent string.
///
/// Empty or absent agents are non-browsers, as is anything matching no
/// signature at all. Matching is case-insensitive.
pub fn classify_user_agent(user_agent: Option<&str>) -> AgentClass {
    let Some(user_agent) = user_agent else {
        return AgentClass::NonBrowser;
    };
    if user_agent.is_empty() {
        return AgentClass::NonBrowser;
    }

    let lowered = user_agent.to_lowercase();
    if NON_BROWSER_SIGNATURES
        .iter()
        .any(|sig| lowered.contains(sig))
    {
        return AgentClass::NonBrowser;
    }
    if BROWSER_SIGNATURES.iter().any(|sig| lowered.contains(sig)) {
        return AgentClass::Browser;
    }
    AgentClass::NonBrowser
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                             (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";
    const FIREFOX_UA: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

    #[test]
    fn test_browsers_classify_as_browser() {
        assert_eq!(classify_user_agent(Some(CHROME_UA)), AgentClass::Browser);
        assert_eq!(classify_user_agent(Some(FIREFOX_UA)), AgentClass::Browser);
        assert!(classify_user_agent(Some(CHROME_UA)).is_browser());
    }

    #[test]
    fn test_tools_classify_as_non_browser() {
        assert_eq!(
            classify_user_agent(Some("curl/8.5.0")),
            AgentClass::NonBrowser
        );
        assert_eq!(
            classify_user_agent(Some("Wget/1.21.4")),
            AgentClass::NonBrowser
        );
        assert_eq!(
            classify_user_agent(Some("python-requests/2.32.0")),
            AgentClass::NonBrowser
        );
        assert_eq!(
            classify_user_agent(Some("Go-http-client/2.0")),
            AgentClass::NonBrowser
        );
    }

    #[test]
    fn test_non_browser_signatures_win_over_browser_tokens() {
        // Bots advertise Mozilla compatibility; the bot signature must win
        let googlebot = "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";
        assert_eq!(classify_user_agent(Some(googlebot)), AgentClass::NonBrowser);

        let crawler = "Mozilla/5.0 (compatible; SomeCrawler/1.0)";
        assert_eq!(classify_user_agent(Some(crawler)), AgentClass::NonBrowser);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(
            classify_user_agent(Some("CURL/8.5.0")),
            AgentClass::NonBrowser
        );
        assert_eq!(
            classify_user_agent(Some("MOZILLA/5.0 FIREFOX")),
            AgentClass::Browser
        );
    }

    #[test]
    fn test_empty_and_absent_are_non_browser() {
        assert_eq!(classify_user_agent(Some("")), AgentClass::NonBrowser);
        assert_eq!(classify_user_agent(None), AgentClass::NonBrowser);
    }

    #[test]
    fn test_unmatched_agent_defaults_to_non_browser() {
        assert_eq!(
            classify_user_agent(Some("MyCustomClient/1.0")),
            AgentClass::NonBrowser
        );
    }
}
