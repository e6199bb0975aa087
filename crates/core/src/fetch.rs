//! Cookie-carrying HTTP session.
//!
//! The publication gates the weekly edition behind a login, so the session
//! rides on cookies lifted from a local browser store. Every fetch expects
//! HTTP 200; anything else is fatal with no retry. Redirects are followed
//! transparently and the final resolved URL is what callers reason about.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::cookie::Jar;
use url::Url;

use crate::{DispatchError, Result};

/// Supported browser cookie stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieSource {
    Firefox,
    Chrome,
    Edge,
    Opera,
}

impl FromStr for CookieSource {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "firefox" => Ok(Self::Firefox),
            "chrome" => Ok(Self::Chrome),
            "edge" => Ok(Self::Edge),
            "opera" => Ok(Self::Opera),
            other => Err(DispatchError::Config(format!(
                "Unsupported --cookie-source name '{other}'. Supported browsers: 'firefox', 'chrome', 'edge', 'opera'"
            ))),
        }
    }
}

impl std::fmt::Display for CookieSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Firefox => "firefox",
            Self::Chrome => "chrome",
            Self::Edge => "edge",
            Self::Opera => "opera",
        };
        write!(f, "{}", name)
    }
}

/// A cookie lifted from a browser store, reduced to what the session needs.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
}

/// Read authentication cookies for `domains` from the named browser store.
pub fn browser_cookies(source: CookieSource, domains: &[&str]) -> Result<Vec<SessionCookie>> {
    let wanted: Option<Vec<String>> = Some(domains.iter().map(|d| d.to_string()).collect());

    let raw = match source {
        CookieSource::Firefox => rookie::firefox(wanted),
        CookieSource::Chrome => rookie::chrome(wanted),
        CookieSource::Edge => rookie::edge(wanted),
        CookieSource::Opera => rookie::opera(wanted),
    }
    .map_err(|e| DispatchError::Config(format!("could not read {source} cookies: {e}")))?;

    Ok(raw
        .into_iter()
        .map(|c| SessionCookie { name: c.name, value: c.value, domain: c.domain, path: c.path })
        .collect())
}

/// Configuration for the HTTP session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { user_agent: crate::config::default_user_agent(), timeout: 60 }
    }
}

/// A fetched page: body text plus the final post-redirect URL.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub text: String,
    pub url: String,
}

/// Blocking HTTP session carrying browser cookies and a fixed User-Agent.
pub struct Session {
    client: Client,
}

impl Session {
    /// Build a session from configuration and pre-loaded cookies.
    pub fn new(config: &SessionConfig, cookies: &[SessionCookie]) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        for cookie in cookies {
            let origin = format!("https://{}/", cookie.domain.trim_start_matches('.'));
            let Ok(url) = Url::parse(&origin) else { continue };
            jar.add_cookie_str(
                &format!(
                    "{}={}; Domain={}; Path={}",
                    cookie.name, cookie.value, cookie.domain, cookie.path
                ),
                &url,
            );
        }

        let client = Client::builder()
            .cookie_provider(jar)
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(DispatchError::Http)?;

        Ok(Self { client })
    }

    /// Fetch a page, following redirects.
    ///
    /// Returns the body and the final resolved URL. Any status other than
    /// 200 aborts with [`DispatchError::HttpStatus`].
    pub fn get(&self, url: &str) -> Result<FetchedPage> {
        let parsed = Url::parse(url).map_err(|e| DispatchError::InvalidUrl(format!("{url}: {e}")))?;

        let response = self.client.get(parsed).send().map_err(DispatchError::Http)?;
        let status = response.status().as_u16();
        let final_url = response.url().to_string();

        if status != 200 {
            return Err(DispatchError::HttpStatus { status, url: final_url });
        }

        let text = response.text().map_err(DispatchError::Http)?;
        Ok(FetchedPage { text, url: final_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_source_from_str() {
        assert_eq!(CookieSource::from_str("firefox").unwrap(), CookieSource::Firefox);
        assert_eq!(CookieSource::from_str("Chrome").unwrap(), CookieSource::Chrome);
        assert_eq!(CookieSource::from_str("EDGE").unwrap(), CookieSource::Edge);
        assert_eq!(CookieSource::from_str("opera").unwrap(), CookieSource::Opera);
    }

    #[test]
    fn test_unsupported_cookie_source_is_config_error() {
        let result = CookieSource::from_str("safari");
        assert!(matches!(result, Err(DispatchError::Config(_))));
        assert!(result.unwrap_err().to_string().contains("safari"));
    }

    #[test]
    fn test_session_config_default() {
        let config = SessionConfig::default();
        assert!(config.user_agent.starts_with("Dispatch/"));
        assert_eq!(config.timeout, 60);
    }

    #[test]
    fn test_session_builds_with_cookies() {
        let cookies = vec![SessionCookie {
            name: "auth".to_string(),
            value: "token".to_string(),
            domain: ".economist.com".to_string(),
            path: "/".to_string(),
        }];
        assert!(Session::new(&SessionConfig::default(), &cookies).is_ok());
    }

    #[test]
    fn test_get_invalid_url() {
        let session = Session::new(&SessionConfig::default(), &[]).unwrap();
        let result = session.get("not a url");
        assert!(matches!(result, Err(DispatchError::InvalidUrl(_))));
    }
}
