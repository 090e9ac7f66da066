//! Base URL resolution for the terms API.
//!
//! Order of precedence:
//! 1. A non-empty override (the `API_URL` environment variable) is used verbatim.
//! 2. A page hostname that is a dotted-decimal IPv4 literal is kept as the API host.
//! 3. Any other hostname is replaced with `localhost`.
//!
//! Branch 3 means a page served from a DNS name talks to `localhost:3001` unless
//! an override is configured. That matches the LAN/dev setup the API was built
//! for; production deployments behind a domain must set `API_URL`.

use url::Url;

use crate::error::ClientError;

pub const API_PORT: u16 = 3001;
pub const API_PATH: &str = "/api";
pub const API_URL_ENV: &str = "API_URL";
pub const API_URL_ENV_PREFIXED: &str = "APP__API_URL";

/// The page the client runs on, in `window.location` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    /// Scheme with trailing colon, e.g. `"http:"`.
    pub protocol: String,
    pub hostname: String,
    pub pathname: String,
}

impl PageLocation {
    pub fn new(protocol: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            hostname: hostname.into(),
            pathname: "/".into(),
        }
    }

    pub fn with_pathname(mut self, pathname: impl Into<String>) -> Self {
        self.pathname = pathname.into();
        self
    }

    pub fn parse(page_url: &str) -> Result<Self, ClientError> {
        let url = Url::parse(page_url)?;
        let hostname = url
            .host_str()
            .ok_or_else(|| ClientError::InvalidLocation(format!("'{page_url}' has no host")))?;
        Ok(Self::new(format!("{}:", url.scheme()), hostname).with_pathname(url.path()))
    }
}

pub fn resolve_base_url(override_url: Option<&str>, protocol: &str, hostname: &str) -> String {
    if let Some(url) = override_url.filter(|url| !url.is_empty()) {
        return url.to_string();
    }

    let host = if is_ipv4_literal(hostname) {
        hostname
    } else {
        "localhost"
    };
    let scheme = protocol.trim_end_matches(':');
    format!("{scheme}://{host}:{API_PORT}{API_PATH}")
}

/// Reads the override from the environment and resolves against `location`.
pub fn resolve_for_location(location: &PageLocation) -> String {
    resolve_for_location_with(location, |key| std::env::var(key).ok())
}

/// `APP__API_URL` wins over `API_URL`; an empty value counts as unset.
pub(crate) fn resolve_for_location_with(
    location: &PageLocation,
    env: impl Fn(&str) -> Option<String>,
) -> String {
    let override_url = env(API_URL_ENV_PREFIXED)
        .filter(|url| !url.is_empty())
        .or_else(|| env(API_URL_ENV));
    resolve_base_url(
        override_url.as_deref(),
        &location.protocol,
        &location.hostname,
    )
}

/// Four dot-separated groups of ASCII digits. Octet range is not checked.
fn is_ipv4_literal(hostname: &str) -> bool {
    let groups: Vec<&str> = hostname.split('.').collect();
    groups.len() == 4
        && groups
            .iter()
            .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_is_used_verbatim() {
        assert_eq!(
            resolve_base_url(Some("http://x:9"), "https:", "example.com"),
            "http://x:9"
        );
    }

    #[test]
    fn empty_override_is_treated_as_missing() {
        assert_eq!(
            resolve_base_url(Some(""), "http:", "example.com"),
            "http://localhost:3001/api"
        );
    }

    #[test]
    fn ipv4_hostname_is_kept() {
        assert_eq!(
            resolve_base_url(None, "http:", "192.168.1.5"),
            "http://192.168.1.5:3001/api"
        );
    }

    #[test]
    fn dns_hostname_falls_back_to_localhost() {
        assert_eq!(
            resolve_base_url(None, "https:", "example.com"),
            "https://localhost:3001/api"
        );
    }

    #[test]
    fn bare_scheme_is_accepted() {
        assert_eq!(
            resolve_base_url(None, "http", "10.0.0.7"),
            "http://10.0.0.7:3001/api"
        );
    }

    #[test]
    fn partial_or_mixed_dotted_hosts_are_not_ipv4() {
        assert!(!is_ipv4_literal("10.0.0"));
        assert!(!is_ipv4_literal("10.0.0.1.nip.io"));
        assert!(!is_ipv4_literal("a.b.c.d"));
        assert!(!is_ipv4_literal("1..2.3"));
        assert!(is_ipv4_literal("127.0.0.1"));
    }

    #[test]
    fn parses_page_location_from_url() {
        let location = PageLocation::parse("http://192.168.1.5:5173/terms?lang=sv").expect("url");
        assert_eq!(
            location,
            PageLocation::new("http:", "192.168.1.5").with_pathname("/terms")
        );
        assert_eq!(
            resolve_base_url(None, &location.protocol, &location.hostname),
            "http://192.168.1.5:3001/api"
        );
    }

    type EnvPairs = &'static [(&'static str, &'static str)];

    fn env_from(pairs: EnvPairs) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn prefixed_env_override_wins() {
        let location = PageLocation::new("http:", "192.168.1.5");
        let env = env_from(&[
            (API_URL_ENV, "http://short:1/api"),
            (API_URL_ENV_PREFIXED, "http://prefixed:2/api"),
        ]);
        assert_eq!(
            resolve_for_location_with(&location, env),
            "http://prefixed:2/api"
        );
    }

    #[test]
    fn empty_prefixed_env_falls_back_to_short_name() {
        let location = PageLocation::new("http:", "192.168.1.5");
        let env = env_from(&[
            (API_URL_ENV, "http://short:1/api"),
            (API_URL_ENV_PREFIXED, ""),
        ]);
        assert_eq!(resolve_for_location_with(&location, env), "http://short:1/api");
    }

    #[test]
    fn empty_env_overrides_use_the_page_location() {
        let env = env_from(&[(API_URL_ENV, ""), (API_URL_ENV_PREFIXED, "")]);
        assert_eq!(
            resolve_for_location_with(&PageLocation::new("https:", "example.com"), &env),
            "https://localhost:3001/api"
        );
        assert_eq!(
            resolve_for_location_with(&PageLocation::new("http:", "10.0.0.7"), &env),
            "http://10.0.0.7:3001/api"
        );
    }

    #[test]
    fn rejects_page_url_without_host() {
        let err = PageLocation::parse("data:text/plain,hello").expect_err("no host");
        assert!(matches!(err, ClientError::InvalidLocation(_)));
    }
}
