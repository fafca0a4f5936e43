//! Common type definitions shared across the emulator and the client.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use http::Uri;
use http::uri::Authority;

use crate::error::{CoreError, CoreResult};

/// Maximum length of a fully qualified host name.
const MAX_HOSTNAME_LEN: usize = 253;

/// Maximum length of a single host name label.
const MAX_LABEL_LEN: usize = 63;

/// A validated connection endpoint (`"play.min.io"`, `"localhost:9000"` or
/// `"http://local.host:9000"`).
///
/// The endpoint string is kept exactly as given: it is the key under which
/// emulator state is shared between clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct Endpoint(String);

impl Endpoint {
    /// Create a new endpoint.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidEndpoint`] if the endpoint is empty, or is
    /// neither a valid `host[:port]` nor a valid `http`/`https` URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use miniomock_core::Endpoint;
    ///
    /// assert!(Endpoint::new("play.min.io").is_ok());
    /// assert!(Endpoint::new("http://local.host:9000").is_ok());
    /// assert!(Endpoint::new("").is_err());
    /// assert!(Endpoint::new("not a host").is_err());
    /// ```
    pub fn new(endpoint: impl Into<String>) -> CoreResult<Self> {
        let endpoint = endpoint.into();
        if endpoint.is_empty() {
            return Err(CoreError::InvalidEndpoint {
                endpoint,
                reason: "base_url is empty".to_owned(),
            });
        }

        let checked = if endpoint.contains("://") {
            validate_url(&endpoint)
        } else {
            validate_authority(&endpoint)
        };
        if let Err(reason) = checked {
            return Err(CoreError::InvalidEndpoint { endpoint, reason });
        }

        Ok(Self(endpoint))
    }

    /// Get the endpoint as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the endpoint carries an explicit scheme.
    #[must_use]
    pub fn has_scheme(&self) -> bool {
        self.0.contains("://")
    }

    /// The base URL used to build object URLs.
    ///
    /// Endpoints with a scheme are used as-is (minus a trailing slash); bare
    /// hosts get `https://` or `http://` depending on `secure`.
    ///
    /// # Examples
    ///
    /// ```
    /// use miniomock_core::Endpoint;
    ///
    /// let bare = Endpoint::new("localhost:9000").unwrap();
    /// assert_eq!(bare.base_url(false), "http://localhost:9000");
    /// assert_eq!(bare.base_url(true), "https://localhost:9000");
    ///
    /// let full = Endpoint::new("http://local.host:9000/").unwrap();
    /// assert_eq!(full.base_url(true), "http://local.host:9000");
    /// ```
    #[must_use]
    pub fn base_url(&self, secure: bool) -> String {
        if self.has_scheme() {
            self.0.trim_end_matches('/').to_owned()
        } else {
            let scheme = if secure { "https" } else { "http" };
            format!("{scheme}://{}", self.0)
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Endpoint {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

fn validate_url(endpoint: &str) -> Result<(), String> {
    let uri: Uri = endpoint.parse().map_err(|e| format!("{e}"))?;
    match uri.scheme_str() {
        Some("http" | "https") => {}
        Some(other) => return Err(format!("unsupported scheme '{other}'")),
        None => return Err("missing scheme".to_owned()),
    }
    let authority = uri.authority().ok_or_else(|| "missing host".to_owned())?;
    check_authority(authority)
}

fn validate_authority(endpoint: &str) -> Result<(), String> {
    let authority: Authority = endpoint.parse().map_err(|e| format!("{e}"))?;
    check_authority(&authority)
}

fn check_authority(authority: &Authority) -> Result<(), String> {
    if authority.as_str().contains('@') {
        return Err("credentials are not allowed in the endpoint".to_owned());
    }
    // Anything after the host is a port, which must fit in a u16.
    if authority.as_str().len() != authority.host().len() && authority.port_u16().is_none() {
        return Err("invalid port".to_owned());
    }
    validate_host(authority.host())
}

fn validate_host(host: &str) -> Result<(), String> {
    if let Some(inner) = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
        return inner
            .parse::<Ipv6Addr>()
            .map(|_| ())
            .map_err(|_| format!("invalid IPv6 address '{inner}'"));
    }
    if host.parse::<Ipv4Addr>().is_ok() {
        return Ok(());
    }

    let host = host.strip_suffix('.').unwrap_or(host);
    if host.is_empty() || host.len() > MAX_HOSTNAME_LEN {
        return Err(format!("invalid host name length: {}", host.len()));
    }
    for label in host.split('.') {
        let valid = !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
            && !label.starts_with('-')
            && !label.ends_with('-');
        if !valid {
            return Err(format!("invalid host name label '{label}'"));
        }
    }
    Ok(())
}
