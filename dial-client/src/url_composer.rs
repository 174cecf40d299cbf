//! URL composition for DIAL resources.
//!
//! Application and instance URLs are derived from the resource URL a device
//! advertises. That base URL may already carry a query string which must
//! survive when request-specific parameters are layered on top of it, so a
//! seeded composer re-appends every inherited query fragment before any new
//! one.

use url::{form_urlencoded, Url};

use crate::error::Result;

const PATH_SEPARATOR: char = '/';
const QUERY_SEPARATOR: char = '&';
const PATH_QUERY_SEPARATOR: char = '?';

/// Immutable URL builder.
///
/// Every method returns a new composer, so a composer seeded from a base
/// resource can be shared and extended independently per request.
///
/// ```
/// use dial_client::UrlComposer;
/// use url::Url;
///
/// let base = Url::parse("http://tv.local:8008/apps?token=1").unwrap();
/// let url = UrlComposer::of(&base)
///     .path("YouTube")
///     .query("clientDialVersion=2.1")
///     .build()
///     .unwrap();
///
/// assert_eq!(url.as_str(), "http://tv.local:8008/apps/YouTube?token=1&clientDialVersion=2.1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlComposer {
    scheme: String,
    host: String,
    port: Option<u16>,
    path: String,
    query: String,
}

impl UrlComposer {
    /// Start from a bare authority with no path and no query.
    pub fn new(scheme: &str, host: &str, port: Option<u16>) -> Self {
        Self {
            scheme: scheme.to_string(),
            host: host.to_string(),
            port,
            path: String::new(),
            query: String::new(),
        }
    }

    /// Seed a composer with the scheme, authority, path and query of `url`.
    pub fn of(url: &Url) -> Self {
        let seeded = Self::new(url.scheme(), url.host_str().unwrap_or_default(), url.port())
            .path(url.path());

        match url.query() {
            Some(query) => query
                .split(PATH_QUERY_SEPARATOR)
                .filter(|part| !part.is_empty())
                .fold(seeded, |composer, part| composer.query(part)),
            None => seeded,
        }
    }

    /// Append a path segment. Leading and trailing separators on the segment
    /// are ignored so that joining never produces empty segments.
    pub fn path(&self, segment: &str) -> Self {
        let mut next = self.clone();
        let segment = segment.trim_matches(PATH_SEPARATOR);

        if segment.is_empty() {
            return next;
        }

        if !next.path.is_empty() {
            next.path.push(PATH_SEPARATOR);
        }
        next.path.push_str(segment);
        next
    }

    /// Append a raw query fragment such as `key=value`.
    pub fn query(&self, fragment: &str) -> Self {
        let mut next = self.clone();

        if next.query.is_empty() {
            next.query.push(PATH_QUERY_SEPARATOR);
        } else {
            next.query.push(QUERY_SEPARATOR);
        }
        next.query.push_str(fragment);
        next
    }

    /// Append a form-encoded `key=value` query fragment.
    pub fn query_pair(&self, key: &str, value: &str) -> Self {
        let fragment = form_urlencoded::Serializer::new(String::new())
            .append_pair(key, value)
            .finish();
        self.query(&fragment)
    }

    /// Assemble the final URL.
    pub fn build(&self) -> Result<Url> {
        let authority = match self.port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        };

        let url = Url::parse(&format!(
            "{}://{}/{}{}",
            self.scheme, authority, self.path, self.query
        ))?;
        Ok(url)
    }
}
