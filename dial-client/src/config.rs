//! Construction-time options shared by every protocol component.

use std::time::Duration;

/// Default timeout for HTTP connects, HTTP reads and the SSDP socket.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1500);

/// Name announced to DIAL servers when no other name is configured.
pub const DEFAULT_FRIENDLY_NAME: &str = "dial-rs";

/// Options passed by reference to the discovery, descriptor and
/// application-control constructors.
///
/// ```
/// use dial_client::ProtocolConfig;
/// use std::time::Duration;
///
/// let config = ProtocolConfig::default()
///     .with_friendly_name("Kitchen Tablet")
///     .with_legacy_compatibility(true)
///     .with_socket_timeout(Duration::from_secs(3));
///
/// assert!(config.legacy_compatibility);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolConfig {
    /// Label the server uses for this controller, sent on start
    pub client_friendly_name: Option<String>,
    /// Suppress the `clientDialVersion` and `friendlyName` query parameters
    /// for servers that reject unknown query parameters
    pub legacy_compatibility: bool,
    /// HTTP connect timeout; `None` leaves the transport default
    pub connect_timeout: Option<Duration>,
    /// HTTP read/write timeout; `None` leaves the transport default
    pub read_timeout: Option<Duration>,
    /// How long discovery keeps collecting SSDP responses
    pub socket_timeout: Duration,
    /// `MX` value of the M-SEARCH request
    pub response_delay: u32,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            client_friendly_name: Some(DEFAULT_FRIENDLY_NAME.to_string()),
            legacy_compatibility: false,
            connect_timeout: Some(DEFAULT_TIMEOUT),
            read_timeout: Some(DEFAULT_TIMEOUT),
            socket_timeout: DEFAULT_TIMEOUT,
            response_delay: 0,
        }
    }
}

impl ProtocolConfig {
    pub fn with_friendly_name(mut self, name: impl Into<String>) -> Self {
        self.client_friendly_name = Some(name.into());
        self
    }

    pub fn without_friendly_name(mut self) -> Self {
        self.client_friendly_name = None;
        self
    }

    pub fn with_legacy_compatibility(mut self, legacy: bool) -> Self {
        self.legacy_compatibility = legacy;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn with_socket_timeout(mut self, timeout: Duration) -> Self {
        self.socket_timeout = timeout;
        self
    }

    pub fn with_response_delay(mut self, seconds: u32) -> Self {
        self.response_delay = seconds;
        self
    }
}
