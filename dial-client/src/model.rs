//! Application data model.

use url::Url;
use xmltree::Element;

use crate::error::{ApplicationError, Result};

/// Well-known DIAL application names.
pub const NETFLIX: &str = "Netflix";
pub const YOUTUBE: &str = "YouTube";
pub const AMAZON_INSTANT_VIDEO: &str = "AmazonInstantVideo";

const INSTALLABLE: &str = "installable";

/// Lifecycle state reported by a DIAL server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationState {
    Running,
    Stopped,
    Hidden,
    /// Not installed on the device; the URL triggers the installation
    Installable(Url),
}

impl ApplicationState {
    /// Map the text of a `<state>` element.
    ///
    /// Matching is case-insensitive. `installable=<url>` carries the install
    /// URL in the remainder after the first `=`.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ApplicationError::Protocol(
                "App exists but has no state".to_string(),
            ));
        }

        let lowercase = value.to_ascii_lowercase();
        if lowercase.starts_with(INSTALLABLE) {
            let install_url = value
                .split_once('=')
                .map(|(_, url)| url.trim())
                .filter(|url| !url.is_empty())
                .ok_or_else(|| {
                    ApplicationError::Protocol(format!("Installable state without install URL: {}", value))
                })?;
            let install_url = Url::parse(install_url).map_err(|e| {
                ApplicationError::Protocol(format!("Invalid install URL '{}': {}", install_url, e))
            })?;
            return Ok(ApplicationState::Installable(install_url));
        }

        match lowercase.as_str() {
            "running" => Ok(ApplicationState::Running),
            "stopped" => Ok(ApplicationState::Stopped),
            "hidden" => Ok(ApplicationState::Hidden),
            _ => Err(ApplicationError::Protocol(format!("Unknown state: {}", value))),
        }
    }

    pub fn install_url(&self) -> Option<&Url> {
        match self {
            ApplicationState::Installable(url) => Some(url),
            _ => None,
        }
    }

    /// Whether an instance exists that can be addressed for stop or hide.
    pub fn has_instance(&self) -> bool {
        matches!(self, ApplicationState::Running | ApplicationState::Hidden)
    }
}

/// Snapshot of one application as reported by a status request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    /// Application name, also its path segment under the resource URL
    pub name: String,
    pub state: ApplicationState,
    /// Whether the server lets a controller stop the application
    pub allow_stop: bool,
    /// URL of the running or hidden instance
    pub instance_url: Option<Url>,
    /// Application-defined `<additionalData>` element, untouched
    pub additional_data: Option<Element>,
}

impl Application {
    pub fn install_url(&self) -> Option<&Url> {
        self.state.install_url()
    }
}

/// Payload sent with a start request.
///
/// The empty content sends a zero-length body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationContent {
    content_type: Option<String>,
    data: Option<Vec<u8>>,
}

impl ApplicationContent {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(content_type: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            data: Some(data.into()),
        }
    }

    /// `text/plain; charset="utf-8"` content, the format most DIAL
    /// applications expect for launch parameters.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new("text/plain; charset=\"utf-8\"", text.into().into_bytes())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }
}
