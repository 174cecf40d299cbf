//! UPnP device descriptor resolution.
//!
//! The descriptor response carries the one thing DIAL needs, the
//! `Application-URL` header. The XML body only contributes the friendly name
//! and is read on a best-effort basis.

use dial_client::{xml, ProtocolConfig};
use tracing::warn;
use url::Url;
use xmltree::Element;

use crate::error::{DiscoveryError, Result};

/// Header naming the DIAL application resource
pub const APPLICATION_URL_HEADER: &str = "Application-URL";

/// What a device descriptor contributes to a [`crate::Device`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    /// `friendlyName` of the descriptor, empty when unavailable
    pub friendly_name: String,
    pub application_url: Url,
}

impl DeviceDescriptor {
    /// Build a descriptor from the mandatory application URL and the
    /// descriptor body. An unparsable body leaves the friendly name empty.
    pub fn from_xml(application_url: Url, body: &str) -> Self {
        let friendly_name = match Element::parse(body.as_bytes()) {
            Ok(document) => xml::text_of(&document, "friendlyName"),
            Err(e) => {
                warn!("Error while parsing device descriptor: {}", e);
                String::new()
            }
        };

        Self {
            friendly_name,
            application_url,
        }
    }
}

/// Resolves a descriptor URL into a [`DeviceDescriptor`].
///
/// Implementations never fail outward: any problem yields `None`.
pub trait DeviceDescriptorResolver {
    fn resolve(&self, descriptor_url: &Url) -> Option<DeviceDescriptor>;
}

impl<T: DeviceDescriptorResolver + ?Sized> DeviceDescriptorResolver for &T {
    fn resolve(&self, descriptor_url: &Url) -> Option<DeviceDescriptor> {
        (**self).resolve(descriptor_url)
    }
}

/// Fetches descriptors with a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpDescriptorResolver {
    http_client: reqwest::blocking::Client,
}

impl HttpDescriptorResolver {
    pub fn new(config: &ProtocolConfig) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.read_timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http_client })
    }

    fn fetch(&self, descriptor_url: &Url) -> Result<DeviceDescriptor> {
        let response = self
            .http_client
            .get(descriptor_url.as_str())
            .send()
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to fetch device descriptor: {}", e)))?;

        if !response.status().is_success() {
            return Err(DiscoveryError::NetworkError(format!(
                "Device descriptor request failed: HTTP {}",
                response.status()
            )));
        }

        let application_url = response
            .headers()
            .get(APPLICATION_URL_HEADER)
            .ok_or_else(|| DiscoveryError::InvalidDevice("Server didn't return Application-URL".to_string()))?
            .to_str()
            .map_err(|e| DiscoveryError::ParseError(format!("Unreadable Application-URL header: {}", e)))?;

        let application_url = Url::parse(application_url.trim())
            .map_err(|e| DiscoveryError::ParseError(format!("Invalid Application-URL '{}': {}", application_url, e)))?;

        let body = match response.text() {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read device descriptor body: {}", e);
                String::new()
            }
        };

        Ok(DeviceDescriptor::from_xml(application_url, &body))
    }
}

impl DeviceDescriptorResolver for HttpDescriptorResolver {
    fn resolve(&self, descriptor_url: &Url) -> Option<DeviceDescriptor> {
        if descriptor_url.scheme() != "http" {
            warn!("Only http is supported for device descriptor resolution: {}", descriptor_url);
            return None;
        }

        match self.fetch(descriptor_url) {
            Ok(descriptor) => Some(descriptor),
            Err(e) => {
                warn!("Could not get device descriptor {}: {}", descriptor_url, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn application_url() -> Url {
        Url::parse("http://192.168.1.20:8008/apps").unwrap()
    }

    #[test]
    fn test_descriptor_from_xml() {
        let xml = r#"<?xml version="1.0"?>
<root xmlns="urn:schemas-upnp-org:device-1-0">
  <specVersion><major>1</major><minor>0</minor></specVersion>
  <device>
    <deviceType>urn:dial-multiscreen-org:device:dial:1</deviceType>
    <friendlyName>Living Room TV</friendlyName>
    <manufacturer>Google Inc.</manufacturer>
    <modelName>Eureka Dongle</modelName>
    <UDN>uuid:0f4e1c2a-5b6d-4c1e-9a3f-7d2b8e6a1c90</UDN>
  </device>
</root>"#;

        let descriptor = DeviceDescriptor::from_xml(application_url(), xml);

        assert_eq!(descriptor.friendly_name, "Living Room TV");
        assert_eq!(descriptor.application_url, application_url());
    }

    #[test]
    fn test_descriptor_from_malformed_xml_keeps_application_url() {
        let descriptor = DeviceDescriptor::from_xml(application_url(), "<root><device>");

        assert_eq!(descriptor.friendly_name, "");
        assert_eq!(descriptor.application_url, application_url());
    }

    #[test]
    fn test_descriptor_without_friendly_name() {
        let descriptor = DeviceDescriptor::from_xml(application_url(), "<root><device/></root>");
        assert_eq!(descriptor.friendly_name, "");
    }

    #[test]
    fn test_non_http_scheme_is_rejected() {
        let resolver = HttpDescriptorResolver::new(&ProtocolConfig::default()).unwrap();

        let https = Url::parse("https://192.168.1.20/dd.xml").unwrap();
        let file = Url::parse("file:///etc/dd.xml").unwrap();

        assert_eq!(resolver.resolve(&https), None);
        assert_eq!(resolver.resolve(&file), None);
    }
}
