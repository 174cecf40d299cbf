//! Test helpers for fixture-based discovery tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use dial_discovery::{Device, DeviceDescriptor, DeviceDescriptorResolver, MulticastDiscovery};
use mockito::{Mock, ServerGuard};
use url::Url;

/// A device descriptor fixture served by a mock HTTP server
#[derive(Debug, Clone)]
pub struct DescriptorFixture {
    pub name: String,
    pub xml_content: String,
}

impl DescriptorFixture {
    /// Load a fixture from the fixtures directory
    pub fn load(filename: &str) -> Self {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("tests/fixtures");
        path.push(filename);

        let xml_content = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", filename, e));

        Self {
            name: filename.to_string(),
            xml_content,
        }
    }

    /// Serve the fixture at `path` with the given `Application-URL` header
    pub fn serve(&self, server: &mut ServerGuard, path: &str, application_url: &str) -> Mock {
        server
            .mock("GET", path)
            .with_status(200)
            .with_header("content-type", "text/xml")
            .with_header("Application-URL", application_url)
            .with_body(&self.xml_content)
            .create()
    }
}

/// Create an SSDP search response for a DIAL server
pub fn ssdp_response(location: &str, usn: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\n\
         CACHE-CONTROL: max-age=1800\r\n\
         DATE: Mon, 19 Oct 2026 10:00:00 GMT\r\n\
         EXT:\r\n\
         LOCATION: {}\r\n\
         SERVER: Linux/3.8.13+, UPnP/1.0, Portable SDK for UPnP devices/1.6.18\r\n\
         ST: urn:dial-multiscreen-org:service:dial:1\r\n\
         USN: {}\r\n\
         BOOTID.UPNP.ORG: 7339\r\n\
         CONFIGID.UPNP.ORG: 7339\r\n\r\n",
        location, usn
    )
}

/// Multicast stage returning a fixed candidate list
pub struct FakeSearch {
    pub devices: Vec<Device>,
}

impl MulticastDiscovery for FakeSearch {
    fn discover(&self) -> Vec<Device> {
        self.devices.clone()
    }
}

/// Resolver answering from a map keyed by descriptor URL, recording lookups
#[derive(Default)]
pub struct FakeResolver {
    pub descriptors: HashMap<String, DeviceDescriptor>,
    pub requested: RefCell<Vec<String>>,
}

impl FakeResolver {
    pub fn with(mut self, descriptor_url: &str, friendly_name: &str, application_url: &str) -> Self {
        self.descriptors.insert(
            descriptor_url.to_string(),
            DeviceDescriptor {
                friendly_name: friendly_name.to_string(),
                application_url: Url::parse(application_url).unwrap(),
            },
        );
        self
    }
}

impl DeviceDescriptorResolver for FakeResolver {
    fn resolve(&self, descriptor_url: &Url) -> Option<DeviceDescriptor> {
        self.requested.borrow_mut().push(descriptor_url.to_string());
        self.descriptors.get(descriptor_url.as_str()).cloned()
    }
}

/// An unresolved candidate as produced by the multicast stage
pub fn candidate(usn: &str, descriptor_url: &str) -> Device {
    Device {
        unique_service_name: usn.to_string(),
        descriptor_url: Url::parse(descriptor_url).unwrap(),
        application_url: None,
        friendly_name: None,
        server: None,
        wake_on_lan_support: false,
        wake_on_lan_mac: None,
        wake_on_lan_timeout: 0,
    }
}
