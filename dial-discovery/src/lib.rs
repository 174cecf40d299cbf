//! DIAL device discovery library
//!
//! This crate finds DIAL (DIscovery And Launch) servers such as smart TVs and
//! streaming sticks on the local network using SSDP, then resolves each
//! device's UPnP descriptor to learn the URL of its application resource.
//!
//! # Quick Start
//!
//! ```no_run
//! use dial_discovery::get;
//!
//! for device in get() {
//!     println!("Found {:?} at {:?}", device.friendly_name, device.application_url);
//! }
//! ```
//!
//! Discovery is soft-fail: network problems produce fewer (or no) devices,
//! never an error.

pub mod descriptor;
mod device;
mod discovery;
mod error;
pub mod ssdp;

pub use descriptor::{DeviceDescriptor, DeviceDescriptorResolver, HttpDescriptorResolver};
pub use device::Device;
pub use discovery::{DeviceDiscovery, DiscoveryIterator};
pub use error::{DiscoveryError, Result};
pub use ssdp::{MulticastDiscovery, SsdpDiscovery};

use dial_client::ProtocolConfig;
use tracing::warn;

/// Discover all DIAL devices with the default configuration.
///
/// Blocks for the SSDP socket timeout (1.5 seconds by default) plus one
/// descriptor round-trip per responding device.
pub fn get() -> Vec<Device> {
    get_with_config(&ProtocolConfig::default())
}

/// Discover all DIAL devices with a custom configuration.
///
/// # Examples
///
/// ```no_run
/// use dial_client::ProtocolConfig;
/// use dial_discovery::get_with_config;
/// use std::time::Duration;
///
/// let config = ProtocolConfig::default()
///     .with_socket_timeout(Duration::from_secs(3))
///     .with_response_delay(2);
///
/// let devices = get_with_config(&config);
/// println!("Found {} device(s)", devices.len());
/// ```
pub fn get_with_config(config: &ProtocolConfig) -> Vec<Device> {
    match DeviceDiscovery::new(config) {
        Ok(discovery) => discovery.discover_all(),
        Err(e) => {
            warn!("Discovery could not be set up: {}", e);
            Vec::new()
        }
    }
}
