//! Discovery orchestration.
//!
//! This module combines the two discovery stages:
//! 1. An SSDP M-SEARCH collects candidate devices
//! 2. Each candidate's descriptor is fetched to learn its application URL
//!
//! Candidates are resolved one after another. A candidate whose descriptor
//! cannot be resolved is dropped; it cannot be controlled without an
//! application URL.

use dial_client::ProtocolConfig;
use tracing::debug;

use crate::descriptor::{DeviceDescriptorResolver, HttpDescriptorResolver};
use crate::device::Device;
use crate::error::Result;
use crate::ssdp::{MulticastDiscovery, SsdpDiscovery};

/// Finds fully resolved DIAL devices.
///
/// # Examples
///
/// ```no_run
/// use dial_client::ProtocolConfig;
/// use dial_discovery::DeviceDiscovery;
///
/// let discovery = DeviceDiscovery::new(&ProtocolConfig::default())?;
/// for device in discovery.iter() {
///     println!("{:?} at {:?}", device.friendly_name, device.application_url);
/// }
/// # Ok::<(), dial_discovery::DiscoveryError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DeviceDiscovery<M = SsdpDiscovery, R = HttpDescriptorResolver> {
    search: M,
    resolver: R,
}

impl DeviceDiscovery {
    /// Create a discovery using SSDP and HTTP descriptor resolution.
    pub fn new(config: &ProtocolConfig) -> Result<Self> {
        Ok(Self::with_components(
            SsdpDiscovery::new(config),
            HttpDescriptorResolver::new(config)?,
        ))
    }
}

impl<M, R> DeviceDiscovery<M, R>
where
    M: MulticastDiscovery,
    R: DeviceDescriptorResolver,
{
    /// Create a discovery from custom stages.
    pub fn with_components(search: M, resolver: R) -> Self {
        Self { search, resolver }
    }

    /// Search and resolve every responding device.
    pub fn discover_all(&self) -> Vec<Device> {
        self.iter().collect()
    }

    /// Search now and resolve the candidates lazily while iterating.
    pub fn iter(&self) -> DiscoveryIterator<'_, R> {
        DiscoveryIterator {
            candidates: self.search.discover().into_iter(),
            resolver: &self.resolver,
        }
    }
}

/// Iterator yielding resolved devices, see [`DeviceDiscovery::iter`].
pub struct DiscoveryIterator<'a, R> {
    candidates: std::vec::IntoIter<Device>,
    resolver: &'a R,
}

impl<'a, R: DeviceDescriptorResolver> Iterator for DiscoveryIterator<'a, R> {
    type Item = Device;

    fn next(&mut self) -> Option<Self::Item> {
        for mut device in self.candidates.by_ref() {
            match self.resolver.resolve(&device.descriptor_url) {
                Some(descriptor) => {
                    device.apply_descriptor(descriptor);
                    debug!(
                        "Resolved {} with application url {:?}",
                        device.unique_service_name, device.application_url
                    );
                    return Some(device);
                }
                None => debug!(
                    "Dropping {}: descriptor {} could not be resolved",
                    device.unique_service_name, device.descriptor_url
                ),
            }
        }

        None
    }
}
