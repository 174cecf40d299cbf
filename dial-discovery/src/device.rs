//! Discovered device model.

use url::Url;

use crate::descriptor::DeviceDescriptor;

/// A DIAL server found on the local network.
///
/// Created from one SSDP response; completed once by descriptor resolution,
/// which fills in the friendly name and the application resource URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// SSDP unique service name (`USN`), the identity of the device
    pub unique_service_name: String,
    /// URL of the UPnP device descriptor (`LOCATION`)
    pub descriptor_url: Url,
    /// DIAL application resource URL, known after resolution
    pub application_url: Option<Url>,
    /// Friendly name from the device descriptor, known after resolution
    pub friendly_name: Option<String>,
    /// Free-text `SERVER` header
    pub server: Option<String>,
    /// Whether the device advertised Wake-on-LAN through `WAKEUP`
    pub wake_on_lan_support: bool,
    pub wake_on_lan_mac: Option<String>,
    /// Seconds the device needs to become reachable after a wake-up
    pub wake_on_lan_timeout: u32,
}

impl Device {
    pub(crate) fn new(unique_service_name: String, descriptor_url: Url) -> Self {
        Self {
            unique_service_name,
            descriptor_url,
            application_url: None,
            friendly_name: None,
            server: None,
            wake_on_lan_support: false,
            wake_on_lan_mac: None,
            wake_on_lan_timeout: 0,
        }
    }

    /// Complete the device with the data of its descriptor.
    pub fn apply_descriptor(&mut self, descriptor: DeviceDescriptor) {
        self.friendly_name = Some(descriptor.friendly_name).filter(|name| !name.is_empty());
        self.application_url = Some(descriptor.application_url);
    }

    /// True once the application resource URL is known.
    pub fn is_resolved(&self) -> bool {
        self.application_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device() -> Device {
        Device::new(
            "uuid:0f4e1c2a::urn:dial-multiscreen-org:service:dial:1".to_string(),
            Url::parse("http://192.168.1.20:8008/ssdp/device-desc.xml").unwrap(),
        )
    }

    #[test]
    fn test_new_device_is_unresolved() {
        let device = device();
        assert!(!device.is_resolved());
        assert_eq!(device.friendly_name, None);
        assert!(!device.wake_on_lan_support);
        assert_eq!(device.wake_on_lan_timeout, 0);
    }

    #[test]
    fn test_apply_descriptor() {
        let mut device = device();
        device.apply_descriptor(DeviceDescriptor {
            friendly_name: "Living Room TV".to_string(),
            application_url: Url::parse("http://192.168.1.20:8008/apps").unwrap(),
        });

        assert!(device.is_resolved());
        assert_eq!(device.friendly_name.as_deref(), Some("Living Room TV"));
        assert_eq!(
            device.application_url.as_ref().map(Url::as_str),
            Some("http://192.168.1.20:8008/apps")
        );
    }

    #[test]
    fn test_apply_descriptor_with_empty_name() {
        let mut device = device();
        device.apply_descriptor(DeviceDescriptor {
            friendly_name: String::new(),
            application_url: Url::parse("http://192.168.1.20:8008/apps").unwrap(),
        });

        assert!(device.is_resolved());
        assert_eq!(device.friendly_name, None);
    }
}
