use dial_client::{HttpApplicationController, ProtocolConfig};
use dial_discovery::Device;
use tracing::debug;

use crate::error::{DialClientError, Result};
use crate::session::ApplicationSession;

/// Entry point tying discovery and application control together.
///
/// Every component it builds shares the same [`ProtocolConfig`].
#[derive(Debug, Clone, Default)]
pub struct DialClient {
    config: ProtocolConfig,
}

impl DialClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProtocolConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    /// Search the local network and return every resolved DIAL device.
    pub fn discover(&self) -> Vec<Device> {
        dial_discovery::get_with_config(&self.config)
    }

    /// Open a session on a resolved device.
    pub fn connect_to(&self, device: &Device) -> Result<ApplicationSession> {
        let application_url = device
            .application_url
            .clone()
            .ok_or_else(|| DialClientError::DeviceNotResolved(device.unique_service_name.clone()))?;

        debug!(device = %device.unique_service_name, url = %application_url, "Opening session");
        Ok(ApplicationSession::new(HttpApplicationController::new(
            application_url,
            &self.config,
        )))
    }
}
