//! Simple DIAL device discovery that outputs JSON for scripting
//!
//! Usage: cargo run -p dial-discovery --example discover_json [timeout-ms]

use dial_client::ProtocolConfig;
use dial_discovery::get_with_config;
use serde::Serialize;
use std::time::Duration;

#[derive(Serialize)]
struct DeviceInfo {
    usn: String,
    friendly_name: Option<String>,
    descriptor_url: String,
    application_url: Option<String>,
    server: Option<String>,
    wake_on_lan_mac: Option<String>,
}

fn main() {
    let timeout_ms = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(3000);

    let config = ProtocolConfig::default().with_socket_timeout(Duration::from_millis(timeout_ms));
    let devices = get_with_config(&config);

    let infos: Vec<DeviceInfo> = devices
        .into_iter()
        .map(|d| DeviceInfo {
            usn: d.unique_service_name,
            friendly_name: d.friendly_name,
            descriptor_url: d.descriptor_url.to_string(),
            application_url: d.application_url.map(String::from),
            server: d.server,
            wake_on_lan_mac: d.wake_on_lan_mac,
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&infos).unwrap());
}
