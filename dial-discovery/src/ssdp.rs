//! SSDP (Simple Service Discovery Protocol) search for DIAL servers
//!
//! A single M-SEARCH datagram goes to the multicast group; responses are then
//! collected until the socket read times out. The timeout is the normal end of
//! a search, not a failure.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::net::{Ipv4Addr, SocketAddr, UdpSocket};
use std::time::Duration;

use dial_client::ProtocolConfig;
use socket2::{Domain, Protocol, Socket, Type};
use tracing::{debug, trace, warn};
use url::Url;

use crate::device::Device;
use crate::error::{DiscoveryError, Result};

pub const SSDP_MULTICAST_ADDR: Ipv4Addr = Ipv4Addr::new(239, 255, 255, 250);
pub const SSDP_PORT: u16 = 1900;
/// Search target of DIAL servers
pub const DIAL_SEARCH_TARGET: &str = "urn:dial-multiscreen-org:service:dial:1";

const USER_AGENT: &str = "OS/version product/version";
const RECEIVE_BUFFER_SIZE: usize = 2048;

const LOCATION_HEADER: &str = "LOCATION";
const USN_HEADER: &str = "USN";
const WAKEUP_HEADER: &str = "WAKEUP";
const SERVER_HEADER: &str = "SERVER";
const WOL_MAC: &str = "MAC";
const WOL_TIMEOUT: &str = "TIMEOUT";

/// Source of candidate devices.
///
/// Implementations never fail outward: any I/O problem yields an empty list.
pub trait MulticastDiscovery {
    fn discover(&self) -> Vec<Device>;
}

impl<T: MulticastDiscovery + ?Sized> MulticastDiscovery for &T {
    fn discover(&self) -> Vec<Device> {
        (**self).discover()
    }
}

/// M-SEARCH over a UDP multicast socket.
#[derive(Debug, Clone)]
pub struct SsdpDiscovery {
    request: String,
    socket_timeout: Duration,
}

impl SsdpDiscovery {
    pub fn new(config: &ProtocolConfig) -> Self {
        Self {
            request: msearch_request(config.response_delay),
            socket_timeout: config.socket_timeout,
        }
    }

    /// The M-SEARCH datagram sent by [`MulticastDiscovery::discover`].
    pub fn request(&self) -> &str {
        &self.request
    }

    fn search(&self) -> Result<Vec<Device>> {
        let socket = open_socket(self.socket_timeout)?;

        debug!("Send M-SEARCH request");
        socket
            .send_to(self.request.as_bytes(), (SSDP_MULTICAST_ADDR, SSDP_PORT))
            .map_err(|e| DiscoveryError::NetworkError(format!("Failed to send M-SEARCH: {}", e)))?;

        Ok(collect_unique(SsdpResponseIterator::new(&socket)))
    }
}

impl MulticastDiscovery for SsdpDiscovery {
    fn discover(&self) -> Vec<Device> {
        match self.search() {
            Ok(devices) => devices,
            Err(e) => {
                warn!("SSDP search failed: {}", e);
                Vec::new()
            }
        }
    }
}

fn msearch_request(response_delay: u32) -> String {
    format!(
        "M-SEARCH * HTTP/1.1\r\n\
         HOST: {}:{}\r\n\
         MAN: \"ssdp:discover\"\r\n\
         MX: {}\r\n\
         ST: {}\r\n\
         USER-AGENT: {}\r\n\
         \r\n",
        SSDP_MULTICAST_ADDR, SSDP_PORT, response_delay, DIAL_SEARCH_TARGET, USER_AGENT
    )
}

fn open_socket(timeout: Duration) -> Result<UdpSocket> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))
        .map_err(|e| DiscoveryError::NetworkError(format!("Failed to create UDP socket: {}", e)))?;

    socket
        .set_reuse_address(true)
        .map_err(|e| DiscoveryError::NetworkError(format!("Failed to set SO_REUSEADDR: {}", e)))?;

    let bind_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0));
    socket
        .bind(&bind_addr.into())
        .map_err(|e| DiscoveryError::NetworkError(format!("Failed to bind UDP socket: {}", e)))?;

    let socket: UdpSocket = socket.into();

    socket
        .set_read_timeout(Some(timeout))
        .map_err(|e| DiscoveryError::NetworkError(format!("Failed to set read timeout: {}", e)))?;

    socket
        .set_write_timeout(Some(timeout))
        .map_err(|e| DiscoveryError::NetworkError(format!("Failed to set write timeout: {}", e)))?;

    socket
        .set_multicast_loop_v4(true)
        .map_err(|e| DiscoveryError::NetworkError(format!("Failed to set multicast loop: {}", e)))?;

    Ok(socket)
}

/// Keep the first device seen for every unique service name.
pub(crate) fn collect_unique<I>(devices: I) -> Vec<Device>
where
    I: IntoIterator<Item = Device>,
{
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for device in devices {
        if seen.insert(device.unique_service_name.clone()) {
            debug!("Found device: {} at {}", device.unique_service_name, device.descriptor_url);
            unique.push(device);
        }
    }

    unique
}

/// Iterator over the devices answering one M-SEARCH.
///
/// Ends on the first receive error; a read timeout is the expected one.
struct SsdpResponseIterator<'a> {
    socket: &'a UdpSocket,
    buffer: [u8; RECEIVE_BUFFER_SIZE],
    finished: bool,
}

impl<'a> SsdpResponseIterator<'a> {
    fn new(socket: &'a UdpSocket) -> Self {
        Self {
            socket,
            buffer: [0; RECEIVE_BUFFER_SIZE],
            finished: false,
        }
    }
}

impl<'a> Iterator for SsdpResponseIterator<'a> {
    type Item = Device;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            match self.socket.recv_from(&mut self.buffer) {
                Ok((size, from)) => {
                    let Some(datagram) = self.buffer.get(..size) else {
                        continue;
                    };
                    trace!("Received {} bytes from {}", size, from);
                    let text = String::from_utf8_lossy(datagram);
                    if let Some(device) = parse_ssdp_response(&text) {
                        return Some(device);
                    }
                }
                Err(e) => {
                    if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut {
                        trace!("Socket timed out");
                    } else {
                        debug!("Socket error ends SSDP search: {}", e);
                    }
                    self.finished = true;
                }
            }
        }

        None
    }
}

/// Header values collected from one SSDP response.
#[derive(Debug, Default)]
struct SsdpResponse {
    location: Option<Url>,
    usn: Option<String>,
    server: Option<String>,
    wake_on_lan_mac: Option<String>,
    wake_on_lan_timeout: Option<u32>,
}

impl SsdpResponse {
    fn into_device(self) -> Option<Device> {
        let usn = self.usn.filter(|usn| !usn.is_empty())?;
        let location = self.location?;

        let mut device = Device::new(usn, location);
        device.server = self.server;
        device.wake_on_lan_support = self.wake_on_lan_mac.is_some();
        device.wake_on_lan_mac = self.wake_on_lan_mac;
        device.wake_on_lan_timeout = self.wake_on_lan_timeout.unwrap_or(0);
        Some(device)
    }
}

/// Parse an SSDP response into a candidate device.
///
/// Responses for other search targets and responses without a usable
/// `LOCATION` or a non-empty `USN` yield `None`.
pub fn parse_ssdp_response(response: &str) -> Option<Device> {
    if !response.contains(DIAL_SEARCH_TARGET) {
        trace!("Ignore response for unrelated search target");
        return None;
    }

    let mut parsed = SsdpResponse::default();

    for line in response.split('\n') {
        let Some((name, value)) = line.trim_end_matches('\r').split_once(": ") else {
            continue;
        };
        let value = value.trim();

        match name.trim().to_ascii_uppercase().as_str() {
            LOCATION_HEADER => parsed.location = parse_location(value),
            USN_HEADER => parsed.usn = Some(value.to_string()),
            WAKEUP_HEADER => parse_wakeup(&mut parsed, value),
            SERVER_HEADER => parsed.server = Some(value.to_string()),
            other => trace!("Ignoring header: {}", other),
        }
    }

    let device = parsed.into_device();
    if device.is_none() {
        trace!("Ignore response with incomplete data");
    }
    device
}

fn parse_location(value: &str) -> Option<Url> {
    match Url::parse(value) {
        Ok(url) => Some(url),
        Err(e) => {
            warn!("Server provided malformed device descriptor url '{}': {}", value, e);
            None
        }
    }
}

/// Parse `MAC=<addr>;TIMEOUT=<seconds>`.
fn parse_wakeup(parsed: &mut SsdpResponse, value: &str) {
    for part in value.split(';') {
        let Some((key, field)) = part.split_once('=') else {
            continue;
        };
        let field = field.trim();

        match key.trim().to_ascii_uppercase().as_str() {
            WOL_MAC => parsed.wake_on_lan_mac = Some(field.to_string()),
            WOL_TIMEOUT => match field.parse() {
                Ok(timeout) => parsed.wake_on_lan_timeout = Some(timeout),
                Err(_) => debug!("Ignore unparsable wol timeout: {}", field),
            },
            other => debug!("Ignore unknown wol header: {}", other),
        }
    }
}
