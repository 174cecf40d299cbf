//! DIAL second-screen client
//!
//! Finds DIAL servers on the local network and drives their applications.
//! This crate combines `dial-discovery` (SSDP search and descriptor
//! resolution) with `dial-client` (the application REST resource) behind a
//! single [`DialClient`].
//!
//! # Example
//!
//! ```no_run
//! use dial::{ApplicationContent, DialClient, YOUTUBE};
//!
//! let client = DialClient::new();
//! for device in client.discover() {
//!     let session = client.connect_to(&device)?;
//!     if let Some(app) = session.get_application(YOUTUBE)? {
//!         println!("{:?}: {} is {:?}", device.friendly_name, app.name, app.state);
//!         session.start_application(&app, &ApplicationContent::text("v=dQw4w9WgXcQ"))?;
//!     }
//! }
//! # Ok::<(), dial::DialClientError>(())
//! ```
//!
//! # Logging
//!
//! Everything is reported through `tracing`. Binaries without their own
//! subscriber can call [`logging::init_logging`].

mod client;
mod error;
pub mod logging;
mod session;

pub use client::DialClient;
pub use error::{DialClientError, Result};
pub use session::ApplicationSession;

pub use dial_client::{
    Application, ApplicationContent, ApplicationController, ApplicationError, ApplicationState,
    HttpApplicationController, ProtocolConfig, AMAZON_INSTANT_VIDEO, NETFLIX, YOUTUBE,
};
pub use dial_discovery::Device;
