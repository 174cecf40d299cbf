//! DIAL application-control client
//!
//! This crate speaks the REST side of the DIAL (DIscovery And Launch)
//! protocol: querying, starting, stopping and hiding applications on a
//! second-screen device once its application resource URL is known.
//! Discovering that URL is the job of the `dial-discovery` crate.
//!
//! # Example
//!
//! ```no_run
//! use dial_client::{ApplicationContent, ApplicationController, HttpApplicationController, ProtocolConfig};
//! use url::Url;
//!
//! let resource = Url::parse("http://192.168.1.20:8008/apps").unwrap();
//! let controller = HttpApplicationController::new(resource, &ProtocolConfig::default());
//!
//! if let Some(app) = controller.status(dial_client::YOUTUBE)? {
//!     println!("{} is {:?}", app.name, app.state);
//!     controller.start(&app.name, &ApplicationContent::text("v=dQw4w9WgXcQ"))?;
//! }
//! # Ok::<(), dial_client::ApplicationError>(())
//! ```

mod config;
mod controller;
mod error;
mod model;
mod url_composer;
pub mod xml;

pub use config::{ProtocolConfig, DEFAULT_FRIENDLY_NAME, DEFAULT_TIMEOUT};
pub use controller::{parse_status, ApplicationController, HttpApplicationController};
pub use error::{ApplicationError, Result};
pub use model::{
    Application, ApplicationContent, ApplicationState, AMAZON_INSTANT_VIDEO, NETFLIX, YOUTUBE,
};
pub use url_composer::UrlComposer;
