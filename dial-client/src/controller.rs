//! DIAL application control over HTTP.
//!
//! One controller addresses one application-control resource, the
//! `Application-URL` a device advertises in its descriptor response.
//! Applications live one path segment below it:
//!
//! | operation | request |
//! |---|---|
//! | status | `GET <resource>/<app>[?clientDialVersion=2.1]` |
//! | start | `POST <resource>/<app>[?friendlyName=<name>]` |
//! | stop | `DELETE <instance>` |
//! | hide | `POST <instance>/hide` |

use tracing::{debug, trace, warn};
use url::Url;
use xmltree::Element;

use crate::config::ProtocolConfig;
use crate::error::{ApplicationError, Result};
use crate::model::{Application, ApplicationContent, ApplicationState};
use crate::url_composer::UrlComposer;
use crate::xml;

const DIAL_VERSION_QUERY: &str = "clientDialVersion=2.1";
const FRIENDLY_NAME_QUERY: &str = "friendlyName";
const LOCATION_HEADER: &str = "Location";
const CONTENT_TYPE_HEADER: &str = "Content-Type";
const HIDE_PATH: &str = "hide";
const RUN_REL: &str = "run";

/// The four DIAL application operations.
///
/// `status` treats an unknown application as `Ok(None)`; the mutating
/// operations fail with [`ApplicationError::Status`] on any non-2xx answer.
pub trait ApplicationController {
    /// Query the state of `application_name`.
    fn status(&self, application_name: &str) -> Result<Option<Application>>;

    /// Launch `application_name`, returning the instance URL if the server
    /// advertised one.
    fn start(&self, application_name: &str, content: &ApplicationContent) -> Result<Option<Url>>;

    /// Stop the instance at `instance_url`.
    fn stop(&self, instance_url: &Url) -> Result<()>;

    /// Hide the instance at `instance_url`.
    fn hide(&self, instance_url: &Url) -> Result<()>;
}

/// [`ApplicationController`] backed by blocking `ureq` agents.
#[derive(Debug, Clone)]
pub struct HttpApplicationController {
    agent: ureq::Agent,
    no_redirect_agent: ureq::Agent,
    resource_url: Url,
    client_friendly_name: Option<String>,
    send_query_parameters: bool,
}

impl HttpApplicationController {
    /// Create a controller for the application resource at `resource_url`.
    pub fn new(resource_url: Url, config: &ProtocolConfig) -> Self {
        Self {
            agent: build_agent(config, true),
            no_redirect_agent: build_agent(config, false),
            resource_url,
            client_friendly_name: config.client_friendly_name.clone(),
            send_query_parameters: !config.legacy_compatibility,
        }
    }

    pub fn resource_url(&self) -> &Url {
        &self.resource_url
    }

    fn application_url(&self, application_name: &str) -> UrlComposer {
        UrlComposer::of(&self.resource_url).path(application_name)
    }
}

impl ApplicationController for HttpApplicationController {
    fn status(&self, application_name: &str) -> Result<Option<Application>> {
        let mut composer = self.application_url(application_name);
        if self.send_query_parameters {
            composer = composer.query(DIAL_VERSION_QUERY);
        }
        let url = composer.build()?;

        debug!("Requesting status of {} from {}", application_name, url);
        let response = match self.agent.get(url.as_str()).call() {
            Ok(response) if is_success(response.status()) => response,
            Ok(response) => {
                trace!("Application not found: {} (HTTP {})", application_name, response.status());
                return Ok(None);
            }
            Err(ureq::Error::Status(code, _)) => {
                trace!("Application not found: {} (HTTP {})", application_name, code);
                return Ok(None);
            }
            Err(e) => return Err(ApplicationError::Network(e.to_string())),
        };

        let body = response
            .into_string()
            .map_err(|e| ApplicationError::Network(e.to_string()))?;

        let document = match Element::parse(body.as_bytes()) {
            Ok(document) => document,
            Err(e) => {
                warn!("Can't parse status document of {}: {}", application_name, e);
                return Ok(None);
            }
        };

        parse_status(&document, &self.resource_url, application_name).map(Some)
    }

    fn start(&self, application_name: &str, content: &ApplicationContent) -> Result<Option<Url>> {
        let mut composer = self.application_url(application_name);
        if self.send_query_parameters {
            if let Some(name) = &self.client_friendly_name {
                composer = composer.query_pair(FRIENDLY_NAME_QUERY, name);
            }
        }
        let url = composer.build()?;

        debug!("Starting {} at {}", application_name, url);
        let request = self.no_redirect_agent.post(url.as_str());
        // send_bytes always emits Content-Length, including 0 for the empty body
        let result = match (content.content_type(), content.data()) {
            (Some(content_type), Some(data)) => {
                request.set(CONTENT_TYPE_HEADER, content_type).send_bytes(data)
            }
            (None, Some(data)) => request.send_bytes(data),
            (_, None) => request.send_bytes(&[]),
        };
        let response = expect_success(result)?;

        match response.header(LOCATION_HEADER) {
            Some(location) => {
                let instance_url = url.join(location.trim())?;
                debug!("Started {} with instance {}", application_name, instance_url);
                Ok(Some(instance_url))
            }
            None => {
                debug!("Started {} without an instance location", application_name);
                Ok(None)
            }
        }
    }

    fn stop(&self, instance_url: &Url) -> Result<()> {
        debug!("Stopping instance {}", instance_url);
        expect_success(self.no_redirect_agent.delete(instance_url.as_str()).call())?;
        Ok(())
    }

    fn hide(&self, instance_url: &Url) -> Result<()> {
        let url = UrlComposer::of(instance_url).path(HIDE_PATH).build()?;

        debug!("Hiding instance {}", instance_url);
        expect_success(self.no_redirect_agent.post(url.as_str()).send_bytes(&[]))?;
        Ok(())
    }
}

fn build_agent(config: &ProtocolConfig, follow_redirects: bool) -> ureq::Agent {
    let mut builder = ureq::AgentBuilder::new();

    if let Some(timeout) = config.connect_timeout {
        builder = builder.timeout_connect(timeout);
    }
    if let Some(timeout) = config.read_timeout {
        builder = builder.timeout_read(timeout).timeout_write(timeout);
    }
    if !follow_redirects {
        builder = builder.redirects(0);
    }

    builder.build()
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn expect_success(
    result: std::result::Result<ureq::Response, ureq::Error>,
) -> Result<ureq::Response> {
    match result {
        Ok(response) if is_success(response.status()) => Ok(response),
        Ok(response) => Err(ApplicationError::Status(response.status())),
        Err(ureq::Error::Status(code, _)) => Err(ApplicationError::Status(code)),
        Err(e) => Err(ApplicationError::Network(e.to_string())),
    }
}

/// Decode a DIAL status document.
///
/// Every document must carry a `rel="run"` link. The instance URL is
/// `<resource>/<application_name>/<link href>` and is only kept for running
/// or hidden applications.
pub fn parse_status(
    document: &Element,
    resource_url: &Url,
    application_name: &str,
) -> Result<Application> {
    let name = match xml::text_of(document, "name") {
        name if name.is_empty() => application_name.to_string(),
        name => name,
    };

    let state = ApplicationState::parse(&xml::text_of(document, "state"))?;
    let run_href = run_link(document)?;

    let instance_url = if state.has_instance() {
        Some(
            UrlComposer::of(resource_url)
                .path(application_name)
                .path(run_href)
                .build()?,
        )
    } else {
        None
    };

    Ok(Application {
        name,
        state,
        allow_stop: allow_stop(document),
        instance_url,
        additional_data: xml::find_first(document, "additionalData").cloned(),
    })
}

fn allow_stop(document: &Element) -> bool {
    xml::find_first(document, "options")
        .and_then(|options| options.attributes.get("allowStop"))
        .map(|value| value.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn run_link(document: &Element) -> Result<&str> {
    let link = xml::find_first(document, "link").ok_or_else(|| {
        ApplicationError::Protocol("Document has no link element".to_string())
    })?;

    match (link.attributes.get("rel"), link.attributes.get("href")) {
        (Some(rel), Some(href)) if rel == RUN_REL => Ok(href.as_str()),
        _ => Err(ApplicationError::Protocol(
            "Unknown link type on service".to_string(),
        )),
    }
}
