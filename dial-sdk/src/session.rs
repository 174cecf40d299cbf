//! Lifecycle operations on one device's applications.

use dial_client::{
    Application, ApplicationContent, ApplicationController, ApplicationState,
    HttpApplicationController,
};
use tracing::{debug, warn};
use url::Url;

use crate::error::{DialClientError, Result};

/// Binds an [`ApplicationController`] to one device.
///
/// Reads are soft: asking whether an application exists never fails because
/// of the network. Mutations are hard: a start, stop or hide the caller asked
/// for reports every failure as a [`DialClientError`].
pub struct ApplicationSession<C = HttpApplicationController> {
    controller: C,
}

impl<C: ApplicationController> ApplicationSession<C> {
    pub fn new(controller: C) -> Self {
        Self { controller }
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Whether the device knows an application with this name.
    ///
    /// A malformed status document reads as unsupported; call
    /// [`get_application`](Self::get_application) to see the protocol error.
    pub fn supports(&self, application_name: &str) -> bool {
        matches!(self.get_application(application_name), Ok(Some(_)))
    }

    /// Current status of an application, `None` when the device doesn't
    /// have it or can't be reached.
    ///
    /// A status document that violates the protocol is still an error.
    pub fn get_application(&self, application_name: &str) -> Result<Option<Application>> {
        match self.controller.status(application_name) {
            Ok(application) => Ok(application),
            Err(error) if error.is_network() => {
                warn!(application = application_name, %error, "Status request failed");
                Ok(None)
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Launch an application, returning the instance URL if the server
    /// advertised one.
    pub fn start(
        &self,
        application_name: &str,
        content: &ApplicationContent,
    ) -> Result<Option<Url>> {
        self.controller
            .start(application_name, content)
            .map_err(|error| {
                warn!(application = application_name, %error, "Start failed");
                DialClientError::from(error)
            })
    }

    pub fn start_application(
        &self,
        application: &Application,
        content: &ApplicationContent,
    ) -> Result<Option<Url>> {
        self.start(&application.name, content)
    }

    /// Stop a running instance. Does nothing without an instance URL.
    pub fn stop_instance(&self, instance_url: Option<&Url>) -> Result<()> {
        let Some(instance_url) = instance_url else {
            debug!("No instance URL, nothing to stop");
            return Ok(());
        };

        self.controller.stop(instance_url).map_err(|error| {
            warn!(instance = %instance_url, %error, "Stop failed");
            DialClientError::from(error)
        })
    }

    /// Stop an application the server allows to be stopped.
    pub fn stop(&self, application: &Application) -> Result<()> {
        if !application.allow_stop {
            return Err(DialClientError::StopNotAllowed(application.name.clone()));
        }
        if application.state == ApplicationState::Stopped {
            debug!(application = %application.name, "Already stopped");
            return Ok(());
        }

        self.stop_instance(application.instance_url.as_ref())
    }

    /// Hide a running application.
    pub fn hide(&self, application: &Application) -> Result<()> {
        if matches!(
            application.state,
            ApplicationState::Stopped | ApplicationState::Hidden
        ) {
            debug!(application = %application.name, state = ?application.state, "Nothing to hide");
            return Ok(());
        }
        let Some(instance_url) = application.instance_url.as_ref() else {
            debug!(application = %application.name, "No instance URL, nothing to hide");
            return Ok(());
        };

        self.controller.hide(instance_url).map_err(|error| {
            warn!(instance = %instance_url, %error, "Hide failed");
            DialClientError::from(error)
        })
    }
}
