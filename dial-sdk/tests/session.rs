//! Guard clauses of ApplicationSession, observed through a recording
//! controller.

use std::cell::RefCell;

use dial::{
    Application, ApplicationContent, ApplicationController, ApplicationError, ApplicationSession,
    ApplicationState, DialClientError,
};
use rstest::rstest;
use url::Url;

type StatusReply = fn() -> dial_client::Result<Option<Application>>;

#[derive(Default)]
struct RecordingController {
    calls: RefCell<Vec<String>>,
    status: Option<StatusReply>,
    fail_with: Option<u16>,
}

impl RecordingController {
    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn outcome(&self) -> dial_client::Result<()> {
        match self.fail_with {
            Some(code) => Err(ApplicationError::Status(code)),
            None => Ok(()),
        }
    }
}

impl ApplicationController for RecordingController {
    fn status(&self, application_name: &str) -> dial_client::Result<Option<Application>> {
        self.calls.borrow_mut().push(format!("status {}", application_name));
        match self.status {
            Some(status) => status(),
            None => Ok(None),
        }
    }

    fn start(
        &self,
        application_name: &str,
        _content: &ApplicationContent,
    ) -> dial_client::Result<Option<Url>> {
        self.calls.borrow_mut().push(format!("start {}", application_name));
        self.outcome()?;
        Ok(Some(instance_url()))
    }

    fn stop(&self, instance_url: &Url) -> dial_client::Result<()> {
        self.calls.borrow_mut().push(format!("stop {}", instance_url));
        self.outcome()
    }

    fn hide(&self, instance_url: &Url) -> dial_client::Result<()> {
        self.calls.borrow_mut().push(format!("hide {}", instance_url));
        self.outcome()
    }
}

fn instance_url() -> Url {
    Url::parse("http://tv/apps/YouTube/run").unwrap()
}

fn application(state: ApplicationState, allow_stop: bool) -> Application {
    let instance_url = state.has_instance().then(instance_url);
    Application {
        name: "YouTube".to_string(),
        state,
        allow_stop,
        instance_url,
        additional_data: None,
    }
}

fn network_failure() -> dial_client::Result<Option<Application>> {
    Err(ApplicationError::Network("connection refused".to_string()))
}

fn unknown_state() -> dial_client::Result<Option<Application>> {
    Err(ApplicationError::Protocol("Unknown state: paused".to_string()))
}

fn stopped_application() -> dial_client::Result<Option<Application>> {
    Ok(Some(application(ApplicationState::Stopped, false)))
}

fn installable() -> ApplicationState {
    ApplicationState::Installable(Url::parse("http://store/install").unwrap())
}

#[rstest]
#[case::running(ApplicationState::Running)]
#[case::stopped(ApplicationState::Stopped)]
#[case::hidden(ApplicationState::Hidden)]
#[case::installable(installable())]
fn test_stop_refused_without_allow_stop(#[case] state: ApplicationState) {
    let session = ApplicationSession::new(RecordingController::default());

    let result = session.stop(&application(state, false));

    assert!(matches!(result, Err(DialClientError::StopNotAllowed(ref name)) if name == "YouTube"));
    assert!(session.controller().calls().is_empty());
}

#[test]
fn test_stop_running_application() {
    let session = ApplicationSession::new(RecordingController::default());

    session.stop(&application(ApplicationState::Running, true)).unwrap();

    assert_eq!(session.controller().calls(), vec!["stop http://tv/apps/YouTube/run"]);
}

#[test]
fn test_stop_already_stopped_is_noop() {
    let session = ApplicationSession::new(RecordingController::default());

    session.stop(&application(ApplicationState::Stopped, true)).unwrap();

    assert!(session.controller().calls().is_empty());
}

#[test]
fn test_stop_instance_without_url_is_noop() {
    let session = ApplicationSession::new(RecordingController::default());

    session.stop_instance(None).unwrap();

    assert!(session.controller().calls().is_empty());
}

#[test]
fn test_stop_failure_carries_status() {
    let session = ApplicationSession::new(RecordingController {
        fail_with: Some(404),
        ..Default::default()
    });

    let error = session.stop_instance(Some(&instance_url())).unwrap_err();

    assert_eq!(error.status(), Some(404));
}

#[rstest]
#[case::hidden(ApplicationState::Hidden)]
#[case::stopped(ApplicationState::Stopped)]
fn test_hide_is_noop(#[case] state: ApplicationState) {
    let session = ApplicationSession::new(RecordingController::default());

    session.hide(&application(state, true)).unwrap();

    assert!(session.controller().calls().is_empty());
}

#[test]
fn test_hide_running_application() {
    let session = ApplicationSession::new(RecordingController::default());

    session.hide(&application(ApplicationState::Running, false)).unwrap();

    assert_eq!(session.controller().calls(), vec!["hide http://tv/apps/YouTube/run"]);
}

#[test]
fn test_hide_failure_is_error() {
    let session = ApplicationSession::new(RecordingController {
        fail_with: Some(501),
        ..Default::default()
    });

    let error = session
        .hide(&application(ApplicationState::Running, true))
        .unwrap_err();

    assert!(matches!(error, DialClientError::Application(ApplicationError::Status(501))));
}

#[test]
fn test_start_application_uses_its_name() {
    let session = ApplicationSession::new(RecordingController::default());

    let instance = session
        .start_application(&application(ApplicationState::Stopped, true), &ApplicationContent::empty())
        .unwrap();

    assert_eq!(instance, Some(instance_url()));
    assert_eq!(session.controller().calls(), vec!["start YouTube"]);
}

#[test]
fn test_start_failure_is_error() {
    let session = ApplicationSession::new(RecordingController {
        fail_with: Some(503),
        ..Default::default()
    });

    let error = session.start("YouTube", &ApplicationContent::empty()).unwrap_err();

    assert_eq!(error.status(), Some(503));
}

#[test]
fn test_network_failure_reads_as_missing() {
    let session = ApplicationSession::new(RecordingController {
        status: Some(network_failure as StatusReply),
        ..Default::default()
    });

    assert!(session.get_application("YouTube").unwrap().is_none());
    assert!(!session.supports("YouTube"));
}

#[test]
fn test_protocol_failure_is_reported_but_reads_unsupported() {
    let session = ApplicationSession::new(RecordingController {
        status: Some(unknown_state as StatusReply),
        ..Default::default()
    });

    let error = session.get_application("YouTube").unwrap_err();

    assert!(matches!(error, DialClientError::Application(ApplicationError::Protocol(_))));
    assert!(!session.supports("YouTube"));
}

#[test]
fn test_supports_present_application() {
    let session = ApplicationSession::new(RecordingController {
        status: Some(stopped_application as StatusReply),
        ..Default::default()
    });

    assert!(session.supports("YouTube"));
    assert_eq!(session.controller().calls(), vec!["status YouTube"]);
}
