mod common;

use activator::api::client::HttpActivationApi;
use activator::core::confirmation::{ConfirmOptions, ConfirmationState, ConfirmationView};
use activator::core::outcome::{ActivationError, ActivationOutcome};
use activator::core::ports::{ActivationApi, Navigator, Notifier};
use activator::core::route::Route;
use common::{spawn_server, unreachable_url};
use reqwest::Url;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn client(base: &str) -> HttpActivationApi {
    HttpActivationApi::new(Url::parse(base).unwrap(), Some(Duration::from_secs(5))).unwrap()
}

#[tokio::test]
async fn sends_exactly_one_put_with_token_segment() {
    let server = spawn_server(204).await;
    let api = client(&server.address);

    let outcome = api.activate(&"abc123".into()).await;

    assert!(matches!(outcome, ActivationOutcome::Activated));
    assert_eq!(
        server.recorded(),
        vec![("PUT".to_string(), "/v1/users/activate/abc123".to_string())]
    );
}

#[tokio::test]
async fn empty_token_hits_empty_segment() {
    let server = spawn_server(404).await;
    let api = client(&server.address);

    let outcome = api.activate(&"".into()).await;

    assert!(matches!(outcome, ActivationOutcome::Rejected(s) if s.as_u16() == 404));
    assert_eq!(
        server.recorded(),
        vec![("PUT".to_string(), "/v1/users/activate/".to_string())]
    );
}

#[tokio::test]
async fn non_success_statuses_are_rejections() {
    for code in [400u16, 401, 409, 500, 503] {
        let server = spawn_server(code).await;
        let outcome = client(&server.address).activate(&"t".into()).await;
        assert!(
            matches!(outcome, ActivationOutcome::Rejected(s) if s.as_u16() == code),
            "status {code} gave {outcome:?}"
        );
        assert_eq!(server.recorded().len(), 1);
    }
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error_without_token_in_message() {
    let api = client(&unreachable_url());

    let outcome = api.activate(&"abc123".into()).await;

    match outcome {
        ActivationOutcome::TransportError(err) => {
            assert!(!err.to_string().contains("abc123"), "leaked token: {err}");
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_error_chain_and_report_never_carry_the_token() {
    let api = client(&unreachable_url());

    let outcome = api.activate(&"tok-s3cr3t".into()).await;

    let report = serde_json::to_string(&outcome.report()).unwrap();
    assert!(report.contains("transport_error"), "report: {report}");
    assert!(!report.contains("tok-s3cr3t"), "report: {report}");

    let ActivationOutcome::TransportError(err) = outcome else {
        panic!("expected transport error, got {outcome:?}");
    };
    assert!(!format!("{err:?}").contains("tok-s3cr3t"), "debug: {err:?}");
    let mut source: Option<&dyn std::error::Error> = Some(&err as &dyn std::error::Error);
    let mut depth = 0;
    while let Some(e) = source {
        assert!(!e.to_string().contains("tok-s3cr3t"), "level {depth}: {e}");
        assert!(!format!("{e:?}").contains("tok-s3cr3t"), "level {depth}: {e:?}");
        source = e.source();
        depth += 1;
    }
    assert!(depth > 1, "expected the reqwest error as a source");
}

#[tokio::test]
async fn dot_segment_tokens_send_no_request() {
    let server = spawn_server(200).await;
    let api = client(&server.address);

    for token in [".", ".."] {
        let outcome = api.activate(&token.into()).await;
        assert!(
            matches!(
                outcome,
                ActivationOutcome::TransportError(ActivationError::UnroutableToken)
            ),
            "token {token:?} gave {outcome:?}"
        );
    }
    assert!(server.recorded().is_empty());
}

#[tokio::test]
async fn percent_encoded_route_token_is_sent_once_encoded() {
    let server = spawn_server(200).await;
    let api = client(&server.address);

    let token = match Route::parse("/confirm/ab%2Fc%41") {
        Route::Confirmation { token: Some(token) } => token,
        other => panic!("unexpected route {other:?}"),
    };
    api.activate(&token).await;

    assert_eq!(server.recorded()[0].1, "/v1/users/activate/ab%2FcA");
}

#[derive(Default)]
struct Recorder {
    navigations: Mutex<Vec<String>>,
    alerts: Mutex<Vec<String>>,
}

impl Navigator for Recorder {
    fn navigate(&self, path: &str) {
        self.navigations.lock().unwrap().push(path.to_string());
    }
}

impl Notifier for Recorder {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

#[tokio::test]
async fn route_to_navigation_end_to_end() {
    let server = spawn_server(200).await;
    let rec = Arc::new(Recorder::default());
    let view = ConfirmationView::new(
        Arc::new(client(&server.address)),
        rec.clone(),
        rec.clone(),
        ConfirmOptions::default(),
    );

    let token = match Route::parse("/confirm/abc123") {
        Route::Confirmation { token } => token,
        other => panic!("unexpected route {other:?}"),
    };
    let attempt = view.confirm(token.as_ref()).await;

    assert_eq!(attempt.state, ConfirmationState::Navigated);
    assert_eq!(*rec.navigations.lock().unwrap(), vec!["/"]);
    assert!(rec.alerts.lock().unwrap().is_empty());
    assert_eq!(server.recorded()[0].1, "/v1/users/activate/abc123");
}

#[tokio::test]
async fn rejected_end_to_end_alerts_once() {
    let server = spawn_server(400).await;
    let rec = Arc::new(Recorder::default());
    let view = ConfirmationView::new(
        Arc::new(client(&server.address)),
        rec.clone(),
        rec.clone(),
        ConfirmOptions::default(),
    );

    let attempt = view.confirm(Some(&"expired".into())).await;

    assert_eq!(attempt.state, ConfirmationState::Alerted);
    assert_eq!(rec.alerts.lock().unwrap().len(), 1);
    assert!(rec.navigations.lock().unwrap().is_empty());
}
