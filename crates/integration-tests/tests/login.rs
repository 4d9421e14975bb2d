//! End-to-end credential submission tests against a mock backend.

#![allow(clippy::unwrap_used)]

use secrecy::SecretString;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use platter_account::auth::{CredentialSubmitter, LoginOutcome, SignupOutcome};
use platter_account::config::Route;
use platter_account::error::NoticeLevel;

use platter_integration_tests::{evidence_cookie, login_body, test_backend};

#[tokio::test]
async fn test_admin_login_routes_to_admin_dashboard() {
    let backend = test_backend().await;

    Mock::given(method("POST"))
        .and(path("/api/users/Login"))
        .and(body_json(serde_json::json!({
            "email": "admin@x.com",
            "password": "pw"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", evidence_cookie("tok-admin").as_str())
                .set_body_json(login_body("admin")),
        )
        .expect(1)
        .mount(&backend.server)
        .await;

    let submitter = CredentialSubmitter::new(backend.client.clone());
    let outcome = submitter
        .submit("admin@x.com", SecretString::from("pw"))
        .await;

    match outcome {
        LoginOutcome::Success { role, destination } => {
            assert_eq!(role, "admin");
            assert_eq!(destination, Route::AdminDashboard);
            assert_eq!(
                backend.config.route_path(destination),
                "/admin-dashboard"
            );
        }
        other => panic!("expected success, got {other:?}"),
    }

    // The cookie evidence is in the vault for the next mount.
    let state = backend.session.detect();
    assert!(state.authenticated);
    assert_eq!(state.evidence.unwrap().token(), "tok-admin");
}

#[tokio::test]
async fn test_user_login_routes_home() {
    let backend = test_backend().await;

    Mock::given(method("POST"))
        .and(path("/api/users/Login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", evidence_cookie("tok-user").as_str())
                .set_body_json(login_body("user")),
        )
        .mount(&backend.server)
        .await;

    let submitter = CredentialSubmitter::new(backend.client.clone());
    let outcome = submitter
        .submit("admin@x.com", SecretString::from("pw"))
        .await;

    match outcome {
        LoginOutcome::Success { destination, .. } => assert_eq!(destination, Route::Home),
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn test_phone_identifier_sends_mobile_field() {
    let backend = test_backend().await;

    // Exact body match: mobile only, never an email field.
    Mock::given(method("POST"))
        .and(path("/api/users/Login"))
        .and(body_json(serde_json::json!({
            "mobile": "9876543210",
            "password": "pw"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", evidence_cookie("tok-phone").as_str())
                .set_body_json(login_body("user")),
        )
        .expect(1)
        .mount(&backend.server)
        .await;

    let submitter = CredentialSubmitter::new(backend.client.clone());
    let outcome = submitter.submit("9876543210", SecretString::from("pw")).await;
    assert!(matches!(outcome, LoginOutcome::Success { .. }));
}

#[tokio::test]
async fn test_body_token_fallback_when_no_cookie() {
    let backend = test_backend().await;

    let mut body = login_body("user");
    body["accessToken"] = serde_json::json!("tok-body");
    Mock::given(method("POST"))
        .and(path("/api/users/Login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&backend.server)
        .await;

    let submitter = CredentialSubmitter::new(backend.client.clone());
    submitter.submit("a@b.com", SecretString::from("pw")).await;

    assert_eq!(
        backend.session.detect().evidence.unwrap().token(),
        "tok-body"
    );
}

#[tokio::test]
async fn test_failed_login_leaves_no_state_and_stays_resubmittable() {
    let backend = test_backend().await;

    Mock::given(method("POST"))
        .and(path("/api/users/Login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .expect(2)
        .mount(&backend.server)
        .await;

    let submitter = CredentialSubmitter::new(backend.client.clone());

    let outcome = submitter.submit("a@b.com", SecretString::from("nope")).await;
    let LoginOutcome::Failed(notice) = outcome else {
        panic!("expected failure");
    };
    assert_eq!(notice.level, NoticeLevel::Error);

    // No partial state: the vault is still empty.
    assert!(!backend.session.detect().authenticated);

    // The form stays editable and resubmittable.
    assert!(!submitter.is_loading());
    let outcome = submitter.submit("a@b.com", SecretString::from("nope")).await;
    assert!(matches!(outcome, LoginOutcome::Failed(_)));
}

#[tokio::test]
async fn test_register_sends_signup_role_and_routes_to_login() {
    let backend = test_backend().await;

    Mock::given(method("POST"))
        .and(path("/api/users/Register"))
        .and(body_json(serde_json::json!({
            "name": "New User",
            "email": "new@user.com",
            "password": "pw",
            "role": "user"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&backend.server)
        .await;

    let submitter = CredentialSubmitter::new(backend.client.clone());
    let outcome = submitter
        .register("New User", "new@user.com", SecretString::from("pw"))
        .await;

    match outcome {
        SignupOutcome::Success {
            destination,
            notice,
        } => {
            assert_eq!(destination, Route::Login);
            assert_eq!(notice.level, NoticeLevel::Info);
        }
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn test_password_reset_notices_on_both_paths() {
    let backend = test_backend().await;

    Mock::given(method("POST"))
        .and(path("/api/users/forget-password"))
        .and(body_json(serde_json::json!({"email": "a@b.com"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&backend.server)
        .await;

    let submitter = CredentialSubmitter::new(backend.client.clone());

    let notice = submitter.request_password_reset("a@b.com").await;
    assert_eq!(notice.level, NoticeLevel::Info);

    // Unmatched path: the mock answers 404, which must still come back as
    // a notice, never an error.
    let backend_down = test_backend().await;
    let submitter = CredentialSubmitter::new(backend_down.client.clone());
    let notice = submitter.request_password_reset("9876543210").await;
    assert_eq!(notice.level, NoticeLevel::Error);
}
