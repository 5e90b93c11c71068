//! Integration tests for the conformance suite against an in-memory service
//!
//! **Coverage:**
//! - A conforming service passes every check
//! - Each deviation is reported by the right check with the right mismatch
//! - Transport failures are reported as errors, and later checks still run
//! - Seeded sampling is deterministic

mod support;

use std::sync::Arc;

use support::{Fault, InMemoryUsersService};
use usercheck_core::{CheckId, CheckStatus, ConformanceSuite, Fixture, Mismatch, SuiteContext};
use usercheck_domain::constants::KNOWN_USER_ID;
use usercheck_domain::{Config, User, UsercheckError};

const HOST: &str = "http://users.test";

fn context() -> SuiteContext {
    let mut config = Config::for_host(HOST);
    config.suite.seed = Some(7);
    SuiteContext::new(config).unwrap()
}

fn small_fixture() -> Fixture {
    Fixture::from_users(vec![
        User::new(KNOWN_USER_ID, "Ms. Jailyn Reichert MD", "elbert@example.org"),
        User::new(
            "00000000-0000-0000-0000-000000000002",
            "Dr. Warren Nolan",
            "rosalind@example.com",
        ),
        User::new(
            "00000000-0000-0000-0000-000000000003",
            "Queenie Runolfsdottir",
            "xd@example.com",
        ),
    ])
    .unwrap()
}

async fn run_one(fixture: &Fixture, service: InMemoryUsersService, check: CheckId) -> CheckStatus {
    let suite = ConformanceSuite::new(context(), service.into_arc(), fixture);
    suite.run_check(check).await.status
}

fn expect_mismatch(status: CheckStatus) -> Mismatch {
    match status {
        CheckStatus::Failed { mismatch } => mismatch,
        other => panic!("expected a mismatch, got {other:?}"),
    }
}

// ============================================================================
// Conforming service
// ============================================================================

#[tokio::test]
async fn conforming_service_passes_every_default_check() {
    let fixture = Fixture::embedded().unwrap();
    let service = InMemoryUsersService::new(fixture).into_arc();
    let suite = ConformanceSuite::new(context(), service, fixture);

    let report = suite.run().await;

    assert!(report.is_success(), "{report}");
    assert_eq!(report.outcomes.len(), CheckId::ALL.len() - 1);
    assert!(report.outcome(CheckId::GetEveryUser).is_none());
    assert_eq!(report.host, HOST);
}

#[tokio::test]
async fn exhaustive_run_fetches_every_record_in_order() {
    let fixture = Fixture::embedded().unwrap();
    let service = Arc::new(InMemoryUsersService::new(fixture));

    let mut config = Config::for_host(HOST);
    config.suite.exhaustive = true;
    let suite = ConformanceSuite::new(SuiteContext::new(config).unwrap(), service.clone(), fixture);

    assert_eq!(suite.enabled_checks(), CheckId::ALL.to_vec());

    let outcome = suite.run_check(CheckId::GetEveryUser).await;
    assert!(outcome.passed());

    let expected: Vec<String> = fixture.users().iter().map(|u| u.id.clone()).collect();
    assert_eq!(service.requested_ids(), expected);
}

#[tokio::test]
async fn list_order_is_not_significant() {
    let fixture = small_fixture();
    let service = InMemoryUsersService::new(&fixture).with_fault(Fault::ListReversed);
    assert_eq!(run_one(&fixture, service, CheckId::ListUsers).await, CheckStatus::Passed);
}

// ============================================================================
// Deviations
// ============================================================================

#[tokio::test]
async fn unhealthy_service_fails_health() {
    let fixture = small_fixture();
    let service = InMemoryUsersService::new(&fixture).with_fault(Fault::HealthStatus(503));

    let mismatch = expect_mismatch(run_one(&fixture, service, CheckId::Health).await);
    assert_eq!(
        mismatch,
        Mismatch::Status { request: "GET /users/health".into(), expected: 200, actual: 503 }
    );
}

#[tokio::test]
async fn wrong_list_content_type_is_reported() {
    let fixture = small_fixture();
    let service =
        InMemoryUsersService::new(&fixture).with_fault(Fault::ListContentType("text/plain"));

    let mismatch = expect_mismatch(run_one(&fixture, service, CheckId::ListUsers).await);
    assert!(matches!(
        mismatch,
        Mismatch::ContentType { actual: Some(ref value), .. } if value == "text/plain"
    ));
}

#[tokio::test]
async fn missing_record_is_a_cardinality_mismatch() {
    let fixture = small_fixture();
    let service = InMemoryUsersService::new(&fixture).with_fault(Fault::ListDropsLastRecord);

    let mismatch = expect_mismatch(run_one(&fixture, service, CheckId::ListUsers).await);
    assert_eq!(
        mismatch,
        Mismatch::Cardinality { request: "GET /users".into(), expected: 3, actual: 2 }
    );
}

#[tokio::test]
async fn repeated_record_is_a_body_mismatch() {
    let fixture = small_fixture();
    let service = InMemoryUsersService::new(&fixture).with_fault(Fault::ListRepeatsFirstRecord);

    let mismatch = expect_mismatch(run_one(&fixture, service, CheckId::ListUsers).await);
    assert_eq!(mismatch.kind(), "body");
    assert!(mismatch.to_string().contains("repeats id"), "{mismatch}");
}

#[tokio::test]
async fn tampered_list_record_is_reported() {
    let fixture = small_fixture();
    let service = InMemoryUsersService::new(&fixture)
        .with_fault(Fault::RenameUser("00000000-0000-0000-0000-000000000002".into()));

    let mismatch = expect_mismatch(run_one(&fixture, service, CheckId::ListUsers).await);
    assert!(mismatch.to_string().contains("record 1"), "{mismatch}");
}

#[tokio::test]
async fn tampered_sampled_record_is_reported() {
    let fixture = small_fixture();
    let service = InMemoryUsersService::new(&fixture)
        .with_fault(Fault::RenameUser("00000000-0000-0000-0000-000000000003".into()));

    let mismatch = expect_mismatch(run_one(&fixture, service, CheckId::GetSampledUsers).await);
    assert!(mismatch.to_string().contains("field `name`"), "{mismatch}");
}

#[tokio::test]
async fn known_user_with_wrong_name_fails() {
    let fixture = small_fixture();
    let service =
        InMemoryUsersService::new(&fixture).with_fault(Fault::RenameUser(KNOWN_USER_ID.into()));

    let mismatch = expect_mismatch(run_one(&fixture, service, CheckId::GetKnownUser).await);
    assert!(mismatch.to_string().contains("field `name`"), "{mismatch}");
}

#[tokio::test]
async fn known_user_with_extra_key_fails() {
    let fixture = small_fixture();
    let service =
        InMemoryUsersService::new(&fixture).with_fault(Fault::ExtraKeyOn(KNOWN_USER_ID.into()));

    let mismatch = expect_mismatch(run_one(&fixture, service, CheckId::GetKnownUser).await);
    assert!(mismatch.to_string().contains("expected exactly 3 keys, got 4"), "{mismatch}");
}

#[tokio::test]
async fn invalid_id_must_be_not_found() {
    let fixture = small_fixture();
    let service = InMemoryUsersService::new(&fixture).with_fault(Fault::InvalidIdStatus(400));

    let mismatch = expect_mismatch(run_one(&fixture, service, CheckId::GetInvalidId).await);
    assert_eq!(
        mismatch,
        Mismatch::Status { request: "GET /users/invalid-id".into(), expected: 404, actual: 400 }
    );
}

#[tokio::test]
async fn absent_id_must_be_not_found() {
    let fixture = small_fixture();
    let service = InMemoryUsersService::new(&fixture).with_fault(Fault::AbsentIdStatus(200));

    let mismatch = expect_mismatch(run_one(&fixture, service, CheckId::GetAbsentId).await);
    assert!(matches!(mismatch, Mismatch::Status { expected: 404, actual: 200, .. }));
}

#[tokio::test]
async fn drifting_lookups_break_idempotence() {
    let fixture = small_fixture();
    let service = InMemoryUsersService::new(&fixture).with_fault(Fault::DriftingLookups);

    let mismatch =
        expect_mismatch(run_one(&fixture, service, CheckId::RepeatedGetIsIdempotent).await);
    assert!(mismatch.to_string().contains("response 2 differs"), "{mismatch}");
}

// ============================================================================
// Transport failures and independence
// ============================================================================

#[tokio::test]
async fn unreachable_service_errors_every_check() {
    let fixture = small_fixture();
    let service = InMemoryUsersService::new(&fixture).with_fault(Fault::Unreachable).into_arc();
    let suite = ConformanceSuite::new(context(), service, &fixture);

    let report = suite.run().await;

    assert_eq!(report.outcomes.len(), suite.enabled_checks().len());
    assert_eq!(report.errored_count(), report.outcomes.len());
    assert!(!report.is_success());
}

#[tokio::test]
async fn one_failure_does_not_stop_later_checks() {
    let fixture = small_fixture();
    let service =
        InMemoryUsersService::new(&fixture).with_fault(Fault::HealthStatus(500)).into_arc();
    let suite = ConformanceSuite::new(context(), service, &fixture);

    let report = suite.run().await;

    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.passed_count(), report.outcomes.len() - 1);
    assert!(!report.outcome(CheckId::Health).unwrap().passed());
}

// ============================================================================
// Sampling and context
// ============================================================================

#[tokio::test]
async fn seeded_sample_requests_the_same_ids() {
    let fixture = Fixture::embedded().unwrap();

    let first = Arc::new(InMemoryUsersService::new(fixture));
    let second = Arc::new(InMemoryUsersService::new(fixture));

    for service in [&first, &second] {
        let suite = ConformanceSuite::new(context(), service.clone(), fixture);
        assert!(suite.run_check(CheckId::GetSampledUsers).await.passed());
    }

    assert_eq!(first.requested_ids().len(), 10);
    assert_eq!(first.requested_ids(), second.requested_ids());
}

#[test]
fn context_exposes_host_and_rejects_bad_config() {
    assert_eq!(context().host(), HOST);

    let err = SuiteContext::new(Config::for_host("not a url")).unwrap_err();
    assert!(matches!(err, UsercheckError::Config(_)));
}
