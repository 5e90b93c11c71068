//! Suite runner
//!
//! [`ConformanceSuite`] runs the checks strictly one after another against a
//! [`UsersService`]. A failing check never stops the ones after it.

mod report;

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, instrument, warn};
use usercheck_domain::{Config, Result, SuiteConfig, UsercheckError};

pub use report::SuiteReport;

use crate::checks::{health, listing, lookup, not_found, CheckId, CheckOutcome, CheckStatus};
use crate::fixtures::Fixture;
use crate::ports::UsersService;

/// Validated configuration for one suite run.
///
/// Plays the role of the base test harness: it knows which host is under
/// test and how the checks are tuned.
#[derive(Debug, Clone)]
pub struct SuiteContext {
    config: Config,
}

impl SuiteContext {
    /// # Errors
    /// Returns `UsercheckError::Config` if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Base URL of the service under test.
    pub fn host(&self) -> &str {
        &self.config.service.host
    }

    pub fn suite(&self) -> &SuiteConfig {
        &self.config.suite
    }
}

/// Runs checks against one service using one fixture.
pub struct ConformanceSuite<'f> {
    service: Arc<dyn UsersService>,
    fixture: &'f Fixture,
    context: SuiteContext,
}

impl<'f> ConformanceSuite<'f> {
    pub fn new(
        context: SuiteContext,
        service: Arc<dyn UsersService>,
        fixture: &'f Fixture,
    ) -> Self {
        Self { service, fixture, context }
    }

    /// Checks a full run executes. `get_every_user` only runs when
    /// `exhaustive` is set.
    pub fn enabled_checks(&self) -> Vec<CheckId> {
        CheckId::ALL
            .into_iter()
            .filter(|check| *check != CheckId::GetEveryUser || self.context.suite().exhaustive)
            .collect()
    }

    /// Run every enabled check.
    pub async fn run(&self) -> SuiteReport {
        let checks = self.enabled_checks();
        self.run_checks(&checks).await
    }

    /// Run the given checks in the given order.
    #[instrument(skip_all, fields(host = %self.context.host(), checks = checks.len()))]
    pub async fn run_checks(&self, checks: &[CheckId]) -> SuiteReport {
        let started_at = Utc::now();
        let started = Instant::now();

        let mut outcomes = Vec::with_capacity(checks.len());
        for &check in checks {
            outcomes.push(self.run_check(check).await);
        }

        let report = SuiteReport {
            host: self.context.host().to_string(),
            started_at,
            elapsed_ms: elapsed_ms(started),
            outcomes,
        };

        info!(
            passed = report.passed_count(),
            failed = report.failed_count(),
            errored = report.errored_count(),
            elapsed_ms = report.elapsed_ms,
            "conformance suite finished"
        );
        report
    }

    /// Run a single check.
    pub async fn run_check(&self, check: CheckId) -> CheckOutcome {
        let started = Instant::now();
        let status = CheckStatus::from(self.execute(check).await);
        let outcome = CheckOutcome { check, status, elapsed_ms: elapsed_ms(started) };

        match &outcome.status {
            CheckStatus::Passed => {
                info!(check = %check, elapsed_ms = outcome.elapsed_ms, "check passed");
            }
            CheckStatus::Failed { mismatch } => {
                warn!(check = %check, kind = mismatch.kind(), %mismatch, "check failed");
            }
            CheckStatus::Errored { message } => {
                warn!(check = %check, error = %message, "check errored");
            }
        }

        outcome
    }

    async fn execute(&self, check: CheckId) -> crate::checks::CheckResult {
        let service = self.service.as_ref();
        let suite = self.context.suite();

        match check {
            CheckId::Health => health::health(service).await,
            CheckId::ListUsers => listing::list_users(service, self.fixture).await,
            CheckId::GetSampledUsers => {
                let sample = self.fixture.sample(suite.sample_size, &mut self.rng());
                lookup::get_sampled_users(service, &sample).await
            }
            CheckId::GetKnownUser => lookup::get_known_user(service).await,
            CheckId::GetInvalidId => not_found::get_invalid_id(service).await,
            CheckId::GetAbsentId => not_found::get_absent_id(service).await,
            CheckId::RepeatedGetIsIdempotent => {
                let user = self.fixture.choose(&mut self.rng()).ok_or_else(|| {
                    UsercheckError::Fixture("fixture contains no records".into())
                })?;
                lookup::repeated_get_is_idempotent(service, user, suite.idempotence_rounds).await
            }
            CheckId::GetEveryUser => lookup::get_every_user(service, self.fixture).await,
        }
    }

    fn rng(&self) -> StdRng {
        match self.context.suite().seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
