//! Phone lookup service.
//!
//! Finds every user whose stored phone number is the same number as the
//! query, regardless of how either was written.

use crate::directory::{scan_users, UserDirectory};
use crate::domain::CanonicalPhoneNumber;
use crate::error::{HandlerError, HandlerResult};
use crate::metrics::Metrics;
use crate::models::{LookupQuery, LookupResponse, MatchResult, UserRecord};
use crate::phone::PhoneNormalizer;
use async_trait::async_trait;
use futures::future;
use futures::TryStreamExt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Users requested from the directory per page.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Lookup service trait.
#[async_trait]
pub trait LookupService: Send + Sync {
    /// Find all users whose stored phone normalizes to the query's number.
    ///
    /// # Errors
    ///
    /// - `HandlerError::BadRequest` if the number is empty or unparseable
    /// - `HandlerError::Directory` if the user directory cannot be read
    async fn lookup(&self, query: LookupQuery) -> HandlerResult<LookupResponse>;
}

/// Outcome of comparing one user against the query.
#[derive(Debug)]
enum Candidate {
    Match(MatchResult),
    Miss,
    Skipped,
}

/// Running totals of a scan.
#[derive(Debug, Default)]
struct ScanTally {
    matches: Vec<MatchResult>,
    scanned: usize,
    skipped: usize,
}

impl ScanTally {
    fn record(mut self, candidate: Candidate) -> Self {
        self.scanned += 1;
        match candidate {
            Candidate::Match(result) => self.matches.push(result),
            Candidate::Miss => {}
            Candidate::Skipped => self.skipped += 1,
        }
        self
    }
}

/// Default implementation of LookupService over a user directory.
pub struct PhoneLookupHandler {
    directory: Arc<dyn UserDirectory>,
    normalizer: Arc<dyn PhoneNormalizer>,
    metrics: Metrics,
    page_size: usize,
}

impl PhoneLookupHandler {
    /// Create a new lookup handler.
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        normalizer: Arc<dyn PhoneNormalizer>,
        metrics: Metrics,
    ) -> Self {
        Self {
            directory,
            normalizer,
            metrics,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set how many users are requested from the directory at once.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Compare one user's stored phone with the query number.
    ///
    /// Stored phones are always normalized without a region hint.
    fn evaluate(&self, user: &UserRecord, target: &CanonicalPhoneNumber) -> Candidate {
        let Some(raw) = user.stored_phone() else {
            debug!(uid = %user.uid, "Skipping user without phone");
            return Candidate::Skipped;
        };

        match self.normalizer.normalize(raw, None) {
            Ok(phone) if &phone == target => Candidate::Match(MatchResult::from_user(user, phone)),
            Ok(_) => Candidate::Miss,
            Err(e) => {
                debug!(uid = %user.uid, reason = %e, "Skipping user with unparseable phone");
                Candidate::Skipped
            }
        }
    }
}

#[async_trait]
impl LookupService for PhoneLookupHandler {
    async fn lookup(&self, query: LookupQuery) -> HandlerResult<LookupResponse> {
        if query.number.is_empty() {
            self.metrics.record_rejected_lookup();
            return Err(HandlerError::missing_number());
        }

        let target = match self.normalizer.normalize(&query.number, query.region_hint()) {
            Ok(phone) => phone,
            Err(e) => {
                debug!(reason = %e, "Rejecting query number");
                self.metrics.record_rejected_lookup();
                return Err(HandlerError::invalid_number());
            }
        };

        let start = Instant::now();

        let tally = scan_users(self.directory.as_ref(), self.page_size)
            .try_fold(ScanTally::default(), |tally, user| {
                future::ready(Ok(tally.record(self.evaluate(&user, &target))))
            })
            .await
            .map_err(|e| {
                error!(error = %e, "User directory scan failed");
                HandlerError::from(e)
            })?;

        self.metrics
            .record_lookup(tally.scanned, tally.skipped, tally.matches.len());

        info!(
            scanned = tally.scanned,
            skipped = tally.skipped,
            matches = tally.matches.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Phone lookup completed"
        );

        Ok(LookupResponse::from(tally.matches))
    }
}
