//! Bounded retry around one month's fetch and extraction.
//!
//! Network errors, bad statuses and extraction failures all get the same
//! treatment: wait, try again, give up after [`MAX_ATTEMPTS`]. A page that is
//! deterministically broken is retried too.

use std::time::Duration;

use crate::constants::{BACKOFF_STEP, MAX_ATTEMPTS};
use crate::error::PatroError;
use crate::extract::Extractor;
use crate::fetch::Fetcher;
use crate::model::MonthRecord;
use crate::progress::{Progress, ProgressEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Linear backoff: the wait after attempt `n` is `n * step`.
    pub step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: MAX_ATTEMPTS,
            step: BACKOFF_STEP,
        }
    }
}

impl RetryPolicy {
    /// Delay before starting attempt `attempt + 1`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.step * attempt
    }
}

#[derive(Debug)]
pub enum RetryOutcome {
    Succeeded { record: MonthRecord, attempts: u32 },
    Exhausted { attempts: u32, last_error: PatroError },
}

impl RetryOutcome {
    pub fn record(self) -> Option<MonthRecord> {
        match self {
            RetryOutcome::Succeeded { record, .. } => Some(record),
            RetryOutcome::Exhausted { .. } => None,
        }
    }
}

/// Fetch and extract `year/month`, retrying per `policy`.
pub async fn fetch_month<F: Fetcher>(
    fetcher: &F,
    extractor: &Extractor,
    policy: &RetryPolicy,
    year: u16,
    month: u8,
    progress: &dyn Progress,
) -> RetryOutcome {
    let mut attempt = 1;

    loop {
        progress.report(ProgressEvent::AttemptStarted {
            year,
            month,
            attempt,
        });

        let error = match fetcher.fetch(year, month).await {
            Ok(html) => {
                progress.report(ProgressEvent::PageFetched {
                    year,
                    month,
                    bytes: html.len(),
                });

                let record = extractor.extract(&html);
                progress.report(ProgressEvent::MonthParsed {
                    year,
                    month,
                    metadata: record.metadata.clone(),
                    days: record.days.len(),
                    holidays_and_festivals: record.holidays_and_festivals.len(),
                    marriage_dates: record.marriage_dates.len(),
                    coming_of_age_dates: record.coming_of_age_dates.len(),
                });

                return RetryOutcome::Succeeded {
                    record,
                    attempts: attempt,
                };
            }
            Err(e) => e,
        };

        tracing::warn!(year, month, attempt, error = %error, "month attempt failed");
        progress.report(ProgressEvent::AttemptFailed {
            year,
            month,
            attempt,
            error: error.to_string(),
        });

        if attempt >= policy.max_attempts {
            progress.report(ProgressEvent::MonthExhausted {
                year,
                month,
                attempts: attempt,
            });
            return RetryOutcome::Exhausted {
                attempts: attempt,
                last_error: error,
            };
        }

        let delay = policy.backoff(attempt);
        progress.report(ProgressEvent::RetryScheduled { year, month, delay });
        tokio::time::sleep(delay).await;

        attempt += 1;
    }
}
