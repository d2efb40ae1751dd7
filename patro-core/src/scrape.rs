//! Month and year loops: cache check, retrying fetch, pacing, aggregation.

use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{MONTH_DELAY, MONTHS_PER_YEAR, YEAR_DELAY};
use crate::error::{PatroError, PatroResult};
use crate::extract::Extractor;
use crate::fetch::Fetcher;
use crate::model::{MonthRecord, OutputModes, YearRecord};
use crate::progress::{Progress, ProgressEvent};
use crate::retry::{self, RetryPolicy};
use crate::store::Store;

/// Fixed waits that keep the scraper polite to the upstream site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// After every month, cached or not.
    pub between_months: Duration,
    /// Between consecutive years, not after the last.
    pub between_years: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing {
            between_months: MONTH_DELAY,
            between_years: YEAR_DELAY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearReport {
    pub year: u16,
    pub succeeded: Vec<u8>,
    pub failed: Vec<u8>,
    /// Path of the aggregate, when one was written.
    pub aggregate: Option<PathBuf>,
}

impl YearReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct Scraper<F> {
    fetcher: F,
    extractor: Extractor,
    store: Store,
    retry: RetryPolicy,
    pacing: Pacing,
}

impl<F: Fetcher> Scraper<F> {
    pub fn new(fetcher: F, store: Store) -> PatroResult<Self> {
        Ok(Scraper {
            fetcher,
            extractor: Extractor::new()?,
            store,
            retry: RetryPolicy::default(),
            pacing: Pacing::default(),
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Scrape `start..=end` one year at a time.
    pub async fn scrape_years(
        &self,
        start: u16,
        end: u16,
        modes: OutputModes,
        progress: &dyn Progress,
    ) -> PatroResult<Vec<YearReport>> {
        if start > end {
            return Err(PatroError::InvalidYearRange { start, end });
        }

        let mut reports = Vec::new();
        for year in start..=end {
            reports.push(self.scrape_year(year, modes, progress).await);

            if year < end {
                progress.report(ProgressEvent::WaitingForNextYear {
                    delay: self.pacing.between_years,
                });
                tokio::time::sleep(self.pacing.between_years).await;
            }
        }

        Ok(reports)
    }

    /// Scrape all twelve months of `year`.
    ///
    /// Months that exhaust their retries or cannot be saved are left out;
    /// the year aggregate is only written when none were.
    pub async fn scrape_year(
        &self,
        year: u16,
        modes: OutputModes,
        progress: &dyn Progress,
    ) -> YearReport {
        progress.report(ProgressEvent::YearStarted { year, modes });

        let mut months = YearRecord::new();
        let mut failed = Vec::new();

        for month in 1..=MONTHS_PER_YEAR {
            progress.report(ProgressEvent::MonthStarted { year, month });

            match self.obtain_month(year, month, modes, progress).await {
                Some(record) => {
                    months.insert(month, record);
                }
                None => failed.push(month),
            }

            tokio::time::sleep(self.pacing.between_months).await;
        }

        let aggregate = if months.len() == usize::from(MONTHS_PER_YEAR) && modes.single {
            self.save_aggregate(year, &months, progress)
        } else {
            None
        };

        progress.report(ProgressEvent::YearFinished {
            year,
            succeeded: months.len(),
            failed: failed.len(),
        });

        YearReport {
            year,
            succeeded: months.into_keys().collect(),
            failed,
            aggregate,
        }
    }

    fn save_aggregate(
        &self,
        year: u16,
        months: &YearRecord,
        progress: &dyn Progress,
    ) -> Option<PathBuf> {
        match self.store.save_year(year, months) {
            Ok(path) => {
                progress.report(ProgressEvent::YearSaved {
                    year,
                    path: path.clone(),
                });
                Some(path)
            }
            Err(e) => {
                tracing::error!(year, error = %e, "failed to save year aggregate");
                progress.report(ProgressEvent::YearSaveFailed {
                    year,
                    error: e.to_string(),
                });
                None
            }
        }
    }

    /// Cached record if there is one, otherwise a fresh fetch (saved when
    /// directory output is on). `None` when every attempt failed or the
    /// month file could not be written.
    async fn obtain_month(
        &self,
        year: u16,
        month: u8,
        modes: OutputModes,
        progress: &dyn Progress,
    ) -> Option<MonthRecord> {
        match self.store.load_month_if_cached(year, month) {
            Ok(Some(record)) => {
                progress.report(ProgressEvent::CacheHit {
                    year,
                    month,
                    path: self.store.month_path(year, month),
                });
                return Some(record);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(year, month, error = %e, "ignoring unreadable cached month");
                progress.report(ProgressEvent::CacheUnreadable {
                    year,
                    month,
                    error: e.to_string(),
                });
            }
        }

        let outcome = retry::fetch_month(
            &self.fetcher,
            &self.extractor,
            &self.retry,
            year,
            month,
            progress,
        )
        .await;

        let record = outcome.record()?;

        if modes.directory {
            match self.store.save_month(year, month, &record) {
                Ok(path) => progress.report(ProgressEvent::MonthSaved { year, month, path }),
                Err(e) => {
                    tracing::error!(year, month, error = %e, "failed to save month");
                    progress.report(ProgressEvent::MonthSaveFailed {
                        year,
                        month,
                        error: e.to_string(),
                    });
                    return None;
                }
            }
        }

        Some(record)
    }
}
