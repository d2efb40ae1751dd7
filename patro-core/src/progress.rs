//! Progress events emitted while scraping.
//!
//! The pipeline never prints; it reports events through [`Progress`] and the
//! caller decides how to show them (colored console lines in the CLI,
//! recorded vectors in tests).

use std::path::PathBuf;
use std::time::Duration;

use crate::model::{Metadata, OutputModes};

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    YearStarted {
        year: u16,
        modes: OutputModes,
    },
    MonthStarted {
        year: u16,
        month: u8,
    },
    /// The month's artifact already exists; no request is made.
    CacheHit {
        year: u16,
        month: u8,
        path: PathBuf,
    },
    /// The month's artifact exists but could not be read; it will be fetched again.
    CacheUnreadable {
        year: u16,
        month: u8,
        error: String,
    },
    AttemptStarted {
        year: u16,
        month: u8,
        attempt: u32,
    },
    PageFetched {
        year: u16,
        month: u8,
        bytes: usize,
    },
    MonthParsed {
        year: u16,
        month: u8,
        metadata: Metadata,
        days: usize,
        holidays_and_festivals: usize,
        marriage_dates: usize,
        coming_of_age_dates: usize,
    },
    AttemptFailed {
        year: u16,
        month: u8,
        attempt: u32,
        error: String,
    },
    RetryScheduled {
        year: u16,
        month: u8,
        delay: Duration,
    },
    MonthExhausted {
        year: u16,
        month: u8,
        attempts: u32,
    },
    MonthSaved {
        year: u16,
        month: u8,
        path: PathBuf,
    },
    /// The record was fetched but its file could not be written; the month
    /// counts as missing.
    MonthSaveFailed {
        year: u16,
        month: u8,
        error: String,
    },
    YearSaved {
        year: u16,
        path: PathBuf,
    },
    YearSaveFailed {
        year: u16,
        error: String,
    },
    YearFinished {
        year: u16,
        succeeded: usize,
        failed: usize,
    },
    WaitingForNextYear {
        delay: Duration,
    },
}

/// Receiver for [`ProgressEvent`]s.
pub trait Progress {
    fn report(&self, event: ProgressEvent);
}

impl<F> Progress for F
where
    F: Fn(ProgressEvent),
{
    fn report(&self, event: ProgressEvent) {
        self(event)
    }
}

/// Discards every event.
pub struct NoProgress;

impl Progress for NoProgress {
    fn report(&self, _event: ProgressEvent) {}
}
