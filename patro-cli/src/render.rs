//! TUI rendering for patro types.
//!
//! Extension traits that turn core progress events and reports into colored
//! terminal lines using owo_colors.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::ProgressBar;
use owo_colors::OwoColorize;
use patro_core::OutputModes;
use patro_core::progress::{Progress, ProgressEvent};
use patro_core::scrape::YearReport;

use crate::utils::tui;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

fn month_label(year: u16, month: u8) -> String {
    format!("[{}/{}]", year, month)
}

fn seconds(delay: &Duration) -> String {
    format!("{}s", delay.as_secs_f64())
}

impl Render for OutputModes {
    fn render(&self) -> String {
        let mut parts = Vec::new();
        if self.single {
            parts.push("Single JSON");
        }
        if self.directory {
            parts.push("Directory");
        }
        parts.join(" + ")
    }
}

impl Render for ProgressEvent {
    fn render(&self) -> String {
        match self {
            ProgressEvent::YearStarted { year, modes } => format!(
                "\n{} {}\n   Mode: {}",
                "Starting scrape for year:".bold(),
                year.cyan().bold(),
                modes.render()
            ),
            ProgressEvent::MonthStarted { year, month } => format!(
                "\n{}",
                format!("Fetching data for {}", month_label(*year, *month)).cyan()
            ),
            ProgressEvent::CacheHit { .. } => "Skipped: File already exists.".dimmed().to_string(),
            ProgressEvent::CacheUnreadable { error, .. } => {
                format!("Cached file unreadable ({}), fetching again", error)
                    .yellow()
                    .to_string()
            }
            ProgressEvent::AttemptStarted { attempt, .. } => {
                format!("Sending request (attempt {})...", attempt)
                    .blue()
                    .to_string()
            }
            ProgressEvent::PageFetched { bytes, .. } => {
                format!("Page fetched successfully ({} bytes). Parsing HTML...", bytes)
                    .green()
                    .to_string()
            }
            ProgressEvent::MonthParsed {
                metadata,
                days,
                holidays_and_festivals,
                marriage_dates,
                coming_of_age_dates,
                ..
            } => [
                format!("Metadata: {} ({})", metadata.np, metadata.en)
                    .dimmed()
                    .to_string(),
                format!("Holidays/Festivals: {}", holidays_and_festivals)
                    .magenta()
                    .to_string(),
                format!("Marriage Dates: {}", marriage_dates)
                    .magenta()
                    .to_string(),
                format!("Bratabandha Dates: {}", coming_of_age_dates)
                    .magenta()
                    .to_string(),
                format!("Parsed {} days successfully.", days)
                    .green()
                    .to_string(),
            ]
            .join("\n"),
            ProgressEvent::AttemptFailed {
                year, month, error, ..
            } => format!("Error fetching {}: {}", month_label(*year, *month), error)
                .red()
                .to_string(),
            ProgressEvent::RetryScheduled { delay, .. } => {
                format!("Retrying in {}...", seconds(delay))
                    .yellow()
                    .to_string()
            }
            ProgressEvent::MonthExhausted {
                year,
                month,
                attempts,
            } => format!(
                "{}\n{}",
                format!(
                    "Failed after {} attempts for {}",
                    attempts,
                    month_label(*year, *month)
                )
                .red(),
                format!("Failed to gather data for month {}", month).red()
            ),
            ProgressEvent::MonthSaved { path, .. } => {
                format!("Saved individual month: {}", path.display())
                    .dimmed()
                    .to_string()
            }
            ProgressEvent::MonthSaveFailed {
                year, month, error, ..
            } => format!(
                "Could not save {}: {}",
                month_label(*year, *month),
                error
            )
            .red()
            .to_string(),
            ProgressEvent::YearSaved { path, .. } => format!(
                "\n{}",
                format!("Saved aggregated file: {}", path.display())
                    .green()
                    .bold()
            ),
            ProgressEvent::YearSaveFailed { year, error } => {
                format!("Could not save aggregated file for {}: {}", year, error)
                    .red()
                    .to_string()
            }
            ProgressEvent::YearFinished {
                succeeded, failed, ..
            } => format!("Success: {}  Failed: {}\n", succeeded, failed)
                .dimmed()
                .to_string(),
            ProgressEvent::WaitingForNextYear { delay } => {
                format!("Waiting {} before next year...", seconds(delay))
                    .yellow()
                    .to_string()
            }
        }
    }
}

impl Render for YearReport {
    fn render(&self) -> String {
        if self.is_complete() {
            format!("   {} {}", "✓".green(), self.year)
        } else {
            let missing: Vec<String> = self.failed.iter().map(|m| m.to_string()).collect();
            format!(
                "   {} {} {}",
                "✗".red(),
                self.year,
                format!("(missing months: {})", missing.join(", ")).dimmed()
            )
        }
    }
}

/// Prints progress events, with a spinner while a request is in flight.
#[derive(Default)]
pub struct ConsoleProgress {
    /// Running spinner and the line it stands for.
    spinner: Mutex<Option<(ProgressBar, String)>>,
}

impl ConsoleProgress {
    /// Clears the spinner and hands back its line so it stays in the log.
    fn stop_spinner(&self) -> Option<String> {
        let (spinner, line) = self.spinner.lock().ok()?.take()?;
        spinner.finish_and_clear();
        Some(line)
    }
}

impl Progress for ConsoleProgress {
    fn report(&self, event: ProgressEvent) {
        if let Some(line) = self.stop_spinner() {
            println!("{}", line);
        }

        if let ProgressEvent::AttemptStarted { .. } = event {
            let line = event.render();
            let spinner = tui::create_spinner(line.clone());
            if let Ok(mut slot) = self.spinner.lock() {
                *slot = Some((spinner, line));
            }
            return;
        }

        println!("{}", event.render());
    }
}
