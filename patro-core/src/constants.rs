use std::time::Duration;

/// Upstream calendar page that answers the month/year form.
pub const DEFAULT_ENDPOINT: &str = "https://nepalicalendar.rat32.com/index_nep.php";

/// Where artifacts land when nothing else is configured.
pub const DEFAULT_DATA_DIR: &str = "./data";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Literal the upstream form submits alongside year and month.
pub const VIEW_ACTION: (&str, &str) = ("viewCalander", "View Calander");

pub const MAX_ATTEMPTS: u32 = 3;

/// Backoff before attempt `n + 1` is `n` times this.
pub const BACKOFF_STEP: Duration = Duration::from_millis(3000);

pub const MONTH_DELAY: Duration = Duration::from_millis(2000);

pub const YEAR_DELAY: Duration = Duration::from_millis(5000);

pub const MONTHS_PER_YEAR: u8 = 12;
