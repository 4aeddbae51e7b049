//! Helpers for capture log file names

use chrono::NaiveDate;
use std::path::Path;

/// Prefix of the per-day files written by the capture agent
pub const LOG_FILE_PREFIX: &str = "log_";

/// Extracts the capture date from a `log_DDMMYYYY` file name.
///
/// Returns `None` for any other name.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use keylog_decoder::utils::capture_date;
/// use std::path::Path;
///
/// let date = capture_date(Path::new("/var/log/x/log_07032024"));
/// assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 7));
/// ```
pub fn capture_date(path: &Path) -> Option<NaiveDate> {
    let name = path.file_name()?.to_str()?;
    let digits = name.strip_prefix(LOG_FILE_PREFIX)?;
    if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(digits, "%d%m%Y").ok()
}
