//! Build-time settings of the single-page app.

const DEFAULT_API_BASE: &str = "/api";

/// Base URL of the backend API, from `IDCARD_API_BASE` at compile time.
pub fn api_base() -> &'static str {
    match option_env!("IDCARD_API_BASE") {
        Some(base) if !base.trim().is_empty() => base,
        _ => DEFAULT_API_BASE,
    }
}

/// Interval between status polls while a generation job is running.
pub const STATUS_POLL_MS: u32 = 5_000;

/// History rows shown on the dashboard.
pub const HISTORY_ROWS: usize = 10;

pub const PREVIEW_ROWS: usize = 5;
