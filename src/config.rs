//! Runtime settings read from the environment (and `.env`, loaded in `main`).

use std::str::FromStr;
use tracing::warn;

use crate::pagination::DEFAULT_PAGE_SIZE;

/// Read directly in `main`, before logging is set up.
pub const DEFAULT_LOG_FILE_PATH: &str = "logs/charger_status.log";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// `PAGE_SIZE`, charger series per page; always > 0
    pub page_size: usize,
    /// `HTTP_TIMEOUT_SECS`, timeout for remote sources
    pub http_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup. Unparseable or zero values fall
    /// back to the default with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            page_size: positive(&lookup, "PAGE_SIZE", defaults.page_size),
            http_timeout_secs: positive(&lookup, "HTTP_TIMEOUT_SECS", defaults.http_timeout_secs),
        }
    }

    /// Applies a CLI override; zero is ignored.
    pub fn with_page_size(mut self, page_size: Option<usize>) -> Self {
        match page_size {
            Some(0) => warn!("Ignoring page size 0"),
            Some(size) => self.page_size = size,
            None => {}
        }
        self
    }
}

fn positive<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + PartialOrd + Default + Copy,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(v) if v > T::default() => v,
        _ => {
            warn!(key, value = %raw, "Invalid setting, using default");
            default
        }
    }
}
