//! Error types and probe failure accounting.
//!
//! Probe failures never abort a run; they downgrade a domain's result instead
//! (see the probers for the exact semantics). This module counts them so the
//! end-of-run summary can say how much of the verdict set rests on errors
//! rather than on clean probes.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Types of probe failures that can occur while classifying a domain.
///
/// Each variant is a distinct failure mode; counts are reported at the end of
/// a run so operators can tell a clean pass from one that leaned on fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// A DNS lookup tool could not be spawned.
    DnsToolError,
    /// The HTTP probe timed out.
    HttpRequestTimeoutError,
    /// The HTTP probe could not connect.
    HttpRequestConnectError,
    /// The HTTP probe failed while sending the request.
    HttpRequestRequestError,
    /// Any other HTTP probe failure.
    HttpRequestOtherError,
}

impl ErrorType {
    /// Human-readable label used in the end-of-run summary.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::DnsToolError => "DNS tool spawn error",
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout error",
            ErrorType::HttpRequestConnectError => "HTTP request connect error",
            ErrorType::HttpRequestRequestError => "HTTP request error",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
        }
    }
}

/// Thread-safe probe failure tracker.
///
/// Tracks the count of each failure type using atomic counters, allowing
/// concurrent access from multiple workers. All types are initialized to zero
/// on creation, so the tracker can be shared across tasks behind an `Arc`.
pub struct ErrorStats {
    errors: HashMap<ErrorType, AtomicUsize>,
}

impl ErrorStats {
    /// Creates a tracker with every failure type at zero.
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }
        ErrorStats { errors }
    }

    /// Adds one to the counter for `error`.
    pub fn increment(&self, error: ErrorType) {
        // All ErrorType variants are initialized in new(), so unwrap() is safe
        self.errors
            .get(&error)
            .unwrap()
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Current count for `error`.
    pub fn get_count(&self, error: ErrorType) -> usize {
        // All ErrorType variants are initialized in new(), so unwrap() is safe
        self.errors.get(&error).unwrap().load(Ordering::SeqCst)
    }

    /// Sum of all failure counters.
    pub fn total(&self) -> usize {
        ErrorType::iter().map(|error| self.get_count(error)).sum()
    }
}

impl Default for ErrorStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Updates failure statistics based on a `reqwest::Error`.
///
/// Timeouts are checked first because reqwest reports them as request errors
/// too; connect failures likewise carry the request kind, so the more specific
/// predicates run before the general one.
pub fn update_error_stats(error_stats: &ErrorStats, error: &reqwest::Error) {
    let error_type = if error.is_timeout() {
        ErrorType::HttpRequestTimeoutError
    } else if error.is_connect() {
        ErrorType::HttpRequestConnectError
    } else if error.is_request() {
        ErrorType::HttpRequestRequestError
    } else {
        ErrorType::HttpRequestOtherError
    };

    error_stats.increment(error_type);
}

/// Logs non-zero failure counters at the end of a run.
///
/// Quiet when nothing failed; otherwise one header line with the total and one
/// indented line per failure type.
pub fn log_error_statistics(error_stats: &ErrorStats) {
    let total = error_stats.total();
    if total == 0 {
        return;
    }

    log::info!("Probe failure counts ({} total):", total);
    for error_type in ErrorType::iter() {
        let count = error_stats.get_count(error_type);
        if count > 0 {
            log::info!("   {}: {}", error_type.as_str(), count);
        }
    }
}
