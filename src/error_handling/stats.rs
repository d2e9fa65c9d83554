//! Lookup statistics tracking.
//!
//! This module provides thread-safe statistics tracking for errors and
//! informational metrics while serving lookups.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{ErrorType, InfoType};

/// Thread-safe lookup statistics tracker.
///
/// Tracks errors and informational metrics using atomic counters, allowing
/// concurrent access from every request task. All types are initialized to
/// zero on creation, so incrementing never has to allocate.
///
/// # Categories
///
/// - **Errors**: Lookup failures that degraded a response
/// - **Info**: Notable non-failure events (cache outcomes, fallbacks)
///
/// # Thread Safety
///
/// This struct is thread-safe and is shared across request tasks using `Arc`.
pub struct LookupStats {
    errors: HashMap<ErrorType, AtomicUsize>,
    info: HashMap<InfoType, AtomicUsize>,
}

impl LookupStats {
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }

        let mut info = HashMap::new();
        for info_type in InfoType::iter() {
            info.insert(info_type, AtomicUsize::new(0));
        }

        LookupStats { errors, info }
    }

    /// Increment an error counter.
    ///
    /// All error types are initialized in the constructor, so the lookup can
    /// only miss if a variant was added without rebuilding the map. That case
    /// is logged and otherwise ignored rather than allowed to panic.
    pub fn increment_error(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map. \
                 This indicates a bug in LookupStats initialization.",
                error
            );
        }
    }

    /// Increment an info counter.
    pub fn increment_info(&self, info_type: InfoType) {
        if let Some(counter) = self.info.get(&info_type) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment info counter for {:?} which is not in the map. \
                 This indicates a bug in LookupStats initialization.",
                info_type
            );
        }
    }

    /// Get the count for an error type.
    ///
    /// Returns 0 if the error type is not in the map (should never happen if
    /// properly initialized).
    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get the count for an info type.
    ///
    /// Returns 0 if the info type is not in the map (should never happen if
    /// properly initialized).
    pub fn get_info_count(&self, info_type: InfoType) -> usize {
        self.info
            .get(&info_type)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get total error count across all error types.
    pub fn total_errors(&self) -> usize {
        ErrorType::iter().map(|e| self.get_error_count(e)).sum()
    }

    /// Get total info count across all info types.
    pub fn total_info(&self) -> usize {
        InfoType::iter().map(|i| self.get_info_count(i)).sum()
    }

    /// Snapshot all error counters into name → count pairs.
    ///
    /// BTreeMap keeps the report ordering stable across calls.
    pub fn error_counts(&self) -> BTreeMap<&'static str, usize> {
        ErrorType::iter()
            .map(|e| (e.as_str(), self.get_error_count(e)))
            .collect()
    }

    /// Snapshot all info counters into name → count pairs.
    pub fn info_counts(&self) -> BTreeMap<&'static str, usize> {
        InfoType::iter()
            .map(|i| (i.as_str(), self.get_info_count(i)))
            .collect()
    }
}

impl Default for LookupStats {
    fn default() -> Self {
        Self::new()
    }
}
