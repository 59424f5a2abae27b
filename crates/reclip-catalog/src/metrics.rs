//! Catalog metrics collection.

use metrics::counter;

/// Metric name constants for consistency.
pub mod names {
    /// Total catalog writes by operation.
    pub const WRITES_TOTAL: &str = "catalog_writes_total";
}

/// Record a completed catalog write.
pub fn record_write(operation: &'static str) {
    counter!(names::WRITES_TOTAL, "operation" => operation).increment(1);
}
