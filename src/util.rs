/// Safe numeric conversion helpers.
///
/// This module provides checked conversions between integer and
/// floating-point types so that promotion never silently loses data.
///
/// # Responsibilities
/// - Safely convert `i64` values to `f64` without silent data loss.
/// - Provide the exactly-representable integer bounds used by those checks.
pub mod num;
