/// Core runtime value types.
///
/// Declares the `Value` sum type covering every runtime value and the
/// `Number` subset used wherever the language requires a numeric scalar.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements conversion, numeric coercion, and display formatting.
pub mod core;

/// Anchor values.
///
/// An anchor is a named, immutable numeric reference point with a tolerance
/// and a metadata bag. Recognized metadata keys drive semantics; unknown
/// keys are retained for display only.
pub mod anchor;

/// Relational values.
///
/// A relational value pairs a number with an ordered list of anchors and
/// caches, per anchor, the offset and position qualifier computed at
/// creation time.
pub mod relational;
