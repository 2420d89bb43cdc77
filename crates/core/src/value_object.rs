//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Derived catalog values (price ranges, filter selections, page windows) have
/// no identity: they are recomputed from their inputs and compared by value.
/// Two price ranges with the same bounds and label are the same range, even if
/// they came from two different base sets.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct PriceRange { min: i64, max: Option<i64> }
///
/// impl ValueObject for PriceRange {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
