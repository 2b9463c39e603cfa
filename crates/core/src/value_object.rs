//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by value: two `TaxDocument`s
/// holding the same digits are the same document. To "modify" one, parse a
/// new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Cep(String);
///
/// impl ValueObject for Cep {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
