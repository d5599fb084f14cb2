//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one and replace the old one wholesale.
///
/// The session snapshot is the main value object in the portal: readers never
/// observe a half-updated snapshot because nobody can update one in place.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
