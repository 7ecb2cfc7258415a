//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**; identity does
/// not matter. To "modify" one, build a new one. [`crate::Money`] is the
/// canonical example: two amounts of the same number of cents are the same
/// value, wherever they came from.
///
/// Contrast with [`crate::Entity`], where two objects with the same id are
/// the same entity even when their attributes differ.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
