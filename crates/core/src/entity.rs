//! Entity trait: identity across snapshots of the catalog.

/// Entity marker + minimal interface.
///
/// Products and categories are entities: two snapshots of the same listing
/// with different prices are still the same listing.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
