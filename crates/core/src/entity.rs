//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier, if one has been assigned.
    ///
    /// Records built in memory before persistence have no identity yet.
    fn id(&self) -> Option<&Self::Id>;

    /// Whether the entity has been persisted (has an identity).
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}
