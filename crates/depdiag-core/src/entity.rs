use indexmap::IndexSet;

use crate::relation::RelationId;

/// Characters the notation uses as entity delimiters.
const RESERVED: [char; 2] = ['[', ']'];

#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, Default, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl EntityId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Strip the reserved `[` and `]` delimiters from an entity name.
///
/// The result is the lookup key used by the diagram's entity registry.
pub fn normalize_name(name: &str) -> String {
    name.chars().filter(|c| !RESERVED.contains(c)).collect()
}

/// A named node of the diagram.
///
/// The name never changes after creation. The outgoing/incoming sets keep
/// the order in which relationships were attached.
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    name: String,
    color: Option<String>,
    outgoing: IndexSet<RelationId>,
    incoming: IndexSet<RelationId>,
}

impl Entity {
    pub(crate) fn new(id: EntityId, name: String) -> Self {
        Self {
            id,
            name,
            color: None,
            outgoing: IndexSet::new(),
            incoming: IndexSet::new(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Background color rendered as `{bg:<color>}`, if any.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = Some(color.into());
    }

    pub fn clear_color(&mut self) {
        self.color = None;
    }

    /// Relationships where this entity is the source.
    pub fn outgoing(&self) -> &IndexSet<RelationId> {
        &self.outgoing
    }

    /// Relationships where this entity is the target.
    pub fn incoming(&self) -> &IndexSet<RelationId> {
        &self.incoming
    }

    /// True when no relationship starts or ends here.
    pub fn is_isolated(&self) -> bool {
        self.outgoing.is_empty() && self.incoming.is_empty()
    }

    pub(crate) fn attach_outgoing(&mut self, relation: RelationId) {
        self.outgoing.insert(relation);
    }

    pub(crate) fn attach_incoming(&mut self, relation: RelationId) {
        self.incoming.insert(relation);
    }

    pub(crate) fn detach_outgoing(&mut self, relation: RelationId) -> bool {
        self.outgoing.shift_remove(&relation)
    }

    pub(crate) fn detach_incoming(&mut self, relation: RelationId) -> bool {
        self.incoming.shift_remove(&relation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_brackets() {
        assert_eq!(normalize_name("[X]"), "X");
        assert_eq!(normalize_name("a[b]c"), "abc");
        assert_eq!(normalize_name("plain name"), "plain name");
        assert_eq!(normalize_name("[]"), "");
    }

    #[test]
    fn test_attach_keeps_insertion_order() {
        let mut entity = Entity::new(EntityId(0), "A".to_string());
        entity.attach_outgoing(RelationId(3));
        entity.attach_outgoing(RelationId(1));
        entity.attach_outgoing(RelationId(2));
        assert!(entity.detach_outgoing(RelationId(1)));
        assert!(!entity.detach_outgoing(RelationId(1)));

        let order: Vec<_> = entity.outgoing().iter().copied().collect();
        assert_eq!(order, vec![RelationId(3), RelationId(2)]);
        assert!(!entity.is_isolated());
    }
}
