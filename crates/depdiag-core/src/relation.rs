use strum_macros::{Display, EnumString};

use crate::entity::EntityId;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, Default, PartialOrd, Ord)]
pub struct RelationId(pub u32);

impl std::fmt::Display for RelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl RelationId {
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

/// Arrow style of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum LinkKind {
    /// Solid arrow, `->`
    #[default]
    Dependency,
    /// Dashed arrow, `-.->`
    DependencyDashed,
}

/// Deduplication key of a relationship: the raw `(from, to, label)` triple
/// exactly as passed to `link`, before any name normalization.
///
/// The fields are kept apart so that `("AB", "", "C")` and `("A", "B", "C")`
/// are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationKey {
    pub from: String,
    pub to: String,
    pub label: String,
}

impl RelationKey {
    pub fn new(from: &str, to: &str, label: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            label: label.to_string(),
        }
    }
}

/// A directed, typed, optionally labeled edge between two entities.
#[derive(Debug, Clone)]
pub struct Relationship {
    id: RelationId,
    key: RelationKey,
    label: String,
    kind: LinkKind,
    from: EntityId,
    to: EntityId,
}

impl Relationship {
    pub(crate) fn new(
        id: RelationId,
        key: RelationKey,
        kind: LinkKind,
        from: EntityId,
        to: EntityId,
    ) -> Self {
        let label = key.label.clone();
        Self {
            id,
            key,
            label,
            kind,
            from,
            to,
        }
    }

    pub fn id(&self) -> RelationId {
        self.id
    }

    /// Key this relationship was registered under.
    pub fn key(&self) -> &RelationKey {
        &self.key
    }

    /// Visible label. Empty once cleared.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn clear_label(&mut self) {
        self.label.clear();
    }

    pub fn kind(&self) -> LinkKind {
        self.kind
    }

    pub fn from(&self) -> EntityId {
        self.from
    }

    pub fn to(&self) -> EntityId {
        self.to
    }
}
