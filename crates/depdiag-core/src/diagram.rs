use indexmap::IndexMap;
use regex::Regex;
use tracing::debug;

use depdiag_error::{Error, Result};

use crate::entity::{Entity, EntityId, normalize_name};
use crate::relation::{LinkKind, RelationId, RelationKey, Relationship};

/// One renderable edge: a relationship together with both of its endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Edge<'a> {
    pub from: &'a Entity,
    pub relation: &'a Relationship,
    pub to: &'a Entity,
}

/// An in-memory directed graph of named entities and typed relationships.
///
/// # Storage
/// Entities and relationships live in two arenas addressed by [`EntityId`] and
/// [`RelationId`]. Entities only hold id sets, so a relationship is shared by
/// its source and target without any reference counting.
///
/// # Registries
/// - `entity_names`: normalized name -> entity, in creation order
/// - `relation_keys`: raw `(from, to, label)` -> relationship, in creation order
///
/// A relationship removed by [`DependencyDiagram::filter_out_links`] leaves
/// both its endpoints' sets and the relationship registry. Its arena slot stays
/// so that ids handed out earlier keep resolving.
///
/// Not thread-safe by intent: callers confine a diagram to one thread or
/// serialize access themselves.
#[derive(Debug, Default, Clone)]
pub struct DependencyDiagram {
    entities: Vec<Entity>,
    relations: Vec<Relationship>,
    entity_names: IndexMap<String, EntityId>,
    relation_keys: IndexMap<RelationKey, RelationId>,
}

impl DependencyDiagram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the entity named `name`, creating and registering it if needed.
    ///
    /// `[` and `]` are stripped before lookup, so `"X"` and `"[X]"` resolve to
    /// the same entity. A name that is empty after stripping is rejected with
    /// `InvalidArgument` instead of producing an unnamed entity, which could
    /// not be written as `[]` in the notation.
    pub fn get_or_create(&mut self, name: &str) -> Result<EntityId> {
        let name = Self::checked_name(name)?;
        Ok(self.get_or_create_normalized(name))
    }

    /// Return the relationship for `(from, to, label)`, creating it if needed.
    ///
    /// The key is the raw triple; entity names are normalized only when the
    /// endpoints are looked up. A second call with the same triple returns the
    /// existing relationship and ignores `kind`.
    ///
    /// Both endpoint names go through the same check as
    /// [`DependencyDiagram::get_or_create`]: `link("AB", "", "C", ..)` fails
    /// and leaves the diagram untouched.
    pub fn link(
        &mut self,
        from: &str,
        to: &str,
        label: &str,
        kind: LinkKind,
    ) -> Result<RelationId> {
        let key = RelationKey::new(from, to, label);
        if let Some(&id) = self.relation_keys.get(&key) {
            return Ok(id);
        }

        let from_name = Self::checked_name(from)?;
        let to_name = Self::checked_name(to)?;
        let from_id = self.get_or_create_normalized(from_name);
        let to_id = self.get_or_create_normalized(to_name);

        let id = RelationId::new(self.relations.len() as u32);
        self.relations
            .push(Relationship::new(id, key.clone(), kind, from_id, to_id));
        self.entities[from_id.index()].attach_outgoing(id);
        self.entities[to_id.index()].attach_incoming(id);
        self.relation_keys.insert(key, id);

        debug!(relation = %id, from, to, label, %kind, "created relationship");
        Ok(id)
    }

    /// Set `color` on every entity whose name contains a match for `pattern`.
    ///
    /// Returns how many entities were recolored.
    pub fn set_color_where_name_matches(
        &mut self,
        pattern: &Regex,
        color: impl Into<String>,
    ) -> usize {
        let color = color.into();
        let mut touched = 0;
        for entity in self.entities.iter_mut() {
            if pattern.is_match(entity.name()) {
                entity.set_color(color.as_str());
                touched += 1;
            }
        }
        debug!(
            pattern = pattern.as_str(),
            color = color.as_str(),
            touched,
            "recolored entities"
        );
        touched
    }

    /// Remove every outgoing relationship of an entity matching `from_pattern`
    /// whose label matches `label_pattern`.
    ///
    /// Removed relationships are detached from the source's outgoing set, the
    /// target's incoming set and the relationship registry. Returns how many
    /// relationships were removed.
    pub fn filter_out_links(&mut self, from_pattern: &Regex, label_pattern: &Regex) -> usize {
        let mut removed = 0;
        for index in 0..self.entities.len() {
            if !from_pattern.is_match(self.entities[index].name()) {
                continue;
            }

            // The outgoing set shrinks while we walk it.
            let snapshot: Vec<RelationId> =
                self.entities[index].outgoing().iter().copied().collect();
            for id in snapshot {
                let relation = &self.relations[id.index()];
                if !label_pattern.is_match(relation.label()) {
                    continue;
                }
                let to = relation.to();
                self.relation_keys.shift_remove(relation.key());
                self.entities[index].detach_outgoing(id);
                self.entities[to.index()].detach_incoming(id);
                removed += 1;
            }
        }
        debug!(
            from = from_pattern.as_str(),
            label = label_pattern.as_str(),
            removed,
            "filtered out relationships"
        );
        removed
    }

    /// Clear the label of every outgoing relationship of an entity matching
    /// `from_pattern` whose label matches `label_pattern`.
    ///
    /// The relationships stay in the graph. Returns how many labels were cleared.
    pub fn clear_link_labels_where_name_matches(
        &mut self,
        from_pattern: &Regex,
        label_pattern: &Regex,
    ) -> usize {
        let mut cleared = 0;
        for entity in &self.entities {
            if !from_pattern.is_match(entity.name()) {
                continue;
            }
            for &id in entity.outgoing() {
                let relation = &mut self.relations[id.index()];
                if label_pattern.is_match(relation.label()) {
                    relation.clear_label();
                    cleared += 1;
                }
            }
        }
        debug!(
            from = from_pattern.as_str(),
            label = label_pattern.as_str(),
            cleared,
            "cleared relationship labels"
        );
        cleared
    }

    /// Look up an entity by name without creating it.
    pub fn find(&self, name: &str) -> Option<EntityId> {
        self.entity_names.get(&normalize_name(name)).copied()
    }

    /// Look up a live relationship by its raw `(from, to, label)` key.
    pub fn find_link(&self, from: &str, to: &str, label: &str) -> Option<RelationId> {
        self.relation_keys
            .get(&RelationKey::new(from, to, label))
            .copied()
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.index())
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id.index())
    }

    pub fn relation(&self, id: RelationId) -> Option<&Relationship> {
        self.relations.get(id.index())
    }

    pub fn relation_mut(&mut self, id: RelationId) -> Option<&mut Relationship> {
        self.relations.get_mut(id.index())
    }

    /// All entities in creation order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// All registered relationships in creation order.
    pub fn relations(&self) -> impl Iterator<Item = &Relationship> {
        self.relation_keys
            .values()
            .map(move |id| &self.relations[id.index()])
    }

    /// Relationships starting at `id`, in attachment order.
    pub fn outgoing(&self, id: EntityId) -> impl Iterator<Item = &Relationship> {
        self.entity(id)
            .into_iter()
            .flat_map(|entity| entity.outgoing().iter())
            .map(move |rel| &self.relations[rel.index()])
    }

    /// Relationships ending at `id`, in attachment order.
    pub fn incoming(&self, id: EntityId) -> impl Iterator<Item = &Relationship> {
        self.entity(id)
            .into_iter()
            .flat_map(|entity| entity.incoming().iter())
            .map(move |rel| &self.relations[rel.index()])
    }

    /// Every edge, grouped by source entity in creation order, then by the
    /// source's outgoing order. This is the order the notation is written in.
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_>> {
        self.entities.iter().flat_map(move |from| {
            from.outgoing().iter().map(move |id| {
                let relation = &self.relations[id.index()];
                Edge {
                    from,
                    relation,
                    to: &self.entities[relation.to().index()],
                }
            })
        })
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of relationships still registered.
    pub fn relation_count(&self) -> usize {
        self.relation_keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn checked_name(name: &str) -> Result<String> {
        let normalized = normalize_name(name);
        if normalized.is_empty() {
            return Err(Error::invalid_argument("entity name is empty")
                .with_operation("diagram::get_or_create")
                .with_context("name", name));
        }
        Ok(normalized)
    }

    fn get_or_create_normalized(&mut self, name: String) -> EntityId {
        if let Some(&id) = self.entity_names.get(&name) {
            return id;
        }
        let id = EntityId::new(self.entities.len() as u32);
        debug!(entity = %id, name = name.as_str(), "created entity");
        self.entities.push(Entity::new(id, name.clone()));
        self.entity_names.insert(name, id);
        id
    }
}
