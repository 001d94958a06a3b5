//! Ordered per-role component lists

use super::{ComponentId, ComponentTree, RoleTag, Scope};
use std::any::Any;

/// Components of one role, in discovery order.
///
/// Lookups that are expected to succeed (`find`, `first`, `find_typed`)
/// log a warning on a miss; the `contains*` queries are silent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentList {
    role: RoleTag,
    ids: Vec<ComponentId>,
}

impl ComponentList {
    pub fn new(role: RoleTag) -> Self {
        Self {
            role,
            ids: Vec::new(),
        }
    }

    pub fn role(&self) -> RoleTag {
        self.role
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[ComponentId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.ids.iter().copied()
    }

    /// Append; an id already in the list is ignored
    pub fn add(&mut self, id: ComponentId) {
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
    }

    pub fn remove(&mut self, id: ComponentId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| *existing != id);
        self.ids.len() != before
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn get(&self, index: usize) -> Option<ComponentId> {
        let found = self.ids.get(index).copied();
        if found.is_none() {
            log::warn!("No {} at index {} (list has {})", self.role, index, self.ids.len());
        }
        found
    }

    /// First component named `name`
    pub fn find(&self, tree: &ComponentTree, name: &str) -> Option<ComponentId> {
        let found = self.iter().find(|id| tree.name(*id) == Some(name));
        if found.is_none() {
            log::warn!("Could not find a {} named '{}'", self.role, name);
        }
        found
    }

    /// First component of type `T`
    pub fn first<T: Any>(&self, tree: &ComponentTree) -> Option<ComponentId> {
        let found = self.iter().find(|id| tree.is::<T>(*id));
        if found.is_none() {
            log::warn!(
                "Could not find a {} of type '{}'",
                self.role,
                std::any::type_name::<T>()
            );
        }
        found
    }

    /// First component of type `T` named `name`
    pub fn find_typed<T: Any>(&self, tree: &ComponentTree, name: &str) -> Option<ComponentId> {
        let found = self
            .iter()
            .find(|id| tree.name(*id) == Some(name) && tree.is::<T>(*id));
        if found.is_none() {
            log::warn!(
                "Could not find a {} of type '{}' named '{}'",
                self.role,
                std::any::type_name::<T>(),
                name
            );
        }
        found
    }

    /// Every component of type `T`
    pub fn all<T: Any>(&self, tree: &ComponentTree) -> Vec<ComponentId> {
        self.iter().filter(|id| tree.is::<T>(*id)).collect()
    }

    /// First enabled component whose conditions all hold
    pub fn first_active(&self, scope: &Scope<'_>) -> Option<ComponentId> {
        scope.first_active(self.iter())
    }

    pub fn first_active_of<T: Any>(&self, scope: &Scope<'_>) -> Option<ComponentId> {
        let tree = scope.tree();
        scope.first_active(self.iter().filter(|id| tree.is::<T>(*id)))
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.ids.contains(&id)
    }

    pub fn contains_name(&self, tree: &ComponentTree, name: &str) -> bool {
        self.iter().any(|id| tree.name(id) == Some(name))
    }

    pub fn contains_type<T: Any>(&self, tree: &ComponentTree) -> bool {
        self.iter().any(|id| tree.is::<T>(id))
    }
}

impl<'a> IntoIterator for &'a ComponentList {
    type Item = ComponentId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, ComponentId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter().copied()
    }
}
