//! What a component sees while it is evaluated or hooked

use super::{ComponentId, ComponentTree, PropertySet, RoleTag};
use crate::adjacency::Surroundings;
use crate::facing::Facing;
use crate::pawn::PawnState;
use glam::Vec3;
use std::any::Any;

/// Read-only view of a pawn, used for activation checks
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    tree: &'a ComponentTree,
    state: &'a PawnState,
}

impl<'a> Scope<'a> {
    pub fn new(tree: &'a ComponentTree, state: &'a PawnState) -> Self {
        Self { tree, state }
    }

    pub fn tree(&self) -> &'a ComponentTree {
        self.tree
    }

    pub fn state(&self) -> &'a PawnState {
        self.state
    }

    pub fn position(&self) -> Vec3 {
        self.state.position()
    }

    pub fn facing(&self) -> Facing {
        self.state.facing()
    }

    pub fn surroundings(&self) -> &'a Surroundings {
        self.state.surroundings()
    }

    /// Enabled, and every attached condition evaluates true
    pub fn is_active(&self, id: ComponentId) -> bool {
        self.tree.is_enabled(id)
            && self
                .tree
                .attached(id, RoleTag::Condition)
                .into_iter()
                .all(|condition| self.evaluate(condition))
    }

    /// Evaluate a condition. Inactive conditions are irrelevant and
    /// evaluate true, as do ids that are not conditions.
    pub fn evaluate(&self, id: ComponentId) -> bool {
        if !self.is_active(id) {
            return true;
        }
        self.tree
            .condition(id)
            .map_or(true, |condition| condition.check(self))
    }

    /// First active id in `ids`
    pub fn first_active(&self, ids: impl IntoIterator<Item = ComponentId>) -> Option<ComponentId> {
        ids.into_iter().find(|id| self.is_active(*id))
    }
}

/// Mutable access handed to a component hook.
///
/// The hooked component itself is lifted out of the tree for the duration
/// of the call, so `tree()` will not resolve [`HookContext::id`].
#[derive(Debug)]
pub struct HookContext<'a> {
    tree: &'a mut ComponentTree,
    state: &'a PawnState,
    id: ComponentId,
}

impl<'a> HookContext<'a> {
    pub fn new(tree: &'a mut ComponentTree, state: &'a PawnState, id: ComponentId) -> Self {
        Self { tree, state, id }
    }

    /// The hooked component
    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn tree(&self) -> &ComponentTree {
        &*self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ComponentTree {
        &mut *self.tree
    }

    pub fn state(&self) -> &PawnState {
        self.state
    }

    pub fn surroundings(&self) -> &Surroundings {
        self.state.surroundings()
    }

    pub fn facing(&self) -> Facing {
        self.state.facing()
    }

    pub fn scope(&self) -> Scope<'_> {
        Scope::new(&*self.tree, self.state)
    }

    pub fn is_active(&self, id: ComponentId) -> bool {
        self.scope().is_active(id)
    }

    pub fn evaluate(&self, id: ComponentId) -> bool {
        self.scope().evaluate(id)
    }

    /// First active property set attached to the hooked component
    pub fn first_active_properties(&self) -> Option<ComponentId> {
        let scope = self.scope();
        scope.first_active(self.tree.attached(self.id, RoleTag::Properties))
    }

    /// Values of a [`PropertySet<T>`]
    pub fn property_values<T: Any>(&self, id: ComponentId) -> Option<&T> {
        self.tree.get::<PropertySet<T>>(id).ok().map(PropertySet::values)
    }
}
