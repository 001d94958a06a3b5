//! Arena of pawn nodes

use super::{Action, ActionProperties, Condition, Role, RoleTag, StateMachine};
use crate::error::{PawnError, Result};
use crate::raycast::Raycaster;
use std::any::Any;
use std::fmt;

/// Handle to a node in a [`ComponentTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(usize);

impl ComponentId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A character root. Discovery never crosses into a nested pawn.
    Pawn,
    /// Organisational node without behaviour
    Group,
    /// A component carrying one role
    Component(RoleTag),
}

#[derive(Debug)]
struct Node {
    name: String,
    kind: NodeKind,
    parent: Option<ComponentId>,
    children: Vec<ComponentId>,
    enabled: bool,
    discoverable: bool,
    /// Lifted out while the component's hook runs
    role: Option<Role>,
}

/// Owns every node of one pawn, addressed by [`ComponentId`]
#[derive(Debug)]
pub struct ComponentTree {
    nodes: Vec<Option<Node>>,
    root: ComponentId,
}

impl ComponentTree {
    /// Create a tree with a single pawn root
    pub fn new(name: impl Into<String>) -> Self {
        let root = Node {
            name: name.into(),
            kind: NodeKind::Pawn,
            parent: None,
            children: Vec::new(),
            enabled: true,
            discoverable: false,
            role: None,
        };
        Self {
            nodes: vec![Some(root)],
            root: ComponentId(0),
        }
    }

    pub fn root(&self) -> ComponentId {
        self.root
    }

    // ==================== Building ====================

    /// Add a plain group node
    pub fn add_group(&mut self, parent: ComponentId, name: impl Into<String>) -> Result<ComponentId> {
        self.insert(parent, name.into(), NodeKind::Group, None)
    }

    /// Add a nested pawn; its subtree belongs to another character
    pub fn add_pawn(&mut self, parent: ComponentId, name: impl Into<String>) -> Result<ComponentId> {
        self.insert(parent, name.into(), NodeKind::Pawn, None)
    }

    /// Add a component node
    pub fn add_component(
        &mut self,
        parent: ComponentId,
        name: impl Into<String>,
        role: Role,
    ) -> Result<ComponentId> {
        let kind = NodeKind::Component(role.tag());
        self.insert(parent, name.into(), kind, Some(role))
    }

    fn insert(
        &mut self,
        parent: ComponentId,
        name: String,
        kind: NodeKind,
        role: Option<Role>,
    ) -> Result<ComponentId> {
        if !self.contains(parent) {
            return Err(PawnError::ComponentNotFound(parent));
        }

        let id = ComponentId(self.nodes.len());
        self.nodes.push(Some(Node {
            name,
            kind,
            parent: Some(parent),
            children: Vec::new(),
            enabled: true,
            discoverable: true,
            role,
        }));
        if let Some(node) = self.node_mut(parent) {
            node.children.push(id);
        }
        Ok(id)
    }

    /// Remove a node and its whole subtree. Returns the removed ids in
    /// document order.
    pub fn remove(&mut self, id: ComponentId) -> Result<Vec<ComponentId>> {
        if id == self.root {
            return Err(PawnError::CannotRemoveRoot(id));
        }
        let parent = self.parent(id).ok_or(PawnError::ComponentNotFound(id))?;
        if let Some(node) = self.node_mut(parent) {
            node.children.retain(|child| *child != id);
        }

        let mut removed = Vec::new();
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.get_mut(current.0).and_then(Option::take) {
                removed.push(current);
                pending.extend(node.children.iter().rev());
            }
        }
        Ok(removed)
    }

    // ==================== Node data ====================

    fn node(&self, id: ComponentId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: ComponentId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.node(id).is_some()
    }

    /// Number of live nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn name(&self, id: ComponentId) -> Option<&str> {
        self.node(id).map(|node| node.name.as_str())
    }

    pub fn kind(&self, id: ComponentId) -> Option<NodeKind> {
        self.node(id).map(|node| node.kind)
    }

    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.node(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        self.node(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// Missing nodes count as disabled
    pub fn is_enabled(&self, id: ComponentId) -> bool {
        self.node(id).is_some_and(|node| node.enabled)
    }

    pub fn set_enabled(&mut self, id: ComponentId, enabled: bool) -> Result<()> {
        let node = self.node_mut(id).ok_or(PawnError::ComponentNotFound(id))?;
        node.enabled = enabled;
        Ok(())
    }

    pub fn is_discoverable(&self, id: ComponentId) -> bool {
        self.node(id).is_some_and(|node| node.discoverable)
    }

    pub fn set_discoverable(&mut self, id: ComponentId, discoverable: bool) -> Result<()> {
        let node = self.node_mut(id).ok_or(PawnError::ComponentNotFound(id))?;
        node.discoverable = discoverable;
        Ok(())
    }

    /// First node with `name`, in insertion order
    pub fn find(&self, name: &str) -> Option<ComponentId> {
        self.nodes
            .iter()
            .enumerate()
            .find(|(_, node)| node.as_ref().is_some_and(|n| n.name == name))
            .map(|(index, _)| ComponentId(index))
    }

    // ==================== Roles ====================

    pub fn role_tag(&self, id: ComponentId) -> Option<RoleTag> {
        match self.kind(id)? {
            NodeKind::Component(tag) => Some(tag),
            _ => None,
        }
    }

    /// The role of a component, unless it is lifted out for a hook
    pub fn role(&self, id: ComponentId) -> Option<&Role> {
        self.node(id).and_then(|node| node.role.as_ref())
    }

    pub fn role_mut(&mut self, id: ComponentId) -> Option<&mut Role> {
        self.node_mut(id).and_then(|node| node.role.as_mut())
    }

    pub(crate) fn take_role(&mut self, id: ComponentId) -> Option<Role> {
        self.node_mut(id).and_then(|node| node.role.take())
    }

    pub(crate) fn restore_role(&mut self, id: ComponentId, role: Role) {
        if let Some(node) = self.node_mut(id) {
            node.role = Some(role);
        }
    }

    /// Whether the component is a `T`
    pub fn is<T: Any>(&self, id: ComponentId) -> bool {
        self.role(id).is_some_and(|role| role.as_any().is::<T>())
    }

    /// Typed access to a component
    pub fn get<T: Any>(&self, id: ComponentId) -> Result<&T> {
        let role = self.role(id).ok_or(PawnError::ComponentNotFound(id))?;
        role.as_any().downcast_ref::<T>().ok_or(PawnError::RoleMismatch {
            id,
            expected: std::any::type_name::<T>(),
        })
    }

    pub fn get_mut<T: Any>(&mut self, id: ComponentId) -> Result<&mut T> {
        let role = self.role_mut(id).ok_or(PawnError::ComponentNotFound(id))?;
        role.as_any_mut().downcast_mut::<T>().ok_or(PawnError::RoleMismatch {
            id,
            expected: std::any::type_name::<T>(),
        })
    }

    pub fn condition(&self, id: ComponentId) -> Option<&dyn Condition> {
        match self.role(id)? {
            Role::Condition(condition) => Some(&**condition),
            _ => None,
        }
    }

    pub fn probe(&self, id: ComponentId) -> Option<&dyn Raycaster> {
        match self.role(id)? {
            Role::Probe(probe) => Some(&**probe),
            _ => None,
        }
    }

    pub fn action(&self, id: ComponentId) -> Option<&dyn Action> {
        match self.role(id)? {
            Role::Action(action) => Some(&**action),
            _ => None,
        }
    }

    pub fn action_mut(&mut self, id: ComponentId) -> Option<&mut dyn Action> {
        match self.role_mut(id)? {
            Role::Action(action) => Some(&mut **action),
            _ => None,
        }
    }

    pub fn properties(&self, id: ComponentId) -> Option<&dyn ActionProperties> {
        match self.role(id)? {
            Role::Properties(properties) => Some(&**properties),
            _ => None,
        }
    }

    pub fn state_machine(&self, id: ComponentId) -> Option<&dyn StateMachine> {
        match self.role(id)? {
            Role::StateMachine(machine) => Some(&**machine),
            _ => None,
        }
    }

    pub fn state_machine_mut(&mut self, id: ComponentId) -> Option<&mut dyn StateMachine> {
        match self.role_mut(id)? {
            Role::StateMachine(machine) => Some(&mut **machine),
            _ => None,
        }
    }

    // ==================== Traversal ====================

    /// Components attached to `id` with the given role: component children,
    /// looking through groups but not through other components or pawns.
    pub fn attached(&self, id: ComponentId, tag: RoleTag) -> Vec<ComponentId> {
        let mut found = Vec::new();
        self.collect_attached(id, tag, &mut found);
        found
    }

    fn collect_attached(&self, id: ComponentId, tag: RoleTag, found: &mut Vec<ComponentId>) {
        for &child in self.children(id) {
            match self.kind(child) {
                Some(NodeKind::Group) => self.collect_attached(child, tag, found),
                Some(NodeKind::Component(child_tag)) if child_tag == tag => found.push(child),
                _ => {}
            }
        }
    }

    /// Depth-first walk below `from` in document order, reporting every
    /// component that passes the discoverability filter.
    ///
    /// The walk never descends into nested pawns and, with
    /// `stop_at_components`, into any component; such boundary components
    /// are still reported themselves.
    pub fn walk(
        &self,
        from: ComponentId,
        only_discoverables: bool,
        stop_at_components: bool,
        visit: &mut dyn FnMut(ComponentId, RoleTag),
    ) {
        if from != self.root {
            match self.kind(from) {
                Some(NodeKind::Pawn) | None => return,
                Some(NodeKind::Component(_)) if stop_at_components => return,
                _ => {}
            }
        }

        for &child in self.children(from) {
            if let Some(NodeKind::Component(tag)) = self.kind(child) {
                if self.is_discoverable(child) || !only_discoverables {
                    visit(child, tag);
                }
            }
            self.walk(child, only_discoverables, stop_at_components, visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{PropertySet, ToggleCondition};

    fn tree() -> (ComponentTree, ComponentId, ComponentId, ComponentId) {
        let mut tree = ComponentTree::new("Hero");
        let root = tree.root();
        let group = tree.add_group(root, "Movement").unwrap();
        let toggle = tree
            .add_component(group, "Grounded", Role::condition(ToggleCondition::new(true)))
            .unwrap();
        let props = tree
            .add_component(toggle, "Props", Role::properties(PropertySet::new(3.0f32)))
            .unwrap();
        (tree, group, toggle, props)
    }

    #[test]
    fn test_build_tree() {
        let (tree, group, toggle, props) = tree();

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.kind(tree.root()), Some(NodeKind::Pawn));
        assert_eq!(tree.kind(group), Some(NodeKind::Group));
        assert_eq!(tree.role_tag(toggle), Some(RoleTag::Condition));
        assert_eq!(tree.parent(props), Some(toggle));
        assert_eq!(tree.children(group), &[toggle]);
        assert_eq!(tree.name(props), Some("Props"));
        assert_eq!(tree.find("Grounded"), Some(toggle));
        assert_eq!(tree.find("Missing"), None);
    }

    #[test]
    fn test_typed_access() {
        let (mut tree, group, toggle, props) = tree();

        assert_eq!(*tree.get::<PropertySet<f32>>(props).unwrap().values(), 3.0);
        assert!(tree.is::<ToggleCondition>(toggle));
        assert!(!tree.is::<ToggleCondition>(props));

        tree.get_mut::<ToggleCondition>(toggle).unwrap().value = false;
        assert!(!tree.get::<ToggleCondition>(toggle).unwrap().value);

        assert!(matches!(
            tree.get::<ToggleCondition>(props),
            Err(PawnError::RoleMismatch { .. })
        ));
        assert!(matches!(
            tree.get::<ToggleCondition>(group),
            Err(PawnError::ComponentNotFound(_))
        ));
    }

    #[test]
    fn test_remove_subtree() {
        let (mut tree, group, toggle, props) = tree();

        let removed = tree.remove(group).unwrap();
        assert_eq!(removed, vec![group, toggle, props]);
        assert_eq!(tree.len(), 1);
        assert!(!tree.contains(props));
        assert!(tree.children(tree.root()).is_empty());

        assert!(matches!(tree.remove(group), Err(PawnError::ComponentNotFound(_))));
        assert!(matches!(tree.remove(tree.root()), Err(PawnError::CannotRemoveRoot(_))));
        assert!(matches!(
            tree.add_group(group, "Orphan"),
            Err(PawnError::ComponentNotFound(_))
        ));
    }

    #[test]
    fn test_attached_looks_through_groups_only() {
        let mut tree = ComponentTree::new("Hero");
        let root = tree.root();
        let owner = tree
            .add_component(root, "Owner", Role::properties(PropertySet::new(())))
            .unwrap();
        let direct = tree
            .add_component(owner, "Direct", Role::condition(ToggleCondition::new(true)))
            .unwrap();
        let group = tree.add_group(owner, "Gates").unwrap();
        let grouped = tree
            .add_component(group, "Grouped", Role::condition(ToggleCondition::new(true)))
            .unwrap();
        // Belongs to `direct`, not to `owner`.
        tree.add_component(direct, "Nested", Role::condition(ToggleCondition::new(true)))
            .unwrap();

        assert_eq!(tree.attached(owner, RoleTag::Condition), vec![direct, grouped]);
        assert!(tree.attached(owner, RoleTag::Action).is_empty());
    }

    #[test]
    fn test_walk_document_order() {
        let mut tree = ComponentTree::new("Hero");
        let root = tree.root();
        let a = tree.add_component(root, "A", Role::condition(ToggleCondition::new(true))).unwrap();
        let b = tree.add_component(a, "B", Role::condition(ToggleCondition::new(true))).unwrap();
        let group = tree.add_group(root, "G").unwrap();
        let c = tree.add_component(group, "C", Role::condition(ToggleCondition::new(true))).unwrap();
        let hidden = tree.add_component(group, "Hidden", Role::condition(ToggleCondition::new(true))).unwrap();
        tree.set_discoverable(hidden, false).unwrap();
        let other = tree.add_pawn(root, "Sidekick").unwrap();
        tree.add_component(other, "D", Role::condition(ToggleCondition::new(true))).unwrap();

        let mut seen = Vec::new();
        tree.walk(root, true, false, &mut |id: ComponentId, _: RoleTag| seen.push(id));
        assert_eq!(seen, vec![a, b, c]);

        seen.clear();
        tree.walk(root, false, false, &mut |id: ComponentId, _: RoleTag| seen.push(id));
        assert_eq!(seen, vec![a, b, c, hidden]);

        seen.clear();
        tree.walk(root, true, true, &mut |id: ComponentId, _: RoleTag| seen.push(id));
        assert_eq!(seen, vec![a, c]);
    }

    #[test]
    fn test_take_and_restore_role() {
        let (mut tree, _, toggle, _) = tree();

        let role = tree.take_role(toggle).unwrap();
        assert!(tree.role(toggle).is_none());
        assert_eq!(tree.role_tag(toggle), Some(RoleTag::Condition));

        tree.restore_role(toggle, role);
        assert!(tree.condition(toggle).is_some());
    }
}
