//! Discovery of a pawn's components into per-role lists

use super::{ComponentId, ComponentList, ComponentTree, RoleTag};

/// Discovery settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Skip components whose discoverable flag is off
    pub only_discoverables: bool,
    /// Do not look below any component, only below groups
    pub stop_at_components: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            only_discoverables: true,
            stop_at_components: false,
        }
    }
}

/// One ordered list per role, in the order the pawn runs them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentPipeline {
    pub conditions: ComponentList,
    pub probes: ComponentList,
    pub triggers: ComponentList,
    pub state_machines: ComponentList,
    pub properties: ComponentList,
    pub actions: ComponentList,
    pub modifiers: ComponentList,
}

impl Default for ComponentPipeline {
    fn default() -> Self {
        Self {
            conditions: ComponentList::new(RoleTag::Condition),
            probes: ComponentList::new(RoleTag::Probe),
            triggers: ComponentList::new(RoleTag::Trigger),
            state_machines: ComponentList::new(RoleTag::StateMachine),
            properties: ComponentList::new(RoleTag::Properties),
            actions: ComponentList::new(RoleTag::Action),
            modifiers: ComponentList::new(RoleTag::Modifier),
        }
    }
}

impl ComponentPipeline {
    /// Walk the tree once from its root, sorting components by role in
    /// document order
    pub fn discover(tree: &ComponentTree, options: DiscoveryOptions) -> Self {
        let mut pipeline = Self::default();
        tree.walk(
            tree.root(),
            options.only_discoverables,
            options.stop_at_components,
            &mut |id: ComponentId, tag: RoleTag| pipeline.list_mut(tag).add(id),
        );

        log::debug!(
            "Discovered {} conditions, {} probes, {} triggers, {} state machines, {} property sets, {} actions, {} modifiers",
            pipeline.conditions.len(),
            pipeline.probes.len(),
            pipeline.triggers.len(),
            pipeline.state_machines.len(),
            pipeline.properties.len(),
            pipeline.actions.len(),
            pipeline.modifiers.len()
        );
        pipeline
    }

    pub fn list(&self, tag: RoleTag) -> &ComponentList {
        match tag {
            RoleTag::Condition => &self.conditions,
            RoleTag::Probe => &self.probes,
            RoleTag::Trigger => &self.triggers,
            RoleTag::StateMachine => &self.state_machines,
            RoleTag::Properties => &self.properties,
            RoleTag::Action => &self.actions,
            RoleTag::Modifier => &self.modifiers,
        }
    }

    pub fn list_mut(&mut self, tag: RoleTag) -> &mut ComponentList {
        match tag {
            RoleTag::Condition => &mut self.conditions,
            RoleTag::Probe => &mut self.probes,
            RoleTag::Trigger => &mut self.triggers,
            RoleTag::StateMachine => &mut self.state_machines,
            RoleTag::Properties => &mut self.properties,
            RoleTag::Action => &mut self.actions,
            RoleTag::Modifier => &mut self.modifiers,
        }
    }

    /// Drop an id from whichever list holds it
    pub fn forget(&mut self, id: ComponentId) -> bool {
        RoleTag::ALL
            .iter()
            .fold(false, |removed, tag| self.list_mut(*tag).remove(id) || removed)
    }

    /// Total number of listed components
    pub fn len(&self) -> usize {
        RoleTag::ALL.iter().map(|tag| self.list(*tag).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
