//! The pawn: a character controller driven by its component tree
//!
//! Every physics tick is split into sub-steps. Each sub-step refreshes the
//! surroundings, runs the four update phases and then applies the movement
//! of every active action:
//!
//! ```text
//!              ┌──────────── sub-step ×N ─────────────┐
//!  select      │ refresh     properties → speed →     │  refresh
//!  probe   ──► │ surroundings  movement → face dir ──►│► surroundings
//!              │             apply (resolve, facing)  │
//!              └──────────────────────────────────────┘
//! ```
//!
//! Within a phase the roles run in a fixed order: state machines (and, for
//! properties, triggers first), then actions, then modifiers.

mod motion;
mod state;

pub use motion::MoveResolver;
pub use state::PawnState;

use crate::adjacency::{NearestSurface, Surroundings};
use crate::components::{
    AnyState, ComponentId, ComponentPipeline, ComponentTree, DiscoveryOptions, HookContext, Role,
    Scope,
};
use crate::config::PawnConfig;
use crate::error::{PawnError, Result};
use crate::facing::Facing;
use crate::raycast::{ProbeContext, Raycaster};
use crate::surface::ClassifiedSurface;
use glam::{Vec2, Vec3};
use std::any::Any;
use void_physics::SceneQuery;

/// One of the four update phases of a sub-step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Properties,
    Speed,
    Movement,
    FaceDirection,
}

impl Phase {
    /// Execution order
    pub const ALL: [Phase; 4] = [
        Phase::Properties,
        Phase::Speed,
        Phase::Movement,
        Phase::FaceDirection,
    ];
}

/// A character root together with its discovered components
#[derive(Debug)]
pub struct Pawn {
    config: PawnConfig,
    tree: ComponentTree,
    pipeline: ComponentPipeline,
    discovery: DiscoveryOptions,
    state: PawnState,
    active_probe: Option<ComponentId>,
}

impl Pawn {
    /// Validate `config` and discover the components of `tree`
    pub fn new(tree: ComponentTree, config: PawnConfig) -> Result<Self> {
        Self::with_discovery(tree, config, DiscoveryOptions::default())
    }

    pub fn with_discovery(
        tree: ComponentTree,
        config: PawnConfig,
        discovery: DiscoveryOptions,
    ) -> Result<Self> {
        config.validate()?;

        if config.sub_steps != i64::from(config.effective_sub_steps()) {
            log::warn!(
                "Pawn '{}': {} sub-steps clamped to {}",
                tree.name(tree.root()).unwrap_or_default(),
                config.sub_steps,
                config.effective_sub_steps()
            );
        }

        let pipeline = ComponentPipeline::discover(&tree, discovery);
        let mut pawn = Self {
            config,
            tree,
            pipeline,
            discovery,
            state: PawnState::default(),
            active_probe: None,
        };
        pawn.select_probe();
        Ok(pawn)
    }

    /// Rebuild the per-role lists from the tree
    pub fn rediscover(&mut self) {
        self.pipeline = ComponentPipeline::discover(&self.tree, self.discovery);
        self.select_probe();
    }

    // ==================== Components ====================

    /// Add a component and rediscover, so lists stay in document order
    pub fn add_component(
        &mut self,
        parent: ComponentId,
        name: impl Into<String>,
        role: Role,
    ) -> Result<ComponentId> {
        let id = self.tree.add_component(parent, name, role)?;
        self.rediscover();
        Ok(id)
    }

    /// Remove a node and its subtree; returns the removed ids
    pub fn remove_component(&mut self, id: ComponentId) -> Result<Vec<ComponentId>> {
        let removed = self.tree.remove(id)?;
        for &gone in &removed {
            self.pipeline.forget(gone);
            if self.active_probe == Some(gone) {
                self.active_probe = None;
            }
        }
        Ok(removed)
    }

    pub fn component<T: Any>(&self, id: ComponentId) -> Result<&T> {
        self.tree.get::<T>(id)
    }

    pub fn component_mut<T: Any>(&mut self, id: ComponentId) -> Result<&mut T> {
        self.tree.get_mut::<T>(id)
    }

    /// Enter a state on a state machine of unknown state type
    pub fn enter_state<T: Any>(&mut self, machine: ComponentId, state: &T) -> Result<()> {
        self.tree
            .state_machine_mut(machine)
            .ok_or(PawnError::RoleMismatch {
                id: machine,
                expected: "state machine",
            })?
            .enter_any(AnyState::new(state))
    }

    pub fn is_in_state<T: Any>(&self, machine: ComponentId, state: &T) -> Result<bool> {
        self.tree
            .state_machine(machine)
            .ok_or(PawnError::RoleMismatch {
                id: machine,
                expected: "state machine",
            })?
            .is_in_any(AnyState::new(state))
    }

    /// Whether a component is enabled and all its conditions hold
    pub fn is_active(&self, id: ComponentId) -> bool {
        self.scope().is_active(id)
    }

    pub fn scope(&self) -> Scope<'_> {
        Scope::new(&self.tree, &self.state)
    }

    // ==================== Accessors ====================

    pub fn config(&self) -> &PawnConfig {
        &self.config
    }

    pub fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    /// Structural edits made here are not seen until [`Pawn::rediscover`]
    pub fn tree_mut(&mut self) -> &mut ComponentTree {
        &mut self.tree
    }

    pub fn pipeline(&self) -> &ComponentPipeline {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut ComponentPipeline {
        &mut self.pipeline
    }

    pub fn state(&self) -> &PawnState {
        &self.state
    }

    pub fn position(&self) -> Vec3 {
        self.state.position()
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.state.set_position(position);
    }

    /// Unchecked displacement
    pub fn translate(&mut self, translation: Vec3) {
        self.state.set_position(self.state.position() + translation);
    }

    pub fn facing(&self) -> Facing {
        self.state.facing()
    }

    pub fn is_facing_right(&self) -> bool {
        self.state.facing().is_facing_right()
    }

    pub fn is_facing_left(&self) -> bool {
        self.state.facing().is_facing_left()
    }

    pub fn is_facing_up(&self) -> bool {
        self.state.facing().is_facing_up()
    }

    pub fn is_facing_down(&self) -> bool {
        self.state.facing().is_facing_down()
    }

    pub fn set_facing(&mut self, facing: Facing) {
        *self.state.facing_mut() = facing;
    }

    pub fn surroundings(&self) -> &Surroundings {
        self.state.surroundings()
    }

    pub fn front(&self) -> NearestSurface {
        self.surroundings().front(self.facing())
    }

    pub fn behind(&self) -> NearestSurface {
        self.surroundings().behind(self.facing())
    }

    pub fn front_adjacent(&self) -> ClassifiedSurface {
        self.surroundings().front_adjacent(self.facing())
    }

    pub fn behind_adjacent(&self) -> ClassifiedSurface {
        self.surroundings().behind_adjacent(self.facing())
    }

    /// Probe selected for the current tick
    pub fn active_probe(&self) -> Option<ComponentId> {
        self.active_probe
    }

    // ==================== Update ====================

    /// Advance one physics tick
    pub fn physics_process(&mut self, delta: f32, scene: &dyn SceneQuery) {
        let sub_steps = self.config.effective_sub_steps();
        let sub_delta = delta / sub_steps as f32;

        self.select_probe();

        for _ in 0..sub_steps {
            self.update_surroundings(scene);
            for phase in Phase::ALL {
                self.run_phase(phase, sub_delta);
            }
            self.apply_actions(scene);
        }

        self.update_surroundings(scene);
    }

    /// Move immediately, climbing and descending slopes
    pub fn try_move(&mut self, x: f32, y: f32, scene: &dyn SceneQuery) {
        self.select_probe();
        self.update_surroundings(scene);
        self.resolve_move(Vec2::new(x, y), true, true, scene);
    }

    /// Re-probe all four directions from the current position. Without an
    /// active probe the pawn is surrounded by air.
    pub fn update_surroundings(&mut self, scene: &dyn SceneQuery) {
        let surroundings = match self.probe() {
            Some(probe) => {
                let ctx = ProbeContext::new(scene, self.state.position());
                Surroundings::probe(probe, &ctx, &self.config)
            }
            None => Surroundings::air(),
        };

        log::trace!("Surroundings: {}", surroundings);
        self.state.set_surroundings(surroundings);
    }

    /// Resolve a displacement against the scene from the current position
    pub fn resolve_move(
        &mut self,
        movement: Vec2,
        climb_slopes: bool,
        descend_slopes: bool,
        scene: &dyn SceneQuery,
    ) {
        let probe = self.active_probe.and_then(|id| self.tree.probe(id));
        let mut resolver = MoveResolver::new(
            scene,
            probe,
            *self.state.surroundings(),
            self.state.position(),
        );
        resolver.resolve_move(movement, climb_slopes, descend_slopes);
        let position = resolver.position();
        self.state.set_position(position);
    }

    fn select_probe(&mut self) {
        let selected = self.pipeline.probes.first_active(&self.scope());
        if selected != self.active_probe {
            match selected {
                Some(id) => log::debug!(
                    "Active probe is now '{}'",
                    self.tree.name(id).unwrap_or_default()
                ),
                None => log::debug!("No active probe, surroundings fall back to air"),
            }
        }
        self.active_probe = selected;
    }

    fn probe(&self) -> Option<&dyn Raycaster> {
        self.active_probe.and_then(|id| self.tree.probe(id))
    }

    /// Run a hook with the component lifted out of its slot
    fn run_hook(&mut self, id: ComponentId, hook: impl FnOnce(&mut Role, &mut HookContext<'_>)) {
        let Some(mut role) = self.tree.take_role(id) else {
            return;
        };
        {
            let mut ctx = HookContext::new(&mut self.tree, &self.state, id);
            hook(&mut role, &mut ctx);
        }
        self.tree.restore_role(id, role);
    }

    fn run_phase(&mut self, phase: Phase, delta: f32) {
        if phase == Phase::Properties {
            for id in self.pipeline.triggers.ids().to_vec() {
                if self.is_active(id) {
                    self.run_hook(id, |role, ctx| {
                        if let Role::Trigger(trigger) = role {
                            trigger.pre_update_properties(delta, ctx);
                        }
                    });
                }
            }
        }

        for id in self.pipeline.state_machines.ids().to_vec() {
            if self.is_active(id) {
                self.run_hook(id, |role, ctx| {
                    if let Role::StateMachine(machine) = role {
                        match phase {
                            Phase::Properties => machine.pre_update_properties(delta, ctx),
                            Phase::Speed => machine.pre_update_speed(delta, ctx),
                            Phase::Movement => machine.pre_update_movement(delta, ctx),
                            Phase::FaceDirection => machine.pre_update_face_direction(delta, ctx),
                        }
                    }
                });
            }
        }

        for id in self.pipeline.actions.ids().to_vec() {
            if !self.is_active(id) {
                if let Some(action) = self.tree.action_mut(id) {
                    action.force_stop();
                }
            } else if phase == Phase::Properties {
                self.update_action_properties(id, delta);
            } else {
                self.run_hook(id, |role, ctx| {
                    if let Role::Action(action) = role {
                        match phase {
                            Phase::Properties => action.update_properties(delta, ctx),
                            Phase::Speed => action.update_speed(delta, ctx),
                            Phase::Movement => action.update_movement(delta, ctx),
                            Phase::FaceDirection => action.update_face_direction(delta, ctx),
                        }
                    }
                });
            }
        }

        for id in self.pipeline.modifiers.ids().to_vec() {
            if self.is_active(id) {
                self.run_hook(id, |role, ctx| {
                    if let Role::Modifier(modifier) = role {
                        match phase {
                            Phase::Properties => modifier.post_update_properties(delta, ctx),
                            Phase::Speed => modifier.post_update_speed(delta, ctx),
                            Phase::Movement => modifier.post_update_movement(delta, ctx),
                            Phase::FaceDirection => modifier.post_update_face_direction(delta, ctx),
                        }
                    }
                });
            }
        }
    }

    /// Update an action's properties, notifying the old and new set when
    /// the selection changes
    fn update_action_properties(&mut self, id: ComponentId, delta: f32) {
        let previous = self.tree.action(id).and_then(|action| action.properties());
        self.run_hook(id, |role, ctx| {
            if let Role::Action(action) = role {
                action.update_properties(delta, ctx);
            }
        });
        let next = self.tree.action(id).and_then(|action| action.properties());

        if previous == next {
            return;
        }

        log::debug!(
            "Action '{}' switched properties {:?} -> {:?}",
            self.tree.name(id).unwrap_or_default(),
            previous,
            next
        );

        if let Some(old) = previous {
            self.run_hook(old, |role, ctx| {
                if let Role::Properties(properties) = role {
                    properties.on_deactivate(ctx);
                }
            });
        }
        if let Some(new) = next {
            self.run_hook(new, |role, ctx| {
                if let Role::Properties(properties) = role {
                    properties.on_activate(ctx);
                }
            });
        }
    }

    /// Resolve the movement of every active action, one after another
    fn apply_actions(&mut self, scene: &dyn SceneQuery) {
        for id in self.pipeline.actions.ids().to_vec() {
            if !self.is_active(id) {
                continue;
            }
            let Some(action) = self.tree.action(id) else {
                continue;
            };
            let movement = action.movement();
            let descends = action.descends_slopes();
            let face = action.face_direction();

            self.resolve_move(movement, true, descends, scene);
            self.state.facing_mut().apply(face);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{
        AxisAction, BoolStateMachine, HookModifier, PlanarAction, PropertySet, ToggleCondition,
    };
    use crate::raycast::RaycastBox;
    use void_physics::PhysicsWorld;

    fn hero() -> (ComponentTree, ComponentId) {
        let mut tree = ComponentTree::new("Hero");
        let root = tree.root();
        let run = tree
            .add_component(root, "Run", Role::action(PlanarAction::new()))
            .unwrap();
        tree.add_component(run, "Normal", Role::properties(PropertySet::new(())))
            .unwrap();
        (tree, run)
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let (tree, _) = hero();
        let config = PawnConfig::default().with_adjacency_check_distance(-1.0);
        assert!(matches!(
            Pawn::new(tree, config),
            Err(PawnError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_sub_steps_are_clamped() {
        let (tree, run) = hero();
        let mut pawn = Pawn::new(tree, PawnConfig::default().with_sub_steps(20)).unwrap();
        assert_eq!(pawn.config().effective_sub_steps(), 8);

        pawn.component_mut::<PlanarAction>(run).unwrap().drive(Vec2::new(8.0, 0.0));
        pawn.physics_process(1.0, &PhysicsWorld::new());

        // 8 sub-steps of 1/8 s at 8 units per second
        assert!((pawn.position().x - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_moves_without_probe() {
        let (tree, run) = hero();
        let mut pawn = Pawn::new(tree, PawnConfig::default()).unwrap();
        pawn.component_mut::<PlanarAction>(run).unwrap().drive(Vec2::new(-2.0, 1.0));

        pawn.physics_process(0.5, &PhysicsWorld::new());

        assert_eq!(pawn.position(), Vec3::new(-1.0, 0.5, 0.0));
        assert!(pawn.is_facing_left());
        assert!(pawn.is_facing_up());
        assert_eq!(pawn.active_probe(), None);
        assert!(pawn.surroundings().below_adjacent().is_air());
    }

    #[test]
    fn test_phase_order() {
        let calls = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let (mut tree, _) = hero();
        let root = tree.root();

        let (a, b) = (calls.clone(), calls.clone());
        let modifier = HookModifier::default()
            .on_speed(move |_, _| a.borrow_mut().push("speed"))
            .on_movement(move |_, _| b.borrow_mut().push("movement"));
        tree.add_component(root, "Trace", Role::modifier(modifier))
            .unwrap();

        let mut pawn = Pawn::new(tree, PawnConfig::default().with_sub_steps(2)).unwrap();
        pawn.physics_process(0.1, &PhysicsWorld::new());

        assert_eq!(*calls.borrow(), vec!["speed", "movement", "speed", "movement"]);
    }

    #[test]
    fn test_modifier_can_reach_other_components() {
        let (mut tree, run) = hero();
        let root = tree.root();
        let modifier = HookModifier::default().on_movement(move |_, ctx| {
            if let Ok(action) = ctx.tree_mut().get_mut::<PlanarAction>(run) {
                action.motion_mut().movement *= 2.0;
            }
        });
        tree.add_component(root, "Double", Role::modifier(modifier))
            .unwrap();

        let mut pawn = Pawn::new(tree, PawnConfig::default()).unwrap();
        pawn.component_mut::<PlanarAction>(run).unwrap().drive(Vec2::new(1.0, 0.0));
        pawn.physics_process(1.0, &PhysicsWorld::new());

        assert_eq!(pawn.position(), Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_remove_component_forgets_it() {
        let (mut tree, run) = hero();
        let root = tree.root();
        let probe = tree
            .add_component(root, "Box", Role::probe(RaycastBox::default()))
            .unwrap();
        let mut pawn = Pawn::new(tree, PawnConfig::default()).unwrap();
        pawn.physics_process(0.1, &PhysicsWorld::new());
        assert_eq!(pawn.active_probe(), Some(probe));

        let removed = pawn.remove_component(probe).unwrap();
        assert_eq!(removed, vec![probe]);
        assert!(pawn.pipeline().probes.is_empty());
        assert_eq!(pawn.active_probe(), None);

        assert!(pawn.remove_component(pawn.tree().root()).is_err());
        assert_eq!(pawn.pipeline().actions.ids(), &[run]);
    }

    #[test]
    fn test_add_component_keeps_document_order() {
        let (tree, run) = hero();
        let mut pawn = Pawn::new(tree, PawnConfig::default()).unwrap();
        let root = pawn.tree().root();

        let climb = pawn
            .add_component(root, "Climb", Role::action(AxisAction::vertical()))
            .unwrap();
        let gate = pawn
            .add_component(climb, "Gate", Role::condition(ToggleCondition::new(false)))
            .unwrap();

        assert_eq!(pawn.pipeline().actions.ids(), &[run, climb]);
        assert_eq!(pawn.pipeline().conditions.ids(), &[gate]);
        assert!(!pawn.is_active(climb));
        assert!(pawn.is_active(run));
    }

    #[test]
    fn test_state_access_by_id() {
        let (mut tree, _) = hero();
        let root = tree.root();
        let grounded = tree
            .add_component(root, "Grounded", Role::state_machine(BoolStateMachine::new("Grounded", false)))
            .unwrap();
        let mut pawn = Pawn::new(tree, PawnConfig::default()).unwrap();

        pawn.enter_state(grounded, &true).unwrap();
        assert!(pawn.is_in_state(grounded, &true).unwrap());
        assert!(matches!(
            pawn.enter_state(grounded, &1u8),
            Err(PawnError::StateTypeMismatch { .. })
        ));
        assert!(matches!(
            pawn.enter_state(root, &true),
            Err(PawnError::RoleMismatch { .. })
        ));
    }
}
