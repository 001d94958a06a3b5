//! Actions produce the pawn's speed, movement and facing

use super::{AsAny, ComponentId, HookContext};
use crate::facing::FaceDirection;
use glam::Vec2;
use std::fmt;

/// A component that moves the pawn.
///
/// Every sub-step the pawn calls the four update hooks in order, then
/// resolves each action's [`Action::movement`] against the scene on its own.
pub trait Action: AsAny + fmt::Debug {
    /// Whether the pawn may follow the ground down slopes while this action
    /// moves it horizontally
    fn descends_slopes(&self) -> bool {
        false
    }

    /// Zero out all motion state; called whenever the action is inactive
    fn force_stop(&mut self);

    fn update_properties(&mut self, _delta: f32, _ctx: &mut HookContext<'_>) {}
    fn update_speed(&mut self, _delta: f32, _ctx: &mut HookContext<'_>) {}
    fn update_movement(&mut self, _delta: f32, _ctx: &mut HookContext<'_>) {}
    fn update_face_direction(&mut self, _delta: f32, _ctx: &mut HookContext<'_>) {}

    /// The property set in use
    fn properties(&self) -> Option<ComponentId>;

    fn speed(&self) -> Vec2;

    /// Displacement for the current sub-step
    fn movement(&self) -> Vec2;

    fn face_direction(&self) -> FaceDirection;

    fn is_moving(&self) -> bool {
        self.movement() != Vec2::ZERO
    }
}

/// Motion bookkeeping shared by the built-in actions
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActionMotion {
    pub properties: Option<ComponentId>,
    pub speed: Vec2,
    pub movement: Vec2,
    pub face: FaceDirection,
}

impl ActionMotion {
    pub fn stop(&mut self) {
        self.speed = Vec2::ZERO;
        self.movement = Vec2::ZERO;
        self.face = FaceDirection::NO_CHANGE;
    }

    pub fn select_properties(&mut self, ctx: &HookContext<'_>) {
        self.properties = ctx.first_active_properties();
    }

    /// Speed becomes zero without properties
    pub fn set_speed(&mut self, speed: Vec2) {
        self.speed = if self.properties.is_some() { speed } else { Vec2::ZERO };
    }

    pub fn integrate(&mut self, delta: f32) {
        self.movement = self.speed * delta;
    }

    pub fn face_along_movement(&mut self) {
        self.face = FaceDirection::from_movement(self.movement);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn unit(&self) -> Vec2 {
        match self {
            Axis::Horizontal => Vec2::X,
            Axis::Vertical => Vec2::Y,
        }
    }
}

/// Moves along one axis at a speed commanded by the host
#[derive(Debug, Clone)]
pub struct AxisAction {
    axis: Axis,
    commanded: f32,
    descends_slopes: bool,
    motion: ActionMotion,
}

impl AxisAction {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            commanded: 0.0,
            descends_slopes: false,
            motion: ActionMotion::default(),
        }
    }

    pub fn horizontal() -> Self {
        Self::new(Axis::Horizontal)
    }

    pub fn vertical() -> Self {
        Self::new(Axis::Vertical)
    }

    pub fn with_descends_slopes(mut self, descends_slopes: bool) -> Self {
        self.descends_slopes = descends_slopes;
        self
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Signed speed along the axis, in units per second
    pub fn drive(&mut self, speed: f32) {
        self.commanded = speed;
    }

    pub fn commanded(&self) -> f32 {
        self.commanded
    }

    pub fn motion(&self) -> &ActionMotion {
        &self.motion
    }

    /// Direct access for modifiers
    pub fn motion_mut(&mut self) -> &mut ActionMotion {
        &mut self.motion
    }
}

impl Action for AxisAction {
    fn descends_slopes(&self) -> bool {
        self.descends_slopes
    }

    fn force_stop(&mut self) {
        self.motion.stop();
    }

    fn update_properties(&mut self, _delta: f32, ctx: &mut HookContext<'_>) {
        self.motion.select_properties(ctx);
    }

    fn update_speed(&mut self, _delta: f32, _ctx: &mut HookContext<'_>) {
        self.motion.set_speed(self.axis.unit() * self.commanded);
    }

    fn update_movement(&mut self, delta: f32, _ctx: &mut HookContext<'_>) {
        self.motion.integrate(delta);
    }

    fn update_face_direction(&mut self, _delta: f32, _ctx: &mut HookContext<'_>) {
        self.motion.face_along_movement();
    }

    fn properties(&self) -> Option<ComponentId> {
        self.motion.properties
    }

    fn speed(&self) -> Vec2 {
        self.motion.speed
    }

    fn movement(&self) -> Vec2 {
        self.motion.movement
    }

    fn face_direction(&self) -> FaceDirection {
        self.motion.face
    }
}

/// Moves freely in the plane
#[derive(Debug, Clone, Default)]
pub struct PlanarAction {
    commanded: Vec2,
    descends_slopes: bool,
    motion: ActionMotion,
}

impl PlanarAction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_descends_slopes(mut self, descends_slopes: bool) -> Self {
        self.descends_slopes = descends_slopes;
        self
    }

    pub fn drive(&mut self, velocity: Vec2) {
        self.commanded = velocity;
    }

    pub fn commanded(&self) -> Vec2 {
        self.commanded
    }

    pub fn motion(&self) -> &ActionMotion {
        &self.motion
    }

    /// Direct access for modifiers
    pub fn motion_mut(&mut self) -> &mut ActionMotion {
        &mut self.motion
    }
}

impl Action for PlanarAction {
    fn descends_slopes(&self) -> bool {
        self.descends_slopes
    }

    fn force_stop(&mut self) {
        self.motion.stop();
    }

    fn update_properties(&mut self, _delta: f32, ctx: &mut HookContext<'_>) {
        self.motion.select_properties(ctx);
    }

    fn update_speed(&mut self, _delta: f32, _ctx: &mut HookContext<'_>) {
        self.motion.set_speed(self.commanded);
    }

    fn update_movement(&mut self, delta: f32, _ctx: &mut HookContext<'_>) {
        self.motion.integrate(delta);
    }

    fn update_face_direction(&mut self, _delta: f32, _ctx: &mut HookContext<'_>) {
        self.motion.face_along_movement();
    }

    fn properties(&self) -> Option<ComponentId> {
        self.motion.properties
    }

    fn speed(&self) -> Vec2 {
        self.motion.speed
    }

    fn movement(&self) -> Vec2 {
        self.motion.movement
    }

    fn face_direction(&self) -> FaceDirection {
        self.motion.face
    }
}

/// Moves along a fixed direction at a commanded scalar speed
#[derive(Debug, Clone)]
pub struct DirectionalAction {
    direction: Vec2,
    commanded: f32,
    descends_slopes: bool,
    motion: ActionMotion,
}

impl DirectionalAction {
    /// `direction` is normalized; a zero direction never moves
    pub fn new(direction: Vec2) -> Self {
        Self {
            direction: direction.normalize_or_zero(),
            commanded: 0.0,
            descends_slopes: false,
            motion: ActionMotion::default(),
        }
    }

    pub fn with_descends_slopes(mut self, descends_slopes: bool) -> Self {
        self.descends_slopes = descends_slopes;
        self
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Vec2) {
        self.direction = direction.normalize_or_zero();
    }

    pub fn drive(&mut self, speed: f32) {
        self.commanded = speed;
    }

    pub fn commanded(&self) -> f32 {
        self.commanded
    }

    pub fn motion(&self) -> &ActionMotion {
        &self.motion
    }

    /// Direct access for modifiers
    pub fn motion_mut(&mut self) -> &mut ActionMotion {
        &mut self.motion
    }
}

impl Action for DirectionalAction {
    fn descends_slopes(&self) -> bool {
        self.descends_slopes
    }

    fn force_stop(&mut self) {
        self.motion.stop();
    }

    fn update_properties(&mut self, _delta: f32, ctx: &mut HookContext<'_>) {
        self.motion.select_properties(ctx);
    }

    fn update_speed(&mut self, _delta: f32, _ctx: &mut HookContext<'_>) {
        self.motion.set_speed(self.direction * self.commanded);
    }

    fn update_movement(&mut self, delta: f32, _ctx: &mut HookContext<'_>) {
        self.motion.integrate(delta);
    }

    fn update_face_direction(&mut self, _delta: f32, _ctx: &mut HookContext<'_>) {
        self.motion.face_along_movement();
    }

    fn properties(&self) -> Option<ComponentId> {
        self.motion.properties
    }

    fn speed(&self) -> Vec2 {
        self.motion.speed
    }

    fn movement(&self) -> Vec2 {
        self.motion.movement
    }

    fn face_direction(&self) -> FaceDirection {
        self.motion.face
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ComponentTree, PropertySet, Role, ToggleCondition};
    use crate::facing::{FaceDirectionX, FaceDirectionY};
    use crate::pawn::PawnState;
    use approx::assert_relative_eq;

    /// Runs the four hooks the way the pawn does
    fn step(action: &mut dyn Action, tree: &mut ComponentTree, id: ComponentId, delta: f32) {
        let state = PawnState::default();
        let mut ctx = HookContext::new(tree, &state, id);
        action.update_properties(delta, &mut ctx);
        action.update_speed(delta, &mut ctx);
        action.update_movement(delta, &mut ctx);
        action.update_face_direction(delta, &mut ctx);
    }

    fn tree_with_properties() -> (ComponentTree, ComponentId, ComponentId) {
        let mut tree = ComponentTree::new("Hero");
        let root = tree.root();
        let action = tree.add_group(root, "Walk").unwrap();
        let props = tree
            .add_component(action, "Normal", Role::properties(PropertySet::new(())))
            .unwrap();
        (tree, action, props)
    }

    #[test]
    fn test_axis_action_moves() {
        let (mut tree, id, props) = tree_with_properties();
        let mut action = AxisAction::horizontal();
        action.drive(-4.0);

        step(&mut action, &mut tree, id, 0.5);

        assert_eq!(action.properties(), Some(props));
        assert_eq!(action.speed(), Vec2::new(-4.0, 0.0));
        assert_eq!(action.movement(), Vec2::new(-2.0, 0.0));
        assert_eq!(action.face_direction().x, FaceDirectionX::Left);
        assert_eq!(action.face_direction().y, FaceDirectionY::NoChange);
        assert!(action.is_moving());
    }

    #[test]
    fn test_no_properties_no_speed() {
        let mut tree = ComponentTree::new("Hero");
        let id = tree.add_group(tree.root(), "Walk").unwrap();
        let mut action = AxisAction::vertical();
        action.drive(3.0);

        step(&mut action, &mut tree, id, 1.0);

        assert_eq!(action.properties(), None);
        assert_eq!(action.speed(), Vec2::ZERO);
        assert!(!action.is_moving());
        assert_eq!(action.face_direction(), FaceDirection::NO_CHANGE);
    }

    #[test]
    fn test_first_active_properties_win() {
        let (mut tree, id, first) = tree_with_properties();
        let second = tree
            .add_component(id, "Fallback", Role::properties(PropertySet::new(())))
            .unwrap();
        let gate = tree
            .add_component(first, "Gate", Role::condition(ToggleCondition::new(false)))
            .unwrap();

        let mut action = PlanarAction::new();
        step(&mut action, &mut tree, id, 0.1);
        assert_eq!(action.properties(), Some(second));

        tree.get_mut::<ToggleCondition>(gate).unwrap().value = true;
        step(&mut action, &mut tree, id, 0.1);
        assert_eq!(action.properties(), Some(first));
    }

    #[test]
    fn test_force_stop() {
        let (mut tree, id, _) = tree_with_properties();
        let mut action = PlanarAction::new().with_descends_slopes(true);
        action.drive(Vec2::new(1.0, 1.0));
        step(&mut action, &mut tree, id, 1.0);
        assert!(action.is_moving());

        action.force_stop();
        assert_eq!(action.speed(), Vec2::ZERO);
        assert_eq!(action.movement(), Vec2::ZERO);
        assert_eq!(action.face_direction(), FaceDirection::NO_CHANGE);
        assert!(action.descends_slopes());
    }

    #[test]
    fn test_directional_action() {
        let (mut tree, id, _) = tree_with_properties();
        let mut action = DirectionalAction::new(Vec2::new(3.0, -4.0));
        action.drive(10.0);

        step(&mut action, &mut tree, id, 0.1);

        assert_relative_eq!(action.movement().x, 0.6, epsilon = 1e-6);
        assert_relative_eq!(action.movement().y, -0.8, epsilon = 1e-6);
        assert_eq!(
            action.face_direction(),
            FaceDirection::new(FaceDirectionX::Right, FaceDirectionY::Down)
        );

        action.set_direction(Vec2::ZERO);
        step(&mut action, &mut tree, id, 0.1);
        assert!(!action.is_moving());
    }
}
