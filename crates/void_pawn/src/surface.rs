//! Surface classification
//!
//! A hit normal is measured against "up" and mapped onto one axis of
//! surface categories:
//!
//! ```text
//!  0°          ground          90°          180 - ceiling      180°
//!  ├── level ── sloped ── steep ┤ down · straight · up ├── steep ── sloped ── level ──┤
//!  │            ground          │        walls         │           ceiling           │
//! ```

use crate::config::AngleThresholds;
use glam::Vec2;
use std::fmt;

/// Decimals kept when rounding surface angles
pub const ANGLE_DECIMALS: u32 = 3;

/// Discrete surface category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceType {
    /// Nothing was hit
    Air,
    LevelGround,
    SlopedGround,
    SteepGround,
    /// Wall leaning over a drop (normal points slightly up)
    SlopedWallDownward,
    StraightWall,
    /// Overhanging wall (normal points slightly down)
    SlopedWallUpward,
    SteepCeiling,
    SlopedCeiling,
    LevelCeiling,
    /// The probe started inside solid geometry
    Inside,
}

impl SurfaceType {
    /// Map a rounded angle onto a surface type
    pub fn from_angle(angle: f32, thresholds: &AngleThresholds) -> Self {
        let ceiling_start = 180.0 - thresholds.max_ceiling_angle;

        if angle <= thresholds.max_ground_angle {
            if angle == 0.0 {
                Self::LevelGround
            } else if angle <= thresholds.max_slope_angle {
                Self::SlopedGround
            } else {
                Self::SteepGround
            }
        } else if angle < ceiling_start {
            if angle == 90.0 {
                Self::StraightWall
            } else if angle < 90.0 {
                Self::SlopedWallDownward
            } else {
                Self::SlopedWallUpward
            }
        } else if angle == 180.0 {
            Self::LevelCeiling
        } else if angle >= 180.0 - thresholds.max_ceiling_slope_angle {
            Self::SlopedCeiling
        } else {
            Self::SteepCeiling
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Air => "Air",
            Self::LevelGround => "LevelGround",
            Self::SlopedGround => "SlopedGround",
            Self::SteepGround => "SteepGround",
            Self::SlopedWallDownward => "SlopedWallDownward",
            Self::StraightWall => "StraightWall",
            Self::SlopedWallUpward => "SlopedWallUpward",
            Self::SteepCeiling => "SteepCeiling",
            Self::SlopedCeiling => "SlopedCeiling",
            Self::LevelCeiling => "LevelCeiling",
            Self::Inside => "Inside",
        }
    }
}

impl fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Round to `decimals` places: round at one extra place, then truncate it.
///
/// The two steps keep float noise such as `89.99999` or `90.00001` on the
/// exact value, so threshold comparisons like `angle == 90` hold.
pub fn round_angle(value: f32, decimals: u32) -> f32 {
    let factor = 10f64.powi(decimals as i32 + 1);
    let digits = (f64::from(value) * factor).round() as i64 / 10;
    (digits as f64 / (factor / 10.0)) as f32
}

/// Unsigned angle between `normal` and `up`, in degrees, rounded
pub fn normal_to_angle(normal: Vec2, up: Vec2) -> f32 {
    let radians = normal.perp_dot(up).atan2(normal.dot(up));
    round_angle(radians.to_degrees().abs(), ANGLE_DECIMALS)
}

/// Immutable classification of one probed surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedSurface {
    normal: Vec2,
    angle: f32,
    surface_type: SurfaceType,
}

impl ClassifiedSurface {
    /// The "nothing was hit" surface
    pub const AIR: Self = Self {
        normal: Vec2::ZERO,
        angle: 0.0,
        surface_type: SurfaceType::Air,
    };

    /// Classify a probe hit.
    ///
    /// A miss is [`ClassifiedSurface::AIR`]. A hit with a zero normal is
    /// [`SurfaceType::Inside`] at angle 0.
    pub fn classify(hit: bool, normal: Vec2, up: Vec2, thresholds: &AngleThresholds) -> Self {
        if !hit {
            return Self::AIR;
        }

        let normal = normal.normalize_or_zero();
        if normal == Vec2::ZERO {
            return Self {
                normal,
                angle: 0.0,
                surface_type: SurfaceType::Inside,
            };
        }

        let angle = normal_to_angle(normal, up);
        Self {
            normal,
            angle,
            surface_type: SurfaceType::from_angle(angle, thresholds),
        }
    }

    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    /// Angle from up, in degrees, within [0, 180]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn surface_type(&self) -> SurfaceType {
        self.surface_type
    }

    // ==================== Tangents ====================

    /// Normal rotated a quarter turn clockwise
    pub fn tangent_right(&self) -> Vec2 {
        Vec2::new(self.normal.y, -self.normal.x)
    }

    /// Normal rotated a quarter turn counter-clockwise
    pub fn tangent_left(&self) -> Vec2 {
        Vec2::new(-self.normal.y, self.normal.x)
    }

    /// Direction along the surface towards screen-left
    pub fn parallel_left(&self) -> Vec2 {
        match self.surface_type {
            SurfaceType::Air | SurfaceType::StraightWall => Vec2::ZERO,
            _ if self.faces_up() => self.tangent_left(),
            _ => self.tangent_right(),
        }
    }

    /// Direction along the surface towards screen-right
    pub fn parallel_right(&self) -> Vec2 {
        match self.surface_type {
            SurfaceType::Air | SurfaceType::StraightWall => Vec2::ZERO,
            _ if self.faces_up() => self.tangent_right(),
            _ => self.tangent_left(),
        }
    }

    /// Direction along the surface going downhill
    pub fn parallel_down(&self) -> Vec2 {
        if !self.has_incline() {
            return Vec2::ZERO;
        }
        if self.faces_right() {
            self.tangent_right()
        } else {
            self.tangent_left()
        }
    }

    /// Direction along the surface going uphill
    pub fn parallel_up(&self) -> Vec2 {
        if !self.has_incline() {
            return Vec2::ZERO;
        }
        if self.faces_right() {
            self.tangent_left()
        } else {
            self.tangent_right()
        }
    }

    fn has_incline(&self) -> bool {
        matches!(
            self.surface_type,
            SurfaceType::SlopedGround
                | SurfaceType::SteepGround
                | SurfaceType::SlopedWallDownward
                | SurfaceType::StraightWall
                | SurfaceType::SlopedWallUpward
                | SurfaceType::SteepCeiling
                | SurfaceType::SlopedCeiling
        )
    }

    // ==================== Facing ====================

    pub fn faces_left(&self) -> bool {
        self.normal.x < 0.0
    }

    pub fn faces_right(&self) -> bool {
        self.normal.x > 0.0
    }

    pub fn faces_down(&self) -> bool {
        self.normal.y < 0.0
    }

    pub fn faces_up(&self) -> bool {
        self.normal.y > 0.0
    }

    // ==================== Categories ====================

    pub fn is_air(&self) -> bool {
        self.surface_type == SurfaceType::Air
    }

    pub fn is_inside(&self) -> bool {
        self.surface_type == SurfaceType::Inside
    }

    pub fn is_ground(&self) -> bool {
        matches!(
            self.surface_type,
            SurfaceType::LevelGround | SurfaceType::SlopedGround | SurfaceType::SteepGround
        )
    }

    pub fn is_wall(&self) -> bool {
        matches!(
            self.surface_type,
            SurfaceType::SlopedWallDownward
                | SurfaceType::StraightWall
                | SurfaceType::SlopedWallUpward
        )
    }

    pub fn is_ceiling(&self) -> bool {
        matches!(
            self.surface_type,
            SurfaceType::SteepCeiling | SurfaceType::SlopedCeiling | SurfaceType::LevelCeiling
        )
    }

    /// Level ground or level ceiling
    pub fn is_horizontal(&self) -> bool {
        matches!(
            self.surface_type,
            SurfaceType::LevelGround | SurfaceType::LevelCeiling
        )
    }

    /// Straight wall
    pub fn is_vertical(&self) -> bool {
        self.surface_type == SurfaceType::StraightWall
    }

    /// Any sloped or steep surface
    pub fn is_slanted(&self) -> bool {
        matches!(
            self.surface_type,
            SurfaceType::SlopedGround
                | SurfaceType::SteepGround
                | SurfaceType::SlopedWallDownward
                | SurfaceType::SlopedWallUpward
                | SurfaceType::SteepCeiling
                | SurfaceType::SlopedCeiling
        )
    }
}

impl Default for ClassifiedSurface {
    fn default() -> Self {
        Self::AIR
    }
}

impl fmt::Display for ClassifiedSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}°, normal = ({}, {}))",
            self.surface_type, self.angle, self.normal.x, self.normal.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn from_degrees(degrees: f32) -> Vec2 {
        // Rotate "up" clockwise by `degrees`; normals on the right half face right.
        let radians = degrees.to_radians();
        Vec2::new(radians.sin(), radians.cos())
    }

    fn classify(normal: Vec2) -> ClassifiedSurface {
        ClassifiedSurface::classify(true, normal, Vec2::Y, &AngleThresholds::default())
    }

    #[test]
    fn test_round_angle() {
        assert_eq!(round_angle(89.99999, 3), 90.0);
        assert_eq!(round_angle(90.00001, 3), 90.0);
        assert_eq!(round_angle(30.0004, 3), 30.0);
        assert_relative_eq!(round_angle(12.3456, 3), 12.345, epsilon = 1e-4);
        assert_eq!(round_angle(0.0, 3), 0.0);
        assert_eq!(round_angle(180.0, 3), 180.0);
    }

    #[test]
    fn test_miss_is_air() {
        let surface = ClassifiedSurface::classify(false, Vec2::Y, Vec2::Y, &AngleThresholds::default());
        assert_eq!(surface, ClassifiedSurface::AIR);
        assert!(surface.is_air());
        assert_eq!(surface.angle(), 0.0);
        assert_eq!(surface.normal(), Vec2::ZERO);
    }

    #[test]
    fn test_zero_normal_is_inside() {
        let surface = classify(Vec2::ZERO);
        assert_eq!(surface.surface_type(), SurfaceType::Inside);
        assert_eq!(surface.angle(), 0.0);
        assert!(!surface.is_air());
        assert!(surface.is_inside());
    }

    #[test]
    fn test_boundary_angles() {
        let t = AngleThresholds::default();
        assert_eq!(SurfaceType::from_angle(0.0, &t), SurfaceType::LevelGround);
        assert_eq!(SurfaceType::from_angle(30.0, &t), SurfaceType::SlopedGround);
        assert_eq!(SurfaceType::from_angle(30.001, &t), SurfaceType::SteepGround);
        assert_eq!(SurfaceType::from_angle(60.0, &t), SurfaceType::SteepGround);
        assert_eq!(SurfaceType::from_angle(60.001, &t), SurfaceType::SlopedWallDownward);
        assert_eq!(SurfaceType::from_angle(90.0, &t), SurfaceType::StraightWall);
        assert_eq!(SurfaceType::from_angle(119.999, &t), SurfaceType::SlopedWallUpward);
        assert_eq!(SurfaceType::from_angle(120.0, &t), SurfaceType::SteepCeiling);
        assert_eq!(SurfaceType::from_angle(150.0, &t), SurfaceType::SlopedCeiling);
        assert_eq!(SurfaceType::from_angle(180.0, &t), SurfaceType::LevelCeiling);
    }

    #[test]
    fn test_every_angle_classifies() {
        let t = AngleThresholds::default();
        let mut previous = SurfaceType::LevelGround;
        let order = [
            SurfaceType::LevelGround,
            SurfaceType::SlopedGround,
            SurfaceType::SteepGround,
            SurfaceType::SlopedWallDownward,
            SurfaceType::StraightWall,
            SurfaceType::SlopedWallUpward,
            SurfaceType::SteepCeiling,
            SurfaceType::SlopedCeiling,
            SurfaceType::LevelCeiling,
        ];
        let rank = |s: SurfaceType| order.iter().position(|o| *o == s).unwrap();

        // Types only ever advance along the axis, so the ranges never overlap.
        for tenth in 0..=1800 {
            let angle = tenth as f32 / 10.0;
            let current = SurfaceType::from_angle(angle, &t);
            assert!(rank(current) >= rank(previous), "{angle}° went back to {current}");
            previous = current;
        }
        assert_eq!(previous, SurfaceType::LevelCeiling);
    }

    #[test]
    fn test_exact_wall_despite_float_error() {
        let wall = classify(from_degrees(90.0));
        assert_eq!(wall.angle(), 90.0);
        assert_eq!(wall.surface_type(), SurfaceType::StraightWall);
        assert!(wall.is_vertical());

        let left_wall = classify(Vec2::new(-1.0, 1e-7));
        assert_eq!(left_wall.surface_type(), SurfaceType::StraightWall);
    }

    #[test]
    fn test_classify_normals() {
        assert_eq!(classify(Vec2::Y).surface_type(), SurfaceType::LevelGround);
        assert_eq!(classify(from_degrees(20.0)).surface_type(), SurfaceType::SlopedGround);
        assert_eq!(classify(from_degrees(-45.0)).surface_type(), SurfaceType::SteepGround);
        assert_eq!(classify(from_degrees(75.0)).surface_type(), SurfaceType::SlopedWallDownward);
        assert_eq!(classify(from_degrees(105.0)).surface_type(), SurfaceType::SlopedWallUpward);
        assert_eq!(classify(from_degrees(135.0)).surface_type(), SurfaceType::SteepCeiling);
        assert_eq!(classify(from_degrees(-160.0)).surface_type(), SurfaceType::SlopedCeiling);
        assert_eq!(classify(-Vec2::Y).surface_type(), SurfaceType::LevelCeiling);

        let slope = classify(from_degrees(-20.0));
        assert_relative_eq!(slope.angle(), 20.0, epsilon = 1e-3);
    }

    #[test]
    fn test_facing_predicates() {
        let slope = classify(from_degrees(-20.0));
        assert!(slope.faces_left());
        assert!(slope.faces_up());
        assert!(!slope.faces_right());
        assert!(!slope.faces_down());

        let ceiling = classify(from_degrees(160.0));
        assert!(ceiling.faces_right());
        assert!(ceiling.faces_down());
    }

    #[test]
    fn test_categories() {
        assert!(classify(Vec2::Y).is_ground());
        assert!(classify(Vec2::Y).is_horizontal());
        assert!(classify(from_degrees(20.0)).is_slanted());
        assert!(classify(Vec2::X).is_wall());
        assert!(!classify(Vec2::X).is_slanted());
        assert!(classify(-Vec2::Y).is_ceiling());
        assert!(classify(-Vec2::Y).is_horizontal());
        assert!(classify(from_degrees(150.0)).is_slanted());
        assert!(!ClassifiedSurface::AIR.is_ground());
    }

    #[test]
    fn test_tangents() {
        let slope = classify(from_degrees(-20.0));
        let n = slope.normal();
        assert_eq!(slope.tangent_right(), Vec2::new(n.y, -n.x));
        assert_eq!(slope.tangent_left(), Vec2::new(-n.y, n.x));
        assert_relative_eq!(slope.tangent_right().dot(n), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_parallel_vectors_on_slope() {
        // Slope rising to the right: normal leans left.
        let slope = classify(from_degrees(-20.0));
        let up = slope.parallel_up();
        let down = slope.parallel_down();

        assert!(up.x > 0.0 && up.y > 0.0);
        assert!(down.x < 0.0 && down.y < 0.0);
        assert_relative_eq!(up.y / up.x, 20f32.to_radians().tan(), epsilon = 1e-4);
        assert!(slope.parallel_right().x > 0.0);
        assert!(slope.parallel_left().x < 0.0);

        // Mirrored slope rising to the left.
        let mirrored = classify(from_degrees(20.0));
        assert!(mirrored.parallel_up().x < 0.0);
        assert!(mirrored.parallel_down().x > 0.0);
        assert!(mirrored.parallel_down().y < 0.0);
    }

    #[test]
    fn test_parallel_vectors_zero_where_undefined() {
        assert_eq!(ClassifiedSurface::AIR.parallel_left(), Vec2::ZERO);
        assert_eq!(ClassifiedSurface::AIR.parallel_up(), Vec2::ZERO);

        let wall = classify(Vec2::X);
        assert_eq!(wall.parallel_left(), Vec2::ZERO);
        assert_eq!(wall.parallel_right(), Vec2::ZERO);
        assert_eq!(wall.parallel_down(), Vec2::new(0.0, -1.0));

        let level = classify(Vec2::Y);
        assert_eq!(level.parallel_down(), Vec2::ZERO);
        assert_eq!(level.parallel_right(), Vec2::X);

        let ceiling = classify(-Vec2::Y);
        assert_eq!(ceiling.parallel_up(), Vec2::ZERO);
        assert_eq!(ceiling.parallel_right(), Vec2::X);
    }

    #[test]
    fn test_display() {
        let text = classify(Vec2::Y).to_string();
        assert!(text.starts_with("LevelGround (0°"));
        assert_eq!(ClassifiedSurface::AIR.surface_type().to_string(), "Air");
    }
}
