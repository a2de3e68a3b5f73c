//! Level descriptions and layout geometry.
//!
//! Both levels are plain data ([`LevelSpec`]); [`crate::world`] turns a spec
//! into bodies.  Every position here is in **layout coordinates** (1200 × 680,
//! y down) and is converted with [`layout_to_world`] at spawn time.

use crate::config::GameConfig;
use crate::constants::*;
use crate::error::{validate_motion_bounds, validate_positive, GameError, GameResult};
use bevy::prelude::*;
use std::f32::consts::{PI, TAU};

/// Which level is being played.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LevelId {
    /// One platform, unlimited tries.
    #[default]
    Easy,
    /// Three platforms (one moving), limited tries.
    Hard,
}

impl LevelId {
    /// Display / log name.
    pub fn name(self) -> &'static str {
        match self {
            LevelId::Easy => "easy",
            LevelId::Hard => "hard",
        }
    }

    /// The level offered by the "new level" button.
    pub fn other(self) -> Self {
        match self {
            LevelId::Easy => LevelId::Hard,
            LevelId::Hard => LevelId::Easy,
        }
    }

    /// Parse a level name (case-insensitive), as given in `SLINGSHOT_LEVEL`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(LevelId::Easy),
            "hard" => Some(LevelId::Hard),
            _ => None,
        }
    }

    /// Build the full description of this level from the runtime config.
    pub fn spec(self, config: &GameConfig) -> LevelSpec {
        match self {
            LevelId::Easy => LevelSpec::easy(config),
            LevelId::Hard => LevelSpec::hard(config),
        }
    }
}

/// Bounded horizontal back-and-forth path for a platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSpec {
    pub min_x: f32,
    pub max_x: f32,
    pub speed: f32,
}

/// One static (or motorized) platform.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformSpec {
    /// Centre in layout coordinates.
    pub center: Vec2,
    /// Width of the trapezoid's bottom edge.
    pub width: f32,
    /// When present the platform, its sensor and its stack move together.
    pub motion: Option<MotionSpec>,
}

/// A grid of targets, initially resting above a platform.
#[derive(Debug, Clone, PartialEq)]
pub struct StackSpec {
    pub label: &'static str,
    /// Top-left corner of the grid in layout coordinates.
    pub origin: Vec2,
    pub columns: u32,
    pub rows: u32,
    pub column_gap: f32,
    pub row_gap: f32,
    /// Index into [`LevelSpec::platforms`] of the platform carrying this stack
    /// when it moves.
    pub platform: usize,
}

/// Complete, validated-on-spawn description of one level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSpec {
    pub id: LevelId,
    pub platforms: Vec<PlatformSpec>,
    pub stacks: Vec<StackSpec>,
    pub target_radius: f32,
    /// Sling anchor in layout coordinates.
    pub sling_origin: Vec2,
    pub projectile_radius: f32,
    /// `None` = unlimited launch attempts.
    pub max_tries: Option<u32>,
}

impl LevelSpec {
    /// Single wide platform with a 4 × 4 stack; unlimited tries.
    pub fn easy(config: &GameConfig) -> Self {
        Self {
            id: LevelId::Easy,
            platforms: vec![PlatformSpec {
                center: Vec2::new(875.0, 440.0),
                width: 250.0,
                motion: None,
            }],
            stacks: vec![stack("Aliens", 800.0, 270.0, 4, 4, 0)],
            target_radius: config.target_radius,
            sling_origin: Vec2::new(SLING_ORIGIN_X, SLING_ORIGIN_Y),
            projectile_radius: EASY_PROJECTILE_RADIUS,
            max_tries: None,
        }
    }

    /// Three platforms, the top one sweeping horizontally; limited tries.
    pub fn hard(config: &GameConfig) -> Self {
        Self {
            id: LevelId::Hard,
            platforms: vec![
                PlatformSpec {
                    center: Vec2::new(890.0, 440.0),
                    width: 230.0,
                    motion: None,
                },
                PlatformSpec {
                    center: Vec2::new(590.0, 500.0),
                    width: 230.0,
                    motion: None,
                },
                PlatformSpec {
                    center: Vec2::new(735.0, 160.0),
                    width: 130.0,
                    motion: Some(MotionSpec {
                        min_x: config.platform_min_x,
                        max_x: config.platform_max_x,
                        speed: config.platform_speed,
                    }),
                },
            ],
            stacks: vec![
                stack("Aliens Stack 1", 815.0, 270.0, 4, 4, 0),
                stack("Aliens Stack 2", 515.0, 270.0, 4, 4, 1),
                stack("Aliens Stack 3", 700.0, 60.0, 2, 2, 2),
            ],
            target_radius: config.target_radius,
            sling_origin: Vec2::new(SLING_ORIGIN_X, SLING_ORIGIN_Y),
            projectile_radius: HARD_PROJECTILE_RADIUS,
            max_tries: Some(config.max_tries),
        }
    }

    /// Total number of targets across all stacks.
    pub fn target_count(&self) -> usize {
        self.stacks
            .iter()
            .map(|s| (s.columns * s.rows) as usize)
            .sum()
    }

    /// Reject descriptions that cannot be built or played.
    pub fn validate(&self) -> GameResult<()> {
        let level = self.id.name();
        if self.platforms.is_empty() {
            return Err(GameError::InvalidLevel {
                level,
                reason: "no platforms".to_string(),
            });
        }
        validate_positive("TARGET_RADIUS", self.target_radius)?;
        validate_positive("PROJECTILE_RADIUS", self.projectile_radius)?;
        if self.max_tries == Some(0) {
            return Err(GameError::InvalidLevel {
                level,
                reason: "max_tries must be at least 1".to_string(),
            });
        }
        for (index, platform) in self.platforms.iter().enumerate() {
            validate_positive("PLATFORM_WIDTH", platform.width)?;
            if let Some(motion) = platform.motion {
                validate_motion_bounds(level, motion.min_x, motion.max_x)?;
                validate_positive("PLATFORM_SPEED", motion.speed)?;
                if !self.stacks.iter().any(|s| s.platform == index) {
                    return Err(GameError::InvalidLevel {
                        level,
                        reason: format!("moving platform {index} carries no stack"),
                    });
                }
            }
        }
        for s in &self.stacks {
            if s.platform >= self.platforms.len() {
                return Err(GameError::InvalidLevel {
                    level,
                    reason: format!("stack '{}' refers to missing platform {}", s.label, s.platform),
                });
            }
        }
        Ok(())
    }
}

fn stack(label: &'static str, x: f32, y: f32, columns: u32, rows: u32, platform: usize) -> StackSpec {
    StackSpec {
        label,
        origin: Vec2::new(x, y),
        columns,
        rows,
        column_gap: 0.0,
        row_gap: 0.0,
        platform,
    }
}

/// Currently selected level (persists across restarts).
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CurrentLevel(pub LevelId);

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Map a layout point (y down, top-left origin) to Bevy world space
/// (y up, centred).
#[inline]
pub fn layout_to_world(p: Vec2) -> Vec2 {
    Vec2::new(p.x - LAYOUT_WIDTH * 0.5, LAYOUT_HEIGHT * 0.5 - p.y)
}

/// Inverse of [`layout_to_world`].
#[inline]
pub fn world_to_layout(p: Vec2) -> Vec2 {
    Vec2::new(p.x + LAYOUT_WIDTH * 0.5, LAYOUT_HEIGHT * 0.5 - p.y)
}

/// Local-space vertices (y up) of a platform trapezoid, counter-clockwise.
///
/// The bottom edge is `width` wide; the top edge is `(1 - slope) × width`.
pub fn trapezoid_vertices(width: f32, height: f32, slope: f32) -> Vec<Vec2> {
    let half_bottom = width * 0.5;
    let half_top = (1.0 - slope) * width * 0.5;
    let half_h = height * 0.5;
    vec![
        Vec2::new(-half_bottom, -half_h),
        Vec2::new(half_bottom, -half_h),
        Vec2::new(half_top, half_h),
        Vec2::new(-half_top, half_h),
    ]
}

/// Local-space vertices of a regular polygon with flat top and bottom edges.
pub fn regular_polygon_vertices(radius: f32, sides: usize) -> Vec<Vec2> {
    let step = TAU / sides as f32;
    let offset = PI / sides as f32;
    (0..sides)
        .map(|i| {
            let a = offset + step * i as f32;
            Vec2::new(radius * a.cos(), radius * a.sin())
        })
        .collect()
}

/// Flat-to-flat width of a regular polygon; the cell pitch of a target stack.
#[inline]
pub fn polygon_pitch(radius: f32, sides: usize) -> f32 {
    2.0 * radius * (PI / sides as f32).cos()
}

/// Layout-space centres of every cell in a stack, row-major from the top-left.
pub fn stack_cell_centers(stack: &StackSpec, pitch: f32) -> Vec<Vec2> {
    let mut cells = Vec::with_capacity((stack.columns * stack.rows) as usize);
    for row in 0..stack.rows {
        for col in 0..stack.columns {
            cells.push(Vec2::new(
                stack.origin.x + col as f32 * (pitch + stack.column_gap) + pitch * 0.5,
                stack.origin.y + row as f32 * (pitch + stack.row_gap) + pitch * 0.5,
            ));
        }
    }
    cells
}

/// Layout-space centre of the trigger region sitting on top of a platform.
pub fn sensor_center(platform: &PlatformSpec) -> Vec2 {
    let top = platform.center.y - PLATFORM_HEIGHT * 0.5;
    Vec2::new(platform.center.x, top - SENSOR_GAP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_round_trip_and_axes() {
        let p = Vec2::new(300.0, 500.0);
        let w = layout_to_world(p);
        assert_eq!(w, Vec2::new(-300.0, -160.0));
        assert_eq!(world_to_layout(w), p);
        // Moving down the screen is moving down in the world.
        assert!(layout_to_world(Vec2::new(0.0, 600.0)).y < layout_to_world(Vec2::new(0.0, 100.0)).y);
    }

    #[test]
    fn level_target_counts() {
        let config = GameConfig::default();
        assert_eq!(LevelSpec::easy(&config).target_count(), 16);
        assert_eq!(LevelSpec::hard(&config).target_count(), 36);
    }

    #[test]
    fn both_levels_validate() {
        let config = GameConfig::default();
        assert!(LevelSpec::easy(&config).validate().is_ok());
        assert!(LevelSpec::hard(&config).validate().is_ok());
    }

    #[test]
    fn hard_level_has_one_motorized_platform_and_ten_tries() {
        let spec = LevelSpec::hard(&GameConfig::default());
        let moving: Vec<_> = spec.platforms.iter().filter(|p| p.motion.is_some()).collect();
        assert_eq!(moving.len(), 1);
        let motion = moving[0].motion.unwrap();
        assert_eq!((motion.min_x, motion.max_x, motion.speed), (600.0, 870.0, 2.2));
        assert_eq!(spec.max_tries, Some(10));
        assert_eq!(LevelSpec::easy(&GameConfig::default()).max_tries, None);
    }

    #[test]
    fn stack_referring_to_missing_platform_is_invalid() {
        let mut spec = LevelSpec::easy(&GameConfig::default());
        spec.stacks[0].platform = 4;
        assert!(matches!(spec.validate(), Err(GameError::InvalidLevel { .. })));
    }

    #[test]
    fn moving_platform_without_a_stack_is_invalid() {
        let mut spec = LevelSpec::hard(&GameConfig::default());
        spec.stacks.retain(|s| s.platform != 2);
        assert!(matches!(spec.validate(), Err(GameError::InvalidLevel { .. })));
    }

    #[test]
    fn stack_cells_are_packed_without_overlap() {
        let spec = LevelSpec::easy(&GameConfig::default());
        let pitch = polygon_pitch(TARGET_RADIUS, TARGET_SIDES);
        let cells = stack_cell_centers(&spec.stacks[0], pitch);
        assert_eq!(cells.len(), 16);
        assert!((cells[0].x - (800.0 + pitch * 0.5)).abs() < 1e-4);
        assert!((cells[1].x - cells[0].x - pitch).abs() < 1e-4);
        assert!((cells[4].y - cells[0].y - pitch).abs() < 1e-4);
    }

    #[test]
    fn easy_bottom_row_starts_inside_the_sensor_band() {
        let spec = LevelSpec::easy(&GameConfig::default());
        let pitch = polygon_pitch(TARGET_RADIUS, TARGET_SIDES);
        let cells = stack_cell_centers(&spec.stacks[0], pitch);
        let bottom_edge = cells.last().unwrap().y + pitch * 0.5;
        let sensor = sensor_center(&spec.platforms[0]);
        let band = (sensor.y - SENSOR_HEIGHT * 0.5)..(sensor.y + SENSOR_HEIGHT * 0.5);
        assert!(
            band.contains(&bottom_edge),
            "bottom row edge {bottom_edge} should start inside sensor band {band:?}"
        );
    }

    #[test]
    fn trapezoid_top_is_narrower_than_bottom() {
        let v = trapezoid_vertices(250.0, PLATFORM_HEIGHT, PLATFORM_SLOPE);
        let bottom = v[1].x - v[0].x;
        let top = v[2].x - v[3].x;
        assert!((bottom - 250.0).abs() < 1e-4);
        assert!((top - 250.0 * 0.65).abs() < 1e-3);
    }

    #[test]
    fn polygon_has_flat_bottom() {
        let v = regular_polygon_vertices(20.0, 8);
        let min_y = v.iter().map(|p| p.y).fold(f32::MAX, f32::min);
        let on_bottom = v.iter().filter(|p| (p.y - min_y).abs() < 1e-4).count();
        assert_eq!(on_bottom, 2);
        assert!((-min_y - polygon_pitch(20.0, 8) * 0.5).abs() < 1e-4);
    }

    #[test]
    fn level_names_parse_and_alternate() {
        assert_eq!(LevelId::parse(" Hard "), Some(LevelId::Hard));
        assert_eq!(LevelId::parse("nightmare"), None);
        assert_eq!(LevelId::Easy.other(), LevelId::Hard);
        assert_eq!(LevelId::Hard.other().name(), "easy");
    }
}
