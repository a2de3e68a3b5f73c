//! Centralised gameplay and layout constants.
//!
//! All tuneable values live here so they can be found and modified in one
//! place.  [`crate::config::GameConfig`] mirrors the runtime-tunable subset and
//! uses these as its defaults.
//!
//! ## Coordinate convention
//!
//! Level layouts are authored in a fixed 1200 × 680 screen layout with **y
//! pointing down** (top-left origin).  [`crate::level::layout_to_world`] maps
//! them into Bevy world space.  Horizontal distances are identical in both.

// ── Layout ────────────────────────────────────────────────────────────────────

/// Width of the authored level layout (and of the game window).
pub const LAYOUT_WIDTH: f32 = 1200.0;

/// Height of the authored level layout (and of the game window).
pub const LAYOUT_HEIGHT: f32 = 680.0;

/// Rapier length scale.  Keeps contact tolerances sane for pixel-sized bodies.
pub const PIXELS_PER_METER: f32 = 100.0;

// ── World ─────────────────────────────────────────────────────────────────────

/// Downward gravitational acceleration (px/s²).
pub const GRAVITY: f32 = 980.0;

// ── Sling ─────────────────────────────────────────────────────────────────────

/// Sling anchor in layout coordinates (both levels).
pub const SLING_ORIGIN_X: f32 = 300.0;
pub const SLING_ORIGIN_Y: f32 = 500.0;

/// Stiffness of the sling's spring joint (1/s²): acceleration per unit of
/// stretch, independent of projectile mass.
///
/// 54 ≈ a 1.5 % per-step positional pull at 60 Hz.  Higher values launch
/// harder and re-arm faster; above ~150 the projectile snaps through the
/// origin too fast to register the return.
pub const SLING_STIFFNESS: f32 = 54.0;

/// Damping of the sling's spring joint (1/s).  Zero: the band itself does not
/// bleed energy; [`SLING_DAMPING`] on the body settles an un-fired projectile.
pub const SLING_JOINT_DAMPING: f32 = 0.0;

/// Linear damping on projectiles so an un-fired projectile settles on the sling.
pub const SLING_DAMPING: f32 = 0.6;

/// A firing projectile counts as "back at the origin" within this distance on
/// each axis (strict less-than).
pub const RESPAWN_TOLERANCE: f32 = 20.0;

/// Projectile radius in the easy level.
pub const EASY_PROJECTILE_RADIUS: f32 = 20.0;

/// Projectile radius in the hard level.
pub const HARD_PROJECTILE_RADIUS: f32 = 15.0;

/// Restitution of projectiles.
pub const PROJECTILE_RESTITUTION: f32 = 0.2;

/// Launch attempts available in the hard level.
pub const MAX_TRIES: u32 = 10;

// ── Pointer ───────────────────────────────────────────────────────────────────

/// Velocity gain (1/s) pulling a grabbed body toward the cursor.
pub const DRAG_GAIN: f32 = 14.0;

/// Extra slack added to a body's radius when testing whether a click grabs it.
pub const GRAB_SLACK: f32 = 6.0;

// ── Platforms ─────────────────────────────────────────────────────────────────

/// Height of every platform trapezoid.
pub const PLATFORM_HEIGHT: f32 = 25.0;

/// Trapezoid slope: the top edge is `(1 - slope) × width` wide.
pub const PLATFORM_SLOPE: f32 = 0.35;

/// Corner rounding of the platform collider.  Stacks tip over the rounded
/// saucer rim instead of catching on a sharp corner.
pub const PLATFORM_CHAMFER: f32 = 6.0;

/// Height of the trigger region above each platform.
pub const SENSOR_HEIGHT: f32 = 12.0;

/// Distance from the platform's top edge up to the sensor's centre line.
pub const SENSOR_GAP: f32 = 6.0;

/// Horizontal path of the motorized platform in the hard level (layout x).
pub const PLATFORM_MIN_X: f32 = 600.0;
pub const PLATFORM_MAX_X: f32 = 870.0;

/// Horizontal platform speed (layout units per step).
pub const PLATFORM_SPEED: f32 = 2.2;

// ── Targets ───────────────────────────────────────────────────────────────────

/// Circumradius of each target polygon.
pub const TARGET_RADIUS: f32 = 20.0;

/// Number of sides on each target polygon.
pub const TARGET_SIDES: usize = 8;

/// Friction coefficient on targets; stacks topple instead of sliding apart.
pub const TARGET_FRICTION: f32 = 0.6;

/// Lock target rotation so stacks only slide and never roll.
pub const FREEZE_TARGET_ROTATION: bool = false;
