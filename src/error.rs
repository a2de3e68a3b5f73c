//! Game-specific error types.
//!
//! Level construction and configuration loading propagate errors through
//! these types instead of panicking.  A rejected level is logged and left
//! unspawned; a rejected config falls back to the compiled defaults.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::error::{GameError, GameResult};
//!
//! fn build_platform(points: &[Vec2]) -> GameResult<Collider> {
//!     Collider::convex_hull(points).ok_or(GameError::DegenerateShape {
//!         label: "platform",
//!         vertex_count: points.len(),
//!     })
//! }
//! ```

use std::fmt;

/// Top-level error enum for the slingshot game.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// A convex collider could not be built from the given points.
    DegenerateShape {
        /// Which kind of body was being built (for logging).
        label: &'static str,
        /// Number of input points passed to the hull builder.
        vertex_count: usize,
    },

    /// A level description is internally inconsistent.
    InvalidLevel {
        /// Level name (for logging).
        level: &'static str,
        /// Human-readable description of the problem.
        reason: String,
    },

    /// A tunable is outside its safe operating range.
    UnsafeConstant {
        /// Name of the constant (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },

    /// The config file is not valid TOML or has a mistyped key.
    ConfigParse {
        /// Parser message, including the offending line.
        reason: String,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::DegenerateShape {
                label,
                vertex_count,
            } => write!(
                f,
                "could not build a convex {} collider from {} points",
                label, vertex_count
            ),
            GameError::InvalidLevel { level, reason } => {
                write!(f, "level '{}' is invalid: {}", level, reason)
            }
            GameError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
            GameError::ConfigParse { reason } => write!(f, "config could not be parsed: {}", reason),
        }
    }
}

impl std::error::Error for GameError {}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is finite and strictly positive.
pub fn validate_positive(name: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GameError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error if the respawn tolerance is not in `(0, 200]`.
///
/// Beyond ~200 the projectile "returns" while still being dragged back.
pub fn validate_respawn_tolerance(value: f32) -> GameResult<()> {
    if !value.is_finite() || value <= 0.0 || value > 200.0 {
        Err(GameError::UnsafeConstant {
            name: "RESPAWN_TOLERANCE",
            value,
            safe_range: "(0.0, 200.0]",
        })
    } else {
        Ok(())
    }
}

/// Returns an error unless `value` is finite and `>= 0`.
pub fn validate_non_negative(name: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GameError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, ∞)",
        })
    }
}

/// Returns an error unless `min_x < max_x`.
pub fn validate_motion_bounds(level: &'static str, min_x: f32, max_x: f32) -> GameResult<()> {
    if min_x < max_x {
        Ok(())
    } else {
        Err(GameError::InvalidLevel {
            level,
            reason: format!("motion bounds [{min_x}, {max_x}] are empty"),
        })
    }
}
