use thiserror::Error;

use crate::types::Weapon;

/// Rejected weapon profile values. Raised once at load, never per frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("attack duration must be at least one frame, got {0}")]
    NonPositiveDuration(i32),
    #[error("cooldown cannot be negative, got {0}")]
    NegativeCooldown(i32),
    #[error("damage cannot be negative, got {0}")]
    NegativeDamage(i32),
    #[error("blocked damage {blocked} must be below base damage {damage}")]
    BlockNotReduced { damage: i32, blocked: i32 },
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("knockback must be finite and non-negative, got {0}")]
    InvalidKnockback(f64),
    #[error("projectile lifetime must be at least one frame, got {0}")]
    NonPositiveLifetime(i32),
}

/// Errors raised while validating a match configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid {weapon:?} profile: {source}")]
    Profile {
        weapon: Weapon,
        #[source]
        source: ProfileError,
    },
    #[error("stage size must be positive, got {width}x{height}")]
    StageSize { width: f64, height: f64 },
    #[error("ground line {ground_y} lies outside the stage height {height}")]
    GroundOutOfStage { ground_y: f64, height: f64 },
    #[error("platform {index} does not fit inside the stage")]
    PlatformOutOfStage { index: usize },
    #[error("player {player} spawn x {x} lies outside the stage")]
    SpawnOutOfStage { player: usize, x: f64 },
}
