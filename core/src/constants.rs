use crate::types::{AttackKind, Weapon, WeaponProfile, WeaponTable};

// All values are per-frame at 60 Hz unless noted.

// Stage
pub const STAGE_WIDTH: f64 = 800.0;
pub const STAGE_HEIGHT: f64 = 600.0;
pub const GROUND_HEIGHT: f64 = 20.0;

// Physics
pub const GRAVITY: f64 = 0.8;
pub const MAX_FALL_SPEED: f64 = 18.0;
pub const PLAYER_SPEED: f64 = 5.0;
pub const JUMP_VELOCITY: f64 = -15.0;
pub const KNOCKBACK_DECAY: f64 = 0.8;
pub const KNOCKBACK_EPSILON: f64 = 0.1;

// Body
pub const PLAYER_WIDTH: f64 = 30.0;
pub const PLAYER_HEIGHT: f64 = 50.0;

// Platforms
pub const LAND_TOLERANCE: f64 = 5.0;
pub const BONK_TOLERANCE: f64 = 15.0;

// Health / feedback
pub const MAX_HEALTH: i32 = 100;
pub const HURT_FLASH_FRAMES: u32 = 12;
pub const BLOCKED_FLASH_FRAMES: u32 = 6;
/// Minimum gap between hit cues on the same defender (~500 ms).
pub const HIT_CUE_COOLDOWN_TICKS: u32 = 30;

// Arrows
/// Distance in front of the shooter's centre where arrows appear.
pub const ARROW_SPAWN_OFFSET: f64 = 20.0;

// Tick rate
pub const TICK_RATE: u32 = 60;

pub fn weapon_profile(weapon: Weapon) -> WeaponProfile {
    match weapon {
        Weapon::Sword => WeaponProfile {
            damage: 15,
            blocked_damage: 5,
            duration: 20,
            cooldown: 30,
            attack: AttackKind::Melee {
                range: 60.0,
                vertical_tolerance: 40.0,
                knockback: 6.0,
            },
        },
        Weapon::Bow => WeaponProfile {
            damage: 10,
            blocked_damage: 3,
            duration: 20,
            cooldown: 40,
            attack: AttackKind::Projectile {
                speed: 10.0,
                lifetime: 30,
                half_size: 5.0,
            },
        },
        Weapon::Spear => WeaponProfile {
            damage: 12,
            blocked_damage: 4,
            duration: 24,
            cooldown: 36,
            attack: AttackKind::Melee {
                range: 90.0,
                vertical_tolerance: 30.0,
                knockback: 5.0,
            },
        },
        Weapon::Axe => WeaponProfile {
            damage: 22,
            blocked_damage: 8,
            duration: 30,
            cooldown: 45,
            attack: AttackKind::Melee {
                range: 50.0,
                vertical_tolerance: 40.0,
                knockback: 9.0,
            },
        },
    }
}

pub fn standard_weapons() -> WeaponTable {
    WeaponTable {
        sword: weapon_profile(Weapon::Sword),
        bow: weapon_profile(Weapon::Bow),
        spear: weapon_profile(Weapon::Spear),
        axe: weapon_profile(Weapon::Axe),
    }
}
