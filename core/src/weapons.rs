use tracing::debug;

use crate::error::{ConfigError, ProfileError};
use crate::types::*;

/// What an attack does on its trigger frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackTrigger {
    /// Run the melee hit-scan.
    Strike,
    /// Let an arrow go.
    Release,
}

fn check_profile(
    damage: i32,
    blocked_damage: i32,
    duration: i64,
    cooldown: i64,
    attack: &AttackKind,
) -> Result<(), ProfileError> {
    if duration <= 0 {
        return Err(ProfileError::NonPositiveDuration(duration.clamp(i32::MIN as i64, 0) as i32));
    }
    if cooldown < 0 {
        return Err(ProfileError::NegativeCooldown(cooldown.max(i32::MIN as i64) as i32));
    }
    if damage < 0 {
        return Err(ProfileError::NegativeDamage(damage));
    }
    if blocked_damage < 0 {
        return Err(ProfileError::NegativeDamage(blocked_damage));
    }
    if blocked_damage >= damage {
        return Err(ProfileError::BlockNotReduced {
            damage,
            blocked: blocked_damage,
        });
    }

    let positive = |field: &'static str, value: f64| {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(ProfileError::NotPositive { field, value })
        }
    };
    match *attack {
        AttackKind::Melee {
            range,
            vertical_tolerance,
            knockback,
        } => {
            positive("range", range)?;
            positive("vertical_tolerance", vertical_tolerance)?;
            if !knockback.is_finite() || knockback < 0.0 {
                return Err(ProfileError::InvalidKnockback(knockback));
            }
        }
        AttackKind::Projectile {
            speed,
            lifetime,
            half_size,
        } => {
            positive("speed", speed)?;
            positive("half_size", half_size)?;
            if lifetime <= 0 {
                return Err(ProfileError::NonPositiveLifetime(lifetime));
            }
        }
    }
    Ok(())
}

impl WeaponProfile {
    pub fn new(raw: RawWeaponProfile) -> Result<Self, ProfileError> {
        check_profile(
            raw.damage,
            raw.blocked_damage,
            raw.duration as i64,
            raw.cooldown as i64,
            &raw.attack,
        )?;
        Ok(WeaponProfile {
            damage: raw.damage,
            blocked_damage: raw.blocked_damage,
            duration: raw.duration as u32,
            cooldown: raw.cooldown as u32,
            attack: raw.attack,
        })
    }

    /// Re-check a profile that was built in code rather than loaded.
    pub fn validate(&self) -> Result<(), ProfileError> {
        check_profile(
            self.damage,
            self.blocked_damage,
            self.duration as i64,
            self.cooldown as i64,
            &self.attack,
        )
    }

    /// Frame on which the hit-scan runs or the arrow leaves the bow.
    pub fn trigger_frame(&self, timing: HitTiming) -> u32 {
        match timing {
            HitTiming::Midpoint => (self.duration / 2).max(1),
            HitTiming::OnStart => 1,
        }
    }

    pub fn is_melee(&self) -> bool {
        matches!(self.attack, AttackKind::Melee { .. })
    }

    /// Damage actually dealt, given whether the target is guarding.
    pub fn damage_against(&self, defending: bool) -> i32 {
        if defending {
            self.blocked_damage
        } else {
            self.damage
        }
    }
}

impl WeaponTable {
    pub fn get(&self, weapon: Weapon) -> &WeaponProfile {
        match weapon {
            Weapon::Sword => &self.sword,
            Weapon::Bow => &self.bow,
            Weapon::Spear => &self.spear,
            Weapon::Axe => &self.axe,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for weapon in Weapon::ALL {
            self.get(weapon)
                .validate()
                .map_err(|source| ConfigError::Profile { weapon, source })?;
        }
        Ok(())
    }
}

/// Begin a swing. Returns `None` (input dropped) while a swing is still
/// running or the cooldown has not elapsed.
pub fn start_attack(p: &Combatant) -> Option<Combatant> {
    if p.attack != AttackState::Idle || p.cooldown > 0 {
        return None;
    }
    debug!(player = p.id, weapon = ?p.weapon, "attack started");
    Some(Combatant {
        attack: AttackState::Attacking {
            frame: 0,
            resolved: false,
        },
        ..*p
    })
}

/// Advance one frame of the attack state machine.
///
/// The cooldown ticks down every frame. A running swing fires its trigger
/// exactly once, then returns to idle at `duration` and arms the cooldown.
pub fn advance_attack(
    p: &Combatant,
    profile: &WeaponProfile,
    timing: HitTiming,
) -> (Combatant, Option<AttackTrigger>) {
    let mut next = Combatant {
        cooldown: p.cooldown.saturating_sub(1),
        ..*p
    };

    let AttackState::Attacking { frame, resolved } = p.attack else {
        return (next, None);
    };

    let frame = frame + 1;
    let mut trigger = None;
    let mut resolved = resolved;
    if !resolved && frame >= profile.trigger_frame(timing) {
        resolved = true;
        trigger = Some(if profile.is_melee() {
            AttackTrigger::Strike
        } else {
            AttackTrigger::Release
        });
    }

    if frame >= profile.duration {
        next.attack = AttackState::Idle;
        next.cooldown = profile.cooldown;
    } else {
        next.attack = AttackState::Attacking { frame, resolved };
    }

    (next, trigger)
}

/// Melee hit-scan: target in front, within reach and vertical tolerance.
pub fn in_melee_reach(attacker: &Combatant, defender: &Combatant, profile: &WeaponProfile) -> bool {
    let AttackKind::Melee {
        range,
        vertical_tolerance,
        ..
    } = profile.attack
    else {
        return false;
    };
    let dx = defender.x - attacker.x;
    let dy = defender.y - attacker.y;
    let in_front = dx * attacker.facing.sign() > 0.0;
    in_front && dx.abs() < range && dy.abs() < vertical_tolerance
}
