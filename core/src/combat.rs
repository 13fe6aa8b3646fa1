use tracing::debug;

use crate::constants::*;
use crate::types::*;

/// What a single landed hit did, for the driver's bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitReport {
    pub damage: i32,
    pub blocked: bool,
    /// Sound cue, unless the defender was hit too recently.
    pub cue: Option<Cue>,
}

/// Apply one hit from `profile` to `defender`.
///
/// Guarding swaps in the profile's reduced damage and shortens the flash.
/// Melee hits shove the defender along `shove`; arrow hits pass `None`.
/// Damage always lands, only the cue is throttled.
pub fn apply_hit(
    defender: &Combatant,
    profile: &WeaponProfile,
    shove: Option<Facing>,
    tick: Tick,
    stage: &Stage,
) -> (Combatant, HitReport) {
    let blocked = defender.defending;
    let damage = profile.damage_against(blocked);
    let health = (defender.health - damage).max(0);

    let mut knockback_vx = defender.knockback_vx;
    if let (AttackKind::Melee { knockback, .. }, Some(direction)) = (profile.attack, shove) {
        knockback_vx = knockback * direction.sign();
    }

    let hurt_flash = if blocked {
        BLOCKED_FLASH_FRAMES
    } else {
        HURT_FLASH_FRAMES
    };

    let cue_ready = defender
        .last_hit_cue
        .map_or(true, |last| tick.saturating_sub(last) > HIT_CUE_COOLDOWN_TICKS);
    let (cue, last_hit_cue) = if cue_ready {
        let cue = if blocked {
            Cue::Block(defender.id)
        } else {
            Cue::Hit(defender.id)
        };
        (Some(cue), Some(tick))
    } else {
        (None, defender.last_hit_cue)
    };

    debug!(
        player = defender.id,
        damage,
        blocked,
        health,
        "hit landed"
    );

    let hit = Combatant {
        health,
        knockback_vx,
        x: stage.clamp_x(defender.x),
        hurt_flash,
        last_hit_cue,
        ..*defender
    };
    (
        hit,
        HitReport {
            damage,
            blocked,
            cue,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::{bench_stage, default_config, spawn_combatant};

    fn defender() -> Combatant {
        let config = default_config();
        spawn_combatant(1, &config.players[1], &config.stage)
    }

    #[test]
    fn full_hit_damages_and_shoves() {
        let stage = bench_stage();
        let sword = weapon_profile(Weapon::Sword);
        let (hit, report) = apply_hit(&defender(), &sword, Some(Facing::Right), 100, &stage);
        assert_eq!(hit.health, MAX_HEALTH - 15);
        assert_eq!(report.damage, 15);
        assert!(!report.blocked);
        assert!(hit.knockback_vx > 0.0);
        assert_eq!(hit.hurt_flash, HURT_FLASH_FRAMES);
        assert_eq!(report.cue, Some(Cue::Hit(1)));
        assert_eq!(hit.last_hit_cue, Some(100));
    }

    #[test]
    fn guard_reduces_damage() {
        let stage = bench_stage();
        for weapon in Weapon::ALL {
            let profile = weapon_profile(weapon);
            let open = apply_hit(&defender(), &profile, Some(Facing::Left), 0, &stage).0;
            let mut guarded = defender();
            guarded.defending = true;
            let (blocked, report) = apply_hit(&guarded, &profile, Some(Facing::Left), 0, &stage);
            assert!(blocked.health > open.health, "{weapon:?}");
            assert!(report.blocked);
            assert_eq!(report.cue, Some(Cue::Block(1)));
            assert_eq!(blocked.hurt_flash, BLOCKED_FLASH_FRAMES);
        }
    }

    #[test]
    fn health_floors_at_zero() {
        let stage = bench_stage();
        let mut low = defender();
        low.health = 4;
        let (hit, _) = apply_hit(&low, &weapon_profile(Weapon::Axe), Some(Facing::Right), 0, &stage);
        assert_eq!(hit.health, 0);
    }

    #[test]
    fn arrows_do_not_shove() {
        let stage = bench_stage();
        let bow = weapon_profile(Weapon::Bow);
        let (hit, _) = apply_hit(&defender(), &bow, None, 0, &stage);
        assert_eq!(hit.knockback_vx, 0.0);
        assert_eq!(hit.health, MAX_HEALTH - 10);

        // A melee profile without a shove direction leaves knockback alone
        let (hit, _) = apply_hit(&defender(), &weapon_profile(Weapon::Sword), None, 0, &stage);
        assert_eq!(hit.knockback_vx, 0.0);
    }

    #[test]
    fn hit_cue_is_throttled_but_damage_is_not() {
        let stage = bench_stage();
        let sword = weapon_profile(Weapon::Sword);
        let (first, r1) = apply_hit(&defender(), &sword, Some(Facing::Right), 10, &stage);
        let (second, r2) = apply_hit(&first, &sword, Some(Facing::Right), 25, &stage);
        assert!(r1.cue.is_some());
        assert_eq!(r2.cue, None);
        assert_eq!(second.health, MAX_HEALTH - 30);
        assert_eq!(second.last_hit_cue, Some(10));

        let (_, r3) = apply_hit(&second, &sword, Some(Facing::Right), 10 + HIT_CUE_COOLDOWN_TICKS + 1, &stage);
        assert!(r3.cue.is_some());
    }
}
