use tracing::debug;

use crate::combat::{apply_hit, HitReport};
use crate::constants::*;
use crate::types::*;

/// Loose an arrow from the shooter's bow toward a fixed target point.
///
/// The target is a snapshot taken at release; arrows fly straight and
/// never home. Returns `None` for melee profiles.
pub fn spawn_arrow(
    shooter: &Combatant,
    target_x: f64,
    target_y: f64,
    profile: &WeaponProfile,
    id: u32,
) -> Option<Arrow> {
    let AttackKind::Projectile {
        speed, lifetime, ..
    } = profile.attack
    else {
        return None;
    };

    let x = shooter.x + shooter.facing.sign() * ARROW_SPAWN_OFFSET;
    let y = shooter.center_y();

    let dx = target_x - x;
    let dy = target_y - y;
    let len = (dx * dx + dy * dy).sqrt();
    let (nx, ny) = if len < 0.001 {
        (shooter.facing.sign(), 0.0)
    } else {
        (dx / len, dy / len)
    };

    debug!(player = shooter.id, arrow = id, target_x, target_y, "arrow released");
    Some(Arrow {
        id,
        owner: shooter.id,
        x,
        y,
        vx: nx * speed,
        vy: ny * speed,
        lifetime,
        weapon: shooter.weapon,
        consumed: false,
    })
}

/// Move an arrow and decrement its lifetime.
pub fn move_arrow(arrow: &Arrow) -> Arrow {
    Arrow {
        x: arrow.x + arrow.vx,
        y: arrow.y + arrow.vy,
        lifetime: arrow.lifetime - 1,
        ..*arrow
    }
}

/// Arrows leave play once past either side of the stage.
pub fn is_out_of_bounds(arrow: &Arrow, stage: &Stage) -> bool {
    arrow.x < 0.0 || arrow.x > stage.width
}

fn overlaps_body(arrow: &Arrow, half_size: f64, p: &Combatant) -> bool {
    arrow.x - half_size < p.right()
        && arrow.x + half_size > p.left()
        && arrow.y - half_size < p.feet()
        && arrow.y + half_size > p.y
}

pub struct ArrowHitResult {
    pub remaining: Vec<Arrow>,
    pub players: [Combatant; 2],
    pub hits: Vec<HitReport>,
}

/// Resolve arrow-combatant collisions.
/// - Skip the arrow's owner
/// - Skip consumed arrows
/// - A connecting arrow deals its weapon's damage once and is removed
pub fn resolve_arrow_hits(
    arrows: &[Arrow],
    players: &[Combatant; 2],
    weapons: &WeaponTable,
    tick: Tick,
    stage: &Stage,
) -> ArrowHitResult {
    let mut players = *players;
    let mut remaining = Vec::with_capacity(arrows.len());
    let mut hits = Vec::new();

    for arrow in arrows {
        if arrow.consumed {
            continue;
        }
        let profile = weapons.get(arrow.weapon);
        let AttackKind::Projectile { half_size, .. } = profile.attack else {
            continue;
        };

        let mut arrow = *arrow;
        for p in players.iter_mut() {
            if p.id == arrow.owner || !overlaps_body(&arrow, half_size, p) {
                continue;
            }
            let (hit, report) = apply_hit(p, profile, None, tick, stage);
            *p = hit;
            hits.push(report);
            arrow.consumed = true;
            debug!(arrow = arrow.id, owner = arrow.owner, victim = p.id, "arrow hit");
            break;
        }

        if !arrow.consumed {
            remaining.push(arrow);
        }
    }

    ArrowHitResult {
        remaining,
        players,
        hits,
    }
}
