#![allow(clippy::needless_range_loop)] // Index loops pair each combatant with its opponent

use tracing::{debug, info};

use crate::combat::apply_hit;
use crate::physics::*;
use crate::projectiles::*;
use crate::referee;
use crate::types::*;
use crate::weapons::{advance_attack, in_melee_reach, start_attack, AttackTrigger};

/// Advance the match by one frame.
///
/// Sub-step order:
///  0. Early return if match_over
///  1. Tick hurt-flash timers
///  2. Apply player input (movement/jump/guard/facing)
///  3. Apply gravity
///  4. Integrate position + knockback, clamp to stage
///  5. Resolve ground and bench contact
///  6. Start attacks on fresh presses
///  7. Advance attack state machines (melee hit-scan or arrow release)
///  8. Move arrows, remove expired/out-of-bounds
///  9. Arrow-combatant collision
///  10. Referee check
///  11. Advance tick
pub fn step(
    prev: &GameState,
    inputs: &[PlayerInput; 2],
    prev_inputs: &[PlayerInput; 2],
    config: &MatchConfig,
) -> GameState {
    // 0. Nothing moves once the referee has called it
    if prev.match_over {
        return GameState {
            cues: Vec::new(),
            ..prev.clone()
        };
    }

    let stage = &config.stage;
    let tick = prev.tick + 1;
    let mut cues = Vec::new();
    let mut next_arrow_id = prev.next_arrow_id;

    // 1. Tick hurt flash
    let mut players = prev.players.map(|p| Combatant {
        hurt_flash: p.hurt_flash.saturating_sub(1),
        ..p
    });

    // 2. Apply player input
    for i in 0..players.len() {
        let (input, prev_input) = (&inputs[i], &prev_inputs[i]);
        if wants_jump(&players[i], input, prev_input) {
            cues.push(Cue::Jump(i));
        }
        players[i] = apply_player_input(&players[i], input, prev_input, config.release_policy);
    }

    // 3-5. Gravity, integrate, platform contact
    players = players.map(|p| resolve_platforms(&integrate(&apply_gravity(&p), stage), stage));

    // 6. Start attacks; presses during a swing or cooldown are dropped
    for i in 0..players.len() {
        if inputs[i].pressed(&prev_inputs[i], button::ATTACK) {
            if let Some(started) = start_attack(&players[i]) {
                players[i] = started;
                cues.push(Cue::Swing(i, started.weapon));
            }
        }
    }

    // 7. Advance attacks
    let mut new_arrows = Vec::new();
    for i in 0..players.len() {
        let j = 1 - i;
        let profile = config.weapons.get(players[i].weapon);
        let (next, trigger) = advance_attack(&players[i], profile, config.hit_timing);
        players[i] = next;

        match trigger {
            Some(AttackTrigger::Strike) => {
                if in_melee_reach(&players[i], &players[j], profile) {
                    let (hit, report) = apply_hit(&players[j], profile, Some(players[i].facing), tick, stage);
                    players[j] = hit;
                    cues.extend(report.cue);
                } else {
                    debug!(player = i, "swing missed");
                }
            }
            Some(AttackTrigger::Release) => {
                let target = &players[j];
                if let Some(arrow) = spawn_arrow(&players[i], target.x, target.center_y(), profile, next_arrow_id) {
                    next_arrow_id += 1;
                    new_arrows.push(arrow);
                }
            }
            None => {}
        }
    }

    // 8. Move arrows, remove expired and out-of-bounds
    let arrows: Vec<Arrow> = prev
        .arrows
        .iter()
        .map(move_arrow)
        .chain(new_arrows)
        .filter(|arrow| {
            let live = arrow.lifetime > 0 && !is_out_of_bounds(arrow, stage);
            if !live {
                debug!(arrow = arrow.id, owner = arrow.owner, "arrow expired");
            }
            live
        })
        .collect();

    // 9. Arrow-combatant collision
    let hit_result = resolve_arrow_hits(&arrows, &players, &config.weapons, tick, stage);
    players = hit_result.players;
    cues.extend(hit_result.hits.iter().filter_map(|hit| hit.cue));

    // 10. Referee
    let match_over = referee::is_terminal(&players);
    let winner = referee::winner(&players);
    if match_over {
        info!(
            tick,
            winner = ?winner,
            health0 = players[0].health,
            health1 = players[1].health,
            "match over"
        );
    }

    // 11. Advance tick
    GameState {
        tick,
        players,
        arrows: hit_result.remaining,
        next_arrow_id,
        match_over,
        winner,
        cues,
    }
}
