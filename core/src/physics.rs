use tracing::trace;

use crate::constants::*;
use crate::types::*;

impl Combatant {
    pub fn feet(&self) -> f64 {
        self.y + PLAYER_HEIGHT
    }

    pub fn left(&self) -> f64 {
        self.x - PLAYER_WIDTH / 2.0
    }

    pub fn right(&self) -> f64 {
        self.x + PLAYER_WIDTH / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + PLAYER_HEIGHT / 2.0
    }

    /// Standing on the ground or on a bench.
    pub fn is_supported(&self) -> bool {
        !matches!(self.support, Support::Airborne)
    }
}

impl Platform {
    /// Horizontal span test against a body centre.
    pub fn spans(&self, x: f64) -> bool {
        self.x <= x && x <= self.x + self.width
    }

    pub fn underside(&self) -> f64 {
        self.y + self.height
    }
}

impl Stage {
    pub fn platform(&self, id: PlatformId) -> Option<&Platform> {
        self.platforms.get(id)
    }

    /// Clamp a body centre so the whole body stays on stage.
    pub fn clamp_x(&self, x: f64) -> f64 {
        x.clamp(PLAYER_WIDTH / 2.0, self.width - PLAYER_WIDTH / 2.0)
    }
}

/// Jump is edge-triggered and needs something to push off from.
pub fn wants_jump(p: &Combatant, input: &PlayerInput, prev_input: &PlayerInput) -> bool {
    input.pressed(prev_input, button::JUMP) && p.is_supported()
}

/// Set vx from held keys, start a jump, raise or drop the guard, update facing.
pub fn apply_player_input(
    p: &Combatant,
    input: &PlayerInput,
    prev_input: &PlayerInput,
    policy: ReleasePolicy,
) -> Combatant {
    let defending = input.held(button::DEFEND);

    let mut dir = 0.0;
    if input.held(button::LEFT) {
        dir -= 1.0;
    }
    if input.held(button::RIGHT) {
        dir += 1.0;
    }

    let mut vx = p.vx;
    let mut facing = p.facing;
    if defending {
        vx = 0.0;
    } else if dir != 0.0 {
        vx = dir * PLAYER_SPEED;
        facing = if dir > 0.0 { Facing::Right } else { Facing::Left };
    } else if policy == ReleasePolicy::Stop {
        vx = 0.0;
    }

    let mut vy = p.vy;
    let mut support = p.support;
    if wants_jump(p, input, prev_input) {
        vy = JUMP_VELOCITY;
        support = Support::Airborne;
    }

    Combatant {
        vx,
        vy,
        facing,
        support,
        defending,
        ..*p
    }
}

/// Accumulate gravity while airborne, capped at MAX_FALL_SPEED.
pub fn apply_gravity(p: &Combatant) -> Combatant {
    if p.is_supported() {
        return *p;
    }
    let vy = (p.vy + GRAVITY).min(MAX_FALL_SPEED);
    Combatant { vy, ..*p }
}

/// Semi-implicit Euler step: position from the already-updated velocity,
/// plus the decaying knockback term, then clamp to the stage.
pub fn integrate(p: &Combatant, stage: &Stage) -> Combatant {
    let x = stage.clamp_x(p.x + p.vx + p.knockback_vx);
    let y = p.y + p.vy;

    let mut knockback_vx = p.knockback_vx * KNOCKBACK_DECAY;
    if knockback_vx.abs() < KNOCKBACK_EPSILON {
        knockback_vx = 0.0;
    }

    Combatant {
        x,
        y,
        knockback_vx,
        ..*p
    }
}

/// Resolve ground and bench contact after integration.
///
/// Benches are solid: a rising body bonks on the underside, a falling one
/// lands on top. Both tests are swept over this frame's vertical motion.
/// The first qualifying bench in list order wins.
pub fn resolve_platforms(p: &Combatant, stage: &Stage) -> Combatant {
    let mut body = *p;

    // Walked off the bench we were standing on
    if let Support::Platform(id) = body.support {
        let still_on = stage.platform(id).is_some_and(|plat| plat.spans(body.x));
        if !still_on {
            trace!(player = body.id, platform = id, "left platform");
            body.support = Support::Airborne;
        }
    }

    if body.feet() >= stage.ground_y {
        body.y = stage.ground_y - PLAYER_HEIGHT;
        body.vy = 0.0;
        body.support = Support::Ground;
        return body;
    }

    if body.support == Support::Ground {
        // Feet above the ground line without a jump: nothing holds us now
        body.support = Support::Airborne;
    }

    if let Support::Platform(id) = body.support {
        if let Some(plat) = stage.platform(id) {
            body.y = plat.y - PLAYER_HEIGHT;
            body.vy = 0.0;
        }
        return body;
    }

    for (id, plat) in stage.platforms.iter().enumerate() {
        if !plat.spans(body.x) {
            continue;
        }

        let feet = body.feet();
        let prev_feet = feet - body.vy;
        if body.vy >= 0.0 && feet >= plat.y - LAND_TOLERANCE && prev_feet <= plat.y + LAND_TOLERANCE {
            trace!(player = body.id, platform = id, "landed");
            body.y = plat.y - PLAYER_HEIGHT;
            body.vy = 0.0;
            body.support = Support::Platform(id);
            break;
        }

        let head = body.y;
        let prev_head = head - body.vy;
        if body.vy < 0.0 && prev_head >= plat.underside() && head <= plat.underside() + BONK_TOLERANCE {
            trace!(player = body.id, platform = id, "bonk");
            // Only push back a head that got through; never lift the body
            body.y = body.y.max(plat.underside());
            body.vy = 0.0;
            break;
        }
    }

    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::{bench_stage, default_config, spawn_combatant};

    fn grounded_player(x: f64) -> Combatant {
        let config = default_config();
        let mut p = spawn_combatant(0, &config.players[0], &config.stage);
        p.x = x;
        p
    }

    fn one_bench_stage() -> Stage {
        Stage {
            width: 800.0,
            height: 600.0,
            ground_y: 580.0,
            platforms: vec![Platform { x: 200.0, y: 450.0, width: 200.0, height: 15.0 }],
        }
    }

    #[test]
    fn input_moves_right() {
        let p = grounded_player(100.0);
        let input = PlayerInput::new(button::RIGHT);
        let result = apply_player_input(&p, &input, &NULL_INPUT, ReleasePolicy::Stop);
        assert_eq!(result.vx, PLAYER_SPEED);
        assert_eq!(result.facing, Facing::Right);
    }

    #[test]
    fn input_moves_left() {
        let p = grounded_player(100.0);
        let input = PlayerInput::new(button::LEFT);
        let result = apply_player_input(&p, &input, &NULL_INPUT, ReleasePolicy::Stop);
        assert_eq!(result.vx, -PLAYER_SPEED);
        assert_eq!(result.facing, Facing::Left);
    }

    #[test]
    fn release_policy_stop_and_retain() {
        let mut p = grounded_player(100.0);
        p.vx = PLAYER_SPEED;
        let stopped = apply_player_input(&p, &NULL_INPUT, &NULL_INPUT, ReleasePolicy::Stop);
        assert_eq!(stopped.vx, 0.0);
        let kept = apply_player_input(&p, &NULL_INPUT, &NULL_INPUT, ReleasePolicy::Retain);
        assert_eq!(kept.vx, PLAYER_SPEED);
    }

    #[test]
    fn defend_freezes_horizontal_motion() {
        let p = grounded_player(100.0);
        let input = PlayerInput::new(button::DEFEND | button::RIGHT);
        let result = apply_player_input(&p, &input, &NULL_INPUT, ReleasePolicy::Retain);
        assert!(result.defending);
        assert_eq!(result.vx, 0.0);
        assert_eq!(result.facing, p.facing);
    }

    #[test]
    fn jump_is_edge_triggered_and_needs_support() {
        let p = grounded_player(100.0);
        let jump = PlayerInput::new(button::JUMP);

        let result = apply_player_input(&p, &jump, &NULL_INPUT, ReleasePolicy::Stop);
        assert_eq!(result.vy, JUMP_VELOCITY);
        assert_eq!(result.support, Support::Airborne);

        // Held since last frame: no new jump
        let held = apply_player_input(&p, &jump, &jump, ReleasePolicy::Stop);
        assert_eq!(held.vy, 0.0);
        assert_eq!(held.support, Support::Ground);

        // Airborne: no double jump
        let mut air = grounded_player(100.0);
        air.support = Support::Airborne;
        let result = apply_player_input(&air, &jump, &NULL_INPUT, ReleasePolicy::Stop);
        assert_eq!(result.vy, 0.0);
    }

    #[test]
    fn gravity_only_while_airborne() {
        let p = grounded_player(100.0);
        assert_eq!(apply_gravity(&p).vy, 0.0);

        let mut air = p;
        air.support = Support::Airborne;
        assert_eq!(apply_gravity(&air).vy, GRAVITY);

        air.vy = MAX_FALL_SPEED;
        assert_eq!(apply_gravity(&air).vy, MAX_FALL_SPEED);
    }

    #[test]
    fn integrate_clamps_to_stage() {
        let stage = bench_stage();
        let mut p = grounded_player(790.0);
        p.vx = PLAYER_SPEED;
        let result = integrate(&p, &stage);
        assert_eq!(result.x, stage.width - PLAYER_WIDTH / 2.0);

        let mut p = grounded_player(16.0);
        p.vx = -PLAYER_SPEED;
        assert_eq!(integrate(&p, &stage).x, PLAYER_WIDTH / 2.0);
    }

    #[test]
    fn knockback_decays_to_zero() {
        let stage = bench_stage();
        let mut p = grounded_player(400.0);
        p.knockback_vx = 6.0;

        let once = integrate(&p, &stage);
        assert_eq!(once.x, 406.0);
        assert!((once.knockback_vx - 4.8).abs() < 1e-9);

        let mut body = once;
        for _ in 0..40 {
            body = integrate(&body, &stage);
        }
        assert_eq!(body.knockback_vx, 0.0);
    }

    #[test]
    fn ground_snaps_feet() {
        let stage = bench_stage();
        let mut p = grounded_player(50.0);
        p.support = Support::Airborne;
        p.y = stage.ground_y - PLAYER_HEIGHT + 7.0;
        p.vy = 7.0;
        let result = resolve_platforms(&p, &stage);
        assert_eq!(result.feet(), stage.ground_y);
        assert_eq!(result.vy, 0.0);
        assert_eq!(result.support, Support::Ground);
    }

    #[test]
    fn lands_when_falling_onto_bench() {
        let stage = one_bench_stage();
        let mut p = grounded_player(300.0);
        p.support = Support::Airborne;
        p.vy = 3.0;
        p.y = 450.0 - PLAYER_HEIGHT + 2.0;
        let result = resolve_platforms(&p, &stage);
        assert_eq!(result.support, Support::Platform(0));
        assert_eq!(result.feet(), 450.0);
        assert_eq!(result.vy, 0.0);
    }

    #[test]
    fn fast_fall_cannot_skip_bench() {
        let stage = one_bench_stage();
        let mut p = grounded_player(300.0);
        p.support = Support::Airborne;
        p.vy = MAX_FALL_SPEED;
        // Feet were 2px above the top last frame, now 16px below it
        p.y = 450.0 - PLAYER_HEIGHT + MAX_FALL_SPEED - 2.0;
        let result = resolve_platforms(&p, &stage);
        assert_eq!(result.support, Support::Platform(0));
    }

    #[test]
    fn no_landing_while_rising() {
        let stage = one_bench_stage();
        let mut p = grounded_player(300.0);
        p.support = Support::Airborne;
        p.vy = -4.0;
        p.y = 450.0 - PLAYER_HEIGHT + 1.0;
        let result = resolve_platforms(&p, &stage);
        assert_eq!(result.support, Support::Airborne);
        assert_eq!(result.vy, -4.0);
    }

    #[test]
    fn rising_into_underside_bonks() {
        let stage = one_bench_stage();
        let mut p = grounded_player(300.0);
        p.support = Support::Airborne;
        p.vy = -10.0;
        // Head was 4px under the underside, now 6px past it
        p.y = 465.0 - 6.0;
        let result = resolve_platforms(&p, &stage);
        assert_eq!(result.vy, 0.0);
        assert_eq!(result.y, 465.0);
        assert_eq!(result.support, Support::Airborne);
    }

    #[test]
    fn bonk_below_underside_only_stops_rising() {
        let stage = one_bench_stage();
        let mut p = grounded_player(300.0);
        p.support = Support::Airborne;
        p.vy = -12.0;
        // Head still 12px under the underside
        p.y = 477.0;
        let result = resolve_platforms(&p, &stage);
        assert_eq!(result.vy, 0.0);
        assert_eq!(result.y, 477.0);
        assert_eq!(result.support, Support::Airborne);
    }

    #[test]
    fn walking_off_bench_starts_falling() {
        let stage = one_bench_stage();
        let mut p = grounded_player(395.0);
        p.y = 450.0 - PLAYER_HEIGHT;
        p.support = Support::Platform(0);
        p.vx = PLAYER_SPEED;
        let moved = integrate(&p, &stage);
        assert_eq!(moved.x, 400.0);
        assert_eq!(resolve_platforms(&moved, &stage).support, Support::Platform(0));

        let moved = integrate(&moved, &stage);
        let result = resolve_platforms(&moved, &stage);
        assert_eq!(result.support, Support::Airborne);
        assert!(apply_gravity(&result).vy > 0.0);
    }

    #[test]
    fn first_overlapping_bench_claims_landing() {
        let stage = Stage {
            width: 800.0,
            height: 600.0,
            ground_y: 580.0,
            platforms: vec![
                Platform { x: 100.0, y: 400.0, width: 200.0, height: 15.0 },
                Platform { x: 150.0, y: 402.0, width: 200.0, height: 15.0 },
            ],
        };
        let mut p = grounded_player(200.0);
        p.support = Support::Airborne;
        p.vy = 4.0;
        p.y = 401.0 - PLAYER_HEIGHT;
        let result = resolve_platforms(&p, &stage);
        assert_eq!(result.support, Support::Platform(0));
        assert_eq!(result.feet(), 400.0);
    }
}
