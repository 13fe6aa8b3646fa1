use tracing::debug;

use crate::constants::*;
use crate::error::ConfigError;
use crate::types::*;

/// 800x600 stage with a 20px ground strip and six benches.
pub fn bench_stage() -> Stage {
    Stage {
        width: STAGE_WIDTH,
        height: STAGE_HEIGHT,
        ground_y: STAGE_HEIGHT - GROUND_HEIGHT,
        platforms: vec![
            // Low benches
            Platform { x: 40.0, y: 480.0, width: 120.0, height: 15.0 },
            Platform { x: 640.0, y: 480.0, width: 120.0, height: 15.0 },
            // Middle bench
            Platform { x: 300.0, y: 400.0, width: 200.0, height: 15.0 },
            // High benches
            Platform { x: 160.0, y: 330.0, width: 120.0, height: 15.0 },
            Platform { x: 520.0, y: 330.0, width: 120.0, height: 15.0 },
            // Top bench
            Platform { x: 340.0, y: 250.0, width: 120.0, height: 15.0 },
        ],
    }
}

pub fn player_setup(id: PlayerId, weapon: Weapon) -> PlayerSetup {
    if id == 0 {
        PlayerSetup {
            name: "Player 1".to_string(),
            weapon,
            spawn_x: 200.0,
            facing: Facing::Right,
        }
    } else {
        PlayerSetup {
            name: "Player 2".to_string(),
            weapon,
            spawn_x: 600.0,
            facing: Facing::Left,
        }
    }
}

/// Default match config: bench stage, standard weapons, chosen loadouts.
pub fn match_config(weapons: [Weapon; 2]) -> MatchConfig {
    MatchConfig {
        stage: bench_stage(),
        players: [player_setup(0, weapons[0]), player_setup(1, weapons[1])],
        weapons: standard_weapons(),
        hit_timing: HitTiming::default(),
        release_policy: ReleasePolicy::default(),
    }
}

/// Sword against sword on the bench stage.
pub fn default_config() -> MatchConfig {
    match_config([Weapon::Sword, Weapon::Sword])
}

fn validate_stage(stage: &Stage) -> Result<(), ConfigError> {
    let positive = |v: f64| v.is_finite() && v > 0.0;
    if !positive(stage.width) || !positive(stage.height) {
        return Err(ConfigError::StageSize {
            width: stage.width,
            height: stage.height,
        });
    }
    if !stage.ground_y.is_finite() || stage.ground_y < PLAYER_HEIGHT || stage.ground_y > stage.height {
        return Err(ConfigError::GroundOutOfStage {
            ground_y: stage.ground_y,
            height: stage.height,
        });
    }
    for (index, plat) in stage.platforms.iter().enumerate() {
        let fits = positive(plat.width)
            && positive(plat.height)
            && plat.x >= 0.0
            && plat.y >= 0.0
            && plat.x + plat.width <= stage.width
            && plat.y + plat.height <= stage.ground_y;
        if !fits {
            return Err(ConfigError::PlatformOutOfStage { index });
        }
    }
    Ok(())
}

/// Reject configs that would feed bad numbers into the frame loop.
pub fn validate_config(config: &MatchConfig) -> Result<(), ConfigError> {
    validate_stage(&config.stage)?;
    config.weapons.validate()?;
    for (player, setup) in config.players.iter().enumerate() {
        let x = setup.spawn_x;
        if !x.is_finite() || x < PLAYER_WIDTH / 2.0 || x > config.stage.width - PLAYER_WIDTH / 2.0 {
            return Err(ConfigError::SpawnOutOfStage { player, x });
        }
    }
    Ok(())
}

/// A fresh combatant standing on the ground at its spawn point.
pub fn spawn_combatant(id: PlayerId, setup: &PlayerSetup, stage: &Stage) -> Combatant {
    Combatant {
        id,
        x: setup.spawn_x,
        y: stage.ground_y - PLAYER_HEIGHT,
        vx: 0.0,
        vy: 0.0,
        knockback_vx: 0.0,
        facing: setup.facing,
        health: MAX_HEALTH,
        weapon: setup.weapon,
        support: Support::Ground,
        attack: AttackState::Idle,
        cooldown: 0,
        defending: false,
        hurt_flash: 0,
        last_hit_cue: None,
    }
}

/// Create the initial game state from a match config.
pub fn create_initial_state(config: &MatchConfig) -> GameState {
    debug!(
        p0 = %config.players[0].name,
        w0 = ?config.players[0].weapon,
        p1 = %config.players[1].name,
        w1 = ?config.players[1].weapon,
        "match created"
    );
    GameState {
        tick: 0,
        players: [
            spawn_combatant(0, &config.players[0], &config.stage),
            spawn_combatant(1, &config.players[1], &config.stage),
        ],
        arrows: Vec::new(),
        next_arrow_id: 0,
        match_over: false,
        winner: None,
        cues: Vec::new(),
    }
}
