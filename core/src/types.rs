use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

// ── Primitives ──────────────────────────────────────────────

/// Index of a combatant in the match, 0 or 1.
pub type PlayerId = usize;
/// Index into `Stage::platforms`.
pub type PlatformId = usize;
pub type Tick = u32;

// ── Input ───────────────────────────────────────────────────

/// Button bitmask constants.
pub mod button {
    pub const LEFT: u8 = 1;
    pub const RIGHT: u8 = 2;
    pub const JUMP: u8 = 4;
    pub const ATTACK: u8 = 8;
    pub const DEFEND: u8 = 16;
}

/// Snapshot of the buttons one player holds during a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub buttons: u8,
}

impl PlayerInput {
    pub const fn new(buttons: u8) -> Self {
        Self { buttons }
    }

    pub fn held(&self, b: u8) -> bool {
        self.buttons & b != 0
    }

    /// True when `b` is held now but was not held on the previous frame.
    pub fn pressed(&self, prev: &PlayerInput, b: u8) -> bool {
        self.held(b) && !prev.held(b)
    }
}

pub const NULL_INPUT: PlayerInput = PlayerInput { buttons: 0 };

// ── Weapons ────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weapon {
    Sword,
    Bow,
    Spear,
    Axe,
}

impl Weapon {
    pub const ALL: [Weapon; 4] = [Weapon::Sword, Weapon::Bow, Weapon::Spear, Weapon::Axe];
}

/// How an attack delivers its damage.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttackKind {
    /// Single hit-scan in front of the attacker.
    Melee {
        range: f64,
        vertical_tolerance: f64,
        knockback: f64,
    },
    /// Spawns an arrow; damage is applied when it connects.
    Projectile {
        speed: f64,
        lifetime: i32,
        half_size: f64,
    },
}

/// Immutable per-weapon constants. Validated on construction and on deserialization.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWeaponProfile")]
pub struct WeaponProfile {
    pub damage: i32,
    /// Damage dealt to a defending target.
    pub blocked_damage: i32,
    /// Attack animation length in frames.
    pub duration: u32,
    /// Frames before the next attack may start, counted from the end of the animation.
    pub cooldown: u32,
    pub attack: AttackKind,
}

/// Unchecked wire form of [`WeaponProfile`]. Signed so bad values reach validation.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct RawWeaponProfile {
    pub damage: i32,
    pub blocked_damage: i32,
    pub duration: i32,
    pub cooldown: i32,
    pub attack: AttackKind,
}

impl TryFrom<RawWeaponProfile> for WeaponProfile {
    type Error = ProfileError;

    fn try_from(raw: RawWeaponProfile) -> Result<Self, Self::Error> {
        WeaponProfile::new(raw)
    }
}

/// One profile per weapon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeaponTable {
    pub sword: WeaponProfile,
    pub bow: WeaponProfile,
    pub spear: WeaponProfile,
    pub axe: WeaponProfile,
}

// ── Combatant ───────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn sign(self) -> f64 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// What currently holds a combatant up. Exactly one applies at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Support {
    Ground,
    /// Standing on a bench; a handle into the stage, never an owner.
    Platform(PlatformId),
    Airborne,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackState {
    #[default]
    Idle,
    Attacking {
        frame: u32,
        /// Set once the hit-scan or arrow release for this swing has happened.
        resolved: bool,
    },
}

impl AttackState {
    /// Animation frame, 0 while idle.
    pub fn progress(&self) -> u32 {
        match self {
            AttackState::Idle => 0,
            AttackState::Attacking { frame, .. } => *frame,
        }
    }
}

/// Per-frame fighter state. The display name lives in `PlayerSetup::name`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: PlayerId,
    /// Horizontal centre of the body.
    pub x: f64,
    /// Top of the body; y grows downward.
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Decaying shove from hits, added on top of `vx`.
    pub knockback_vx: f64,
    pub facing: Facing,
    pub health: i32,
    pub weapon: Weapon,
    pub support: Support,
    pub attack: AttackState,
    pub cooldown: u32,
    pub defending: bool,
    /// Frames of hurt flash left for the renderer.
    pub hurt_flash: u32,
    /// Tick of the last hit that produced a sound cue.
    pub last_hit_cue: Option<Tick>,
}

// ── Projectile ──────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub id: u32,
    pub owner: PlayerId,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub lifetime: i32,
    pub weapon: Weapon,
    pub consumed: bool,
}

// ── Map ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub width: f64,
    pub height: f64,
    /// Feet rest on this line when grounded.
    pub ground_y: f64,
    pub platforms: Vec<Platform>,
}

// ── Output cues ─────────────────────────────────────────────

/// Sound cues raised during a frame, for the audio collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    Jump(PlayerId),
    Swing(PlayerId, Weapon),
    Hit(PlayerId),
    Block(PlayerId),
    Click,
}

// ── Game State ──────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub tick: Tick,
    pub players: [Combatant; 2],
    pub arrows: Vec<Arrow>,
    pub next_arrow_id: u32,
    pub match_over: bool,
    pub winner: Option<PlayerId>,
    /// Cues raised by the frame that produced this state.
    pub cues: Vec<Cue>,
}

// ── Config ──────────────────────────────────────────────────

/// When a melee swing samples its hit, or a bow lets go.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitTiming {
    #[default]
    Midpoint,
    OnStart,
}

/// What happens to horizontal velocity when no direction key is held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleasePolicy {
    #[default]
    Stop,
    Retain,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSetup {
    pub name: String,
    pub weapon: Weapon,
    pub spawn_x: f64,
    pub facing: Facing,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub stage: Stage,
    pub players: [PlayerSetup; 2],
    pub weapons: WeaponTable,
    #[serde(default)]
    pub hit_timing: HitTiming,
    #[serde(default)]
    pub release_policy: ReleasePolicy,
}

// ── Runner I/O ──────────────────────────────────────────────

/// Input to the headless runner.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchTranscript {
    pub config: MatchConfig,
    /// One entry per frame. Each entry is [player0_input, player1_input].
    pub frames: Vec<[PlayerInput; 2]>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub ticks: Tick,
    pub match_over: bool,
    pub winner: Option<PlayerId>,
    pub winner_name: Option<String>,
    pub health: [i32; 2],
}
