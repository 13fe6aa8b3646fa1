pub mod combat;
pub mod constants;
pub mod error;
pub mod init;
pub mod physics;
pub mod projectiles;
pub mod referee;
pub mod session;
pub mod step;
pub mod types;
pub mod weapons;

pub use combat::{apply_hit, HitReport};
pub use constants::*;
pub use error::*;
pub use init::*;
pub use physics::{apply_gravity, apply_player_input, integrate, resolve_platforms, wants_jump};
pub use projectiles::{is_out_of_bounds, move_arrow, resolve_arrow_hits, spawn_arrow};
pub use referee::{is_terminal, summarize, winner, TIE_BREAK_WINNER};
pub use session::{Phase, Session};
pub use step::step;
pub use types::*;
pub use weapons::*;
