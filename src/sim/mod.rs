//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies (text bounds are handed in by
//!   the host, the sim never measures text itself)

pub mod clock;
pub mod collision;
pub mod entity;
pub mod state;
pub mod tick;

pub use clock::{Periodic, Stopwatch, Timer};
pub use collision::{Collidable, Rect};
pub use entity::{
    AnimationCycle, CycleId, GoalZone, HeldKeys, KeyMovable, Movable, Player, Stance, TextBullet,
    Wall,
};
pub use state::{BULLET_TEXTS, EntityRef, GameEvent, GamePhase, GameState, Roster};
pub use tick::{TickInput, tick};
