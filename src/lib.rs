//! Echo Maze - a two-phase maze arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, timers, phases)
//! - `assets`: Sprite sheet and font loading
//! - `render`: Roster-driven macroquad drawing
//!
//! A run has two phases: the player first dodges a storm of drifting text
//! bullets while a 20 second countdown burns down, then navigates the maze
//! the darkness was hiding to reach the goal zone.

pub mod assets;
pub mod render;
pub mod sim;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Playfield dimensions in pixels (also the window size)
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 600.0;

    /// Target simulation cadence
    pub const FRAME_RATE: u32 = 60;
    /// Fixed simulation timestep
    pub const FRAME_DT: f32 = 1.0 / FRAME_RATE as f32;
    /// Maximum substeps per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player sprite and hitbox size (square, centered on position)
    pub const PLAYER_SIZE: f32 = 48.0;
    /// Per-axis velocity cap, units per frame
    pub const MAX_SPEED: f32 = 3.0;
    /// Per-axis acceleration added per held key, units per frame²
    pub const PLAYER_ACCEL: f32 = 0.25;
    /// Linear friction opposing residual motion every frame
    pub const FRICTION: f32 = 0.05;
    /// Velocity magnitude below which an axis snaps to exactly zero
    pub const DEADBAND: f32 = 0.05;

    /// Where the player first appears
    pub const PLAYER_START: Vec2 = Vec2::new(200.0, 200.0);
    /// Where the player is put back on phase change and on wall contact
    pub const RESTART_POINT: Vec2 = Vec2::new(50.0, 50.0);

    /// Length of the dodging phase
    pub const COUNTDOWN_SECS: f32 = 20.0;
    /// Delay before the first bullet
    pub const SPAWN_DELAY_SECS: f32 = 2.0;
    /// Steady bullet cadence after the first
    pub const SPAWN_INTERVAL_SECS: f32 = 0.25;

    /// Bullet speed range, units per frame (uniform)
    pub const BULLET_SPEED_MIN: f32 = 1.5;
    pub const BULLET_SPEED_MAX: f32 = 2.5;
    /// Spawn lanes keep this many pixels clear of the top/bottom edges
    pub const BULLET_LANE_MARGIN: i32 = 20;

    /// Vision radius growth per frame while the reveal plays
    pub const SIGHT_REVEAL_STEP: f32 = 0.02;
    /// Vision lost per bullet hit
    pub const SIGHT_PENALTY: f32 = 0.05;
    /// No penalty is applied below this vision level
    pub const SIGHT_FLOOR: f32 = 0.1;

    /// Sprite sheet frame size in source pixels
    pub const SPRITE_FRAME_PX: f32 = 32.0;
    /// Bullet text point size (built-in font)
    pub const BULLET_FONT_PX: u16 = 12;
    /// Countdown/stopwatch readout point size
    pub const CLOCK_FONT_PX: u16 = 72;
    /// Readout inset from the top-right corner
    pub const CLOCK_PADDING: f32 = 20.0;

    pub const CHARACTER_SHEET_PATH: &str = "assets/character.png";
    pub const CLOCK_FONT_PATH: &str = "assets/clock.ttf";
}

/// Keep only the x component of a vector
#[inline]
pub fn project_x(v: Vec2) -> Vec2 {
    Vec2::new(v.x, 0.0)
}

/// Keep only the y component of a vector
#[inline]
pub fn project_y(v: Vec2) -> Vec2 {
    Vec2::new(0.0, v.y)
}
