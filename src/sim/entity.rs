//! Entities and their capabilities
//!
//! The four capabilities are independent traits that each entity implements
//! selectively: walls never move, bullets never read keys. Drawing is the
//! host's concern and lives in `render`.

use glam::Vec2;

use super::clock::Periodic;
use super::collision::{Collidable, Rect};
use crate::consts::*;
use crate::{project_x, project_y};

/// Advances its own position once per frame from internal velocity.
pub trait Movable {
    fn step(&mut self);
}

/// Additionally steers velocity from the keys held this frame.
pub trait KeyMovable {
    fn key_move(&mut self, keys: &HeldKeys);
}

/// Directional keys held at the top of a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// One row of the character sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleId {
    Stand,
    Blink,
    Walk,
    Sprint,
    Crouch,
    Jump,
    Fade,
    Death,
    Attack,
}

impl CycleId {
    /// All cycles, in sheet row order.
    pub const ALL: [CycleId; 9] = [
        CycleId::Stand,
        CycleId::Blink,
        CycleId::Walk,
        CycleId::Sprint,
        CycleId::Crouch,
        CycleId::Jump,
        CycleId::Fade,
        CycleId::Death,
        CycleId::Attack,
    ];

    /// Row index in the sheet.
    pub fn row(self) -> usize {
        match self {
            CycleId::Stand => 0,
            CycleId::Blink => 1,
            CycleId::Walk => 2,
            CycleId::Sprint => 3,
            CycleId::Crouch => 4,
            CycleId::Jump => 5,
            CycleId::Fade => 6,
            CycleId::Death => 7,
            CycleId::Attack => 8,
        }
    }

    /// Frames in this cycle's sheet row.
    pub fn frame_count(self) -> usize {
        match self {
            CycleId::Stand | CycleId::Blink => 2,
            CycleId::Walk => 4,
            CycleId::Sprint | CycleId::Jump | CycleId::Death | CycleId::Attack => 8,
            CycleId::Crouch => 6,
            CycleId::Fade => 3,
        }
    }

    /// Seconds per frame.
    pub fn interval(self) -> f32 {
        match self {
            CycleId::Stand => 1.0,
            _ => 0.1,
        }
    }
}

/// A looping frame sequence advanced by its own interval clock, decoupled
/// from the phase clocks.
#[derive(Debug, Clone)]
pub struct AnimationCycle {
    frames: usize,
    index: usize,
    clock: Periodic,
}

impl AnimationCycle {
    pub fn new(frames: usize, interval: f32) -> Self {
        Self {
            frames,
            index: 0,
            clock: Periodic::new(interval),
        }
    }

    /// Advance by every interval that elapsed this tick, wrapping around.
    pub fn tick(&mut self, dt: f32) {
        let completions = self.clock.tick(dt) as usize;
        if self.frames > 0 {
            self.index = (self.index + completions) % self.frames;
        }
    }

    pub fn frame(&self) -> usize {
        self.index
    }
}

/// Whether the player is visibly in motion, picking the active cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stance {
    Still,
    Moving,
}

/// The player avatar.
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    accel: Vec2,
    /// Vision radius fraction in [0, 1]
    pub sight: f32,
    /// Draw the vision circle bright instead of faint
    pub show_sight: bool,
    /// The 0 -> 1 reveal plays once per life
    sight_playing: bool,
    pub stance: Stance,
    anims: [AnimationCycle; CycleId::ALL.len()],
}

impl Player {
    pub fn new(pos: Vec2, accel: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            accel,
            sight: 0.0,
            show_sight: false,
            sight_playing: true,
            stance: Stance::Still,
            anims: CycleId::ALL.map(|c| AnimationCycle::new(c.frame_count(), c.interval())),
        }
    }

    /// The cycle the current stance selects.
    pub fn active_cycle(&self) -> CycleId {
        match self.stance {
            Stance::Still => CycleId::Stand,
            Stance::Moving => CycleId::Sprint,
        }
    }

    pub fn cycle(&self, id: CycleId) -> &AnimationCycle {
        &self.anims[id.row()]
    }

    /// Tick every owned cycle and play out the one-shot sight reveal.
    pub fn animate(&mut self, dt: f32) {
        for cycle in &mut self.anims {
            cycle.tick(dt);
        }
        if self.sight_playing {
            if self.sight < 1.0 {
                self.sight += SIGHT_REVEAL_STEP;
            } else {
                self.sight = 1.0;
                self.sight_playing = false;
            }
        }
    }

    /// Teleport and stop, for the hard reset on wall contact.
    pub fn reset_to(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
    }
}

impl KeyMovable for Player {
    fn key_move(&mut self, keys: &HeldKeys) {
        // Held keys compose additively, so diagonals accelerate faster than
        // a single axis. Observable gameplay behavior, kept as is.
        if keys.up {
            self.vel -= project_y(self.accel);
        }
        if keys.down {
            self.vel += project_y(self.accel);
        }
        if keys.left {
            self.vel -= project_x(self.accel);
        }
        if keys.right {
            self.vel += project_x(self.accel);
        }

        self.vel.x = self.vel.x.clamp(-MAX_SPEED, MAX_SPEED);
        self.vel.y = self.vel.y.clamp(-MAX_SPEED, MAX_SPEED);

        // Friction opposes residual motion whether or not the key is held.
        if self.vel.x > 0.0 {
            self.vel.x -= FRICTION;
        } else if self.vel.x < 0.0 {
            self.vel.x += FRICTION;
        }
        if self.vel.y > 0.0 {
            self.vel.y -= FRICTION;
        } else if self.vel.y < 0.0 {
            self.vel.y += FRICTION;
        }

        // Deadband: snap creep to an exact stop.
        if self.vel.x.abs() < DEADBAND {
            self.vel.x = 0.0;
        }
        if self.vel.y.abs() < DEADBAND {
            self.vel.y = 0.0;
        }

        self.stance = if self.vel != Vec2::ZERO {
            Stance::Moving
        } else {
            Stance::Still
        };
    }
}

impl Movable for Player {
    fn step(&mut self) {
        self.pos += self.vel;
        // Keep the whole hitbox inside the playfield.
        let half = PLAYER_SIZE / 2.0;
        self.pos.x = self.pos.x.clamp(half, GAME_WIDTH - half);
        self.pos.y = self.pos.y.clamp(half, GAME_HEIGHT - half);
    }
}

impl Collidable for Player {
    fn hitbox(&self) -> Rect {
        Rect::centered(self.pos, Vec2::splat(PLAYER_SIZE))
    }
}

/// A line of text drifting rightwards across the dodging phase.
#[derive(Debug, Clone)]
pub struct TextBullet {
    pub id: u32,
    pub text: &'static str,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Rendered text bounds, measured by the host at startup
    pub size: Vec2,
}

impl TextBullet {
    /// Spawns fully off-screen left on the given lane.
    pub fn new(id: u32, text: &'static str, lane: f32, speed: f32, size: Vec2) -> Self {
        Self {
            id,
            text,
            pos: Vec2::new(-(size.x / 2.0), lane),
            vel: Vec2::new(speed, 0.0),
            size,
        }
    }
}

impl Movable for TextBullet {
    fn step(&mut self) {
        self.pos += self.vel;
    }
}

impl Collidable for TextBullet {
    fn hitbox(&self) -> Rect {
        Rect::centered(self.pos, self.size)
    }
}

/// Static maze segment. Contact hard-resets the player during navigation.
#[derive(Debug, Clone)]
pub struct Wall {
    pub rect: Rect,
    pub debug: bool,
}

impl Wall {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            debug: false,
        }
    }
}

impl Collidable for Wall {
    fn hitbox(&self) -> Rect {
        self.rect
    }
}

/// Reaching this rectangle ends the run. Collision-only; drawn only in
/// debug mode.
#[derive(Debug, Clone)]
pub struct GoalZone {
    pub rect: Rect,
    pub debug: bool,
}

impl GoalZone {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            debug: false,
        }
    }
}

impl Collidable for GoalZone {
    fn hitbox(&self) -> Rect {
        self.rect
    }
}
