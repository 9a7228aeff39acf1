//! Game state, phases and rosters
//!
//! One `GameState` holds everything the simulation mutates. The roster is
//! the single source of truth for which entities are live for movement and
//! drawing in the current phase; transitions build a complete replacement
//! and assign it in one move, they never patch the old one.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::clock::{Stopwatch, Timer};
use super::entity::{GoalZone, Player, TextBullet, Wall};
use crate::consts::*;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Dodging text bullets while the 20 second timer burns down
    Countdown,
    /// Re-navigating the maze to the goal zone, untimed
    Navigation,
    /// Goal reached; terminal
    Finished,
    /// Escape held or window close requested; terminal
    Quit,
}

/// Handle into the typed entity storage. Tagged dispatch instead of a
/// trait-object soup: the roster lists these, the loop resolves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef {
    Player,
    Bullet(u32),
    Wall(usize),
    Goal,
    /// The countdown or stopwatch readout, whichever is active
    Clock,
}

/// The live entity sets for the current phase.
#[derive(Debug, Clone)]
pub struct Roster {
    pub movables: Vec<EntityRef>,
    pub drawables: Vec<EntityRef>,
}

impl Roster {
    /// Dodging phase: the player and the clock; bullets join as they spawn.
    pub fn countdown() -> Self {
        Self {
            movables: vec![EntityRef::Player],
            drawables: vec![EntityRef::Player, EntityRef::Clock],
        }
    }

    /// Navigation phase: the player, the whole maze, the goal and a fresh
    /// stopwatch. No bullets.
    pub fn navigation(wall_count: usize) -> Self {
        let mut drawables = vec![EntityRef::Player];
        drawables.extend((0..wall_count).map(EntityRef::Wall));
        drawables.push(EntityRef::Goal);
        drawables.push(EntityRef::Clock);
        Self {
            movables: vec![EntityRef::Player],
            drawables,
        }
    }
}

/// Things that happened during a tick, drained by the host for logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    BulletSpawned(u32),
    BulletHit(u32),
    WallHit,
    PhaseChanged(GamePhase),
    RunComplete,
}

/// The fixed pool of bullet payloads.
pub const BULLET_TEXTS: [&str; 9] = [
    "I had a grandmother who had been diagnosed with serious paranoid schizophrenia, who everyone said was mentally weak.",
    "my father said any emotional weakness would bring on symptoms not unlike those dramatically thwarted in The Exorcist.",
    "'Ghosts use any opportunity to possess you, okay? Don't be weak, or it's game over for you.'",
    "The more vulnerable emotions, such as sadness, fear, and even affection, were seen as threats",
    "In our family, crying was considered contagious; it made you extremely vulnerable to the Woo-Woo ghosts",
    "your mom is just like Poh-Poh, nervous about everything",
    "we had to be emotionally strong if we didn't want the ghosts to take our parents away",
    "'People who cry become Woo-Woo.'",
    "'These kinds of doctors don't believe in ghosts'",
];

/// The fixed maze the player re-navigates after the countdown.
pub fn maze_walls() -> Vec<Wall> {
    vec![
        Wall::new(0.0, 100.0, 200.0, 20.0),
        Wall::new(200.0, 100.0, 20.0, 100.0),
        Wall::new(120.0, 200.0, 100.0, 20.0),
        Wall::new(300.0, 100.0, 200.0, 20.0),
        Wall::new(300.0, 180.0, 200.0, 20.0),
        Wall::new(300.0, 180.0, 20.0, 120.0),
        Wall::new(500.0, 100.0, 20.0, 100.0),
        Wall::new(600.0, 100.0, 200.0, 20.0),
        Wall::new(40.0, 100.0, 20.0, 120.0),
        Wall::new(0.0, 280.0, 220.0, 20.0),
        Wall::new(100.0, 380.0, 220.0, 20.0),
        Wall::new(100.0, 380.0, 20.0, 100.0),
        Wall::new(100.0, 480.0, 100.0, 20.0),
        Wall::new(0.0, 380.0, 40.0, 20.0),
        Wall::new(0.0, 450.0, 40.0, 20.0),
        Wall::new(100.0, 560.0, 20.0, 100.0),
        Wall::new(100.0, 560.0, 100.0, 20.0),
        Wall::new(300.0, 400.0, 20.0, 120.0),
        Wall::new(380.0, 480.0, 20.0, 120.0),
        Wall::new(460.0, 380.0, 20.0, 220.0),
        Wall::new(300.0, 380.0, 180.0, 20.0),
        Wall::new(300.0, 280.0, 180.0, 20.0),
        Wall::new(500.0, 180.0, 240.0, 20.0),
        Wall::new(580.0, 180.0, 20.0, 140.0),
        Wall::new(580.0, 180.0, 20.0, 180.0),
        Wall::new(680.0, 260.0, 140.0, 20.0),
        Wall::new(580.0, 340.0, 100.0, 20.0),
        Wall::new(580.0, 440.0, 100.0, 20.0),
        Wall::new(580.0, 440.0, 20.0, 180.0),
        Wall::new(680.0, 340.0, 20.0, 120.0),
        Wall::new(680.0, 520.0, 20.0, 140.0),
    ]
}

/// Where the maze lets out.
pub fn goal_zone() -> GoalZone {
    GoalZone::new(600.0, 520.0, 80.0, 140.0)
}

/// Complete game state, advanced only by `tick`.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducible spawns
    pub seed: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub bullets: Vec<TextBullet>,
    pub walls: Vec<Wall>,
    pub goal: GoalZone,
    /// Countdown phase clock; replaced by the stopwatch on transition
    pub countdown: Option<Timer>,
    pub stopwatch: Option<Stopwatch>,
    /// Re-armed with a fresh timer after every firing
    pub spawn_timer: Option<Timer>,
    pub roster: Roster,
    /// Rendered bounds of each `BULLET_TEXTS` entry, measured by the host
    pub text_sizes: [Vec2; BULLET_TEXTS.len()],
    pub rng: Pcg32,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    pub fn new(seed: u64, text_sizes: [Vec2; BULLET_TEXTS.len()]) -> Self {
        Self {
            seed,
            phase: GamePhase::Countdown,
            player: Player::new(PLAYER_START, Vec2::new(PLAYER_ACCEL, PLAYER_ACCEL)),
            bullets: Vec::new(),
            walls: maze_walls(),
            goal: goal_zone(),
            countdown: Some(Timer::new(COUNTDOWN_SECS)),
            stopwatch: None,
            spawn_timer: Some(Timer::new(SPAWN_DELAY_SECS)),
            roster: Roster::countdown(),
            text_sizes,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn bullet(&self, id: u32) -> Option<&TextBullet> {
        self.bullets.iter().find(|b| b.id == id)
    }

    pub fn bullet_mut(&mut self, id: u32) -> Option<&mut TextBullet> {
        self.bullets.iter_mut().find(|b| b.id == id)
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take everything that happened since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
