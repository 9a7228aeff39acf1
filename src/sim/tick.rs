//! Fixed timestep simulation tick
//!
//! Advances one frame of the game. The host calls this from a single
//! pacing point and distributes the same elapsed time to every clock; a
//! collision never mutates state mid-scan, it is applied after the scan as
//! a decision of this loop.

use rand::Rng;

use super::clock::{Stopwatch, Timer};
use super::collision::Collidable;
use super::entity::{HeldKeys, KeyMovable, Movable, TextBullet};
use super::state::{BULLET_TEXTS, EntityRef, GameEvent, GamePhase, GameState, Roster};
use crate::consts::*;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Directional keys currently held
    pub keys: HeldKeys,
    /// Escape currently held
    pub escape: bool,
    /// The window close button was pressed
    pub close_requested: bool,
}

/// Advance the game state by one fixed timestep.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Quit preempts the whole frame: no movement, collisions or drawing.
    if input.escape || input.close_requested {
        if state.phase != GamePhase::Quit {
            state.phase = GamePhase::Quit;
            state.push_event(GameEvent::PhaseChanged(GamePhase::Quit));
        }
        return;
    }

    if matches!(state.phase, GamePhase::Finished | GamePhase::Quit) {
        return;
    }

    // Phase clock. The countdown completing swaps the whole roster.
    match state.phase {
        GamePhase::Countdown => {
            let expired = state.countdown.as_mut().is_some_and(|t| t.tick(dt));
            if expired {
                enter_navigation(state);
            }
        }
        GamePhase::Navigation => {
            if let Some(watch) = state.stopwatch.as_mut() {
                watch.tick(dt);
            }
        }
        _ => {}
    }

    // Bullets only spawn while the countdown is still running.
    if state.phase == GamePhase::Countdown {
        let fired = state.spawn_timer.as_mut().is_some_and(|t| t.tick(dt));
        if fired {
            spawn_bullet(state);
            state.spawn_timer = Some(Timer::new(SPAWN_INTERVAL_SECS));
        }
    }

    // Any wall contact during navigation hard-resets the run, no sliding.
    if state.phase == GamePhase::Navigation {
        let hit = state.walls.iter().any(|w| state.player.hits(w));
        if hit {
            state.player.reset_to(RESTART_POINT);
            state.push_event(GameEvent::WallHit);
        }
    }

    // Steering before movement, always in that order; bullets have no keys
    // and only take the second step.
    state.player.key_move(&input.keys);

    for i in 0..state.roster.movables.len() {
        let entity = state.roster.movables[i];
        match entity {
            EntityRef::Player => state.player.step(),
            EntityRef::Bullet(id) => {
                if let Some(bullet) = state.bullet_mut(id) {
                    bullet.step();
                }
            }
            _ => {}
        }
    }

    state.player.animate(dt);

    // Bullet hits: collect first, then remove, so the roster is never
    // edited while it is being scanned.
    let hits: Vec<u32> = state
        .bullets
        .iter()
        .filter(|b| state.player.hits(*b))
        .map(|b| b.id)
        .collect();
    for id in hits {
        remove_bullet(state, id);
        if state.player.sight >= SIGHT_FLOOR {
            state.player.sight -= SIGHT_PENALTY;
        }
        state.push_event(GameEvent::BulletHit(id));
    }

    if state.phase == GamePhase::Navigation && state.player.hits(&state.goal) {
        state.phase = GamePhase::Finished;
        state.push_event(GameEvent::PhaseChanged(GamePhase::Finished));
        state.push_event(GameEvent::RunComplete);
    }
}

/// Countdown expired: drop every bullet and the spawn clock, trade the
/// countdown for a stopwatch, light up the vision circle and put the
/// player at the maze entrance. One roster swap, applied whole.
fn enter_navigation(state: &mut GameState) {
    state.bullets.clear();
    state.spawn_timer = None;
    state.countdown = None;
    state.stopwatch = Some(Stopwatch::new());
    state.player.show_sight = true;
    state.player.pos = RESTART_POINT;
    state.roster = Roster::navigation(state.walls.len());
    state.phase = GamePhase::Navigation;
    state.push_event(GameEvent::PhaseChanged(GamePhase::Navigation));
    log::info!("countdown expired, navigation begins");
}

/// One bullet on a random lane, at a random speed, with a random payload.
fn spawn_bullet(state: &mut GameState) {
    let lane = state
        .rng
        .random_range(BULLET_LANE_MARGIN..=GAME_HEIGHT as i32 - BULLET_LANE_MARGIN) as f32;
    let speed = state.rng.random_range(BULLET_SPEED_MIN..BULLET_SPEED_MAX);
    let text = state.rng.random_range(0..BULLET_TEXTS.len());

    let id = state.next_entity_id();
    let bullet = TextBullet::new(id, BULLET_TEXTS[text], lane, speed, state.text_sizes[text]);
    state.bullets.push(bullet);
    state.roster.movables.push(EntityRef::Bullet(id));
    state.roster.drawables.push(EntityRef::Bullet(id));
    state.push_event(GameEvent::BulletSpawned(id));
}

/// Take a bullet out of storage and both roster lists.
fn remove_bullet(state: &mut GameState, id: u32) {
    state.bullets.retain(|b| b.id != id);
    state.roster.movables.retain(|r| *r != EntityRef::Bullet(id));
    state.roster.drawables.retain(|r| *r != EntityRef::Bullet(id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn test_state(seed: u64) -> GameState {
        GameState::new(seed, [Vec2::new(120.0, 12.0); BULLET_TEXTS.len()])
    }

    /// Let the one-shot sight reveal finish so tests can set `sight` freely.
    fn finish_reveal(state: &mut GameState) {
        for _ in 0..60 {
            state.player.animate(FRAME_DT);
        }
        assert_eq!(state.player.sight, 1.0);
    }

    fn inject_bullet_at_player(state: &mut GameState) -> u32 {
        let id = state.next_entity_id();
        let mut bullet = TextBullet::new(id, "echo", 0.0, 2.0, Vec2::new(60.0, 12.0));
        bullet.pos = state.player.pos;
        state.bullets.push(bullet);
        state.roster.movables.push(EntityRef::Bullet(id));
        state.roster.drawables.push(EntityRef::Bullet(id));
        id
    }

    #[test]
    fn test_countdown_expiry_transitions_once() {
        let mut state = test_state(1);
        state.countdown = Some(Timer::new(0.05));

        tick(&mut state, &TickInput::default(), 0.1);
        assert_eq!(state.phase, GamePhase::Navigation);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::PhaseChanged(GamePhase::Navigation)));

        // The expired timer is gone; no second transition ever fires.
        tick(&mut state, &TickInput::default(), 0.1);
        assert_eq!(state.phase, GamePhase::Navigation);
        assert!(
            !state
                .drain_events()
                .contains(&GameEvent::PhaseChanged(GamePhase::Navigation))
        );
    }

    #[test]
    fn test_roster_swapped_atomically_on_transition() {
        let mut state = test_state(2);
        // Get some bullets into the live rosters first
        for _ in 0..5 {
            tick(&mut state, &TickInput::default(), 0.5);
        }
        assert!(!state.bullets.is_empty());

        state.countdown = Some(Timer::new(0.01));
        tick(&mut state, &TickInput::default(), FRAME_DT);

        assert_eq!(state.roster.movables, vec![EntityRef::Player]);
        let mut expected = vec![EntityRef::Player];
        expected.extend((0..state.walls.len()).map(EntityRef::Wall));
        expected.push(EntityRef::Goal);
        expected.push(EntityRef::Clock);
        assert_eq!(state.roster.drawables, expected);

        assert!(state.bullets.is_empty());
        assert!(state.countdown.is_none());
        assert!(state.spawn_timer.is_none());
        assert!(state.stopwatch.is_some());
        assert!(state.player.show_sight);
        assert_eq!(state.player.pos, RESTART_POINT);
    }

    #[test]
    fn test_spawn_cadence() {
        let mut state = test_state(3);
        // Nothing spawns during the initial 2 second delay
        for _ in 0..3 {
            tick(&mut state, &TickInput::default(), 0.5);
        }
        assert!(state.bullets.is_empty());

        // First bullet exactly as the delay elapses
        tick(&mut state, &TickInput::default(), 0.5);
        assert_eq!(state.bullets.len(), 1);

        // Then one every quarter second
        tick(&mut state, &TickInput::default(), 0.25);
        assert_eq!(state.bullets.len(), 2);
        tick(&mut state, &TickInput::default(), 0.25);
        assert_eq!(state.bullets.len(), 3);
    }

    #[test]
    fn test_bullet_hit_removes_and_dims_sight() {
        let mut state = test_state(4);
        finish_reveal(&mut state);
        state.player.sight = 0.5;
        let id = inject_bullet_at_player(&mut state);

        tick(&mut state, &TickInput::default(), FRAME_DT);

        assert!(state.bullets.is_empty());
        assert!(!state.roster.movables.contains(&EntityRef::Bullet(id)));
        assert!(!state.roster.drawables.contains(&EntityRef::Bullet(id)));
        assert!((state.player.sight - 0.45).abs() < 1e-6);
        assert!(state.drain_events().contains(&GameEvent::BulletHit(id)));
    }

    #[test]
    fn test_bullet_hit_respects_sight_floor() {
        let mut state = test_state(5);
        finish_reveal(&mut state);
        state.player.sight = 0.08;
        inject_bullet_at_player(&mut state);

        tick(&mut state, &TickInput::default(), FRAME_DT);

        // Below the floor the bullet is still consumed, sight is not
        assert!(state.bullets.is_empty());
        assert!((state.player.sight - 0.08).abs() < 1e-6);
    }

    #[test]
    fn test_wall_contact_hard_resets_player() {
        let mut state = test_state(6);
        enter_navigation(&mut state);
        // Overlapping the wall at (300, 100)-(500, 120)
        state.player.pos = Vec2::new(310.0, 110.0);
        state.player.vel = Vec2::new(2.0, 1.0);

        tick(&mut state, &TickInput::default(), FRAME_DT);

        assert_eq!(state.player.pos, RESTART_POINT);
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert!(state.drain_events().contains(&GameEvent::WallHit));
    }

    #[test]
    fn test_goal_overlap_finishes_the_run() {
        let mut state = test_state(7);
        enter_navigation(&mut state);
        state.player.pos = Vec2::new(640.0, 560.0);

        tick(&mut state, &TickInput::default(), FRAME_DT);

        assert_eq!(state.phase, GamePhase::Finished);
        assert!(state.drain_events().contains(&GameEvent::RunComplete));

        // Terminal: further ticks change nothing
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.phase, GamePhase::Finished);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_no_goal_check_during_countdown() {
        let mut state = test_state(8);
        state.player.pos = Vec2::new(640.0, 560.0);
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.phase, GamePhase::Countdown);
    }

    #[test]
    fn test_no_wall_check_during_countdown() {
        let mut state = test_state(9);
        state.player.pos = Vec2::new(310.0, 110.0);
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.player.pos, Vec2::new(310.0, 110.0));
    }

    #[test]
    fn test_quit_reachable_from_any_phase() {
        let escape = TickInput {
            escape: true,
            ..Default::default()
        };

        let mut state = test_state(10);
        tick(&mut state, &escape, FRAME_DT);
        assert_eq!(state.phase, GamePhase::Quit);

        let mut state = test_state(11);
        enter_navigation(&mut state);
        let close = TickInput {
            close_requested: true,
            ..Default::default()
        };
        tick(&mut state, &close, FRAME_DT);
        assert_eq!(state.phase, GamePhase::Quit);
    }

    #[test]
    fn test_quit_preempts_the_frame() {
        let mut state = test_state(12);
        let before = state.player.pos;
        let input = TickInput {
            escape: true,
            keys: HeldKeys {
                right: true,
                ..Default::default()
            },
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);
        // No movement ran on the quitting frame
        assert_eq!(state.player.pos, before);
    }

    #[test]
    fn test_spawns_are_deterministic_per_seed() {
        let mut a = test_state(99);
        let mut b = test_state(99);
        for _ in 0..400 {
            tick(&mut a, &TickInput::default(), FRAME_DT);
            tick(&mut b, &TickInput::default(), FRAME_DT);
        }
        assert!(!a.bullets.is_empty());
        assert_eq!(a.bullets.len(), b.bullets.len());
        for (x, y) in a.bullets.iter().zip(b.bullets.iter()) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.vel, y.vel);
            assert_eq!(x.text, y.text);
        }
    }

    #[test]
    fn test_bullets_march_rightward() {
        let mut state = test_state(13);
        for _ in 0..5 {
            tick(&mut state, &TickInput::default(), 0.5);
        }
        let before: Vec<f32> = state.bullets.iter().map(|b| b.pos.x).collect();
        tick(&mut state, &TickInput::default(), FRAME_DT);
        for (bullet, old_x) in state.bullets.iter().zip(before) {
            assert!(bullet.pos.x > old_x);
        }
    }
}
