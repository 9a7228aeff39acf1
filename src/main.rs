//! Echo Maze entry point
//!
//! Owns the window, samples input, paces the fixed-timestep loop and hands
//! the same elapsed time to the whole simulation once per frame.

use glam::Vec2;
use macroquad::prelude::{
    BLACK, Conf, KeyCode, clear_background, get_frame_time, is_key_down, is_quit_requested,
    measure_text, next_frame, prevent_quit,
};

use echo_maze::assets::Assets;
use echo_maze::consts::*;
use echo_maze::render;
use echo_maze::sim::{
    BULLET_TEXTS, GameEvent, GamePhase, GameState, HeldKeys, TickInput, tick,
};

fn window_conf() -> Conf {
    Conf {
        window_title: "Echo Maze".to_owned(),
        window_width: GAME_WIDTH as i32,
        window_height: GAME_HEIGHT as i32,
        window_resizable: false,
        ..Default::default()
    }
}

fn seed_from_clock() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[macroquad::main(window_conf)]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    // Close requests surface through is_quit_requested so the quit check
    // can run at the top of the tick instead of killing the process.
    prevent_quit();

    // Visual assets are required; bail out before the first frame if they
    // are missing or malformed.
    let assets = match Assets::load().await {
        Ok(assets) => assets,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };

    // The sim never measures text; hand it the rendered bounds of every
    // payload in the pool up front.
    let text_sizes: [Vec2; BULLET_TEXTS.len()] = std::array::from_fn(|i| {
        let dims = measure_text(BULLET_TEXTS[i], None, BULLET_FONT_PX, 1.0);
        Vec2::new(dims.width, dims.height)
    });

    let seed = seed_from_clock();
    log::info!("starting run, seed {seed}");
    let mut state = GameState::new(seed, text_sizes);
    let mut accumulator = 0.0f32;

    loop {
        let input = TickInput {
            keys: HeldKeys {
                up: is_key_down(KeyCode::W),
                down: is_key_down(KeyCode::S),
                left: is_key_down(KeyCode::A),
                right: is_key_down(KeyCode::D),
            },
            escape: is_key_down(KeyCode::Escape),
            close_requested: is_quit_requested(),
        };

        // The single pacing point: real elapsed time in, fixed steps out.
        accumulator += get_frame_time().min(0.1);
        let mut substeps = 0;
        while accumulator >= FRAME_DT && substeps < MAX_SUBSTEPS {
            tick(&mut state, &input, FRAME_DT);
            accumulator -= FRAME_DT;
            substeps += 1;
        }

        for event in state.drain_events() {
            match event {
                GameEvent::BulletSpawned(id) => log::debug!("bullet {id} spawned"),
                GameEvent::BulletHit(id) => log::debug!("bullet {id} hit the player"),
                GameEvent::WallHit => log::debug!("wall contact, back to the start"),
                GameEvent::PhaseChanged(phase) => log::info!("phase: {phase:?}"),
                GameEvent::RunComplete => {
                    let elapsed = state.stopwatch.as_ref().map_or(0.0, |w| w.elapsed());
                    log::info!("maze cleared in {elapsed:.1}s");
                }
            }
        }

        // Terminal phases end the loop without drawing the frame.
        if matches!(state.phase, GamePhase::Finished | GamePhase::Quit) {
            break;
        }

        clear_background(BLACK);
        render::draw_frame(&state, &assets);
        next_frame().await;
    }
}
