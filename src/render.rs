//! Roster-driven macroquad drawing
//!
//! Reads the simulation state, never mutates it. Entities are drawn in
//! roster order, so the vision circle goes down first and the maze is
//! carved out of it by the walls painted on top.

use macroquad::prelude::*;

use crate::assets::Assets;
use crate::consts::*;
use crate::sim::collision::Collidable;
use crate::sim::entity::{GoalZone, Player, TextBullet, Wall};
use crate::sim::state::{EntityRef, GameState};

/// Faint near-black for the circle before the reveal is earned
const DIM_SIGHT: Color = Color::new(0.063, 0.063, 0.063, 1.0);

pub struct DrawContext<'a> {
    pub assets: &'a Assets,
}

/// Renders itself to the current frame.
pub trait Drawable {
    fn draw(&self, ctx: &DrawContext);
}

impl Drawable for Player {
    fn draw(&self, ctx: &DrawContext) {
        // Vision circle first, sprite on top. The circle spills past the
        // playfield edges and is cut off by the surface itself.
        let color = if self.show_sight { WHITE } else { DIM_SIGHT };
        draw_circle(self.pos.x, self.pos.y, self.sight * GAME_WIDTH / 2.0, color);

        let cycle = self.active_cycle();
        let source = ctx.assets.sheet.source(cycle, self.cycle(cycle).frame());
        draw_texture_ex(
            &ctx.assets.sheet.texture,
            self.pos.x - PLAYER_SIZE / 2.0,
            self.pos.y - PLAYER_SIZE / 2.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(PLAYER_SIZE, PLAYER_SIZE)),
                source: Some(source),
                flip_x: self.vel.x < 0.0,
                ..Default::default()
            },
        );
    }
}

impl Drawable for TextBullet {
    fn draw(&self, _ctx: &DrawContext) {
        let hb = self.hitbox();
        let dims = measure_text(self.text, None, BULLET_FONT_PX, 1.0);
        draw_text(self.text, hb.x, hb.y + dims.offset_y, BULLET_FONT_PX as f32, WHITE);
    }
}

impl Drawable for Wall {
    fn draw(&self, _ctx: &DrawContext) {
        let color = if self.debug { RED } else { BLACK };
        draw_rectangle(self.rect.x, self.rect.y, self.rect.w, self.rect.h, color);
    }
}

impl Drawable for GoalZone {
    fn draw(&self, _ctx: &DrawContext) {
        // Collision-only; visible only when debugging the layout
        if self.debug {
            draw_rectangle(self.rect.x, self.rect.y, self.rect.w, self.rect.h, RED);
        }
    }
}

/// The countdown or stopwatch readout, top-right in the clock font.
fn draw_clock(state: &GameState, ctx: &DrawContext) {
    let readout = if let Some(timer) = &state.countdown {
        format!("{:.1}", timer.remaining())
    } else if let Some(watch) = &state.stopwatch {
        format!("{:.1}", watch.elapsed())
    } else {
        return;
    };

    let dims = measure_text(&readout, Some(&ctx.assets.clock_font), CLOCK_FONT_PX, 1.0);
    draw_text_ex(
        &readout,
        GAME_WIDTH - dims.width - CLOCK_PADDING,
        CLOCK_PADDING + dims.offset_y,
        TextParams {
            font: Some(&ctx.assets.clock_font),
            font_size: CLOCK_FONT_PX,
            color: RED,
            ..Default::default()
        },
    );
}

/// Draw every live drawable in roster order.
pub fn draw_frame(state: &GameState, assets: &Assets) {
    let ctx = DrawContext { assets };
    for entity in &state.roster.drawables {
        match entity {
            EntityRef::Player => state.player.draw(&ctx),
            EntityRef::Bullet(id) => {
                if let Some(bullet) = state.bullet(*id) {
                    bullet.draw(&ctx);
                }
            }
            EntityRef::Wall(i) => {
                if let Some(wall) = state.walls.get(*i) {
                    wall.draw(&ctx);
                }
            }
            EntityRef::Goal => state.goal.draw(&ctx),
            EntityRef::Clock => draw_clock(state, &ctx),
        }
    }
}
