//! Asset loading and sprite sheet slicing
//!
//! The character sheet is a grid of 32x32 frames, one animation cycle per
//! row, sliced by the cycle table in `sim::entity`. Both assets are
//! required; a missing file or a sheet too small for the table is fatal at
//! startup.

use std::fmt;

use macroquad::prelude::*;

use crate::consts::*;
use crate::sim::CycleId;

#[derive(Debug)]
pub enum AssetError {
    /// File missing or unreadable
    Load(macroquad::Error),
    /// The sheet's dimensions cannot hold the cycle table
    Sheet(String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Load(e) => write!(f, "asset load failed: {e}"),
            AssetError::Sheet(msg) => write!(f, "bad sprite sheet: {msg}"),
        }
    }
}

impl std::error::Error for AssetError {}

/// The character sheet plus the geometry to cut frames out of it.
pub struct SpriteSheet {
    pub texture: Texture2D,
}

impl SpriteSheet {
    /// Validates that every cycle row and frame column fits the texture.
    pub fn new(texture: Texture2D) -> Result<Self, AssetError> {
        let rows = CycleId::ALL.len();
        let need_h = rows as f32 * SPRITE_FRAME_PX;
        if texture.height() < need_h {
            return Err(AssetError::Sheet(format!(
                "sheet is {}x{} but {} rows of {}px frames need height {}",
                texture.width(),
                texture.height(),
                rows,
                SPRITE_FRAME_PX,
                need_h,
            )));
        }
        for cycle in CycleId::ALL {
            let need_w = cycle.frame_count() as f32 * SPRITE_FRAME_PX;
            if texture.width() < need_w {
                return Err(AssetError::Sheet(format!(
                    "row {} holds {} frames but the sheet is only {}px wide",
                    cycle.row(),
                    cycle.frame_count(),
                    texture.width(),
                )));
            }
        }
        Ok(Self { texture })
    }

    /// Source rectangle of one frame of one cycle.
    pub fn source(&self, cycle: CycleId, frame: usize) -> Rect {
        Rect::new(
            frame as f32 * SPRITE_FRAME_PX,
            cycle.row() as f32 * SPRITE_FRAME_PX,
            SPRITE_FRAME_PX,
            SPRITE_FRAME_PX,
        )
    }
}

/// Everything the renderer needs from disk.
pub struct Assets {
    pub sheet: SpriteSheet,
    pub clock_font: Font,
}

impl Assets {
    pub async fn load() -> Result<Self, AssetError> {
        let texture = load_texture(CHARACTER_SHEET_PATH)
            .await
            .map_err(AssetError::Load)?;
        texture.set_filter(FilterMode::Nearest);
        let sheet = SpriteSheet::new(texture)?;

        let clock_font = load_ttf_font(CLOCK_FONT_PATH)
            .await
            .map_err(AssetError::Load)?;

        Ok(Self { sheet, clock_font })
    }
}
