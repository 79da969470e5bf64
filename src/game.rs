//! Game state and rules
//!
//! A flamingo wades around a 256x240 pond eating shrimp. Plants block
//! movement; the bottle of medicine undoes the damage, restoring every
//! eaten shrimp and resetting the score. All assets are registered once
//! at startup from a fixed, deterministic placement table; gameplay only
//! toggles consumed flags and repositions the player.
//!
//! One discrete simulation step is `update` followed by `compose`; the
//! video buffer is only read between steps.

use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use crate::assets::{register_asset, Allocator, AssetError, SpriteInfo, SpriteKind};
use crate::common::Color;
use crate::image::ImageData;
use crate::input::Input;
use crate::ppu::{Ppu, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Player speed in pixels per second
pub const PLAYER_SPEED: f32 = 50.0;
/// Every asset is 16x16 pixels: 2x2 tiles
pub const SPRITE_SIZE: f32 = 16.0;

/// Pond water, a pale blue
const BACKGROUND: Color = Color::new(0xAD, 0xD8, 0xE6, 0xFF);

const SHRIMP_COUNT: usize = 8;
const PLANT_COUNT: usize = 5;

/// The player's placement index; scenery follows
const PLAYER: usize = 0;
const SCENERY_START: usize = 1;

/// Fixed spawn coordinates: 8 shrimp spread over the four screen
/// quadrants, then 5 plants, then the medicine. Deterministic placement
/// keeps registration reproducible byte-for-byte.
const SPAWN_POINTS: [(u8, u8); 14] = [
    // shrimp
    (16, 10),
    (200, 73),
    (100, 223),
    (143, 166),
    (73, 100),
    (156, 100),
    (34, 140),
    (175, 30),
    // plants
    (120, 60),
    (23, 178),
    (223, 145),
    (45, 45),
    (120, 120),
    // medicine
    (234, 220),
];

/// What touching an object does to the game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEffect {
    /// Consume the object and adjust the score
    Collect { score_delta: i8 },
    /// Undo this frame's motion
    Block,
    /// Restore every consumed shrimp and zero the score
    ResetConsumedGroup,
}

/// Effect of colliding with an object of the given kind. The player
/// itself has none.
pub fn collision_effect(kind: SpriteKind) -> Option<CollisionEffect> {
    match kind {
        SpriteKind::Flamingo => None,
        SpriteKind::Shrimp => Some(CollisionEffect::Collect { score_delta: 1 }),
        SpriteKind::Plant => Some(CollisionEffect::Block),
        SpriteKind::Medicine => Some(CollisionEffect::ResetConsumedGroup),
    }
}

/// The decoded image for every asset the game registers. Separated from
/// file loading so game construction is testable with synthetic images.
#[derive(Debug, Clone)]
pub struct GameAssets {
    pub flamingo: ImageData,
    /// Four shrimp variants: top, bottom, left, right
    pub shrimp: [ImageData; 4],
    pub plant: ImageData,
    pub medicine: ImageData,
}

impl GameAssets {
    /// Load all asset PNGs from `dir`
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let load = |name: &str| {
            ImageData::load_png(dir.join(name)).with_context(|| format!("loading asset {}", name))
        };
        Ok(Self {
            flamingo: load("flamingo.png")?,
            shrimp: [
                load("shrimp_top.png")?,
                load("shrimp_bottom.png")?,
                load("shrimp_left.png")?,
                load("shrimp_right.png")?,
            ],
            plant: load("plant.png")?,
            medicine: load("medicine.png")?,
        })
    }
}

/// Complete game state: the PPU tables plus the simulation driving them
#[derive(Debug, Clone)]
pub struct Game {
    pub ppu: Ppu,
    pub input: Input,
    /// Placement 0 is the player, the rest is scenery
    pub placements: Vec<SpriteInfo>,
    /// Player position in screen pixels, bottom-left origin
    pub player_at: (f32, f32),
    /// Shrimp eaten
    pub score: i8,
}

impl Game {
    /// Register every asset into a fresh PPU. One palette slot per kind:
    /// same-kind assets share their quantized palette. Fails fatally on
    /// any capacity or dimension violation.
    pub fn new(assets: &GameAssets) -> Result<Self, AssetError> {
        let mut ppu = Ppu::new();
        ppu.background_color = BACKGROUND;
        let mut alloc = Allocator::new();
        let mut placements = Vec::new();

        let start_x = (SCREEN_WIDTH / 2) as u8 - 16;
        let palette = alloc.reserve_palette()?;
        placements.push(register_asset(
            &mut ppu,
            &mut alloc,
            &assets.flamingo,
            SpriteKind::Flamingo,
            palette,
            start_x,
            0,
        )?);

        let palette = alloc.reserve_palette()?;
        for i in 0..SHRIMP_COUNT {
            let (x, y) = SPAWN_POINTS[i];
            // Two shrimp per variant
            let image = &assets.shrimp[i / 2];
            placements.push(register_asset(
                &mut ppu,
                &mut alloc,
                image,
                SpriteKind::Shrimp,
                palette,
                x,
                y,
            )?);
        }

        let palette = alloc.reserve_palette()?;
        for i in SHRIMP_COUNT..SHRIMP_COUNT + PLANT_COUNT {
            let (x, y) = SPAWN_POINTS[i];
            placements.push(register_asset(
                &mut ppu,
                &mut alloc,
                &assets.plant,
                SpriteKind::Plant,
                palette,
                x,
                y,
            )?);
        }

        let palette = alloc.reserve_palette()?;
        let (x, y) = SPAWN_POINTS[SHRIMP_COUNT + PLANT_COUNT];
        placements.push(register_asset(
            &mut ppu,
            &mut alloc,
            &assets.medicine,
            SpriteKind::Medicine,
            palette,
            x,
            y,
        )?);

        Ok(Self {
            ppu,
            input: Input::new(),
            placements,
            player_at: (start_x as f32, 0.0),
            score: 0,
        })
    }

    /// Advance the simulation by `elapsed` seconds: move the player,
    /// clamp to the screen, then resolve collisions with every scenery
    /// object by its [`CollisionEffect`].
    pub fn update(&mut self, elapsed: f32) {
        let mut dx = 0.0;
        let mut dy = 0.0;
        if self.input.left.pressed {
            dx -= PLAYER_SPEED * elapsed;
        }
        if self.input.right.pressed {
            dx += PLAYER_SPEED * elapsed;
        }
        if self.input.down.pressed {
            dy -= PLAYER_SPEED * elapsed;
        }
        if self.input.up.pressed {
            dy += PLAYER_SPEED * elapsed;
        }
        self.player_at.0 += dx;
        self.player_at.1 += dy;
        self.clamp_player();

        for i in SCENERY_START..self.placements.len() {
            let info = self.placements[i];
            let slot = self.ppu.sprites[info.start_sprite_index as usize];
            if !overlaps(self.player_at, (slot.x as f32, slot.y as f32)) {
                continue;
            }

            match collision_effect(info.kind) {
                Some(CollisionEffect::Collect { score_delta }) => {
                    // A consumed object is no longer edible
                    if !info.consumed {
                        debug!("collected {:?} at ({}, {})", info.kind, slot.x, slot.y);
                        self.score = self.score.saturating_add(score_delta);
                        self.placements[i].consumed = true;
                    }
                }
                Some(CollisionEffect::Block) => {
                    self.player_at.0 -= dx;
                    self.player_at.1 -= dy;
                    self.clamp_player();
                }
                Some(CollisionEffect::ResetConsumedGroup) => {
                    debug!("medicine taken, restoring shrimp");
                    for placement in &mut self.placements {
                        if placement.kind == SpriteKind::Shrimp {
                            placement.consumed = false;
                        }
                    }
                    self.score = 0;
                }
                None => {}
            }
        }

        self.input.clear_downs();
    }

    /// Write the game state into the PPU tables and rasterize a frame:
    /// reposition the player, hide or show each scenery object by its
    /// consumed flag, then render.
    pub fn compose(&mut self) {
        let player = self.placements[PLAYER];
        self.ppu.reposition(&player, self.player_at.0 as u8, self.player_at.1 as u8);

        for i in SCENERY_START..self.placements.len() {
            let info = self.placements[i];
            self.ppu.set_hidden(&info, info.consumed);
        }

        self.ppu.render();
    }

    /// Keep the whole 16x16 player on screen
    fn clamp_player(&mut self) {
        self.player_at.0 = self.player_at.0.clamp(0.0, SCREEN_WIDTH as f32 - SPRITE_SIZE);
        self.player_at.1 = self.player_at.1.clamp(0.0, SCREEN_HEIGHT as f32 - SPRITE_SIZE);
    }
}

/// Axis-aligned overlap test between two 16x16 boxes. Touching edges
/// count as overlapping.
fn overlaps(a: (f32, f32), b: (f32, f32)) -> bool {
    let min_x = a.0.max(b.0);
    let min_y = a.1.max(b.1);
    let max_x = (a.0 + SPRITE_SIZE).min(b.0 + SPRITE_SIZE);
    let max_y = (a.1 + SPRITE_SIZE).min(b.1 + SPRITE_SIZE);
    min_x <= max_x && min_y <= max_y
}
