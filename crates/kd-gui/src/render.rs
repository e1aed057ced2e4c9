//! World drawing: image sprites when the files load, primitive shapes when
//! they don't.

use std::path::Path;

use kd_core::{Vec2, WorldState};
use macroquad::prelude::*;
use tracing::{debug, warn};

use crate::theme::palette;

/// Every image the world can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    /// The survivor.
    Player,
    /// A tree.
    Tree,
    /// A rock.
    Rock,
    /// A berry bush.
    Berry,
    /// A water pool, scaled to its radius.
    Water,
    /// A campfire.
    Campfire,
}

impl Sprite {
    /// All sprites, in load order.
    pub const ALL: [Self; 6] = [
        Self::Player,
        Self::Tree,
        Self::Rock,
        Self::Berry,
        Self::Water,
        Self::Campfire,
    ];

    /// File name inside the assets directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Player => "player.png",
            Self::Tree => "tree.png",
            Self::Rock => "rock.png",
            Self::Berry => "berry.png",
            Self::Water => "water.png",
            Self::Campfire => "campfire.png",
        }
    }

    /// Top-left offset from the entity position and drawn size, for sprites
    /// with a fixed footprint. Water pools scale with their radius instead.
    pub fn footprint(self) -> Option<(Vec2, Vec2)> {
        let rect = |dx, dy, w, h| Some((Vec2::new(dx, dy), Vec2::new(w, h)));
        match self {
            Self::Player => rect(-20.0, -22.0, 40.0, 44.0),
            Self::Tree => rect(-28.0, -34.0, 56.0, 68.0),
            Self::Rock => rect(-20.0, -20.0, 40.0, 40.0),
            Self::Berry => rect(-12.0, -12.0, 24.0, 24.0),
            Self::Campfire => rect(-18.0, -18.0, 36.0, 36.0),
            Self::Water => None,
        }
    }
}

/// Loaded textures. A missing entry means "draw the fallback shape".
#[derive(Default)]
pub struct Sprites {
    textures: Vec<(Sprite, Texture2D)>,
}

impl Sprites {
    /// No textures: everything draws as shapes.
    pub fn none() -> Self {
        Self::default()
    }

    /// Try to load every sprite from `dir`. Files that fail to load are
    /// skipped.
    pub async fn load(dir: &Path) -> Self {
        let mut textures = Vec::new();
        for sprite in Sprite::ALL {
            let path = dir.join(sprite.file_name());
            match load_texture(&path.to_string_lossy()).await {
                Ok(texture) => {
                    texture.set_filter(FilterMode::Linear);
                    debug!(path = %path.display(), "sprite loaded");
                    textures.push((sprite, texture));
                }
                Err(e) => warn!(path = %path.display(), error = %e, "sprite missing, using shape"),
            }
        }
        Self { textures }
    }

    /// The texture for a sprite, if it loaded.
    pub fn get(&self, sprite: Sprite) -> Option<&Texture2D> {
        self.textures
            .iter()
            .find(|(s, _)| *s == sprite)
            .map(|(_, t)| t)
    }

    /// Number of sprites that loaded.
    pub fn loaded(&self) -> usize {
        self.textures.len()
    }
}

fn draw_sized(texture: &Texture2D, at: Vec2, offset: Vec2, size: Vec2) {
    draw_texture_ex(
        texture,
        (at.x + offset.x) as f32,
        (at.y + offset.y) as f32,
        WHITE,
        DrawTextureParams {
            dest_size: Some(vec2(size.x as f32, size.y as f32)),
            ..Default::default()
        },
    );
}

fn draw_fixed(sprites: &Sprites, sprite: Sprite, at: Vec2, fallback: impl FnOnce(f32, f32)) {
    match (sprites.get(sprite), sprite.footprint()) {
        (Some(texture), Some((offset, size))) => draw_sized(texture, at, offset, size),
        _ => fallback(at.x as f32, at.y as f32),
    }
}

/// Draw the whole world: ground, pools, trees, rocks, berries, campfires,
/// then the player on top.
pub fn draw_world(state: &WorldState, sprites: &Sprites, show_reach: bool) {
    let bounds = state.bounds;
    draw_rectangle(
        0.0,
        0.0,
        bounds.width as f32,
        bounds.height as f32,
        palette::GRASS,
    );

    let registry = &state.registry;
    for pool in registry.waters.values() {
        let r = pool.radius;
        match sprites.get(Sprite::Water) {
            Some(texture) => draw_sized(
                texture,
                pool.position,
                Vec2::new(-r, -r),
                Vec2::new(2.0 * r, 2.0 * r),
            ),
            None => {
                let (x, y, r) = (pool.position.x as f32, pool.position.y as f32, r as f32);
                draw_circle(x, y, r, palette::WATER);
                draw_circle(x - r * 0.2, y - r * 0.2, r * 0.6, palette::WATER_SHINE);
            }
        }
    }

    for tree in registry.trees.values() {
        draw_fixed(sprites, Sprite::Tree, tree.position, |x, y| {
            draw_rectangle(x - 6.0, y + 6.0, 12.0, 18.0, palette::TRUNK);
            draw_circle(x, y, 24.0, palette::CANOPY);
        });
    }

    for rock in registry.rocks.values() {
        draw_fixed(sprites, Sprite::Rock, rock.position, |x, y| {
            draw_ellipse(x, y, 18.0, 14.0, 0.0, palette::ROCK);
        });
    }

    for berry in registry.berries.values() {
        draw_fixed(sprites, Sprite::Berry, berry.position, |x, y| {
            draw_circle(x, y, 8.0, palette::BERRY);
        });
    }

    for fire in registry.campfires.values() {
        draw_fixed(sprites, Sprite::Campfire, fire.position, |x, y| {
            draw_circle(x, y, 10.0, palette::FIRE);
        });
    }

    let player = &state.player;
    let size = player.size as f32;
    draw_fixed(sprites, Sprite::Player, player.position, |x, y| {
        draw_circle(x, y, size, palette::PLAYER);
    });

    if show_reach {
        draw_circle_lines(
            player.position.x as f32,
            player.position.y as f32,
            player.reach as f32,
            1.0,
            palette::REACH,
        );
    }
}
