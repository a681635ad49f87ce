//! Rendering
//!
//! The game core issues draw calls through the [`RenderSurface`] trait
//! and never touches textures directly; tests drive the world with a
//! recording surface, the binary uses [`ScreenSurface`] backed by
//! macroquad. Draw calls are infallible by construction: missing assets
//! degrade to generated placeholder textures at load time (with a
//! printed diagnostic), so a render pass never has an error to report.

use macroquad::prelude::*;

use crate::game::{Direction, FrameId};

/// Receives the draw calls for one frame.
pub trait RenderSurface {
    /// Clear to the background before the frame's draws.
    fn clear(&mut self);

    /// Draw the tile with atlas index `code` at a screen position.
    fn draw_tile(&mut self, code: u8, x: i32, y: i32);

    /// Draw the player sprite with the given facing.
    fn draw_player(&mut self, x: i32, y: i32, facing: Direction);

    /// Draw one spell effect frame at a screen position.
    fn draw_effect(&mut self, frame: FrameId, x: i32, y: i32);

    /// Draw the stats readout (health, mana, attribute triple).
    fn draw_stats(&mut self, health: i32, mana: i32, attributes: [i32; 3]);
}

/// Slices a sheet image into equally sized tiles.
///
/// A scoped value: construct it over a loaded image, cut the tiles you
/// need, and let it go out of scope. Nothing is cached globally.
pub struct SheetSlicer<'a> {
    image: &'a Image,
    tile_width: u32,
    tile_height: u32,
}

impl<'a> SheetSlicer<'a> {
    pub fn new(image: &'a Image, tile_width: u32, tile_height: u32) -> Self {
        Self {
            image,
            tile_width,
            tile_height,
        }
    }

    /// Columns of whole tiles available in the sheet.
    pub fn columns(&self) -> u32 {
        self.image.width() as u32 / self.tile_width.max(1)
    }

    /// Rows of whole tiles available in the sheet.
    pub fn rows(&self) -> u32 {
        self.image.height() as u32 / self.tile_height.max(1)
    }

    /// Cut the tile at sheet cell `(col, row)` into its own texture.
    pub fn tile(&self, col: u32, row: u32) -> Texture2D {
        let sub = self.image.sub_image(Rect::new(
            (col * self.tile_width) as f32,
            (row * self.tile_height) as f32,
            self.tile_width as f32,
            self.tile_height as f32,
        ));
        let texture = Texture2D::from_image(&sub);
        texture.set_filter(FilterMode::Nearest);
        texture
    }
}

/// Per-tile textures indexed by the map's cell codes.
pub struct TileAtlas {
    tiles: Vec<Texture2D>,
}

impl TileAtlas {
    /// Slice `columns x rows` tiles out of an atlas image, in row-major
    /// order so that cell code `i` maps to sheet cell
    /// `(i % columns, i / columns)`.
    pub fn from_image(image: &Image, columns: u32, rows: u32, tile_w: u32, tile_h: u32) -> Self {
        let slicer = SheetSlicer::new(image, tile_w, tile_h);
        let mut tiles = Vec::with_capacity((columns * rows) as usize);
        for row in 0..rows {
            for col in 0..columns {
                tiles.push(slicer.tile(col, row));
            }
        }
        Self { tiles }
    }

    /// Flat-colored stand-in tiles for when the atlas image is missing.
    pub fn placeholder(count: u32, tile_w: u32, tile_h: u32) -> Self {
        let palette = [DARKGREEN, GRAY, DARKBROWN, DARKBLUE, PURPLE, MAROON];
        let tiles = (0..count.max(1))
            .map(|i| {
                let color = palette[i as usize % palette.len()];
                let image = Image::gen_image_color(tile_w as u16, tile_h as u16, color);
                let texture = Texture2D::from_image(&image);
                texture.set_filter(FilterMode::Nearest);
                texture
            })
            .collect();
        Self { tiles }
    }

    pub fn get(&self, code: u8) -> Option<&Texture2D> {
        self.tiles.get(code as usize)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// The macroquad-backed surface the binary draws to.
pub struct ScreenSurface {
    atlas: TileAtlas,
    player: Texture2D,
    /// Spell effect frames indexed by [`FrameId`]
    effects: Vec<Texture2D>,
    frame_width: i32,
    frame_height: i32,
}

impl ScreenSurface {
    pub fn new(
        atlas: TileAtlas,
        player: Texture2D,
        effects: Vec<Texture2D>,
        frame_width: i32,
        frame_height: i32,
    ) -> Self {
        Self {
            atlas,
            player,
            effects,
            frame_width,
            frame_height,
        }
    }
}

impl RenderSurface for ScreenSurface {
    fn clear(&mut self) {
        clear_background(BLACK);
    }

    fn draw_tile(&mut self, code: u8, x: i32, y: i32) {
        if let Some(texture) = self.atlas.get(code) {
            draw_texture(texture, x as f32, y as f32, WHITE);
        }
    }

    fn draw_player(&mut self, x: i32, y: i32, facing: Direction) {
        // Canonical sprite faces North; rotate at draw time instead of
        // resampling the image on direction changes
        draw_texture_ex(
            &self.player,
            x as f32,
            y as f32,
            WHITE,
            DrawTextureParams {
                rotation: facing.angle(),
                ..Default::default()
            },
        );
    }

    fn draw_effect(&mut self, frame: FrameId, x: i32, y: i32) {
        if let Some(texture) = self.effects.get(frame.0 as usize) {
            draw_texture(texture, x as f32, y as f32, WHITE);
        }
    }

    fn draw_stats(&mut self, health: i32, mana: i32, attributes: [i32; 3]) {
        let x = (self.frame_width - 60) as f32;
        let mut y = (self.frame_height - 80) as f32;
        let line = 18.0;

        draw_text(&health.to_string(), x, y, 16.0, WHITE);
        y += line;
        draw_text(&mana.to_string(), x, y, 16.0, SKYBLUE);
        for value in attributes {
            y += line;
            draw_text(&value.to_string(), x, y, 16.0, LIGHTGRAY);
        }
    }
}
