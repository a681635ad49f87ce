//! Tiledrift: a small real-time 2D tile-scrolling game.
//!
//! The player sits at the center of the screen and the world scrolls
//! underneath it. Arrow keys move one tile per tick, H casts the heal
//! spell, E self-inflicts damage (debug), Escape quits.

use std::time::Duration;

use macroquad::prelude::*;

use tiledrift::config::{self, GameConfig};
use tiledrift::game::{Pace, Scheduler, World};
use tiledrift::input::{poll_keys, ActionSet, KeyBindings};
use tiledrift::map::{self, MapData};
use tiledrift::render::{ScreenSurface, SheetSlicer, TileAtlas};

const CONFIG_PATH: &str = "assets/config.ron";
const MAP_PATH: &str = "assets/map.ron";
const PLAYER_IMAGE: &str = "assets/player.png";
const EFFECTS_IMAGE: &str = "assets/effects.png";

/// Spell effect sheets are a horizontal strip of square frames.
const EFFECT_FRAME_COUNT: u32 = 4;
const EFFECT_FRAME_SIZE: u32 = 32;

fn window_conf() -> Conf {
    let config = config::load_or_default(CONFIG_PATH);
    Conf {
        // The config file's version, so a repackaged game can label
        // itself without a rebuild; defaults to the crate version
        window_title: format!("Tiledrift v{}", config.version),
        window_width: config.frame_width,
        window_height: config.frame_height,
        window_resizable: false,
        high_dpi: true,
        ..Default::default()
    }
}

fn solid_texture(width: u32, height: u32, color: Color) -> Texture2D {
    let image = Image::gen_image_color(width as u16, height as u16, color);
    let texture = Texture2D::from_image(&image);
    texture.set_filter(FilterMode::Nearest);
    texture
}

async fn load_effect_frames() -> Vec<Texture2D> {
    match load_image(EFFECTS_IMAGE).await {
        Ok(image) => {
            let slicer = SheetSlicer::new(&image, EFFECT_FRAME_SIZE, EFFECT_FRAME_SIZE);
            let count = EFFECT_FRAME_COUNT.min(slicer.columns());
            (0..count).map(|col| slicer.tile(col, 0)).collect()
        }
        Err(e) => {
            println!(
                "Failed to load effect sheet {}: {}, using placeholder frames",
                EFFECTS_IMAGE, e
            );
            [YELLOW, ORANGE, GOLD, BEIGE]
                .iter()
                .map(|&color| solid_texture(EFFECT_FRAME_SIZE, EFFECT_FRAME_SIZE, color))
                .collect()
        }
    }
}

/// Load the screen surface's textures, degrading to generated
/// placeholders for anything missing.
async fn build_surface(config: &GameConfig, map: &MapData) -> ScreenSurface {
    let tile_w = map.tile_width as u32;
    let tile_h = map.tile_height as u32;

    let atlas = match load_image(&map.atlas_image).await {
        Ok(image) => {
            TileAtlas::from_image(&image, map.atlas_columns, map.atlas_rows, tile_w, tile_h)
        }
        Err(e) => {
            println!(
                "Failed to load tile atlas {}: {}, using placeholder tiles",
                map.atlas_image, e
            );
            TileAtlas::placeholder(map.atlas_tile_count(), tile_w, tile_h)
        }
    };

    let player = match load_texture(PLAYER_IMAGE).await {
        Ok(texture) => {
            texture.set_filter(FilterMode::Nearest);
            texture
        }
        Err(e) => {
            println!(
                "Failed to load player sprite {}: {}, using placeholder",
                PLAYER_IMAGE, e
            );
            solid_texture(tile_w, tile_h, SKYBLUE)
        }
    };

    let effects = load_effect_frames().await;

    ScreenSurface::new(
        atlas,
        player,
        effects,
        config.frame_width,
        config.frame_height,
    )
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let config = config::load_or_default(CONFIG_PATH);
    let map = map::load_or_default(MAP_PATH);

    let mut surface = build_surface(&config, &map).await;
    let mut world = World::new(&map, config.frame_width, config.frame_height);
    let bindings = KeyBindings::defaults();
    let mut actions = ActionSet::new();
    let mut scheduler = Scheduler::new(config.fps);

    let mut last = get_time();
    while world.is_running() {
        let frame_start = get_time();
        let elapsed = Duration::from_secs_f64((frame_start - last).max(0.0));
        last = frame_start;

        poll_keys(&bindings, &mut actions);
        world.update(&mut actions);
        world.render(elapsed, &mut surface);

        // Frame pacing: draw calls must stay on this thread, so the
        // scheduler's accounting is driven inline instead of through its
        // blocking loop.
        let frame_time = Duration::from_secs_f64((get_time() - frame_start).max(0.0));
        match scheduler.pace(frame_time) {
            Pace::Sleep(requested) => {
                #[cfg(not(target_arch = "wasm32"))]
                {
                    let sleep_start = std::time::Instant::now();
                    std::thread::sleep(requested);
                    scheduler.record_over_sleep(requested, sleep_start.elapsed());
                }
                // WASM: no thread::sleep, spin out the remainder.
                // `requested` counts from now, not from frame start.
                #[cfg(target_arch = "wasm32")]
                {
                    let deadline = get_time() + requested.as_secs_f64();
                    while get_time() < deadline {
                        std::hint::spin_loop();
                    }
                }
            }
            Pace::Overrun { yield_now } => {
                #[cfg(not(target_arch = "wasm32"))]
                {
                    if yield_now {
                        std::thread::yield_now();
                    }
                }
                #[cfg(target_arch = "wasm32")]
                {
                    let _ = yield_now;
                }
            }
        }

        // Pay back accumulated overrun with update-only iterations
        for _ in 0..scheduler.catch_up() {
            world.update(&mut actions);
        }

        next_frame().await;
    }

    println!("Tiledrift exiting");
}
