//! Starfall: a small 2D star-collecting game
//!
//! Three levels played in a fixed order: a platformer, a top-down maze,
//! and a survival level under falling obstacles. The session loop here
//! samples input, steps the active level once per frame, and reacts to
//! the outcome the level reports: keep playing, advance, rebuild, or
//! show the end screen.

mod assets;
mod components;
mod config;
mod geometry;
mod input;
mod level;
mod player;

use macroquad::prelude::*;

use assets::Assets;
use config::Config;
use input::Intent;
use level::{create_level_by_name, Level, Outcome};

/// Level identifiers in play order
const LEVEL_ORDER: [&str; 3] = ["platform", "maze", "puzzle"];

fn window_conf() -> Conf {
    let cfg = Config::load(config::CONFIG_PATH);
    Conf {
        window_title: "Starfall".to_string(),
        window_width: cfg.screen_width as i32,
        window_height: cfg.screen_height as i32,
        window_resizable: false,
        high_dpi: true,
        ..Default::default()
    }
}

/// Build the level at `index` in the play order, or `None` once the
/// order is exhausted.
fn load_level(index: usize, cfg: &Config) -> Option<Box<dyn Level>> {
    let name = LEVEL_ORDER.get(index)?;
    println!("Loading level {}: {}", index + 1, name);
    create_level_by_name(name, cfg)
}

/// Hold the frame until the target frame time has elapsed: sleep for the
/// bulk, then spin for precision. WASM has no sleep, so it just spins and
/// lets the browser pace frames.
fn limit_frame_rate(frame_start: f64, target_frame_time: f64) {
    let elapsed = get_time() - frame_start;
    if elapsed >= target_frame_time {
        return;
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let spin_margin = 0.002; // 2ms
        while get_time() - frame_start + spin_margin < target_frame_time {
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        while get_time() - frame_start < target_frame_time {
            std::hint::spin_loop();
        }
    }
    #[cfg(target_arch = "wasm32")]
    {
        while get_time() - frame_start < target_frame_time {
            // Busy wait - browser will handle frame pacing
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let cfg = Config::load(config::CONFIG_PATH);
    let assets = Assets::load(&cfg).await;

    // Intro screen: fixed real-time pause before the first level
    let intro_start = get_time();
    while get_time() - intro_start < cfg.intro_seconds {
        clear_background(BLACK);
        assets.draw_label_centered(
            "Welcome to Starfall!",
            cfg.screen_width * 0.5,
            cfg.screen_height * 0.5,
            48,
            WHITE,
        );
        next_frame().await;
    }

    let mut level_index = 0;
    let mut current = load_level(level_index, &cfg);
    if current.is_none() {
        eprintln!("Could not construct the initial level, shutting down");
        return;
    }

    let mut show_end_screen = false;
    let mut last_time = get_time();

    loop {
        let frame_start = get_time();
        let dt = (frame_start - last_time) as f32;
        last_time = frame_start;

        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        if let Some(level) = current.as_mut() {
            let intent = Intent::sample();
            match level.update(intent, dt) {
                Outcome::None => {}
                Outcome::Completed => {
                    println!(
                        "Level {} ({}) completed",
                        level_index + 1,
                        LEVEL_ORDER[level_index]
                    );
                    level_index += 1;
                    current = load_level(level_index, &cfg);
                    if current.is_none() {
                        println!("All levels completed!");
                        break;
                    }
                }
                Outcome::Restart => {
                    println!("Restarting level {}", level_index + 1);
                    current = load_level(level_index, &cfg);
                    if current.is_none() {
                        eprintln!("Could not rebuild level {}", level_index + 1);
                        break;
                    }
                }
                Outcome::ShowEndMessage => {
                    println!("All stars caught, the game is over!");
                    show_end_screen = true;
                    current = None;
                }
            }
        }

        clear_background(BLACK);
        if let Some(level) = &current {
            level.draw(&assets);
        } else if show_end_screen {
            assets.draw_label_centered(
                "The End",
                cfg.screen_width * 0.5,
                cfg.screen_height * 0.5,
                60,
                RED,
            );
        }

        limit_frame_rate(frame_start, cfg.frame_time());
        next_frame().await;
    }
}
