//! Maze level
//!
//! A top-down maze parsed from a plain text tile grid. `#` is a wall,
//! `P` the player start, `*` a star centered in its tile, `E` the exit
//! where the portal appears; anything else is open floor. The camera
//! follows the player by offsetting everything drawn; the offset is
//! render-only and never touches collision.
//!
//! A missing or empty layout file is not fatal: the level falls back to
//! a degenerate single-wall layout with the player start and exit
//! coincident at the origin, and stays playable.

use std::fmt;
use std::fs;
use std::path::Path;

use macroquad::prelude::WHITE;

use crate::assets::Assets;
use crate::components::{Component, Portal, Solid, Star};
use crate::config::Config;
use crate::input::Intent;
use crate::level::{collect_stars, ComponentSet, Level, Outcome};
use crate::player::Player;

/// Why a layout file could not be used. Callers fall back to the
/// degenerate layout instead of propagating this.
#[derive(Debug)]
pub enum LayoutError {
    Io(std::io::Error),
    /// The file exists but holds no usable rows
    Empty,
}

impl From<std::io::Error> for LayoutError {
    fn from(e: std::io::Error) -> Self {
        LayoutError::Io(e)
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::Io(e) => write!(f, "IO error: {}", e),
            LayoutError::Empty => write!(f, "layout has no rows"),
        }
    }
}

/// Read a layout file into rows, stripping line-ending whitespace.
fn load_layout(path: &Path) -> Result<Vec<String>, LayoutError> {
    let contents = fs::read_to_string(path)?;
    let rows: Vec<String> = contents
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect();
    if rows.iter().all(|row| row.is_empty()) {
        return Err(LayoutError::Empty);
    }
    Ok(rows)
}

pub struct MazeLevel {
    pub player: Player,
    pub walls: Vec<Solid>,
    pub components: ComponentSet,
    /// Component indices of the stars, parallel to `collected`
    pub star_slots: Vec<usize>,
    pub collected: Vec<bool>,
    pub portal_slot: Option<usize>,
    pub start: (f32, f32),
    /// Exit tile position; `None` means the grid had no `E`
    pub end: Option<(f32, f32)>,
    tile_size: f32,
    portal_color_speed: f32,
    screen_width: f32,
    screen_height: f32,
}

impl MazeLevel {
    pub fn new(cfg: &Config) -> Self {
        match load_layout(Path::new(&cfg.maze_layout_path)) {
            Ok(rows) => Self::from_grid(cfg, &rows),
            Err(e) => {
                eprintln!(
                    "Maze layout '{}' unusable ({}), using fallback layout",
                    cfg.maze_layout_path, e
                );
                Self::fallback(cfg)
            }
        }
    }

    /// Build a maze directly from grid rows.
    pub fn from_grid(cfg: &Config, rows: &[String]) -> Self {
        let tile = cfg.tile_size;
        let mut walls = Vec::new();
        let mut components = ComponentSet::new();
        let mut star_slots = Vec::new();
        let mut start = (0.0, 0.0);
        let mut end = None;

        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let x = col as f32 * tile;
                let y = row as f32 * tile;
                match ch {
                    '#' => walls.push(Solid::new(x, y, tile, tile)),
                    'P' => start = (x, y),
                    '*' => {
                        let slot = components.insert(Component::Star(Star::new(
                            x + tile * 0.5,
                            y + tile * 0.5,
                            cfg.screen_width,
                            cfg.screen_height,
                        )));
                        star_slots.push(slot);
                    }
                    'E' => end = Some((x, y)),
                    _ => {}
                }
            }
        }

        let collected = vec![false; star_slots.len()];
        Self::assemble(cfg, walls, components, star_slots, collected, start, end)
    }

    /// Degenerate layout used when the real one cannot be read: one wall
    /// tile, player start and exit both at the origin.
    fn fallback(cfg: &Config) -> Self {
        let tile = cfg.tile_size;
        let walls = vec![Solid::new(0.0, 0.0, tile, tile)];
        Self::assemble(
            cfg,
            walls,
            ComponentSet::new(),
            Vec::new(),
            Vec::new(),
            (0.0, 0.0),
            Some((0.0, 0.0)),
        )
    }

    fn assemble(
        cfg: &Config,
        walls: Vec<Solid>,
        components: ComponentSet,
        star_slots: Vec<usize>,
        collected: Vec<bool>,
        start: (f32, f32),
        end: Option<(f32, f32)>,
    ) -> Self {
        // Maze player is smaller than a tile so it can thread corridors
        let size = (cfg.tile_size * 0.7).floor();
        let player = Player::new(start.0, start.1, size, size, cfg);

        Self {
            player,
            walls,
            components,
            star_slots,
            collected,
            portal_slot: None,
            start,
            end,
            tile_size: cfg.tile_size,
            portal_color_speed: cfg.portal_color_speed,
            screen_width: cfg.screen_width,
            screen_height: cfg.screen_height,
        }
    }

    fn all_collected(&self) -> bool {
        self.collected.iter().all(|&c| c)
    }

    /// Camera offset that keeps the player centered. Render-only.
    fn camera_offset(&self) -> (f32, f32) {
        let rect = self.player.rect();
        (
            rect.center_x() - self.screen_width * 0.5,
            rect.center_y() - self.screen_height * 0.5,
        )
    }
}

impl Level for MazeLevel {
    fn update(&mut self, intent: Intent, dt: f32) -> Outcome {
        self.player.update_topdown(intent, &self.walls);

        collect_stars(
            self.player.rect(),
            &mut self.components,
            &self.star_slots,
            &mut self.collected,
        );

        self.components.update_all(dt);

        if let Some((end_x, end_y)) = self.end {
            if self.all_collected() && self.portal_slot.is_none() {
                let slot = self.components.insert(Component::Portal(Portal::new(
                    end_x,
                    end_y,
                    self.tile_size,
                    self.tile_size,
                    self.portal_color_speed,
                )));
                self.portal_slot = Some(slot);
                println!("Portal spawned in the maze");
            }
        }

        if let Some(Component::Portal(portal)) =
            self.portal_slot.and_then(|slot| self.components.get(slot))
        {
            if self.player.rect().intersects(&portal.rect) {
                println!("Maze level completed");
                return Outcome::Completed;
            }
        }

        Outcome::None
    }

    fn draw(&self, assets: &Assets) {
        let offset = self.camera_offset();

        for wall in &self.walls {
            wall.draw(offset);
        }
        for component in self.components.iter_alive() {
            component.draw(assets, offset);
        }
        self.player.draw(assets, offset);

        let progress = format!(
            "Collected: {}/{}",
            self.collected.iter().filter(|&&c| c).count(),
            self.collected.len()
        );
        assets.draw_label(&progress, 10.0, 34.0, 24, WHITE);
    }
}
