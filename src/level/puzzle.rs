//! Survival level
//!
//! A single ground solid, a rain of falling obstacles, and a repeating
//! falling star. Catching the star three times wins the whole game;
//! every obstacle hit costs a life and sends the player back to the
//! start, and running out of lives rebuilds the level from scratch.

use macroquad::prelude::{RED, YELLOW};
use macroquad::rand::gen_range;

use crate::assets::Assets;
use crate::components::{Component, FallingObstacle, Solid, Star};
use crate::config::Config;
use crate::input::Intent;
use crate::level::{ComponentSet, Level, Outcome};
use crate::player::Player;

const OBSTACLE_COUNT: usize = 7;
const OBSTACLE_WIDTH: f32 = 5.0;
const OBSTACLE_HEIGHT: f32 = 20.0;
const FALLING_STAR_COUNT: usize = 1;
const STARTING_LIVES: u32 = 3;
const STAR_GOAL: u32 = 3;
/// Side length of one HUD life marker
const HEART_SIZE: f32 = 25.0;

pub struct PuzzleLevel {
    pub player: Player,
    pub solids: Vec<Solid>,
    pub components: ComponentSet,
    /// Component indices of the falling obstacles
    pub obstacle_slots: Vec<usize>,
    /// Component indices of the repeating falling stars
    pub falling_star_slots: Vec<usize>,
    pub lives: u32,
    pub collected_falling_stars: u32,
    pub star_goal: u32,
    pub start_pos: (f32, f32),
    screen_width: f32,
}

impl PuzzleLevel {
    pub fn new(cfg: &Config) -> Self {
        let start_pos = (100.0, 500.0 - cfg.player_height);
        let player = Player::new(
            start_pos.0,
            start_pos.1,
            cfg.player_width,
            cfg.player_height,
            cfg,
        );
        let solids = vec![Solid::new(
            0.0,
            cfg.screen_height - 20.0,
            cfg.screen_width,
            20.0,
        )];

        let mut components = ComponentSet::new();
        let obstacle_slots: Vec<usize> = (0..OBSTACLE_COUNT)
            .map(|_| {
                let speed = gen_range(3, 7) as f32;
                components.insert(Component::Obstacle(FallingObstacle::new(
                    OBSTACLE_WIDTH,
                    OBSTACLE_HEIGHT,
                    speed,
                    cfg.screen_width,
                    cfg.screen_height,
                )))
            })
            .collect();
        let falling_star_slots: Vec<usize> = (0..FALLING_STAR_COUNT)
            .map(|_| {
                let speed = gen_range(2, 6) as f32;
                components.insert(Component::Star(Star::falling(
                    speed,
                    cfg.screen_width,
                    cfg.screen_height,
                )))
            })
            .collect();

        Self {
            player,
            solids,
            components,
            obstacle_slots,
            falling_star_slots,
            lives: STARTING_LIVES,
            collected_falling_stars: 0,
            star_goal: STAR_GOAL,
            start_pos,
            screen_width: cfg.screen_width,
        }
    }
}

impl Level for PuzzleLevel {
    fn update(&mut self, intent: Intent, dt: f32) -> Outcome {
        self.player.update_sidescroll(intent, &self.solids);
        self.components.update_all(dt);

        // Falling stars: a catch respawns the star and counts toward the
        // goal; reaching it ends the whole game, not just this level.
        let player_rect = self.player.rect();
        for &slot in &self.falling_star_slots {
            if let Some(Component::Star(star)) = self.components.get_mut(slot) {
                if player_rect.intersects(&star.rect) {
                    self.collected_falling_stars += 1;
                    println!(
                        "Caught a star ({}/{})",
                        self.collected_falling_stars, self.star_goal
                    );
                    star.reset_pos();
                    if self.collected_falling_stars >= self.star_goal {
                        return Outcome::ShowEndMessage;
                    }
                }
            }
        }

        // Obstacles: any hit this frame costs one life, respawns every
        // hitting obstacle, and teleports the player back to the start.
        let mut hit_slots = Vec::new();
        for &slot in &self.obstacle_slots {
            if let Some(Component::Obstacle(obstacle)) = self.components.get(slot) {
                if player_rect.intersects(&obstacle.rect) {
                    hit_slots.push(slot);
                }
            }
        }
        if !hit_slots.is_empty() {
            self.lives = self.lives.saturating_sub(1);
            println!("Hit! Lives left: {}", self.lives);
            for slot in hit_slots {
                if let Some(Component::Obstacle(obstacle)) = self.components.get_mut(slot) {
                    obstacle.reset_pos();
                }
            }
            if self.lives == 0 {
                println!("Out of lives, restarting level");
                return Outcome::Restart;
            }
            self.player.reset_position(self.start_pos.0, self.start_pos.1);
        }

        Outcome::None
    }

    fn draw(&self, assets: &Assets) {
        for solid in &self.solids {
            solid.draw((0.0, 0.0));
        }
        for component in self.components.iter_alive() {
            component.draw(assets, (0.0, 0.0));
        }
        self.player.draw(assets, (0.0, 0.0));

        // Lives as red squares, right-aligned
        let first_x = self.screen_width - 10.0 - HEART_SIZE;
        for i in 0..self.lives {
            let x = first_x - i as f32 * (HEART_SIZE + 5.0);
            macroquad::prelude::draw_rectangle(x, 10.0, HEART_SIZE, HEART_SIZE, RED);
        }

        let stars = format!("Stars: {}/{}", self.collected_falling_stars, self.star_goal);
        assets.draw_label(&stars, 10.0, 34.0, 28, YELLOW);
        assets.draw_label_centered(
            "Catch the stars!",
            self.screen_width * 0.5,
            34.0,
            28,
            YELLOW,
        );
    }
}
