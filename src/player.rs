//! Player controller
//!
//! Owns float-precision position and velocity and resolves collisions
//! against level solids one axis at a time: move on X, clamp against
//! anything overlapped, then move on Y and clamp again. Resolving the
//! axes independently can snag on outside corners, which is the expected
//! behavior for this genre.
//!
//! There are two movement modes with deliberately different collision
//! policies: the side-scroller clamps the player flush against the
//! contact edge, while the top-down maze reverts the whole axis move.
//! They feel different at walls and must not be unified.

use macroquad::prelude::*;

use crate::assets::Assets;
use crate::components::Solid;
use crate::config::Config;
use crate::geometry::Rect;
use crate::input::Intent;

/// The player entity: one per level.
#[derive(Debug, Clone)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed_x: f32,
    pub speed_y: f32,
    pub on_ground: bool,
    pub move_speed: f32,
    pub gravity: f32,
    pub jump_strength: f32,
    pub max_fall_speed: f32,
}

impl Player {
    pub fn new(x: f32, y: f32, width: f32, height: f32, cfg: &Config) -> Self {
        Self {
            x,
            y,
            width,
            height,
            speed_x: 0.0,
            speed_y: 0.0,
            on_ground: false,
            move_speed: cfg.player_speed,
            gravity: cfg.gravity,
            jump_strength: cfg.jump_strength,
            max_fall_speed: cfg.max_fall_speed,
        }
    }

    /// Current bounding box, derived from position.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Side-scrolling update: horizontal intent, jump, gravity, then
    /// axis-separated move-and-collide with clamp-to-edge resolution.
    pub fn update_sidescroll(&mut self, intent: Intent, solids: &[Solid]) {
        self.speed_x = 0.0;
        if intent.left {
            self.speed_x = -self.move_speed;
        }
        if intent.right {
            self.speed_x = self.move_speed;
        }
        if intent.jump && self.on_ground {
            self.jump();
        }

        self.apply_gravity();

        // Horizontal pass: clamp the box flush against whatever it hit.
        self.x += self.speed_x;
        for solid in solids {
            if self.rect().intersects(&solid.rect) {
                if self.speed_x > 0.0 {
                    self.x = solid.rect.x - self.width;
                } else if self.speed_x < 0.0 {
                    self.x = solid.rect.right();
                }
                self.speed_x = 0.0;
            }
        }

        // Vertical pass: grounded state is re-derived every frame.
        self.y += self.speed_y;
        self.on_ground = false;
        for solid in solids {
            if self.rect().intersects(&solid.rect) {
                if self.speed_y > 0.0 {
                    self.y = solid.rect.y - self.height;
                    self.on_ground = true;
                } else if self.speed_y < 0.0 {
                    self.y = solid.rect.bottom();
                }
                self.speed_y = 0.0;
            }
        }
    }

    /// Top-down maze update: four-directional movement, no gravity or
    /// jump. A blocked axis move is undone entirely rather than clamped.
    pub fn update_topdown(&mut self, intent: Intent, solids: &[Solid]) {
        let old_x = self.x;
        let old_y = self.y;

        self.speed_x = 0.0;
        self.speed_y = 0.0;
        if intent.left {
            self.speed_x = -self.move_speed;
        }
        if intent.right {
            self.speed_x = self.move_speed;
        }
        if intent.up {
            self.speed_y = -self.move_speed;
        }
        if intent.down {
            self.speed_y = self.move_speed;
        }

        self.x += self.speed_x;
        if solids.iter().any(|s| self.rect().intersects(&s.rect)) {
            self.x = old_x;
        }

        self.y += self.speed_y;
        if solids.iter().any(|s| self.rect().intersects(&s.rect)) {
            self.y = old_y;
        }
    }

    /// Start a jump. Callers are responsible for checking `on_ground`.
    pub fn jump(&mut self) {
        self.speed_y = self.jump_strength;
        self.on_ground = false;
    }

    fn apply_gravity(&mut self) {
        self.speed_y += self.gravity;
        if self.speed_y > self.max_fall_speed {
            self.speed_y = self.max_fall_speed;
        }
    }

    /// Teleport to a position with all motion cleared. Used after a
    /// hazard hit sends the player back to the level start.
    pub fn reset_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.speed_x = 0.0;
        self.speed_y = 0.0;
        self.on_ground = false;
    }

    pub fn draw(&self, assets: &Assets, offset: (f32, f32)) {
        if let Some(texture) = &assets.player {
            draw_texture_ex(
                texture,
                self.x - offset.0,
                self.y - offset.1,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(self.width, self.height)),
                    ..Default::default()
                },
            );
        } else {
            draw_rectangle(
                self.x - offset.0,
                self.y - offset.1,
                self.width,
                self.height,
                RED,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_player() -> Player {
        Player::new(10.0, 10.0, 30.0, 40.0, &Config::default())
    }

    #[test]
    fn test_jump_sets_velocity_and_leaves_ground() {
        let mut player = test_player();
        player.on_ground = true;
        player.jump();
        assert_eq!(player.speed_y, player.jump_strength);
        assert!(!player.on_ground);
    }

    #[test]
    fn test_jump_intent_ignored_in_the_air() {
        let mut player = test_player();
        player.on_ground = false;
        let before = player.speed_y;
        player.update_sidescroll(
            Intent {
                jump: true,
                ..Default::default()
            },
            &[],
        );
        // Gravity still applies, but no jump impulse
        assert_eq!(player.speed_y, before + player.gravity);
    }

    #[test]
    fn test_reset_position_clears_all_motion() {
        let mut player = test_player();
        player.speed_x = 5.0;
        player.speed_y = -3.0;
        player.on_ground = true;
        player.reset_position(50.0, 60.0);
        assert_eq!((player.x, player.y), (50.0, 60.0));
        assert_eq!((player.speed_x, player.speed_y), (0.0, 0.0));
        assert!(!player.on_ground);
    }

    #[test]
    fn test_gravity_is_clamped_to_max_fall_speed() {
        let mut player = test_player();
        for _ in 0..100 {
            player.update_sidescroll(Intent::default(), &[]);
        }
        assert_eq!(player.speed_y, player.max_fall_speed);
    }

    #[test]
    fn test_falling_player_lands_on_solid() {
        let mut player = test_player();
        let ground = Solid::new(0.0, 200.0, 400.0, 20.0);
        for _ in 0..200 {
            player.update_sidescroll(Intent::default(), &[ground]);
        }
        assert!(player.on_ground);
        assert_eq!(player.y, 200.0 - player.height);
        assert_eq!(player.speed_y, 0.0);
        assert!(!player.rect().intersects(&ground.rect));
    }

    #[test]
    fn test_walking_into_wall_clamps_to_edge() {
        let mut player = test_player();
        let ground = Solid::new(0.0, 50.0, 400.0, 20.0);
        let wall = Solid::new(100.0, 0.0, 20.0, 50.0);
        player.y = 50.0 - player.height;
        player.on_ground = true;
        let solids = [ground, wall];
        for _ in 0..50 {
            player.update_sidescroll(
                Intent {
                    right: true,
                    ..Default::default()
                },
                &solids,
            );
        }
        assert_eq!(player.x, wall.rect.x - player.width);
        assert!(!player.rect().intersects(&wall.rect));
    }

    #[test]
    fn test_topdown_blocked_move_is_reverted_not_clamped() {
        let mut player = test_player();
        let wall = Solid::new(0.0, 0.0, 20.0, 200.0);
        player.x = 30.0;
        player.y = 50.0;
        player.update_topdown(
            Intent {
                left: true,
                ..Default::default()
            },
            &[],
        );
        // Sanity: free top-down move first
        assert_eq!(player.x, 25.0);
        // Blocked: the whole move is undone (clamping would snap to 20)
        player.x = 22.0;
        player.update_topdown(
            Intent {
                left: true,
                ..Default::default()
            },
            &[wall],
        );
        assert_eq!(player.x, 22.0);
    }

    #[test]
    fn test_rising_player_bumps_head_on_solid() {
        let mut player = test_player();
        let ceiling = Solid::new(0.0, 0.0, 400.0, 20.0);
        player.y = 30.0;
        player.speed_y = 0.0;
        player.on_ground = true;
        player.update_sidescroll(
            Intent {
                jump: true,
                ..Default::default()
            },
            &[ceiling],
        );
        assert_eq!(player.y, ceiling.rect.bottom());
        assert_eq!(player.speed_y, 0.0);
    }

    #[test]
    fn test_topdown_four_directional_movement() {
        let mut player = test_player();
        player.update_topdown(
            Intent {
                down: true,
                right: true,
                ..Default::default()
            },
            &[],
        );
        assert_eq!(player.x, 10.0 + player.move_speed);
        assert_eq!(player.y, 10.0 + player.move_speed);
    }

    #[test]
    fn test_topdown_has_no_gravity() {
        let mut player = test_player();
        for _ in 0..10 {
            player.update_topdown(Intent::default(), &[]);
        }
        assert_eq!(player.y, 10.0);
        assert_eq!(player.speed_y, 0.0);
    }
}
