//! Level components
//!
//! The interactive objects a level can contain, as plain data structs:
//! solids block the player, falling obstacles punish contact, stars are
//! collectibles, and the portal is the exit. Behavior that runs every
//! frame lives in each struct's `update`; the closed [`Component`] enum
//! dispatches to it with one uniform signature instead of probing objects
//! for update methods at runtime.

use macroquad::prelude::*;
use macroquad::rand::gen_range;

use crate::assets::Assets;
use crate::geometry::Rect;

/// Vertical band above the screen where obstacles respawn
const OBSTACLE_RESPAWN_CEILING: f32 = -300.0;
/// Vertical band above the screen where falling stars respawn
const STAR_RESPAWN_CEILING: f32 = -400.0;
/// Rendered size of a star's bounding box
const STAR_SIZE: f32 = 35.0;

/// Immutable level geometry that blocks player movement.
#[derive(Debug, Clone, Copy)]
pub struct Solid {
    pub rect: Rect,
    /// Kept for parity with level data; collision ignores it and solids
    /// block movement whether drawn or not.
    pub visible: bool,
}

impl Solid {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            visible: true,
        }
    }

    pub fn draw(&self, offset: (f32, f32)) {
        let r = self.rect;
        draw_rectangle(r.x - offset.0, r.y - offset.1, r.w, r.h, BLUE);
    }
}

/// A hazard that falls from above the screen and wraps back to the top.
#[derive(Debug, Clone, Copy)]
pub struct FallingObstacle {
    pub rect: Rect,
    /// Fall speed in pixels per frame
    pub speed: f32,
    screen_width: f32,
    screen_height: f32,
}

impl FallingObstacle {
    pub fn new(width: f32, height: f32, speed: f32, screen_width: f32, screen_height: f32) -> Self {
        let mut obstacle = Self {
            rect: Rect::new(0.0, 0.0, width, height),
            speed,
            screen_width,
            screen_height,
        };
        obstacle.reset_pos();
        obstacle
    }

    pub fn update(&mut self) {
        self.rect.y += self.speed;
        if self.rect.y > self.screen_height {
            self.reset_pos();
        }
    }

    /// Move to a random column just above the visible screen.
    pub fn reset_pos(&mut self) {
        self.rect.x = gen_range(0.0, self.screen_width - self.rect.w);
        self.rect.y = gen_range(OBSTACLE_RESPAWN_CEILING, -self.rect.h);
    }

    pub fn draw(&self, offset: (f32, f32)) {
        let r = self.rect;
        draw_rectangle(r.x - offset.0, r.y - offset.1, r.w, r.h, WHITE);
    }
}

/// A collectible star. Static stars sit in place until collected; falling
/// stars rain from the top of the screen and respawn instead of being
/// removed. Rotation is purely cosmetic and never affects the collision
/// box, which stays axis-aligned at the original size.
#[derive(Debug, Clone, Copy)]
pub struct Star {
    pub rect: Rect,
    /// Current rotation angle in degrees
    pub angle: f32,
    /// Degrees added per frame
    pub rotation_speed: f32,
    pub falling: bool,
    /// Fall speed in pixels per frame (zero for static stars)
    pub speed: f32,
    screen_width: f32,
    screen_height: f32,
}

impl Star {
    /// A static collectible star centered on the given point.
    pub fn new(center_x: f32, center_y: f32, screen_width: f32, screen_height: f32) -> Self {
        Self {
            rect: Rect::centered(center_x, center_y, STAR_SIZE, STAR_SIZE),
            angle: gen_range(0.0, 360.0),
            rotation_speed: gen_range(0.5, 2.0),
            falling: false,
            speed: 0.0,
            screen_width,
            screen_height,
        }
    }

    /// A falling star that starts above the screen and respawns forever.
    pub fn falling(speed: f32, screen_width: f32, screen_height: f32) -> Self {
        let mut star = Self::new(0.0, 0.0, screen_width, screen_height);
        star.falling = true;
        star.speed = speed;
        star.reset_pos();
        star
    }

    pub fn update(&mut self) {
        self.angle = (self.angle + self.rotation_speed) % 360.0;
        if self.falling {
            self.rect.y += self.speed;
            if self.rect.y > self.screen_height {
                self.reset_pos();
            }
        }
    }

    /// Move to a random column just above the visible screen.
    pub fn reset_pos(&mut self) {
        self.rect.x = gen_range(0.0, self.screen_width - self.rect.w);
        self.rect.y = gen_range(STAR_RESPAWN_CEILING, -self.rect.h);
    }

    pub fn draw(&self, assets: &Assets, offset: (f32, f32)) {
        let r = self.rect;
        if let Some(texture) = &assets.star {
            draw_texture_ex(
                texture,
                r.x - offset.0,
                r.y - offset.1,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(r.w, r.h)),
                    rotation: self.angle.to_radians(),
                    ..Default::default()
                },
            );
        } else {
            // Placeholder: a spinning five-pointed polygon
            draw_poly(
                r.center_x() - offset.0,
                r.center_y() - offset.1,
                5,
                r.w * 0.5,
                self.angle,
                GOLD,
            );
        }
    }
}

/// Goal marker that ends the level on contact. Spawned lazily once the
/// level's collection requirement is met, and cycles through the hue
/// wheel based on measured wall-clock time so the animation speed does
/// not depend on the frame rate.
#[derive(Debug, Clone, Copy)]
pub struct Portal {
    pub rect: Rect,
    /// Current hue in degrees, always in [0, 360)
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
    /// Hue revolutions per second
    pub color_change_speed: f32,
}

impl Portal {
    pub fn new(x: f32, y: f32, w: f32, h: f32, color_change_speed: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            hue: 0.0,
            saturation: 1.0,
            value: 1.0,
            color_change_speed,
        }
    }

    /// Advance the hue by the elapsed wall-clock time. Splitting a time
    /// span across multiple calls lands on the same hue as one big call.
    pub fn update(&mut self, dt: f32) {
        self.hue = (self.hue + self.color_change_speed * 360.0 * dt).rem_euclid(360.0);
    }

    /// Current color of the portal, recomputed from HSV each frame.
    pub fn color(&self) -> Color {
        hsv_to_rgb(self.hue, self.saturation, self.value)
    }

    pub fn draw(&self, offset: (f32, f32)) {
        let r = self.rect;
        draw_rectangle(r.x - offset.0, r.y - offset.1, r.w, r.h, self.color());
    }
}

/// Convert an HSV color (hue in degrees) to RGB.
fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> Color {
    let h = hue.rem_euclid(360.0) / 60.0;
    let sector = h.floor();
    let f = h - sector;
    let p = value * (1.0 - saturation);
    let q = value * (1.0 - saturation * f);
    let t = value * (1.0 - saturation * (1.0 - f));
    let (r, g, b) = match sector as i32 % 6 {
        0 => (value, t, p),
        1 => (q, value, p),
        2 => (p, value, t),
        3 => (p, q, value),
        4 => (t, p, value),
        _ => (value, p, q),
    };
    Color::new(r, g, b, 1.0)
}

/// Closed set of interactive component kinds a level can own. Dispatch is
/// a variant match with one update signature; only the portal consumes
/// the elapsed time, the others step once per frame.
#[derive(Debug, Clone, Copy)]
pub enum Component {
    Obstacle(FallingObstacle),
    Star(Star),
    Portal(Portal),
}

impl Component {
    pub fn update(&mut self, dt: f32) {
        match self {
            Component::Obstacle(obstacle) => obstacle.update(),
            Component::Star(star) => star.update(),
            Component::Portal(portal) => portal.update(dt),
        }
    }

    pub fn rect(&self) -> Rect {
        match self {
            Component::Obstacle(obstacle) => obstacle.rect,
            Component::Star(star) => star.rect,
            Component::Portal(portal) => portal.rect,
        }
    }

    pub fn draw(&self, assets: &Assets, offset: (f32, f32)) {
        match self {
            Component::Obstacle(obstacle) => obstacle.draw(offset),
            Component::Star(star) => star.draw(assets, offset),
            Component::Portal(portal) => portal.draw(offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obstacle_starts_above_screen() {
        let obstacle = FallingObstacle::new(5.0, 20.0, 4.0, 800.0, 600.0);
        assert!(obstacle.rect.y < 0.0);
        assert!(obstacle.rect.x >= 0.0 && obstacle.rect.x <= 800.0 - 5.0);
    }

    #[test]
    fn test_obstacle_falls_each_update() {
        let mut obstacle = FallingObstacle::new(5.0, 20.0, 4.0, 800.0, 600.0);
        let start_y = obstacle.rect.y;
        obstacle.update();
        assert_eq!(obstacle.rect.y, start_y + 4.0);
    }

    #[test]
    fn test_obstacle_respawns_after_leaving_screen() {
        let mut obstacle = FallingObstacle::new(5.0, 20.0, 4.0, 800.0, 600.0);
        // Fall until the top edge passes the bottom of the screen, then the
        // next update must pull it back above the top. Generous iteration
        // cap: worst case start is -300 with speed 4.
        let mut left_screen = false;
        for _ in 0..2000 {
            obstacle.update();
            if obstacle.rect.y > 600.0 {
                left_screen = true;
                obstacle.update();
                assert!(obstacle.rect.y < 0.0, "respawn must move it above the top");
                break;
            }
        }
        assert!(left_screen, "obstacle never left the screen");
    }

    #[test]
    fn test_static_star_spins_but_does_not_move() {
        let mut star = Star::new(300.0, 150.0, 800.0, 600.0);
        let rect_before = star.rect;
        let angle_before = star.angle;
        star.update();
        assert_eq!(star.rect, rect_before);
        assert_ne!(star.angle, angle_before);
    }

    #[test]
    fn test_star_is_centered_on_spawn_point() {
        let star = Star::new(300.0, 150.0, 800.0, 600.0);
        assert_eq!(star.rect.center_x(), 300.0);
        assert_eq!(star.rect.center_y(), 150.0);
    }

    #[test]
    fn test_falling_star_respawns_above_screen() {
        let mut star = Star::falling(3.0, 800.0, 600.0);
        assert!(star.rect.y < 0.0);
        let mut left_screen = false;
        for _ in 0..2000 {
            star.update();
            if star.rect.y > 600.0 {
                left_screen = true;
                star.update();
                assert!(star.rect.y < 0.0);
                break;
            }
        }
        assert!(left_screen, "falling star never left the screen");
    }

    #[test]
    fn test_rotation_wraps_at_360() {
        let mut star = Star::new(0.0, 0.0, 800.0, 600.0);
        star.angle = 359.5;
        star.rotation_speed = 1.0;
        star.update();
        assert!(star.angle < 360.0);
    }

    #[test]
    fn test_portal_hue_advances_and_wraps() {
        let mut portal = Portal::new(0.0, 0.0, 50.0, 50.0, 0.2);
        // 0.2 rev/s * 360 deg * 10 s = 720 deg, wraps twice back to 0
        portal.update(10.0);
        assert!((portal.hue - 0.0).abs() < 1e-3);
        portal.update(2.5);
        assert!((portal.hue - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_portal_hue_is_additive_under_time_splitting() {
        let mut split = Portal::new(0.0, 0.0, 50.0, 50.0, 0.2);
        let mut whole = Portal::new(0.0, 0.0, 50.0, 50.0, 0.2);
        split.update(0.3);
        split.update(0.1);
        split.update(0.35);
        whole.update(0.75);
        assert!((split.hue - whole.hue).abs() < 1e-3);
    }

    #[test]
    fn test_portal_color_covers_hue_wheel() {
        let mut portal = Portal::new(0.0, 0.0, 50.0, 50.0, 1.0);
        let red = portal.color();
        assert!(red.r > 0.99 && red.g < 0.01 && red.b < 0.01);

        portal.hue = 120.0;
        let green = portal.color();
        assert!(green.g > 0.99 && green.r < 0.01);

        portal.hue = 240.0;
        let blue = portal.color();
        assert!(blue.b > 0.99 && blue.r < 0.01);
    }

    #[test]
    fn test_component_dispatch_matches_inner_update() {
        let mut component = Component::Portal(Portal::new(0.0, 0.0, 10.0, 10.0, 0.5));
        component.update(1.0);
        match component {
            Component::Portal(portal) => assert!((portal.hue - 180.0).abs() < 1e-3),
            _ => unreachable!(),
        }
    }
}
